use glam::Vec3;
use std::time::Duration;

// Shared scene and animation tuning constants. Per-frame steps are in world
// units per tick; the loop is fixed-step at display refresh.

// Cake
pub const CAKE_RADIUS: f32 = 5.0;
pub const CAKE_BOTTOM_INSET: f32 = 0.2; // bottom radius = top radius - inset
pub const CAKE_SEGMENTS: u32 = 32;
pub const CANDLE_EDGE_MARGIN: f32 = 0.5; // keep candles this far inside the rim
pub const DROP_HEIGHT_ABOVE_CAKE: f32 = 5.0; // spawn height = radius + this

// Candle motion
pub const CANDLE_FALL_STEP: f32 = 0.1;
pub const BLOW_FADE_STEP: f32 = 0.2;
pub const REMOVAL_DELAY: Duration = Duration::from_millis(2000);

// Candle body
pub const CANDLE_RADIUS_TOP: f32 = 0.1;
pub const CANDLE_RADIUS_BOTTOM: f32 = 0.08;
pub const CANDLE_HEIGHT: f32 = 1.5;
pub const CANDLE_SEGMENTS: u32 = 12;
pub const CANDLE_SHININESS: f32 = 60.0;

// Wax palette: every channel is drawn from [PASTEL_BASE, 255]
pub const PASTEL_BASE: u8 = 200;

// Flame particles
pub const FLAME_PARTICLES: usize = 10;
pub const FLAME_POINT_SIZE: f32 = 0.3;
pub const FLAME_SPREAD: f32 = 0.15; // half-width of the spawn square on x/z
pub const FLAME_BASE_Y: f32 = 0.75;
pub const FLAME_SPAWN_HEIGHT: f32 = 0.1;
pub const FLAME_COLOR_INNER: u32 = 0xffcc00;
pub const FLAME_COLOR_OUTER: u32 = 0xff2200;

// Flame flicker
pub const FLICKER_JITTER_XZ: f32 = 0.005;
pub const FLICKER_JITTER_Y: f32 = 0.01;
pub const FLICKER_CEILING: f32 = 2.0;
pub const FLICKER_SINK: f32 = 0.03;
pub const FLICKER_FLOOR: f32 = 0.75;

// Flame light
pub const FLAME_LIGHT_COLOR: u32 = 0xff8000;
pub const FLAME_LIGHT_INTENSITY: f32 = 1.5;
pub const FLAME_LIGHT_RANGE: f32 = 3.0;

// Blow detection
pub const BLOW_BANDS_HZ: [f32; 3] = [100.0, 200.0, 300.0];
pub const BLOW_THRESHOLD: f32 = 200.0; // on the 0..255 byte spectrum
pub const BLOW_MAX_DELAY_MS: u64 = 500;
pub const BLOW_MAX_EXTINGUISH: usize = 3;

// Camera
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Lighting
pub const AMBIENT_INTENSITY: f32 = 0.1;
pub const SPOT_POSITION: [f32; 3] = [0.0, -5.0, 15.0];
pub const SPOT_ANGLE: f32 = std::f32::consts::FRAC_PI_6;
pub const SPOT_DISTANCE: f32 = 30.0;
pub const SPOT_PENUMBRA: f32 = 0.5;
pub const SPOT_DECAY: f32 = 2.0;

#[inline]
pub fn spot_position_vec3() -> Vec3 {
    Vec3::new(SPOT_POSITION[0], SPOT_POSITION[1], SPOT_POSITION[2])
}
