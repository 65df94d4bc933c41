// Page wiring and renderer settings for the browser shell.
// Pure data only: host-side tests `include!` this file.

// DOM element ids
pub const CAKE_CONTAINER_ID: &str = "cake";
pub const COUNTER_ID: &str = "candles-counter";

// Texture assets, fetched once at start-up
pub const CAKE_BODY_TEXTURE: &str = "public/cake-body.png";
pub const CAKE_TOP_TEXTURE: &str = "public/cake-topper.png";

// Used when a texture fails to load (RGBA8)
pub const FALLBACK_BODY_RGBA: [u8; 4] = [243, 214, 178, 255];
pub const FALLBACK_TOP_RGBA: [u8; 4] = [255, 240, 245, 255];

// Microphone analyser
pub const ANALYSER_FFT_SIZE: u32 = 2048;

// Renderer
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];
pub const MSAA_SAMPLES: u32 = 4; // WebGPU allows only 1 or 4
pub const CAKE_SHININESS: f32 = 30.0; // Phong default for the textured cake
pub const INITIAL_INSTANCE_CAPACITY: usize = 256;
