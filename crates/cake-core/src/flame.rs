//! Flame particle cloud and its point light.
//!
//! Particle positions are local to the candle origin. The cloud never
//! simulates combustion: it is a bounded, noisy flicker envelope that sinks
//! back under `FLICKER_CEILING` and is clamped at `FLICKER_FLOOR`.

use crate::color::{hex_to_rgb, lerp_rgb};
use crate::config::FlameConfig;
use crate::constants::*;
use glam::Vec3;
use rand::Rng;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub position: Vec3,
    pub color: Vec3,
}

#[derive(Clone, Copy, Debug)]
pub struct PointLight {
    pub color: Vec3,
    pub intensity: f32,
    pub range: f32,
    pub offset: Vec3,
}

#[derive(Clone, Debug)]
pub struct Flame {
    pub particles: SmallVec<[Particle; FLAME_PARTICLES]>,
    pub point_size: f32,
    pub opacity: f32,
    /// Offset applied to the whole cloud; pushed back while being blown out.
    pub z_offset: f32,
    pub light: PointLight,
}

/// Build a cloud of `count` particles of the given point size.
pub fn create_fire<R: Rng + ?Sized>(rng: &mut R, count: usize, size: f32) -> Flame {
    let inner = hex_to_rgb(FLAME_COLOR_INNER);
    let outer = hex_to_rgb(FLAME_COLOR_OUTER);
    let particles = (0..count)
        .map(|_| Particle {
            position: Vec3::new(
                rng.gen_range(-FLAME_SPREAD..FLAME_SPREAD),
                FLAME_BASE_Y + rng.gen::<f32>() * FLAME_SPAWN_HEIGHT,
                rng.gen_range(-FLAME_SPREAD..FLAME_SPREAD),
            ),
            color: lerp_rgb(inner, outer, rng.gen::<f32>()),
        })
        .collect();
    Flame {
        particles,
        point_size: size,
        opacity: 1.0,
        z_offset: 0.0,
        light: PointLight {
            color: hex_to_rgb(FLAME_LIGHT_COLOR),
            intensity: FLAME_LIGHT_INTENSITY,
            range: FLAME_LIGHT_RANGE,
            offset: Vec3::ZERO,
        },
    }
}

impl Flame {
    pub fn from_config<R: Rng + ?Sized>(rng: &mut R, cfg: &FlameConfig, tip: Vec3) -> Self {
        let mut flame = create_fire(rng, cfg.particle_count, cfg.point_size);
        flame.light = PointLight {
            color: hex_to_rgb(cfg.light_color),
            intensity: cfg.light_intensity,
            range: cfg.light_range,
            offset: tip,
        };
        flame
    }

    /// One frame of flicker.
    pub fn drift<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for p in self.particles.iter_mut() {
            p.position.x += rng.gen_range(-FLICKER_JITTER_XZ..FLICKER_JITTER_XZ);
            p.position.z += rng.gen_range(-FLICKER_JITTER_XZ..FLICKER_JITTER_XZ);
            if p.position.y > FLICKER_CEILING {
                p.position.y -= FLICKER_SINK;
            } else {
                p.position.y += rng.gen_range(-FLICKER_JITTER_Y..FLICKER_JITTER_Y);
            }
            if p.position.y < FLICKER_FLOOR {
                p.position.y = FLICKER_FLOOR;
            }
        }
    }

    /// One frame of blowing out. Returns true once the light is out.
    pub fn fade(&mut self, step: f32) -> bool {
        self.light.intensity -= step;
        self.z_offset -= step;
        self.opacity = (self.opacity - step).max(0.0);
        self.is_out()
    }

    #[inline]
    pub fn is_out(&self) -> bool {
        self.light.intensity <= 0.0
    }
}
