//! Fixed scene description shared with the renderer.
//!
//! These types avoid platform-specific APIs. The web front end consumes them to
//! build camera matrices, light uniforms and the cake mesh.

use crate::config::CakeConfig;
use crate::constants::*;
use glam::{Mat4, Vec3};

/// Right-handed camera with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Looking down at the cake from above and in front of it.
    pub fn for_cake(cake_radius: f32, aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, cake_radius * 1.5, cake_radius * 2.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SpotLight {
    pub position: Vec3,
    pub target: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    /// Half-angle of the cone in radians.
    pub angle: f32,
    pub distance: f32,
    pub penumbra: f32,
    pub decay: f32,
}

impl SpotLight {
    /// Cosines of the inner (full strength) and outer cone edges.
    pub fn cone_cosines(&self) -> (f32, f32) {
        let outer = self.angle.cos();
        let inner = (self.angle * (1.0 - self.penumbra)).cos();
        (inner, outer)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Lighting {
    pub ambient_color: Vec3,
    pub ambient_intensity: f32,
    pub spot: SpotLight,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient_color: Vec3::ONE,
            ambient_intensity: AMBIENT_INTENSITY,
            spot: SpotLight {
                position: spot_position_vec3(),
                target: Vec3::ZERO,
                color: Vec3::ONE,
                intensity: 1.0,
                angle: SPOT_ANGLE,
                distance: SPOT_DISTANCE,
                penumbra: SPOT_PENUMBRA,
                decay: SPOT_DECAY,
            },
        }
    }
}

/// Cake body: a slightly tapered cylinder centred on the origin.
#[derive(Clone, Copy, Debug)]
pub struct CakeShape {
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub segments: u32,
}

impl CakeShape {
    pub fn from_config(cfg: &CakeConfig) -> Self {
        Self {
            radius_top: cfg.cake_radius,
            radius_bottom: cfg.cake_radius - CAKE_BOTTOM_INSET,
            height: cfg.cake_radius,
            segments: CAKE_SEGMENTS,
        }
    }
}
