//! Per-frame GPU data packed from the session.
//!
//! Layouts mirror `shaders/scene.wgsl` and `shaders/flame.wgsl`; keep them in
//! sync when either side changes.

use crate::candle::Candle;
use crate::color::{rgb8_to_vec3, srgb_to_linear_vec3};
use crate::scene::{Camera, Lighting};
use glam::Vec3;

/// Length of the light array in the scene uniform block.
pub const MAX_POINT_LIGHTS: usize = 32;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightPacked {
    pub position_range: [f32; 4],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    pub camera_right: [f32; 4],
    pub camera_up: [f32; 4],
    pub ambient: [f32; 4],
    pub spot_pos: [f32; 4],
    pub spot_dir: [f32; 4],
    pub spot_color: [f32; 4],
    pub spot_cone: [f32; 4],
    pub counts: [u32; 4],
    pub lights: [PointLightPacked; MAX_POINT_LIGHTS],
}

/// Per-instance data for the lit mesh pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshInstance {
    pub offset_shine: [f32; 4],
    pub color: [f32; 4],
}

/// Per-instance data for one flame particle billboard.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FlameInstance {
    pub center_size: [f32; 4],
    pub color_opacity: [f32; 4],
}

#[inline]
fn v4(v: Vec3, w: f32) -> [f32; 4] {
    [v.x, v.y, v.z, w]
}

impl SceneUniforms {
    /// Camera, fixed lights and the first `MAX_POINT_LIGHTS` flames still glowing.
    pub fn pack(camera: &Camera, lighting: &Lighting, candles: &[Candle]) -> Self {
        let forward = (camera.target - camera.eye).normalize_or_zero();
        let right = forward.cross(camera.up).normalize_or_zero();
        let up = right.cross(forward);

        let spot = &lighting.spot;
        let (cos_inner, cos_outer) = spot.cone_cosines();
        let mut lights = [PointLightPacked::default(); MAX_POINT_LIGHTS];
        let mut count = 0usize;
        for c in candles.iter().filter(|c| c.flame.light.intensity > 0.0) {
            if count == MAX_POINT_LIGHTS {
                break;
            }
            let light = &c.flame.light;
            lights[count] = PointLightPacked {
                position_range: v4(c.light_position(), light.range),
                color: v4(srgb_to_linear_vec3(light.color) * light.intensity, 0.0),
            };
            count += 1;
        }

        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            camera_pos: v4(camera.eye, 1.0),
            camera_right: v4(right, 0.0),
            camera_up: v4(up, 0.0),
            ambient: v4(lighting.ambient_color * lighting.ambient_intensity, 0.0),
            spot_pos: v4(spot.position, spot.distance),
            spot_dir: v4((spot.target - spot.position).normalize_or_zero(), spot.decay),
            spot_color: v4(spot.color * spot.intensity, 0.0),
            spot_cone: [cos_inner, cos_outer, 0.0, 0.0],
            counts: [count as u32, 0, 0, 0],
            lights,
        }
    }
}

pub fn pack_candles(candles: &[Candle], shininess: f32, out: &mut Vec<MeshInstance>) {
    out.clear();
    out.extend(candles.iter().map(|c| MeshInstance {
        offset_shine: v4(c.position, shininess),
        color: v4(srgb_to_linear_vec3(rgb8_to_vec3(c.color)), 1.0),
    }));
}

/// One billboard per particle; fully faded flames are skipped.
pub fn pack_flames(candles: &[Candle], out: &mut Vec<FlameInstance>) {
    out.clear();
    for c in candles.iter().filter(|c| c.flame.opacity > 0.0) {
        let origin = c.position + Vec3::new(0.0, 0.0, c.flame.z_offset);
        for p in &c.flame.particles {
            out.push(FlameInstance {
                center_size: v4(origin + p.position, c.flame.point_size),
                color_opacity: v4(srgb_to_linear_vec3(p.color), c.flame.opacity),
            });
        }
    }
}
