use std::f32::consts::TAU;
use std::ops::Range;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Indexed triangle list with per-face index ranges so each face can get its
/// own material.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub side: Range<u32>,
    pub top: Range<u32>,
    pub bottom: Range<u32>,
}

/// Capped cylinder centred on the origin along +Y, front faces wound
/// counter-clockwise.
pub fn cylinder_mesh(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let half = height * 0.5;
    let slope = (radius_bottom - radius_top) / height.max(f32::EPSILON);
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Side: one top and one bottom vertex per ring step, seam duplicated for uv.
    for i in 0..=segments {
        let u = i as f32 / segments as f32;
        let (s, c) = (u * TAU).sin_cos();
        let n = glam::Vec3::new(s, slope, c).normalize();
        vertices.push(MeshVertex {
            position: [radius_top * s, half, radius_top * c],
            normal: n.into(),
            uv: [u, 1.0],
        });
        vertices.push(MeshVertex {
            position: [radius_bottom * s, -half, radius_bottom * c],
            normal: n.into(),
            uv: [u, 0.0],
        });
    }
    for i in 0..segments {
        let a = 2 * i;
        let b = a + 1;
        let c = a + 3;
        let d = a + 2;
        indices.extend_from_slice(&[a, b, d, b, c, d]);
    }
    let side = 0..indices.len() as u32;

    let top = push_cap(&mut vertices, &mut indices, radius_top, half, segments, true);
    let bottom = push_cap(&mut vertices, &mut indices, radius_bottom, -half, segments, false);

    MeshData {
        vertices,
        indices,
        side,
        top,
        bottom,
    }
}

fn push_cap(
    vertices: &mut Vec<MeshVertex>,
    indices: &mut Vec<u32>,
    radius: f32,
    y: f32,
    segments: u32,
    up: bool,
) -> Range<u32> {
    let normal = if up { [0.0, 1.0, 0.0] } else { [0.0, -1.0, 0.0] };
    let start = indices.len() as u32;
    let center = vertices.len() as u32;
    vertices.push(MeshVertex {
        position: [0.0, y, 0.0],
        normal,
        uv: [0.5, 0.5],
    });
    for i in 0..=segments {
        let (s, c) = (i as f32 / segments as f32 * TAU).sin_cos();
        vertices.push(MeshVertex {
            position: [radius * s, y, radius * c],
            normal,
            uv: [0.5 + 0.5 * s, 0.5 + 0.5 * c],
        });
    }
    for i in 0..segments {
        let r0 = center + 1 + i;
        let r1 = r0 + 1;
        if up {
            indices.extend_from_slice(&[center, r0, r1]);
        } else {
            indices.extend_from_slice(&[center, r1, r0]);
        }
    }
    start..indices.len() as u32
}
