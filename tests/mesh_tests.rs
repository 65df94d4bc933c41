// Host-side tests for cake geometry, camera and per-frame GPU packing.

use cake_core::*;
use glam::Vec3;
use std::time::Duration;

#[test]
fn cylinder_counts_and_face_ranges() {
    let s = 32u32;
    let mesh = cylinder_mesh(5.0, 4.8, 5.0, s);
    assert_eq!(mesh.vertices.len() as u32, 4 * s + 6);
    assert_eq!(mesh.indices.len() as u32, 12 * s);
    assert_eq!(mesh.side, 0..6 * s);
    assert_eq!(mesh.top, 6 * s..9 * s);
    assert_eq!(mesh.bottom, 9 * s..12 * s);
    let n = mesh.vertices.len() as u32;
    assert!(mesh.indices.iter().all(|&i| i < n));
}

#[test]
fn cylinder_is_centred_and_tapered() {
    let mesh = cylinder_mesh(5.0, 4.8, 5.0, 16);
    for v in &mesh.vertices {
        assert!(v.position[1] == 2.5 || v.position[1] == -2.5);
        let r = (v.position[0].powi(2) + v.position[2].powi(2)).sqrt();
        if v.position[1] > 0.0 {
            assert!(r <= 5.0 + 1e-4);
        } else {
            assert!(r <= 4.8 + 1e-4);
        }
        let len = Vec3::from(v.normal).length();
        assert!((len - 1.0).abs() < 1e-4);
    }
}

#[test]
fn cap_triangles_face_outward() {
    let mesh = cylinder_mesh(1.0, 1.0, 2.0, 12);
    let face_normal = |tri: &[u32]| {
        let p = |i: u32| Vec3::from(mesh.vertices[i as usize].position);
        (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]))
    };
    let top = &mesh.indices[mesh.top.start as usize..mesh.top.end as usize];
    for tri in top.chunks(3) {
        assert!(face_normal(tri).y > 0.0);
    }
    let bottom = &mesh.indices[mesh.bottom.start as usize..mesh.bottom.end as usize];
    for tri in bottom.chunks(3) {
        assert!(face_normal(tri).y < 0.0);
    }
    let side = &mesh.indices[mesh.side.start as usize..mesh.side.end as usize];
    for tri in side.chunks(3) {
        let centroid = tri
            .iter()
            .map(|&i| Vec3::from(mesh.vertices[i as usize].position))
            .sum::<Vec3>()
            / 3.0;
        let outward = Vec3::new(centroid.x, 0.0, centroid.z);
        assert!(face_normal(tri).dot(outward) > 0.0);
    }
}

#[test]
fn camera_looks_at_cake_from_above() {
    let cam = Camera::for_cake(5.0, 16.0 / 9.0);
    assert_eq!(cam.eye, Vec3::new(0.0, 7.5, 10.0));
    assert_eq!(cam.target, Vec3::ZERO);
    // The cake centre projects to the middle of the screen.
    let clip = cam.view_proj() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
}

#[test]
fn spot_cone_inner_is_inside_outer() {
    let lighting = Lighting::default();
    let (inner, outer) = lighting.spot.cone_cosines();
    assert!(inner > outer);
    assert!((outer - SPOT_ANGLE.cos()).abs() < 1e-6);
}

#[test]
fn cake_shape_follows_config() {
    let shape = CakeShape::from_config(&CakeConfig::default());
    assert_eq!(shape.radius_top, 5.0);
    assert!((shape.radius_bottom - 4.8).abs() < 1e-6);
    assert_eq!(shape.height, 5.0);
    assert_eq!(shape.segments, CAKE_SEGMENTS);
}

#[test]
fn uniform_block_matches_shader_layout() {
    // 9 vec4 + mat4 + 32 two-vec4 lights
    assert_eq!(std::mem::size_of::<SceneUniforms>(), 64 + 9 * 16 + 32 * 32);
    assert_eq!(std::mem::size_of::<SceneUniforms>() % 16, 0);
    let decl = format!("array<PointLight, {}>", MAX_POINT_LIGHTS);
    assert!(SCENE_WGSL.contains(&decl));
    assert!(SCENE_WGSL.contains("fn vs_mesh"));
    assert!(FLAME_WGSL.contains("fn vs_flame"));
}

#[test]
fn point_lights_are_capped_and_skip_dead_flames() {
    let mut session = CakeSession::new(CakeConfig::default(), 9).unwrap();
    for _ in 0..40 {
        session.place();
    }
    let cam = Camera::for_cake(5.0, 1.0);
    let lighting = Lighting::default();
    let u = SceneUniforms::pack(&cam, &lighting, session.candles());
    assert_eq!(u.counts[0] as usize, MAX_POINT_LIGHTS);

    session.extinguish_random(40);
    for i in 1..=8 {
        session.tick(Duration::from_millis(16 * i));
    }
    let u = SceneUniforms::pack(&cam, &lighting, session.candles());
    assert_eq!(u.counts[0], 0);
}

#[test]
fn instance_packing_follows_candles() {
    let mut session = CakeSession::new(CakeConfig::default(), 3).unwrap();
    let a = session.place();
    session.place();
    session.place();

    let mut meshes = Vec::new();
    pack_candles(session.candles(), 60.0, &mut meshes);
    assert_eq!(meshes.len(), 3);
    assert!(meshes.iter().all(|m| m.offset_shine[3] == 60.0));

    let mut flames = Vec::new();
    pack_flames(session.candles(), &mut flames);
    assert_eq!(flames.len(), 3 * FLAME_PARTICLES);

    // A fully faded flame draws nothing.
    session.extinguish(a);
    for i in 1..=8 {
        session.tick(Duration::from_millis(16 * i));
    }
    pack_flames(session.candles(), &mut flames);
    assert_eq!(flames.len(), 2 * FLAME_PARTICLES);
    pack_candles(session.candles(), 60.0, &mut meshes);
    assert_eq!(meshes.len(), 3);
}
