// Host-side tests for wax colors, flame particles and the candle factory.

use cake_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(1234)
}

#[test]
fn pastel_channels_stay_light() {
    let mut rng = rng();
    for _ in 0..1000 {
        for ch in pastel_color(&mut rng) {
            assert!(ch >= PASTEL_BASE);
        }
    }
}

#[test]
fn pastel_color_is_deterministic_for_a_seed() {
    let (mut ra, mut rb) = (rng(), rng());
    for _ in 0..8 {
        assert_eq!(pastel_color(&mut ra), pastel_color(&mut rb));
    }
}

#[test]
fn hex_colors_decode_to_unit_range() {
    let c = hex_to_rgb(0xff8000);
    assert_eq!(c.x, 1.0);
    assert!((c.y - 128.0 / 255.0).abs() < 1e-6);
    assert_eq!(c.z, 0.0);
    assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
    assert_eq!(srgb_to_linear(0.0), 0.0);
    assert!(srgb_to_linear(0.5) < 0.5);
}

#[test]
fn fire_particles_spawn_in_flame_envelope() {
    let mut rng = rng();
    let flame = create_fire(&mut rng, 200, 0.3);
    assert_eq!(flame.particles.len(), 200);
    assert_eq!(flame.point_size, 0.3);
    assert_eq!(flame.opacity, 1.0);
    let inner = hex_to_rgb(FLAME_COLOR_INNER);
    let outer = hex_to_rgb(FLAME_COLOR_OUTER);
    for p in &flame.particles {
        assert!(p.position.x >= -FLAME_SPREAD && p.position.x < FLAME_SPREAD);
        assert!(p.position.z >= -FLAME_SPREAD && p.position.z < FLAME_SPREAD);
        assert!(p.position.y >= 0.75 && p.position.y <= 0.85);
        // Red is fixed; green runs between the two endpoint hues.
        assert_eq!(p.color.x, 1.0);
        assert!(p.color.y <= inner.y + 1e-6 && p.color.y >= outer.y - 1e-6);
    }
}

#[test]
fn drift_keeps_particles_above_floor_and_sinks_high_ones() {
    let mut rng = rng();
    let mut flame = create_fire(&mut rng, 10, 0.3);
    flame.particles[0].position.y = 3.0;
    flame.drift(&mut rng);
    assert!((flame.particles[0].position.y - (3.0 - FLICKER_SINK)).abs() < 1e-6);

    for _ in 0..5000 {
        let before: Vec<_> = flame.particles.iter().map(|p| p.position).collect();
        flame.drift(&mut rng);
        for (p, b) in flame.particles.iter().zip(before) {
            assert!(p.position.y >= FLICKER_FLOOR);
            assert!((p.position.x - b.x).abs() <= FLICKER_JITTER_XZ + 1e-6);
            assert!((p.position.z - b.z).abs() <= FLICKER_JITTER_XZ + 1e-6);
        }
    }
}

#[test]
fn fade_dims_light_and_particles_monotonically() {
    let mut rng = rng();
    let mut flame = create_fire(&mut rng, 10, 0.3);
    let mut last = (flame.light.intensity, flame.opacity, flame.z_offset);
    let mut out = false;
    for _ in 0..8 {
        out = flame.fade(BLOW_FADE_STEP);
        assert!(flame.light.intensity < last.0);
        assert!(flame.opacity <= last.1);
        assert!(flame.z_offset < last.2);
        last = (flame.light.intensity, flame.opacity, flame.z_offset);
    }
    assert!(out);
    assert!(flame.is_out());
    assert_eq!(flame.opacity, 0.0);
}

#[test]
fn candle_factory_composes_flame_and_light() {
    let mut rng = rng();
    let candle = create_candle(
        CandleId(3),
        &mut rng,
        &CandleConfig::default(),
        &FlameConfig::default(),
    );
    assert_eq!(candle.id, CandleId(3));
    assert_eq!(candle.status, CandleStatus::Falling);
    assert!(candle.color.iter().all(|&c| c >= PASTEL_BASE));
    assert_eq!(candle.flame.particles.len(), 10);
    assert_eq!(candle.flame.point_size, 0.3);
    let light = candle.flame.light;
    assert_eq!(light.intensity, 1.5);
    assert_eq!(light.range, 3.0);
    assert_eq!(light.color, hex_to_rgb(0xff8000));
    // Light sits at the tip of the 1.5-tall body.
    assert_eq!(light.offset.y, 0.75);
    assert_eq!(candle.light_position().y, 0.75);
    assert_eq!(format!("{}", candle.id), "candle#3");
}
