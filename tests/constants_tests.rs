// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so the pure shell constants are included directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use cake_core::*;
use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn shell_constants_are_sane() {
    assert!(!CAKE_CONTAINER_ID.is_empty());
    assert!(!COUNTER_ID.is_empty());
    assert!(CAKE_BODY_TEXTURE.ends_with(".png"));
    assert!(CAKE_TOP_TEXTURE.ends_with(".png"));
    assert!(ANALYSER_FFT_SIZE.is_power_of_two());
    assert!((32..=32768).contains(&ANALYSER_FFT_SIZE));
    assert_eq!(FALLBACK_BODY_RGBA[3], 255);
    assert_eq!(FALLBACK_TOP_RGBA[3], 255);
    assert!(INITIAL_INSTANCE_CAPACITY >= FLAME_PARTICLES);
    assert!(CAKE_SHININESS > 0.0);
    // WebGPU render targets support 1 or 4 samples only.
    assert!(MSAA_SAMPLES == 1 || MSAA_SAMPLES == 4);
    assert!(MSAA_SAMPLES > 1, "scene is drawn antialiased");
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn blow_bands_fit_in_analyser() {
    let bins = (ANALYSER_FFT_SIZE / 2) as usize;
    for rate in [44_100.0f32, 48_000.0] {
        let mut seen = Vec::new();
        for f in BLOW_BANDS_HZ {
            let bin = band_bin(f, rate, bins);
            assert!(bin < bins);
            seen.push(bin);
        }
        seen.dedup();
        assert_eq!(seen.len(), BLOW_BANDS_HZ.len(), "bands collapse at {rate} Hz");
    }
    assert!(BLOW_THRESHOLD < 255.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn cake_geometry_relationships() {
    assert!(CANDLE_EDGE_MARGIN < CAKE_RADIUS);
    assert!(CAKE_BOTTOM_INSET < CAKE_RADIUS);
    assert!(CANDLE_FALL_STEP > 0.0);
    assert!(BLOW_FADE_STEP > 0.0);
    // Flame fades out within a handful of frames.
    assert!(FLAME_LIGHT_INTENSITY / BLOW_FADE_STEP < 10.0);
    assert!(FLICKER_FLOOR < FLICKER_CEILING);
    assert!(FLAME_BASE_Y >= FLICKER_FLOOR);
    assert!(CAMERA_ZNEAR < CAMERA_ZFAR);
    assert!(FLAME_PARTICLES > 0);
}
