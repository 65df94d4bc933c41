// Host-side tests for microphone blow detection.

use cake_core::*;
use std::time::Duration;

const SAMPLE_RATE: f32 = 48_000.0;
const BINS: usize = 1024;

/// Spectrum with `level` at every configured band and silence elsewhere.
fn spectrum_at(level: u8) -> Vec<u8> {
    let mut s = vec![0u8; BINS];
    for f in BLOW_BANDS_HZ {
        s[band_bin(f, SAMPLE_RATE, BINS)] = level;
    }
    s
}

fn lit_session(n: usize) -> CakeSession {
    let mut session = CakeSession::new(CakeConfig::default(), 7).unwrap();
    for _ in 0..n {
        session.place();
    }
    session
}

#[test]
fn band_bin_uses_sample_rate_over_bin_count() {
    // 48 kHz over 1024 bins -> 46.875 Hz per bin
    assert_eq!(band_bin(100.0, SAMPLE_RATE, BINS), 2);
    assert_eq!(band_bin(200.0, SAMPLE_RATE, BINS), 4);
    assert_eq!(band_bin(300.0, SAMPLE_RATE, BINS), 6);
    // Clamped to the buffer
    assert_eq!(band_bin(1.0e6, SAMPLE_RATE, BINS), BINS - 1);
    assert_eq!(band_bin(100.0, SAMPLE_RATE, 0), 0);
}

#[test]
fn band_average_reads_only_configured_bins() {
    let mut s = vec![255u8; BINS];
    for f in BLOW_BANDS_HZ {
        s[band_bin(f, SAMPLE_RATE, BINS)] = 90;
    }
    assert_eq!(band_average(&s, SAMPLE_RATE, &BLOW_BANDS_HZ), 90.0);
    assert_eq!(band_average(&[], SAMPLE_RATE, &BLOW_BANDS_HZ), 0.0);
}

#[test]
fn loud_reading_arms_once_and_quiet_reading_cancels() {
    let mut session = lit_session(5);
    let mut detector = BlowDetector::new(BlowConfig::default()).unwrap();

    let level = detector.poll(&spectrum_at(210), SAMPLE_RATE, &mut session);
    assert_eq!(level, 210.0);
    assert!(detector.is_armed());
    assert_eq!(session.pending_actions(), 1);

    // Staying loud does not stack more timers.
    detector.poll(&spectrum_at(230), SAMPLE_RATE, &mut session);
    assert_eq!(session.pending_actions(), 1);

    detector.poll(&spectrum_at(50), SAMPLE_RATE, &mut session);
    assert!(!detector.is_armed());
    assert_eq!(session.pending_actions(), 0);

    // Well past the longest debounce window: nothing was blown out.
    session.tick(Duration::from_secs(1));
    assert_eq!(session.lit_count(), 5);
    assert_eq!(session.extinguishing_count(), 0);
}

#[test]
fn threshold_is_exclusive() {
    let mut session = lit_session(1);
    let mut detector = BlowDetector::new(BlowConfig::default()).unwrap();
    detector.poll(&spectrum_at(200), SAMPLE_RATE, &mut session);
    assert!(!detector.is_armed());
    detector.poll(&spectrum_at(201), SAMPLE_RATE, &mut session);
    assert!(detector.is_armed());
}

#[test]
fn sustained_blow_fires_within_debounce_window() {
    let mut session = lit_session(5);
    let mut detector = BlowDetector::new(BlowConfig::default()).unwrap();
    detector.poll(&spectrum_at(220), SAMPLE_RATE, &mut session);

    let mut t = Duration::ZERO;
    while session.lit_count() == 5 {
        t += Duration::from_millis(16);
        assert!(t <= Duration::from_millis(516), "blow never fired");
        session.tick(t);
        detector.poll(&spectrum_at(220), SAMPLE_RATE, &mut session);
    }
    assert_eq!(session.lit_count(), 2);
    assert_eq!(session.extinguishing_count(), 3);
}

#[test]
fn detector_rearms_after_firing() {
    let mut session = lit_session(10);
    let cfg = BlowConfig {
        max_delay: Duration::ZERO,
        ..BlowConfig::default()
    };
    let mut detector = BlowDetector::new(cfg).unwrap();
    let loud = spectrum_at(255);

    detector.poll(&loud, SAMPLE_RATE, &mut session);
    session.tick(Duration::from_millis(16));
    assert_eq!(session.lit_count(), 7);

    // The fired timer is gone; the next loud reading arms a fresh one.
    detector.poll(&loud, SAMPLE_RATE, &mut session);
    assert!(detector.is_armed());
    session.tick(Duration::from_millis(32));
    assert_eq!(session.lit_count(), 4);
}

#[test]
fn blow_with_no_candles_is_harmless() {
    let mut session = lit_session(0);
    let cfg = BlowConfig {
        max_delay: Duration::ZERO,
        ..BlowConfig::default()
    };
    let mut detector = BlowDetector::new(cfg).unwrap();
    detector.poll(&spectrum_at(255), SAMPLE_RATE, &mut session);
    session.tick(Duration::from_millis(16));
    assert_eq!(session.lit_count(), 0);
    assert!(session.candles().is_empty());
}

#[test]
fn blow_config_validation() {
    let no_bands = BlowConfig {
        bands_hz: vec![],
        ..BlowConfig::default()
    };
    assert_eq!(no_bands.validate(), Err(ConfigError::NoBands));

    let loud = BlowConfig {
        threshold: 300.0,
        ..BlowConfig::default()
    };
    assert_eq!(
        loud.validate(),
        Err(ConfigError::ThresholdOutOfRange(300.0))
    );
    assert!(BlowDetector::new(loud).is_err());
}
