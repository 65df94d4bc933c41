//! Microphone "blow" detection.
//!
//! Once per frame the front end hands over the analyser's byte spectrum. The
//! amplitude at a few low frequency bands is averaged; a loud enough reading
//! arms a randomly delayed [`Deferred::Blow`] on the session clock, and a quiet
//! one cancels it before it fires.

use crate::config::{BlowConfig, ConfigError};
use crate::scheduler::TimerId;
use crate::session::{CakeSession, Deferred};
use rand::Rng;
use std::time::Duration;

/// FFT bin holding `freq_hz` for a spectrum of `bin_count` entries.
///
/// Bin width is taken as `sample_rate / bin_count`. The result is clamped to
/// the last bin.
#[inline]
pub fn band_bin(freq_hz: f32, sample_rate: f32, bin_count: usize) -> usize {
    if bin_count == 0 || sample_rate <= 0.0 {
        return 0;
    }
    let width = sample_rate / bin_count as f32;
    ((freq_hz / width).floor().max(0.0) as usize).min(bin_count - 1)
}

/// Mean of the spectrum values at the given bands. Empty spectra read as silence.
pub fn band_average(spectrum: &[u8], sample_rate: f32, bands_hz: &[f32]) -> f32 {
    if spectrum.is_empty() || bands_hz.is_empty() {
        return 0.0;
    }
    let total: f32 = bands_hz
        .iter()
        .map(|&f| spectrum[band_bin(f, sample_rate, spectrum.len())] as f32)
        .sum();
    total / bands_hz.len() as f32
}

#[derive(Debug)]
pub struct BlowDetector {
    pub config: BlowConfig,
    pending: Option<TimerId>,
}

impl BlowDetector {
    pub fn new(config: BlowConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            pending: None,
        })
    }

    /// True while a blow is armed and has not fired yet.
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Feed one spectrum reading. Returns the averaged amplitude.
    pub fn poll(&mut self, spectrum: &[u8], sample_rate: f32, session: &mut CakeSession) -> f32 {
        // A fired timer is gone from the session queue.
        if let Some(id) = self.pending {
            if !session.is_pending(id) {
                self.pending = None;
            }
        }

        let level = band_average(spectrum, sample_rate, &self.config.bands_hz);
        if level > self.config.threshold {
            if self.pending.is_none() {
                let max_ms = self.config.max_delay.as_millis() as u64;
                let delay = if max_ms == 0 {
                    Duration::ZERO
                } else {
                    Duration::from_millis(session.rng().gen_range(0..max_ms))
                };
                let id = session.schedule(
                    delay,
                    Deferred::Blow {
                        max: self.config.max_extinguish,
                    },
                );
                log::debug!("blow armed: level {:.0}, firing in {:?}", level, delay);
                self.pending = Some(id);
            }
        } else if let Some(id) = self.pending.take() {
            if session.cancel(id) {
                log::debug!("blow cancelled: level {:.0}", level);
            }
        }
        level
    }
}
