//! Tunable parameters for the cake session and the blow detector.
//!
//! Defaults come from [`crate::constants`]. Front ends may override any field
//! before handing the config to [`crate::CakeSession::new`] or
//! [`crate::BlowDetector::new`], both of which validate it first.

use crate::constants::*;
use std::time::Duration;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("candle margin {margin} leaves no room on a cake of radius {radius}")]
    MarginTooLarge { margin: f32, radius: f32 },

    #[error("flame needs at least one particle")]
    EmptyFlame,

    #[error("blow detector needs at least one frequency band")]
    NoBands,

    #[error("blow threshold {0} is outside the 0..=255 spectrum range")]
    ThresholdOutOfRange(f32),
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

/// Flame particle cloud and point light.
#[derive(Clone, Debug)]
pub struct FlameConfig {
    pub particle_count: usize,
    pub point_size: f32,
    pub light_color: u32,
    pub light_intensity: f32,
    pub light_range: f32,
}

impl Default for FlameConfig {
    fn default() -> Self {
        Self {
            particle_count: FLAME_PARTICLES,
            point_size: FLAME_POINT_SIZE,
            light_color: FLAME_LIGHT_COLOR,
            light_intensity: FLAME_LIGHT_INTENSITY,
            light_range: FLAME_LIGHT_RANGE,
        }
    }
}

/// Candle body geometry.
#[derive(Clone, Debug)]
pub struct CandleConfig {
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub segments: u32,
    pub shininess: f32,
}

impl Default for CandleConfig {
    fn default() -> Self {
        Self {
            radius_top: CANDLE_RADIUS_TOP,
            radius_bottom: CANDLE_RADIUS_BOTTOM,
            height: CANDLE_HEIGHT,
            segments: CANDLE_SEGMENTS,
            shininess: CANDLE_SHININESS,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CakeConfig {
    pub cake_radius: f32,
    pub margin: f32,
    pub drop_height: f32,
    pub fall_step: f32,
    pub fade_step: f32,
    pub removal_delay: Duration,
    pub candle: CandleConfig,
    pub flame: FlameConfig,
}

impl Default for CakeConfig {
    fn default() -> Self {
        Self {
            cake_radius: CAKE_RADIUS,
            margin: CANDLE_EDGE_MARGIN,
            drop_height: DROP_HEIGHT_ABOVE_CAKE,
            fall_step: CANDLE_FALL_STEP,
            fade_step: BLOW_FADE_STEP,
            removal_delay: REMOVAL_DELAY,
            candle: CandleConfig::default(),
            flame: FlameConfig::default(),
        }
    }
}

impl CakeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("cake_radius", self.cake_radius)?;
        positive("fall_step", self.fall_step)?;
        positive("fade_step", self.fade_step)?;
        positive("drop_height", self.drop_height)?;
        positive("candle.height", self.candle.height)?;
        positive("flame.point_size", self.flame.point_size)?;
        positive("flame.light_range", self.flame.light_range)?;
        if !(self.margin >= 0.0 && self.margin < self.cake_radius) {
            return Err(ConfigError::MarginTooLarge {
                margin: self.margin,
                radius: self.cake_radius,
            });
        }
        if self.flame.particle_count == 0 {
            return Err(ConfigError::EmptyFlame);
        }
        Ok(())
    }

    /// Radius of the disc candles may be placed in.
    pub fn placement_radius(&self) -> f32 {
        self.cake_radius - self.margin
    }

    /// Height new candles are spawned at.
    pub fn spawn_height(&self) -> f32 {
        self.cake_radius + self.drop_height
    }

    /// Height a candle comes to rest at.
    pub fn resting_height(&self) -> f32 {
        self.cake_radius - self.cake_radius / 3.0
    }
}

#[derive(Clone, Debug)]
pub struct BlowConfig {
    pub bands_hz: Vec<f32>,
    pub threshold: f32,
    pub max_delay: Duration,
    pub max_extinguish: usize,
}

impl Default for BlowConfig {
    fn default() -> Self {
        Self {
            bands_hz: BLOW_BANDS_HZ.to_vec(),
            threshold: BLOW_THRESHOLD,
            max_delay: Duration::from_millis(BLOW_MAX_DELAY_MS),
            max_extinguish: BLOW_MAX_EXTINGUISH,
        }
    }
}

impl BlowConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bands_hz.is_empty() {
            return Err(ConfigError::NoBands);
        }
        for &f in &self.bands_hz {
            positive("bands_hz", f)?;
        }
        if !(0.0..=255.0).contains(&self.threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.threshold));
        }
        Ok(())
    }
}
