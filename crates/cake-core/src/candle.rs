use crate::color::pastel_color;
use crate::config::{CandleConfig, FlameConfig};
use crate::flame::Flame;
use glam::Vec3;
use rand::Rng;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandleId(pub u32);

impl fmt::Display for CandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "candle#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CandleStatus {
    /// Dropping onto the cake.
    Falling,
    /// Settled and burning.
    Lit,
    /// Flame fading out.
    Extinguishing,
    /// Light is out; waiting for delayed removal.
    Extinguished,
}

impl CandleStatus {
    /// Counted by the lit counter and eligible to be blown out.
    #[inline]
    pub fn is_burning(self) -> bool {
        matches!(self, CandleStatus::Falling | CandleStatus::Lit)
    }
}

#[derive(Clone, Debug)]
pub struct Candle {
    pub id: CandleId,
    pub position: Vec3,
    pub resting_height: f32,
    pub color: [u8; 3],
    pub status: CandleStatus,
    pub flame: Flame,
}

/// Compose a candle with pastel wax, a flame and its light at the tip.
///
/// The candle starts at the origin in [`CandleStatus::Falling`]; the caller
/// positions it.
pub fn create_candle<R: Rng + ?Sized>(
    id: CandleId,
    rng: &mut R,
    body: &CandleConfig,
    flame: &FlameConfig,
) -> Candle {
    let color = pastel_color(rng);
    let tip = Vec3::new(0.0, body.height * 0.5, 0.0);
    Candle {
        id,
        position: Vec3::ZERO,
        resting_height: 0.0,
        color,
        status: CandleStatus::Falling,
        flame: Flame::from_config(rng, flame, tip),
    }
}

impl Candle {
    /// Move down one step toward the resting height. Returns true on arrival.
    pub fn settle_step(&mut self, step: f32) -> bool {
        if self.position.y > self.resting_height {
            self.position.y -= step;
        }
        if self.position.y <= self.resting_height {
            self.position.y = self.resting_height;
            return true;
        }
        false
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.position.y <= self.resting_height
    }

    /// World position of the flame light.
    #[inline]
    pub fn light_position(&self) -> Vec3 {
        self.position + self.flame.light.offset
    }
}
