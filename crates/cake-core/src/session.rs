//! The cake session: every candle on the cake, the lit counter, the deferred
//! action queue and the random source, advanced one display frame at a time.

use crate::candle::{create_candle, Candle, CandleId, CandleStatus};
use crate::config::{CakeConfig, ConfigError};
use crate::scheduler::{Scheduler, TimerId};
use glam::Vec2;
use rand::prelude::*;
use std::time::Duration;

/// Work queued on the session clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deferred {
    /// Detach a blown-out candle from the scene.
    RemoveCandle(CandleId),
    /// Blow out up to `max` random burning candles.
    Blow { max: usize },
}

/// Observable changes, drained by the front end once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    CandlePlaced(CandleId),
    CandleSettled(CandleId),
    CandleExtinguishing(CandleId),
    CandleExtinguished(CandleId),
    CandleRemoved(CandleId),
    CounterChanged(u32),
}

pub struct CakeSession {
    config: CakeConfig,
    candles: Vec<Candle>,
    lit_count: u32,
    scheduler: Scheduler<Deferred>,
    rng: StdRng,
    next_id: u32,
    now: Duration,
    events: Vec<SessionEvent>,
}

impl CakeSession {
    pub fn new(config: CakeConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            candles: Vec::new(),
            lit_count: 0,
            scheduler: Scheduler::new(),
            rng: StdRng::seed_from_u64(seed),
            next_id: 0,
            now: Duration::ZERO,
            events: Vec::new(),
        })
    }

    /// Validated at construction; read-only afterwards.
    pub fn config(&self) -> &CakeConfig {
        &self.config
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn candle(&self, id: CandleId) -> Option<&Candle> {
        self.candles.iter().find(|c| c.id == id)
    }

    /// Candles that are falling in or lit.
    pub fn lit_count(&self) -> u32 {
        self.lit_count
    }

    pub fn count_in(&self, status: CandleStatus) -> usize {
        self.candles.iter().filter(|c| c.status == status).count()
    }

    pub fn falling_count(&self) -> usize {
        self.count_in(CandleStatus::Falling)
    }

    pub fn extinguishing_count(&self) -> usize {
        self.count_in(CandleStatus::Extinguishing)
    }

    /// Session clock as of the last tick.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, action: Deferred) -> TimerId {
        self.scheduler.schedule(self.now, delay, action)
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.scheduler.cancel(id)
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.scheduler.is_pending(id)
    }

    pub fn pending_actions(&self) -> usize {
        self.scheduler.len()
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Move queued events into `out`.
    pub fn drain_events(&mut self, out: &mut Vec<SessionEvent>) {
        out.append(&mut self.events);
    }

    /// Drop a new candle at a random spot on the cake.
    pub fn place(&mut self) -> CandleId {
        let limit = self.config.placement_radius();
        let angle = self.rng.gen::<f32>() * std::f32::consts::TAU;
        let dist = self.rng.gen::<f32>() * limit;
        self.place_at(dist * angle.cos(), dist * angle.sin())
    }

    /// Drop a new candle above `(x, z)`, pulled inside the placement disc.
    pub fn place_at(&mut self, x: f32, z: f32) -> CandleId {
        let limit = self.config.placement_radius();
        let mut xz = Vec2::new(x, z);
        if !xz.is_finite() {
            xz = Vec2::ZERO;
        }
        if xz.length() > limit {
            xz = xz.normalize() * limit;
        }

        let id = CandleId(self.next_id);
        self.next_id += 1;
        let mut candle = create_candle(
            id,
            &mut self.rng,
            &self.config.candle,
            &self.config.flame,
        );
        candle.position = glam::Vec3::new(xz.x, self.config.spawn_height(), xz.y);
        candle.resting_height = self.config.resting_height();
        self.candles.push(candle);

        self.lit_count += 1;
        log::debug!("placed {} at ({:.2}, {:.2})", id, xz.x, xz.y);
        self.events.push(SessionEvent::CandlePlaced(id));
        self.events.push(SessionEvent::CounterChanged(self.lit_count));
        id
    }

    /// Start blowing out one burning candle. Returns false if it is not burning.
    pub fn extinguish(&mut self, id: CandleId) -> bool {
        match self.candles.iter_mut().find(|c| c.id == id) {
            Some(c) if c.status.is_burning() => {
                c.status = CandleStatus::Extinguishing;
                self.lit_count = self.lit_count.saturating_sub(1);
                log::debug!("extinguishing {}", id);
                self.events.push(SessionEvent::CandleExtinguishing(id));
                self.events.push(SessionEvent::CounterChanged(self.lit_count));
                true
            }
            _ => false,
        }
    }

    /// Blow out up to `max` distinct burning candles chosen at random.
    pub fn extinguish_random(&mut self, max: usize) -> Vec<CandleId> {
        let mut pool: Vec<CandleId> = self
            .candles
            .iter()
            .filter(|c| c.status.is_burning())
            .map(|c| c.id)
            .collect();
        let n = max.min(pool.len());
        let mut picked = Vec::with_capacity(n);
        for _ in 0..n {
            let k = self.rng.gen_range(0..pool.len());
            let id = pool.swap_remove(k);
            if self.extinguish(id) {
                picked.push(id);
            }
        }
        picked
    }

    /// Advance one frame with the session clock at `now`.
    pub fn tick(&mut self, now: Duration) {
        self.now = self.now.max(now);
        for action in self.scheduler.take_due(self.now) {
            self.run(action);
        }

        for candle in self.candles.iter_mut() {
            candle.flame.drift(&mut self.rng);
        }

        let fall_step = self.config.fall_step;
        for candle in self.candles.iter_mut() {
            match candle.status {
                CandleStatus::Falling => {
                    if candle.settle_step(fall_step) {
                        candle.status = CandleStatus::Lit;
                        self.events.push(SessionEvent::CandleSettled(candle.id));
                    }
                }
                // Blown out mid-drop: keep falling to rest, lit or not.
                CandleStatus::Extinguishing | CandleStatus::Extinguished
                    if !candle.is_settled() =>
                {
                    candle.settle_step(fall_step);
                }
                CandleStatus::Lit
                | CandleStatus::Extinguishing
                | CandleStatus::Extinguished => {}
            }
        }

        let fade_step = self.config.fade_step;
        for candle in self.candles.iter_mut() {
            if candle.status != CandleStatus::Extinguishing {
                continue;
            }
            if candle.flame.fade(fade_step) {
                candle.status = CandleStatus::Extinguished;
                self.scheduler.schedule(
                    self.now,
                    self.config.removal_delay,
                    Deferred::RemoveCandle(candle.id),
                );
                log::debug!("{} is out", candle.id);
                self.events.push(SessionEvent::CandleExtinguished(candle.id));
            }
        }
    }

    fn run(&mut self, action: Deferred) {
        match action {
            Deferred::RemoveCandle(id) => {
                let before = self.candles.len();
                self.candles.retain(|c| c.id != id);
                if self.candles.len() != before {
                    log::debug!("removed {}", id);
                    self.events.push(SessionEvent::CandleRemoved(id));
                }
            }
            Deferred::Blow { max } => {
                let blown = self.extinguish_random(max);
                log::debug!("blow put out {} candle(s)", blown.len());
            }
        }
    }
}
