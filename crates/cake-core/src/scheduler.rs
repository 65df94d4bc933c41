//! One-shot deferred actions on a virtual clock.
//!
//! Nothing here reads the wall clock: callers pass the current time (elapsed
//! since session start) in, so the frame driver and tests advance time the
//! same way.

use fnv::FnvHashMap;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Timer<A> {
    due: Duration,
    action: A,
}

#[derive(Debug)]
pub struct Scheduler<A> {
    timers: FnvHashMap<TimerId, Timer<A>>,
    next_id: u64,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self {
            timers: FnvHashMap::default(),
            next_id: 0,
        }
    }
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to run once `delay` has passed after `now`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, action: A) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(
            id,
            Timer {
                due: now + delay,
                action,
            },
        );
        id
    }

    /// Drop a pending action. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Remove and return every action due at or before `now`, earliest first.
    /// Actions due at the same instant come back in scheduling order.
    pub fn take_due(&mut self, now: Duration) -> Vec<A> {
        let mut due: Vec<(Duration, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= now)
            .map(|(id, t)| (t.due, *id))
            .collect();
        due.sort_unstable();
        due.into_iter()
            .filter_map(|(_, id)| self.timers.remove(&id).map(|t| t.action))
            .collect()
    }
}
