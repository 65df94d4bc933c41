// Host-side tests for the virtual-time deferred action queue.

use cake_core::Scheduler;
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn actions_run_only_once_due() {
    let mut s = Scheduler::new();
    s.schedule(ms(0), ms(100), "a");
    assert!(s.take_due(ms(99)).is_empty());
    assert_eq!(s.take_due(ms(100)), vec!["a"]);
    assert!(s.take_due(ms(1000)).is_empty());
    assert!(s.is_empty());
}

#[test]
fn due_actions_come_back_in_time_then_schedule_order() {
    let mut s = Scheduler::new();
    s.schedule(ms(0), ms(300), 3);
    s.schedule(ms(0), ms(100), 1);
    s.schedule(ms(50), ms(50), 2); // also due at 100, scheduled later
    s.schedule(ms(0), ms(900), 9);
    assert_eq!(s.take_due(ms(500)), vec![1, 2, 3]);
    assert_eq!(s.len(), 1);
}

#[test]
fn cancel_removes_pending_action() {
    let mut s = Scheduler::new();
    let keep = s.schedule(ms(0), ms(10), "keep");
    let drop = s.schedule(ms(0), ms(10), "drop");
    assert!(s.is_pending(drop));
    assert!(s.cancel(drop));
    assert!(!s.is_pending(drop));
    assert!(!s.cancel(drop));
    assert_eq!(s.take_due(ms(10)), vec!["keep"]);
    // Already ran: cannot be cancelled any more.
    assert!(!s.cancel(keep));
}

#[test]
fn zero_delay_is_due_immediately() {
    let mut s = Scheduler::new();
    let id = s.schedule(ms(40), Duration::ZERO, ());
    assert!(s.is_pending(id));
    assert_eq!(s.take_due(ms(40)).len(), 1);
    assert!(!s.is_pending(id));
}
