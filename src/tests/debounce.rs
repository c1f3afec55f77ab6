use super::Debouncer;
use std::time::{Duration, Instant};

const DELAY: Duration = Duration::from_millis(300);

#[test]
fn test_fires_once_after_quiet_period() {
    let start = Instant::now();
    let mut debounce = Debouncer::new(DELAY);

    debounce.schedule(start, "x");

    assert_eq!(debounce.fire_due(start + Duration::from_millis(299)), None);
    assert_eq!(debounce.fire_due(start + DELAY), Some("x"));
    assert_eq!(debounce.fire_due(start + DELAY * 2), None, "Fires only once");
}

#[test]
fn test_last_call_wins_and_restarts_timer() {
    let start = Instant::now();
    let mut debounce = Debouncer::new(DELAY);

    debounce.schedule(start, "a");
    debounce.schedule(start + Duration::from_millis(100), "ap");
    debounce.schedule(start + Duration::from_millis(200), "app");

    assert_eq!(
        debounce.fire_due(start + DELAY),
        None,
        "The first deadline was replaced"
    );
    assert_eq!(
        debounce.deadline(),
        Some(start + Duration::from_millis(200) + DELAY)
    );
    assert_eq!(debounce.fire_due(start + Duration::from_millis(500)), Some("app"));
}

#[test]
fn test_cancel_drops_pending_task() {
    let start = Instant::now();
    let mut debounce = Debouncer::new(DELAY);

    debounce.schedule(start, 7);
    assert!(debounce.is_pending());
    assert_eq!(debounce.cancel(), Some(7));

    assert!(!debounce.is_pending());
    assert_eq!(debounce.deadline(), None);
    assert_eq!(debounce.fire_due(start + DELAY), None);
}
