#![allow(missing_docs)]
//! Host-level tests for timing thresholds and configuration errors.

use embassy_time::Duration;
use key_envoy::Error;
use key_envoy::key::{DEFAULT_SCAN_PERIOD, KeyTiming};

fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

#[test]
fn default_timing() {
    let timing = KeyTiming::default();
    assert_eq!(timing, KeyTiming::DEFAULT);
    assert_eq!(timing.filter_period(), 20);
    assert_eq!(timing.long_click_period(), 1500);
    assert_eq!(timing.max_double_click_gap(), 300);
    assert_eq!(DEFAULT_SCAN_PERIOD, millis(1));
}

#[test]
fn new_rejects_zero_thresholds() {
    assert_eq!(
        KeyTiming::new(0, 1500, 300),
        Err(Error::ZeroPeriod {
            name: "filter_period"
        })
    );
    assert_eq!(
        KeyTiming::new(20, 0, 300),
        Err(Error::ZeroPeriod {
            name: "long_click_period"
        })
    );
    assert_eq!(
        KeyTiming::new(20, 1500, 0),
        Err(Error::ZeroPeriod {
            name: "max_double_click_gap"
        })
    );
    assert_eq!(KeyTiming::new(20, 1500, 300), Ok(KeyTiming::DEFAULT));
}

#[test]
fn durations_at_default_scan_period_match_defaults() {
    let timing =
        KeyTiming::from_durations(DEFAULT_SCAN_PERIOD, millis(20), millis(1500), millis(300));
    assert_eq!(timing, Ok(KeyTiming::DEFAULT));
}

#[test]
fn durations_round_down_to_whole_scan_ticks() {
    let timing = KeyTiming::from_durations(millis(2), millis(25), millis(1500), millis(301))
        .unwrap();
    assert_eq!(timing.filter_period(), 12);
    assert_eq!(timing.long_click_period(), 750);
    assert_eq!(timing.max_double_click_gap(), 150);
}

#[test]
fn durations_shorter_than_a_scan_are_rejected() {
    let result = KeyTiming::from_durations(
        millis(1),
        Duration::from_micros(500),
        millis(1500),
        millis(300),
    );
    assert_eq!(
        result,
        Err(Error::ZeroPeriod {
            name: "filter_period"
        })
    );
}

#[test]
fn zero_scan_period_is_rejected() {
    let result = KeyTiming::from_durations(Duration::from_ticks(0), millis(20), millis(1500), millis(300));
    assert_eq!(result, Err(Error::ZeroPeriod { name: "scan_period" }));
}

#[test]
fn durations_beyond_tick_counter_are_rejected() {
    let result = KeyTiming::from_durations(millis(1), millis(20), millis(100_000), millis(300));
    assert_eq!(
        result,
        Err(Error::PeriodOutOfRange {
            name: "long_click_period"
        })
    );

    // 65.535 s is still representable at 1 ms per tick.
    let longest = KeyTiming::from_durations(millis(1), millis(20), millis(65_535), millis(300));
    assert_eq!(longest.map(|timing| timing.long_click_period()), Ok(u16::MAX));
}

#[test]
fn error_messages_name_the_offending_setting() {
    assert_eq!(
        Error::ZeroPeriod {
            name: "filter_period"
        }
        .to_string(),
        "filter_period must be at least one tick"
    );
    assert_eq!(
        Error::PeriodOutOfRange {
            name: "long_click_period"
        }
        .to_string(),
        "long_click_period does not fit in a 16-bit tick count"
    );
    assert_eq!(
        Error::DuplicateKeyId { key_id: 7 }.to_string(),
        "key id 7 is registered more than once"
    );
}
