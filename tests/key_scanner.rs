#![allow(missing_docs)]
//! Host-level tests for the key registry and scanner.

use std::cell::Cell;
use std::rc::Rc;

use key_envoy::Error;
use key_envoy::event_queue::EventQueue;
use key_envoy::key::{KeyDevice, KeyState, KeyTiming};
use key_envoy::key_event::{KeyEvent, KeyEventKind, NO_EVENT};
use key_envoy::key_scanner::{KeyRegistry, KeyScanner};

type ScriptedSample = Box<dyn FnMut() -> bool>;

fn always_pressed() -> bool {
    true
}

fn never_pressed() -> bool {
    false
}

/// A sampler whose level is `script(tick)` for the tick currently set in `tick`.
fn scripted(tick: &Rc<Cell<u32>>, script: fn(u32) -> bool) -> ScriptedSample {
    let tick = Rc::clone(tick);
    Box::new(move || script(tick.get()))
}

#[test]
fn duplicate_key_ids_are_rejected() {
    let result = KeyRegistry::new([
        KeyDevice::new(0, KeyTiming::DEFAULT, never_pressed as fn() -> bool),
        KeyDevice::new(1, KeyTiming::DEFAULT, never_pressed),
        KeyDevice::new(1, KeyTiming::DEFAULT, always_pressed),
    ]);
    assert_eq!(result.err(), Some(Error::DuplicateKeyId { key_id: 1 }));
}

#[test]
fn registry_accessors() {
    let registry = KeyRegistry::new([
        KeyDevice::new(4, KeyTiming::DEFAULT, never_pressed as fn() -> bool),
        KeyDevice::new(2, KeyTiming::DEFAULT, never_pressed),
    ])
    .unwrap();

    assert_eq!(registry.len(), 2);
    assert!(!registry.is_empty());
    let ids: Vec<_> = registry.keys().iter().map(KeyDevice::key_id).collect();
    assert_eq!(ids, [4, 2]);
    assert_eq!(registry.key(2).map(KeyDevice::key_id), Some(2));
    assert!(registry.key(3).is_none());

    let empty: KeyRegistry<fn() -> bool, 0> = KeyRegistry::new([]).unwrap();
    assert!(empty.is_empty());
}

#[test]
fn scan_queues_events_in_registration_order() {
    static QUEUE: EventQueue<16> = EventQueue::new();
    let registry = KeyRegistry::new([
        KeyDevice::new(5, KeyTiming::DEFAULT, always_pressed as fn() -> bool),
        KeyDevice::new(1, KeyTiming::DEFAULT, never_pressed),
        KeyDevice::new(2, KeyTiming::DEFAULT, always_pressed),
    ])
    .unwrap();
    let mut scanner = KeyScanner::new(registry, &QUEUE);
    assert!(core::ptr::eq(scanner.events(), &QUEUE));

    for _ in 0..1520 {
        scanner.scan();
    }
    assert!(QUEUE.is_empty());

    // Tick 1520: both held keys reach the long-click period on the same scan.
    scanner.scan();
    assert_eq!(QUEUE.len(), 2);
    assert_eq!(QUEUE.read_raw(), 0x0502);
    assert_eq!(QUEUE.pop(), Some(KeyEvent::new(2, KeyEventKind::LongPress)));
    assert_eq!(QUEUE.read_raw(), NO_EVENT);
}

#[test]
fn step_all_reports_through_callback() {
    let mut registry = KeyRegistry::new([KeyDevice::new(
        0,
        KeyTiming::new(1, 2, 1).unwrap(),
        always_pressed as fn() -> bool,
    )])
    .unwrap();

    let mut events = Vec::new();
    for _ in 0..5 {
        registry.step_all(|event| events.push(event));
    }
    assert_eq!(events, [KeyEvent::new(0, KeyEventKind::LongPress)]);
}

#[test]
fn keys_revert_independently_in_the_same_ticks() {
    static QUEUE: EventQueue<16> = EventQueue::new();
    let tick = Rc::new(Cell::new(0));

    // Key 0: long hold with a one-tick release glitch at 500.
    let hold_with_glitch = scripted(&tick, |tick| tick < 500 || (501..1700).contains(&tick));
    // Key 1: click, then a one-tick second-press glitch at 500.
    let click_with_glitch = scripted(&tick, |tick| (300..400).contains(&tick) || tick == 500);

    let registry = KeyRegistry::new([
        KeyDevice::new(0, KeyTiming::DEFAULT, hold_with_glitch),
        KeyDevice::new(1, KeyTiming::DEFAULT, click_with_glitch),
    ])
    .unwrap();
    let mut scanner = KeyScanner::new(registry, &QUEUE);

    let mut produced = Vec::new();
    for now in 0..2000 {
        tick.set(now);
        scanner.scan();
        while let Some(event) = QUEUE.pop() {
            produced.push((now, event));
        }

        if now == 500 {
            // Both keys are filtering a misdetected edge over the same ticks.
            let registry = scanner.registry();
            assert_eq!(
                registry.key(0).map(KeyDevice::state),
                Some(KeyState::ShortReleaseFilter { held: 480 })
            );
            assert_eq!(
                registry.key(1).map(KeyDevice::state),
                Some(KeyState::DoublePressFilter { gap: 80 })
            );
        }
        if now == 520 {
            let registry = scanner.registry();
            assert_eq!(registry.key(0).map(KeyDevice::tick_count), Some(500));
            assert_eq!(registry.key(1).map(KeyDevice::tick_count), Some(100));
        }
    }

    assert_eq!(
        produced,
        [
            (720, KeyEvent::new(1, KeyEventKind::ShortPress)),
            (1520, KeyEvent::new(0, KeyEventKind::LongPress)),
            (1719, KeyEvent::new(0, KeyEventKind::LongReleaseUp)),
        ]
    );
}

#[test]
fn mixed_samplers_share_a_registry() {
    static QUEUE: EventQueue<4> = EventQueue::new();
    let level = Cell::new(false);
    let mut from_cell = || level.get();
    let mut constant = || true;

    let registry = KeyRegistry::new([
        KeyDevice::new(0, KeyTiming::DEFAULT, &mut from_cell as &mut dyn FnMut() -> bool),
        KeyDevice::new(1, KeyTiming::DEFAULT, &mut constant as &mut dyn FnMut() -> bool),
    ])
    .unwrap();
    let mut scanner = KeyScanner::new(registry, &QUEUE);

    for _ in 0..1521 {
        scanner.scan();
    }
    assert_eq!(QUEUE.pop(), Some(KeyEvent::new(1, KeyEventKind::LongPress)));
    assert_eq!(QUEUE.pop(), None);
}

#[test]
fn reset_all_returns_every_key_to_idle() {
    static QUEUE: EventQueue<16> = EventQueue::new();
    let registry = KeyRegistry::new([
        KeyDevice::new(0, KeyTiming::DEFAULT, always_pressed as fn() -> bool),
        KeyDevice::new(1, KeyTiming::DEFAULT, always_pressed),
    ])
    .unwrap();
    let mut scanner = KeyScanner::new(registry, &QUEUE);

    for _ in 0..100 {
        scanner.scan();
    }
    assert!(scanner.registry().keys().iter().all(|key| !key.is_idle()));

    scanner.registry_mut().reset_all();
    assert!(scanner.registry().keys().iter().all(KeyDevice::is_idle));
    assert!(QUEUE.is_empty());
}
