//! Tick-driven key scanning for Pico 1 and 2 (and anything else with a periodic tick).
//!
//! Each key is sampled once per tick and run through a debouncing state machine that
//! reports short presses, long presses, long-press releases and double presses. A
//! scanner advances all keys from the tick context and pushes events into a lock-free
//! queue that the application drains whenever it likes.
//!
//! ```text
//! tick ─▶ KeyScanner::scan ─▶ KeyDevice::step (per key) ─▶ EventQueue::push
//!                                                              │
//!                               application ◀─ EventQueue::pop ┘
//! ```
//!
//! # Glossary
//!
//! - **Tick:** one call to [`KeyScanner::scan`](key_scanner::KeyScanner::scan). All timing
//!   thresholds are counted in ticks (1 ms by default).
//! - **Filter period:** ticks an edge (press or release) must persist before it is trusted.
//! - **Long-click period:** ticks a press must last to be a long press instead of a short one.
//! - **Double-click gap:** most ticks allowed between a release and the next press for the
//!   pair to count as a double press.
//! - **Misdetection revert:** when an edge disappears during its own filter period, the key
//!   falls back to its previous state and keeps the ticks it had already counted.
#![cfg_attr(not(feature = "host"), no_std)]

pub mod event_queue;
pub mod key;
pub mod key_event;
pub mod key_scanner;

mod error;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
