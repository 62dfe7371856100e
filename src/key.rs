//! A device abstraction for a tick-scanned key with debouncing and click classification.
//!
//! See [`KeyDevice`] for usage example.

mod key_sample;
mod key_timing;

pub use key_sample::{PinSample, PressedTo, Sample};
pub use key_timing::{DEFAULT_SCAN_PERIOD, KeyTiming};

use crate::key_event::{KeyEvent, KeyEventKind};

// ============================================================================
// KeyState - Where a key is in its click
// ============================================================================

/// The state of one key's click-detection state machine.
///
/// Each edge (press or release) waits out the key's filter period before it is trusted.
/// The two filter states that can turn out to be a misdetection carry the tick count
/// measured before the filter started, so reverting does not lose elapsed time.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyState {
    /// Idle, waiting for a press.
    CheckPressDown,
    /// Debouncing the press edge.
    PressDownFilter,
    /// Pressed; deciding between a short and a long press.
    CheckLong,
    /// Debouncing the release after a short hold.
    ShortReleaseFilter {
        /// Ticks the key had been held when the release was first seen.
        held: u16,
    },
    /// Released after a short hold; waiting for a second press inside the double-click gap.
    CheckDoublePress,
    /// Debouncing the second press edge.
    DoublePressFilter {
        /// Ticks of the double-click gap used up when the second press was first seen.
        gap: u16,
    },
    /// Double press reported; waiting for a debounced release.
    DoubleReleaseFilter,
    /// Long press reported; waiting for a debounced release.
    LongReleaseFilter,
}

// ============================================================================
// KeyDevice
// ============================================================================

/// A key whose raw level is sampled once per scan tick and turned into click events.
///
/// Call [`step()`](Self::step) exactly once per tick. It reads the key through its
/// [`Sample`] capability, advances the state machine by one tick, and returns the
/// click event detected on this tick, if any:
///
/// | Gesture | Event | When |
/// |---------|-------|------|
/// | press, release, no second press within the gap | [`ShortPress`](KeyEventKind::ShortPress) | when the gap runs out |
/// | hold for the long-click period | [`LongPress`](KeyEventKind::LongPress) | while still held |
/// | release after a long press | [`LongReleaseUp`](KeyEventKind::LongReleaseUp) | after the release is debounced |
/// | press, release, press again within the gap | [`DoublePress`](KeyEventKind::DoublePress) | once the second press is debounced |
///
/// Keys are independent: all per-click bookkeeping lives in the key's own [`KeyState`].
///
/// # Example
///
/// ```rust
/// use core::cell::Cell;
/// use key_envoy::key::{KeyDevice, KeyTiming};
/// use key_envoy::key_event::KeyEventKind;
///
/// let pressed = Cell::new(false);
/// let timing = KeyTiming::new(2, 10, 5)?;
/// let mut key = KeyDevice::new(7, timing, || pressed.get());
///
/// let mut events = Vec::new();
/// pressed.set(true);
/// for _ in 0..4 {
///     events.extend(key.step());
/// }
/// pressed.set(false);
/// for _ in 0..20 {
///     events.extend(key.step());
/// }
///
/// let kinds: Vec<_> = events.iter().map(|event| event.kind()).collect();
/// assert_eq!(kinds, [KeyEventKind::ShortPress]);
/// assert_eq!(events[0].key_id(), 7);
/// # Ok::<(), key_envoy::Error>(())
/// ```
#[derive(Debug)]
pub struct KeyDevice<S> {
    key_id: u8,
    state: KeyState,
    tick_count: u16,
    timing: KeyTiming,
    sample: S,
}

impl<S> KeyDevice<S> {
    /// Creates an idle key.
    ///
    /// `key_id` tags every event this key produces and must be unique within a
    /// [`KeyRegistry`](crate::key_scanner::KeyRegistry).
    #[must_use]
    pub const fn new(key_id: u8, timing: KeyTiming, sample: S) -> Self {
        Self {
            key_id,
            state: KeyState::CheckPressDown,
            tick_count: 0,
            timing,
            sample,
        }
    }

    /// The id carried by this key's events.
    #[must_use]
    pub const fn key_id(&self) -> u8 {
        self.key_id
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> KeyState {
        self.state
    }

    /// Ticks counted in the current state (including any carried-over ticks after a
    /// misdetection revert).
    #[must_use]
    pub const fn tick_count(&self) -> u16 {
        self.tick_count
    }

    /// The key's timing thresholds.
    #[must_use]
    pub const fn timing(&self) -> KeyTiming {
        self.timing
    }

    /// Returns `true` when the key is waiting for a new press.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == KeyState::CheckPressDown
    }

    /// Abandons any click in progress and waits for a new press.
    pub const fn reset(&mut self) {
        self.enter(KeyState::CheckPressDown);
    }

    const fn enter(&mut self, state: KeyState) {
        self.state = state;
        self.tick_count = 0;
    }

    /// Counts one tick and reports whether `period` has been reached.
    const fn count_tick_reaches(&mut self, period: u16) -> bool {
        self.tick_count = self.tick_count.saturating_add(1);
        self.tick_count >= period
    }

    /// Returns to `state` after a misdetected edge, adding the ticks spent in the
    /// filter to the ones measured before it.
    fn revert(&mut self, state: KeyState, carried: u16) {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "key {}: misdetected edge, back to {} with {} + {} ticks",
            self.key_id,
            state,
            carried,
            self.tick_count
        );
        self.state = state;
        self.tick_count = carried.saturating_add(self.tick_count);
    }

    fn emit(&self, kind: KeyEventKind) -> KeyEvent {
        #[cfg(feature = "defmt")]
        defmt::debug!("key {}: {}", self.key_id, kind);
        KeyEvent::new(self.key_id, kind)
    }
}

impl<S> KeyDevice<S>
where
    S: Sample,
{
    /// Advances the state machine by one tick.
    ///
    /// Returns the event detected on this tick, if any. Runs in constant time and never
    /// blocks, so it is safe to call from a timer interrupt.
    pub fn step(&mut self) -> Option<KeyEvent> {
        match self.state {
            KeyState::CheckPressDown => self.check_press_down(),
            KeyState::PressDownFilter => self.press_down_filter(),
            KeyState::CheckLong => self.check_long(),
            KeyState::ShortReleaseFilter { held } => self.short_release_filter(held),
            KeyState::CheckDoublePress => self.check_double_press(),
            KeyState::DoublePressFilter { gap } => self.double_press_filter(gap),
            KeyState::DoubleReleaseFilter => self.double_release_filter(),
            KeyState::LongReleaseFilter => self.long_release_filter(),
        }
    }

    fn check_press_down(&mut self) -> Option<KeyEvent> {
        if self.sample.is_pressed() {
            self.enter(KeyState::PressDownFilter);
        }
        None
    }

    fn press_down_filter(&mut self) -> Option<KeyEvent> {
        if !self.count_tick_reaches(self.timing.filter_period()) {
            return None;
        }
        if self.sample.is_pressed() {
            self.enter(KeyState::CheckLong);
        } else {
            // bounce
            self.enter(KeyState::CheckPressDown);
        }
        None
    }

    fn check_long(&mut self) -> Option<KeyEvent> {
        let long_reached = self.count_tick_reaches(self.timing.long_click_period());
        if !self.sample.is_pressed() {
            let held = self.tick_count;
            self.enter(KeyState::ShortReleaseFilter { held });
            return None;
        }
        if !long_reached {
            return None;
        }
        self.enter(KeyState::LongReleaseFilter);
        Some(self.emit(KeyEventKind::LongPress))
    }

    fn short_release_filter(&mut self, held: u16) -> Option<KeyEvent> {
        if !self.count_tick_reaches(self.timing.filter_period()) {
            return None;
        }
        if !self.sample.is_pressed() {
            self.enter(KeyState::CheckDoublePress);
            return None;
        }
        self.revert(KeyState::CheckLong, held);
        // The glitch straddled the long-click threshold: the key is confirmed held past it.
        if self.tick_count < self.timing.long_click_period() {
            return None;
        }
        self.enter(KeyState::LongReleaseFilter);
        Some(self.emit(KeyEventKind::LongPress))
    }

    fn check_double_press(&mut self) -> Option<KeyEvent> {
        let gap_expired = self.count_tick_reaches(self.timing.max_double_click_gap());
        let pressed = self.sample.is_pressed();
        match (pressed, gap_expired) {
            (true, false) => {
                let gap = self.tick_count;
                self.enter(KeyState::DoublePressFilter { gap });
                None
            }
            (false, true) => {
                self.enter(KeyState::CheckPressDown);
                Some(self.emit(KeyEventKind::ShortPress))
            }
            // A press seen on the tick the gap closes starts a new click; the pending
            // short press merges into it.
            (true, true) => {
                self.enter(KeyState::PressDownFilter);
                None
            }
            (false, false) => None,
        }
    }

    fn double_press_filter(&mut self, gap: u16) -> Option<KeyEvent> {
        if !self.count_tick_reaches(self.timing.filter_period()) {
            return None;
        }
        if self.sample.is_pressed() {
            self.enter(KeyState::DoubleReleaseFilter);
            Some(self.emit(KeyEventKind::DoublePress))
        } else {
            self.revert(KeyState::CheckDoublePress, gap);
            None
        }
    }

    fn double_release_filter(&mut self) -> Option<KeyEvent> {
        if self.sample.is_pressed() {
            return None;
        }
        if self.count_tick_reaches(self.timing.filter_period()) {
            self.enter(KeyState::CheckPressDown);
        }
        None
    }

    fn long_release_filter(&mut self) -> Option<KeyEvent> {
        if self.sample.is_pressed() {
            return None;
        }
        if !self.count_tick_reaches(self.timing.filter_period()) {
            return None;
        }
        self.enter(KeyState::CheckPressDown);
        Some(self.emit(KeyEventKind::LongReleaseUp))
    }
}
