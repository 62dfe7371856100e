//! Click events produced by the key scanner and their packed 16-bit form.
//!
//! See [`KeyEvent`] for details.

/// Packed value returned by [`EventQueue::read_raw`](crate::event_queue::EventQueue::read_raw)
/// when no event is waiting.
///
/// The low byte `0xFF` is never a valid [`KeyEventKind`], so the sentinel cannot be
/// confused with an event from any key.
pub const NO_EVENT: u16 = 0x00FF;

// ============================================================================
// KeyEventKind - What kind of click was detected
// ============================================================================

/// The kind of click detected on a key.
///
/// Discriminants match the low byte of the packed form.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum KeyEventKind {
    /// Pressed and released before the long-click period, and not pressed again
    /// within the double-click gap.
    ShortPress = 1,
    /// Held for the long-click period. Reported while the key is still down.
    LongPress = 2,
    /// A second press confirmed within the double-click gap.
    DoublePress = 3,
    /// The (debounced) release that ends a long press.
    LongReleaseUp = 4,
}

impl KeyEventKind {
    /// Decodes the low byte of a packed event.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::ShortPress),
            2 => Some(Self::LongPress),
            3 => Some(Self::DoublePress),
            4 => Some(Self::LongReleaseUp),
            _ => None,
        }
    }
}

// ============================================================================
// KeyEvent
// ============================================================================

/// A click event for one key.
///
/// Events are plain values: the scanner produces them in tick order and the
/// [`EventQueue`](crate::event_queue::EventQueue) hands them out in the same order.
///
/// # Packed form
///
/// | bits 15..8 | bits 7..0 |
/// |------------|-----------|
/// | `key_id`   | `kind`    |
///
/// ```rust
/// use key_envoy::key_event::{KeyEvent, KeyEventKind, NO_EVENT};
///
/// let event = KeyEvent::new(2, KeyEventKind::DoublePress);
/// assert_eq!(event.encode(), 0x0203);
/// assert_eq!(KeyEvent::decode(0x0203), Some(event));
/// assert_eq!(KeyEvent::decode(NO_EVENT), None);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    key_id: u8,
    kind: KeyEventKind,
}

impl KeyEvent {
    /// Creates an event for `key_id`.
    #[must_use]
    pub const fn new(key_id: u8, kind: KeyEventKind) -> Self {
        Self { key_id, kind }
    }

    /// The id of the key that produced this event.
    #[must_use]
    pub const fn key_id(self) -> u8 {
        self.key_id
    }

    /// What kind of click was detected.
    #[must_use]
    pub const fn kind(self) -> KeyEventKind {
        self.kind
    }

    /// Packs the event as `(key_id << 8) | kind`.
    #[must_use]
    pub const fn encode(self) -> u16 {
        u16::from_be_bytes([self.key_id, self.kind as u8])
    }

    /// Unpacks a value produced by [`encode`](Self::encode).
    ///
    /// Returns `None` for [`NO_EVENT`] and for any unknown kind byte.
    #[must_use]
    pub const fn decode(raw: u16) -> Option<Self> {
        let [key_id, kind] = raw.to_be_bytes();
        match KeyEventKind::from_u8(kind) {
            Some(kind) => Some(Self { key_id, kind }),
            None => None,
        }
    }
}
