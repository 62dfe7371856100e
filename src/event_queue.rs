//! A lock-free ring buffer that hands key events from the scanning context to the
//! application.
//!
//! See [`EventQueue`] for details and usage example.

use portable_atomic::{AtomicU16, AtomicUsize, Ordering};

use crate::key_event::{KeyEvent, NO_EVENT};

/// Queue capacity used when none is given.
pub const DEFAULT_QUEUE_CAPACITY: usize = 16;

/// A fixed-capacity, single-producer/single-consumer queue of [`KeyEvent`]s.
///
/// The scanner pushes from its tick context (typically a timer interrupt or a
/// high-priority task); the application pops from wherever it polls. Neither side
/// locks or blocks, so the queue can live in a plain `static`.
///
/// # Overflow
///
/// The queue never reports "full". When the producer gets more than `N` events ahead,
/// new events overwrite the oldest unread ones, and the next [`pop`](Self::pop) resumes
/// at the oldest event that survived. Nothing signals the loss: the consumer must poll
/// often enough for `N` events to cover the input it can miss between polls.
///
/// # Indices
///
/// The read and write indices only ever advance and wrap around `usize`. `N` must be a
/// power of two (checked at compile time) so that masking a wrapped index still lands on
/// the right slot.
///
/// Only one context may push and only one context may pop, and both must run on the same
/// core: a [`push`](Self::push) must run to completion relative to the consumer, as a tick
/// interrupt or a higher-priority task does over thread code. With a producer on another
/// core, a `pop` racing an overflowing `push` can return an event from the wrong lap.
///
/// # Example
///
/// ```rust
/// use key_envoy::event_queue::EventQueue;
/// use key_envoy::key_event::{KeyEvent, KeyEventKind, NO_EVENT};
///
/// static KEY_EVENTS: EventQueue<16> = EventQueue::new();
///
/// KEY_EVENTS.push(KeyEvent::new(0, KeyEventKind::LongPress));
/// KEY_EVENTS.push(KeyEvent::new(0, KeyEventKind::LongReleaseUp));
///
/// assert_eq!(KEY_EVENTS.pop(), Some(KeyEvent::new(0, KeyEventKind::LongPress)));
/// assert_eq!(KEY_EVENTS.read_raw(), 0x0004);
/// assert_eq!(KEY_EVENTS.read_raw(), NO_EVENT);
/// ```
#[derive(Debug)]
pub struct EventQueue<const N: usize = DEFAULT_QUEUE_CAPACITY> {
    slots: [AtomicU16; N],
    write_index: AtomicUsize,
    read_index: AtomicUsize,
}

impl<const N: usize> EventQueue<N> {
    const MASK: usize = N.wrapping_sub(1);

    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        const {
            assert!(
                N.is_power_of_two(),
                "EventQueue capacity must be a power of two"
            );
        }
        Self {
            slots: [const { AtomicU16::new(NO_EVENT) }; N],
            write_index: AtomicUsize::new(0),
            read_index: AtomicUsize::new(0),
        }
    }

    /// Number of events the queue holds before it starts overwriting.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Appends an event. Always succeeds; overwrites the oldest unread event when full.
    ///
    /// Call from the producer context only.
    pub fn push(&self, event: KeyEvent) {
        let write = self.write_index.load(Ordering::Relaxed);
        self.slot(write).store(event.encode(), Ordering::Relaxed);
        self.write_index
            .store(write.wrapping_add(1), Ordering::Release);
    }

    /// Removes and returns the oldest unread event, or `None` if the queue is empty.
    ///
    /// An empty queue is left untouched. Call from the consumer context only.
    pub fn pop(&self) -> Option<KeyEvent> {
        loop {
            let write = self.write_index.load(Ordering::Acquire);
            let mut read = self.read_index.load(Ordering::Relaxed);
            if read == write {
                return None;
            }
            if write.wrapping_sub(read) > N {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "EventQueue: {} unread events overwritten",
                    write.wrapping_sub(read).wrapping_sub(N)
                );
                read = write.wrapping_sub(N);
            }

            let raw = self.slot(read).load(Ordering::Acquire);

            // The producer lapped this slot while it was being read; start over.
            if self.write_index.load(Ordering::Acquire).wrapping_sub(read) > N {
                continue;
            }

            self.read_index
                .store(read.wrapping_add(1), Ordering::Release);
            return KeyEvent::decode(raw);
        }
    }

    /// Removes and returns the oldest unread event in packed form
    /// (see [`KeyEvent::encode`]), or [`NO_EVENT`] if the queue is empty.
    pub fn read_raw(&self) -> u16 {
        self.pop().map_or(NO_EVENT, KeyEvent::encode)
    }

    /// Pops up to `M` events, oldest first.
    pub fn drain<const M: usize>(&self) -> heapless::Vec<KeyEvent, M> {
        let mut events = heapless::Vec::new();
        while !events.is_full() {
            let Some(event) = self.pop() else {
                break;
            };
            if events.push(event).is_err() {
                break;
            }
        }
        events
    }

    /// Number of unread events that can still be popped (at most `N`).
    #[must_use]
    pub fn len(&self) -> usize {
        let write = self.write_index.load(Ordering::Acquire);
        let read = self.read_index.load(Ordering::Acquire);
        write.wrapping_sub(read).min(N)
    }

    /// Returns `true` if there is nothing to pop.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.write_index.load(Ordering::Acquire) == self.read_index.load(Ordering::Acquire)
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "a masked index is always below N"
    )]
    fn slot(&self, index: usize) -> &AtomicU16 {
        &self.slots[index & Self::MASK]
    }
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
