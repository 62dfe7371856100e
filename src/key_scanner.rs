//! Periodic scanning of a key registry into an event queue.
//!
//! See [`KeyScanner`] for usage example.

mod key_registry;

pub use key_registry::KeyRegistry;

use embassy_time::{Duration, Ticker};

use crate::event_queue::EventQueue;
use crate::key::Sample;

/// Advances every key of a [`KeyRegistry`] once per tick and queues the events.
///
/// Call [`scan()`](Self::scan) at a fixed period (the one the keys' [`KeyTiming`]s are
/// counted in), for example from a 1 ms timer interrupt, or let [`run()`](Self::run)
/// drive it from an async task. The application reads events from the shared
/// [`EventQueue`] at its own pace.
///
/// [`KeyTiming`]: crate::key::KeyTiming
///
/// # Example
///
/// ```rust
/// use key_envoy::event_queue::EventQueue;
/// use key_envoy::key::{KeyDevice, KeyTiming};
/// use key_envoy::key_event::{KeyEvent, KeyEventKind};
/// use key_envoy::key_scanner::{KeyRegistry, KeyScanner};
///
/// static KEY_EVENTS: EventQueue = EventQueue::new();
///
/// fn read_key0() -> bool {
///     true // e.g. a GPIO read
/// }
///
/// fn read_key1() -> bool {
///     false
/// }
///
/// let registry = KeyRegistry::new([
///     KeyDevice::new(0, KeyTiming::DEFAULT, read_key0 as fn() -> bool),
///     KeyDevice::new(1, KeyTiming::DEFAULT, read_key1 as fn() -> bool),
/// ])?;
/// let mut scanner = KeyScanner::new(registry, &KEY_EVENTS);
///
/// // Key 0 is held: 20 ticks of debounce, then 1500 ticks to a long press.
/// for _ in 0..1521 {
///     scanner.scan();
/// }
/// assert_eq!(KEY_EVENTS.pop(), Some(KeyEvent::new(0, KeyEventKind::LongPress)));
/// assert_eq!(KEY_EVENTS.pop(), None);
/// # Ok::<(), key_envoy::Error>(())
/// ```
#[derive(Debug)]
pub struct KeyScanner<'q, S, const K: usize, const N: usize> {
    registry: KeyRegistry<S, K>,
    events: &'q EventQueue<N>,
}

impl<'q, S, const K: usize, const N: usize> KeyScanner<'q, S, K, N> {
    /// Creates a scanner that pushes the events of `registry` into `events`.
    #[must_use]
    pub const fn new(registry: KeyRegistry<S, K>, events: &'q EventQueue<N>) -> Self {
        Self { registry, events }
    }

    /// The scanned keys.
    #[must_use]
    pub const fn registry(&self) -> &KeyRegistry<S, K> {
        &self.registry
    }

    /// Mutable access to the scanned keys, e.g. to reset them.
    pub const fn registry_mut(&mut self) -> &mut KeyRegistry<S, K> {
        &mut self.registry
    }

    /// The queue events are pushed into.
    #[must_use]
    pub const fn events(&self) -> &'q EventQueue<N> {
        self.events
    }
}

impl<S, const K: usize, const N: usize> KeyScanner<'_, S, K, N>
where
    S: Sample,
{
    /// Advances every key by one tick, in registration order, and queues any events.
    ///
    /// Must not be re-entered: call it from exactly one context.
    pub fn scan(&mut self) {
        let events = self.events;
        self.registry.step_all(|event| events.push(event));
    }

    /// Scans forever, once every `period`.
    ///
    /// Missed ticks (when the task is starved) are caught up in a burst by
    /// [`Ticker`], so key timing stays counted in scan ticks.
    pub async fn run(&mut self, period: Duration) -> ! {
        #[cfg(feature = "defmt")]
        defmt::info!(
            "KeyScanner: scanning {} keys every {} us",
            K,
            period.as_micros()
        );
        let mut ticker = Ticker::every(period);
        loop {
            self.scan();
            ticker.next().await;
        }
    }
}
