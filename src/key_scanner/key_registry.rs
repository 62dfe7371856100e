//! A fixed set of keys scanned together.
//!
//! See [`KeyRegistry`] for details.

use crate::key::{KeyDevice, Sample};
use crate::key_event::KeyEvent;
use crate::{Error, Result};

/// An ordered, fixed-size collection of [`KeyDevice`]s with unique ids.
///
/// Built once at start-up; keys cannot be added or removed afterwards. Keys of
/// different kinds can share a registry by using a common sampler type such as
/// `fn() -> bool` or `&mut dyn FnMut() -> bool`.
#[derive(Debug)]
pub struct KeyRegistry<S, const K: usize> {
    keys: [KeyDevice<S>; K],
}

impl<S, const K: usize> KeyRegistry<S, K> {
    /// Creates a registry from `keys`, scanned in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKeyId`] if two keys share an id.
    pub fn new(keys: [KeyDevice<S>; K]) -> Result<Self> {
        for (index, key) in keys.iter().enumerate() {
            let key_id = key.key_id();
            if keys
                .iter()
                .skip(index.saturating_add(1))
                .any(|other| other.key_id() == key_id)
            {
                return Err(Error::DuplicateKeyId { key_id });
            }
        }
        Ok(Self { keys })
    }

    /// All keys in scan order.
    #[must_use]
    pub const fn keys(&self) -> &[KeyDevice<S>] {
        &self.keys
    }

    /// The key with id `key_id`, if registered.
    #[must_use]
    pub fn key(&self, key_id: u8) -> Option<&KeyDevice<S>> {
        self.keys.iter().find(|key| key.key_id() == key_id)
    }

    /// Number of registered keys.
    #[must_use]
    pub const fn len(&self) -> usize {
        K
    }

    /// Returns `true` if no keys are registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        K == 0
    }

    /// Abandons every click in progress.
    pub fn reset_all(&mut self) {
        for key in &mut self.keys {
            key.reset();
        }
    }
}

impl<S, const K: usize> KeyRegistry<S, K>
where
    S: Sample,
{
    /// Advances every key by one tick, in registration order, passing each detected
    /// event to `emit`.
    pub fn step_all(&mut self, mut emit: impl FnMut(KeyEvent)) {
        for key in &mut self.keys {
            if let Some(event) = key.step() {
                emit(event);
            }
        }
    }
}
