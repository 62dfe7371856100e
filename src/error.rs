//! Errors reported while configuring keys and registries.
//!
//! Scanning itself never fails: every step is a state transition or a no-op.

/// Errors returned by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A timing threshold (or the scan period used to derive it) is zero ticks.
    #[display("{name} must be at least one tick")]
    ZeroPeriod {
        /// Which threshold was zero.
        name: &'static str,
    },

    /// A duration does not fit in the 16-bit tick counter.
    #[display("{name} does not fit in a 16-bit tick count")]
    PeriodOutOfRange {
        /// Which threshold overflowed.
        name: &'static str,
    },

    /// Two keys in one registry share an id, so their events could not be told apart.
    #[display("key id {key_id} is registered more than once")]
    DuplicateKeyId {
        /// The repeated id.
        key_id: u8,
    },
}

/// Result type used throughout this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
