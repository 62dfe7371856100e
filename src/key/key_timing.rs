//! Per-key timing thresholds, counted in scan ticks.
//!
//! See [`KeyTiming`] for details.

use embassy_time::Duration;

use crate::{Error, Result};

/// Scan period assumed by [`KeyTiming::DEFAULT`].
pub const DEFAULT_SCAN_PERIOD: Duration = Duration::from_millis(1);

/// Timing thresholds for one key, in scan ticks.
///
/// Every threshold is a count of [`KeyScanner::scan`](crate::key_scanner::KeyScanner::scan)
/// calls, so its real-time meaning depends on the scan period. A transition fires on the
/// tick where the key's counter reaches the threshold.
///
/// # Example
///
/// ```rust
/// use embassy_time::Duration;
/// use key_envoy::key::KeyTiming;
///
/// // Same as the defaults, spelled out in milliseconds.
/// let timing = KeyTiming::from_durations(
///     Duration::from_millis(1),
///     Duration::from_millis(20),
///     Duration::from_millis(1500),
///     Duration::from_millis(300),
/// )?;
/// assert_eq!(timing, KeyTiming::DEFAULT);
/// # Ok::<(), key_envoy::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyTiming {
    filter_period: u16,
    long_click_period: u16,
    max_double_click_gap: u16,
}

impl KeyTiming {
    /// 20 tick debounce, 1500 tick long click, 300 tick double-click gap
    /// (20 ms, 1.5 s and 300 ms at [`DEFAULT_SCAN_PERIOD`]).
    pub const DEFAULT: Self = Self {
        filter_period: 20,
        long_click_period: 1500,
        max_double_click_gap: 300,
    };

    /// Creates timing thresholds from tick counts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroPeriod`] if any threshold is zero.
    pub const fn new(
        filter_period: u16,
        long_click_period: u16,
        max_double_click_gap: u16,
    ) -> Result<Self> {
        if filter_period == 0 {
            return Err(Error::ZeroPeriod {
                name: "filter_period",
            });
        }
        if long_click_period == 0 {
            return Err(Error::ZeroPeriod {
                name: "long_click_period",
            });
        }
        if max_double_click_gap == 0 {
            return Err(Error::ZeroPeriod {
                name: "max_double_click_gap",
            });
        }
        Ok(Self {
            filter_period,
            long_click_period,
            max_double_click_gap,
        })
    }

    /// Creates timing thresholds from real durations and the period at which the keys
    /// will be scanned. Each threshold is rounded down to whole ticks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroPeriod`] if `scan_period` is zero or a threshold rounds to zero
    /// ticks, and [`Error::PeriodOutOfRange`] if a threshold needs more than `u16::MAX` ticks.
    pub fn from_durations(
        scan_period: Duration,
        filter: Duration,
        long_click: Duration,
        max_double_click_gap: Duration,
    ) -> Result<Self> {
        let scan_ticks = scan_period.as_ticks();
        if scan_ticks == 0 {
            return Err(Error::ZeroPeriod {
                name: "scan_period",
            });
        }
        Self::new(
            to_scan_ticks(filter, scan_ticks, "filter_period")?,
            to_scan_ticks(long_click, scan_ticks, "long_click_period")?,
            to_scan_ticks(max_double_click_gap, scan_ticks, "max_double_click_gap")?,
        )
    }

    /// Ticks an edge must persist before it is trusted.
    #[must_use]
    pub const fn filter_period(&self) -> u16 {
        self.filter_period
    }

    /// Ticks a confirmed press must last to count as a long press.
    #[must_use]
    pub const fn long_click_period(&self) -> u16 {
        self.long_click_period
    }

    /// Most ticks allowed between a release and the next press for a double press.
    #[must_use]
    pub const fn max_double_click_gap(&self) -> u16 {
        self.max_double_click_gap
    }
}

impl Default for KeyTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn to_scan_ticks(duration: Duration, scan_ticks: u64, name: &'static str) -> Result<u16> {
    let ticks = duration
        .as_ticks()
        .checked_div(scan_ticks)
        .ok_or(Error::ZeroPeriod { name })?;
    u16::try_from(ticks).map_err(|_| Error::PeriodOutOfRange { name })
}
