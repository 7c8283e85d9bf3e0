//! Time representation for view records
//!
//! A record carries two timestamps: `first_view`, fixed at creation, and
//! `last_view`, moved forward on every increment. Both are microseconds
//! since the Unix epoch in a `u64` — views on a busy entity land
//! microseconds apart, so second or millisecond precision would collapse
//! recency ordering.
//!
//! Age computation is the one piece of timestamp arithmetic this system
//! does: [`Timestamp::checked_duration_since`] refuses to go backwards,
//! which the record layer turns into the refdate precondition error.
//! Display layers that want calendar dates convert through chrono.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Microseconds since Unix epoch
///
/// The canonical time representation of the store: totally ordered,
/// hashable, and serialized as a plain integer in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Unix epoch (1970-01-01 00:00:00 UTC)
    pub const EPOCH: Timestamp = Timestamp(0);

    /// The current moment, from the system clock
    ///
    /// A clock sitting before the Unix epoch reads as the epoch itself;
    /// the store's clamp on `last_view` handles clocks stepping backwards
    /// between readings.
    pub fn now() -> Self {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Timestamp(since_epoch.as_micros() as u64)
    }

    /// Create from microseconds since epoch
    #[inline]
    pub const fn from_micros(micros: u64) -> Self {
        Timestamp(micros)
    }

    /// Get microseconds since epoch
    #[inline]
    pub const fn as_micros(&self) -> u64 {
        self.0
    }

    /// Duration from `earlier` up to this timestamp
    ///
    /// Returns `None` when `earlier` is actually later than `self`; age
    /// computation maps that case to a precondition error instead of
    /// producing a negative duration.
    pub fn checked_duration_since(&self, earlier: Timestamp) -> Option<Duration> {
        self.0
            .checked_sub(earlier.0)
            .map(Duration::from_micros)
    }

    /// This timestamp moved forward by `duration`, saturating on overflow
    pub fn saturating_add(&self, duration: Duration) -> Self {
        Timestamp(self.0.saturating_add(duration.as_micros() as u64))
    }

    /// Calendar view of this timestamp for display layers
    ///
    /// Values beyond chrono's representable range map to
    /// `DateTime::<Utc>::MAX_UTC`.
    pub fn to_datetime(&self) -> DateTime<Utc> {
        Utc.timestamp_micros(self.0 as i64)
            .single()
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Create from a calendar date
    ///
    /// Dates before the Unix epoch map to [`Timestamp::EPOCH`].
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Timestamp(dt.timestamp_micros().max(0) as u64)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // "seconds.microseconds", readable in error messages and logs
        write!(f, "{}.{:06}", self.0 / 1_000_000, self.0 % 1_000_000)
    }
}
