//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing count of simulated **minutes** from the
//! start of the run, which is anchored to a Monday 00:00.  Using an integer
//! minute as the canonical unit keeps all schedule arithmetic exact while
//! still satisfying the half-hour granularity the scheduling rules need;
//! fractional hours only appear at the API surface (`hour_of_day`,
//! `add_hours`), never in stored state.
//!
//! `SimTime::ZERO` doubles as the "nothing scheduled" sentinel in the
//! schedule records, mirroring the zero-valued default of the host's save
//! format.

use std::fmt;

pub const MINUTES_PER_HOUR: u64 = 60;
pub const MINUTES_PER_DAY: u64 = 24 * MINUTES_PER_HOUR;
pub const DAYS_PER_WEEK: u64 = 7;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulated timestamp, in minutes since the run started.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// Construct from a day index and an hour-of-day.
    pub fn from_day_hour(day: u64, hour: f32) -> SimTime {
        SimTime(day * MINUTES_PER_DAY + (hour * MINUTES_PER_HOUR as f32) as u64)
    }

    /// Day index since the run started (day 0 is a Monday).
    #[inline]
    pub fn day(self) -> u64 {
        self.0 / MINUTES_PER_DAY
    }

    /// Day of week: 0 = Monday … 6 = Sunday.
    #[inline]
    pub fn weekday(self) -> u64 {
        self.day() % DAYS_PER_WEEK
    }

    /// `true` on Saturday and Sunday.
    #[inline]
    pub fn is_weekend(self) -> bool {
        self.weekday() >= 5
    }

    /// Hour of day in `[0.0, 24.0)`, minute resolution.
    #[inline]
    pub fn hour_of_day(self) -> f32 {
        (self.0 % MINUTES_PER_DAY) as f32 / MINUTES_PER_HOUR as f32
    }

    /// This timestamp advanced by a fractional number of hours.
    /// Negative offsets saturate at time zero.
    pub fn add_hours(self, hours: f32) -> SimTime {
        let minutes = (hours * MINUTES_PER_HOUR as f32).round() as i64;
        SimTime(self.0.saturating_add_signed(minutes))
    }

    /// The next occurrence of `hour` (0..24): later today if `hour` is still
    /// ahead, otherwise the same hour tomorrow.
    pub fn future_hour(self, hour: f32) -> SimTime {
        let target = (hour.clamp(0.0, 24.0) * MINUTES_PER_HOUR as f32) as u64;
        let midnight = self.0 - self.0 % MINUTES_PER_DAY;
        let today = midnight + target;
        if today > self.0 {
            SimTime(today)
        } else {
            SimTime(today + MINUTES_PER_DAY)
        }
    }

    /// Signed distance to `other` in fractional hours (positive if `other`
    /// is in the future).
    #[inline]
    pub fn hours_until(self, other: SimTime) -> f32 {
        (other.0 as i64 - self.0 as i64) as f32 / MINUTES_PER_HOUR as f32
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = (self.0 % MINUTES_PER_DAY) / MINUTES_PER_HOUR;
        let m = self.0 % MINUTES_PER_HOUR;
        write!(f, "day {} {:02}:{:02}", self.day(), h, m)
    }
}

// ── DayClock ──────────────────────────────────────────────────────────────────

/// A per-tick snapshot of the simulated clock: the current timestamp plus
/// the derived day-phase facts every scheduling rule needs.
///
/// Built once per tick and passed by reference into every evaluation, so no
/// rule ever reads module-level time state.
#[derive(Copy, Clone, Debug)]
pub struct DayClock {
    /// Current simulated timestamp.
    pub now: SimTime,
    /// Hour at which the night ends (sunrise).
    pub sunrise_hour: f32,
    /// Hour at which the night begins (sunset).
    pub sunset_hour: f32,
    /// `false` disables weekends city-wide: every day counts as a workday.
    pub weekend_enabled: bool,
}

impl DayClock {
    pub fn new(now: SimTime, sunrise_hour: f32, sunset_hour: f32, weekend_enabled: bool) -> Self {
        Self { now, sunrise_hour, sunset_hour, weekend_enabled }
    }

    /// Hour of day in `[0.0, 24.0)`.
    #[inline]
    pub fn current_hour(&self) -> f32 {
        self.now.hour_of_day()
    }

    /// `true` between sunset and sunrise.
    #[inline]
    pub fn is_night(&self) -> bool {
        let hour = self.current_hour();
        hour >= self.sunset_hour || hour < self.sunrise_hour
    }

    /// `true` on Saturday/Sunday, unless weekends are disabled city-wide.
    #[inline]
    pub fn is_weekend(&self) -> bool {
        self.weekend_enabled && self.now.is_weekend()
    }
}
