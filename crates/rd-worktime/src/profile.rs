//! The per-building operating-hours profile.

/// Operating-hours profile for one building.
///
/// `work_shifts` is never stored independently: it is always recomputed by
/// [`WorkTime::compose`] from the night/continuity flags, so a profile can
/// never carry a contradictory combination (a single continuous shift, or a
/// three-shift continuous schedule).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkTime {
    /// 1 = daytime only, 2 = two shifts, 3 = round the clock.
    pub work_shifts: u8,
    pub work_at_night: bool,
    pub work_at_weekends: bool,
    /// First shift starts earlier and may end later than the standard window.
    pub has_extended_work_shift: bool,
    /// Two 12-hour shifts instead of up to three 8-hour shifts.
    pub has_continuous_work_shift: bool,
    /// Derived by the default rule set; policy triggers may still adjust it.
    pub is_default: bool,
    /// Suppresses policy-triggered re-derivation.
    pub ignore_policy: bool,
    /// User override; never touched automatically.
    pub is_locked: bool,
}

impl WorkTime {
    /// Build a profile from its flags, deriving the shift count.
    ///
    /// Continuous schedules always run two shifts (day half + night half;
    /// the night half is closed unless `night` is set).  Discrete schedules
    /// run three shifts at night, two with a second shift, one otherwise.
    pub fn compose(
        night: bool,
        weekends: bool,
        extended: bool,
        continuous: bool,
        second_shift: bool,
    ) -> Self {
        let work_shifts = if continuous {
            2
        } else if night {
            3
        } else if second_shift {
            2
        } else {
            1
        };
        WorkTime {
            work_shifts,
            work_at_night: night,
            work_at_weekends: weekends,
            has_extended_work_shift: extended,
            has_continuous_work_shift: continuous,
            is_default: true,
            ignore_policy: false,
            is_locked: false,
        }
    }

    /// Round-the-clock operation: three discrete shifts, nights and weekends.
    pub fn always_open() -> Self {
        WorkTime::compose(true, true, false, false, false)
    }

    /// `true` if the profile keeps the building open at every hour of every
    /// day.
    #[inline]
    pub fn is_always_open(&self) -> bool {
        self.work_shifts == 3 || (self.has_continuous_work_shift && self.work_at_night)
    }

    /// `true` when policy triggers may rewrite this profile.
    #[inline]
    pub fn accepts_policy_updates(&self) -> bool {
        self.is_default && !self.ignore_policy && !self.is_locked
    }
}

impl Default for WorkTime {
    fn default() -> Self {
        WorkTime::compose(false, false, false, false, false)
    }
}
