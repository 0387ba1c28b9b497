//! Scheduling configuration: every quota and hour boundary the core reads.
//!
//! The configuration is owned by the host and read-only during a tick.  The
//! core only contributes two lifecycle helpers: [`SimulationConfig::validate`]
//! clamps out-of-range values at load time, and
//! [`SimulationConfig::migrate`] upgrades records written by older versions.

/// Current configuration schema version.
pub const LATEST_CONFIG_VERSION: u32 = 3;

/// Pre-migration shift quotas were stored on a 0..32 scale; version 1 moved
/// them to 0..100.
const SHIFT_QUOTA_RESCALE: f32 = 3.125;

/// All tunable quotas (percentages, 0–100 unless noted) and hour boundaries.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    /// Schema version of the record this config was loaded from.
    pub version: u32,

    // ── Day shape ─────────────────────────────────────────────────────────
    /// Hour the city wakes up; also ends the noise-restriction night window.
    pub wake_up_hour: f32,
    /// Hour the city goes to sleep; also starts the night window.
    pub go_to_sleep_hour: f32,
    /// `false` makes every day a workday.
    pub is_weekend_enabled: bool,

    // ── Work day ──────────────────────────────────────────────────────────
    /// First work shift begins.
    pub work_begin: f32,
    /// First work shift ends.
    pub work_end: f32,
    /// Earliest lunch departure.
    pub lunch_begin: f32,
    /// Workers return from lunch at this hour.
    pub lunch_end: f32,
    pub is_breakfast_time_enabled: bool,
    pub is_lunch_time_enabled: bool,

    // ── School day ────────────────────────────────────────────────────────
    pub school_begin: f32,
    pub school_end: f32,

    // ── Vacations ─────────────────────────────────────────────────────────
    /// Maximum vacation length in days (vacations last 1..=this).
    pub max_vacation_length: u32,

    // ── Behavior toggles ──────────────────────────────────────────────────
    /// When set, a building with zero workers present counts as closed, and
    /// essential-service workers wait for the next shift before leaving.
    pub workforce_matters: bool,
    /// Percentage of at-home citizens treated as virtual (not realized) when
    /// their transition fires; virtual citizens skip the move entirely.
    pub virtual_citizens_quota: u32,

    // ── Shift quotas ──────────────────────────────────────────────────────
    /// Percentage of workers assigned to the second shift (1–25).
    pub second_shift_quota: u32,
    /// Percentage of workers assigned to the night shift (1–25).
    pub night_shift_quota: u32,
    /// Percentage of continuous-shift workers on the night half (1–25).
    pub continuous_night_shift_quota: u32,

    // ── Excursion quotas ──────────────────────────────────────────────────
    pub breakfast_quota: u32,
    pub lunch_quota: u32,
    /// Chance a shopping trip is restricted to local buildings.
    pub local_building_search_quota: u32,
    /// Chance of going shopping with no goods needed, just for fun (0–50).
    pub shopping_for_fun_quota: u32,
    /// Chance a worker departs exactly on time (failing adds lateness).
    pub on_time_quota: u32,

    // ── Building-side quotas ──────────────────────────────────────────────
    /// Chance a low-density commercial building opens at night.
    pub open_low_commercial_at_night_quota: u32,
    /// Chance a commercial building runs a second shift.
    pub open_commercial_second_shift_quota: u32,
    /// Chance a commercial building opens at weekends.
    pub open_commercial_at_weekends_quota: u32,
    /// Chance a university student attends night classes.
    pub night_class_quota: u32,

    // ── Events ────────────────────────────────────────────────────────────
    pub earliest_event_start_weekday: f32,
    pub latest_event_start_weekday: f32,
    pub earliest_event_start_weekend: f32,
    pub latest_event_start_weekend: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            version: LATEST_CONFIG_VERSION,

            wake_up_hour: 6.0,
            go_to_sleep_hour: 22.0,
            is_weekend_enabled: true,

            work_begin: 9.0,
            work_end: 18.0,
            lunch_begin: 12.0,
            lunch_end: 13.0,
            is_breakfast_time_enabled: true,
            is_lunch_time_enabled: true,

            school_begin: 8.0,
            school_end: 14.0,

            max_vacation_length: 3,

            workforce_matters: true,
            virtual_citizens_quota: 0,

            second_shift_quota: 13,
            night_shift_quota: 6,
            continuous_night_shift_quota: 13,

            breakfast_quota: 25,
            lunch_quota: 80,
            local_building_search_quota: 60,
            shopping_for_fun_quota: 30,
            on_time_quota: 80,

            open_low_commercial_at_night_quota: 25,
            open_commercial_second_shift_quota: 50,
            open_commercial_at_weekends_quota: 65,
            night_class_quota: 25,

            earliest_event_start_weekday: 16.0,
            latest_event_start_weekday: 20.0,
            earliest_event_start_weekend: 8.0,
            latest_event_start_weekend: 22.0,
        }
    }
}

impl SimulationConfig {
    /// Clamp all values into their valid domains.  Called once at load time;
    /// the core itself never re-checks ranges during a tick.
    pub fn validate(&mut self) {
        self.wake_up_hour = self.wake_up_hour.clamp(4.0, 8.0);
        self.go_to_sleep_hour = self.go_to_sleep_hour.clamp(20.0, 23.75);

        self.work_begin = self.work_begin.clamp(6.0, 11.0);
        self.work_end = self.work_end.clamp(15.0, 20.0);
        self.lunch_begin = self.lunch_begin.clamp(11.0, 13.0);
        self.lunch_end = self.lunch_end.clamp(12.0, 14.0);

        self.school_begin = self.school_begin.clamp(7.0, 10.0);
        self.school_end = self.school_end.clamp(12.0, 16.0);

        self.max_vacation_length = self.max_vacation_length.clamp(1, 7);

        self.virtual_citizens_quota = self.virtual_citizens_quota.min(100);

        self.second_shift_quota = self.second_shift_quota.clamp(1, 25);
        self.night_shift_quota = self.night_shift_quota.clamp(1, 25);
        self.continuous_night_shift_quota = self.continuous_night_shift_quota.clamp(1, 25);

        self.breakfast_quota = self.breakfast_quota.min(100);
        self.lunch_quota = self.lunch_quota.min(100);
        self.local_building_search_quota = self.local_building_search_quota.min(100);
        self.shopping_for_fun_quota = self.shopping_for_fun_quota.min(50);
        self.on_time_quota = self.on_time_quota.min(100);

        self.open_low_commercial_at_night_quota = self.open_low_commercial_at_night_quota.min(100);
        self.open_commercial_second_shift_quota = self.open_commercial_second_shift_quota.min(100);
        self.open_commercial_at_weekends_quota = self.open_commercial_at_weekends_quota.min(100);
        self.night_class_quota = self.night_class_quota.min(100);

        self.earliest_event_start_weekday = self.earliest_event_start_weekday.clamp(0.0, 23.5);
        self.latest_event_start_weekday =
            self.latest_event_start_weekday.clamp(self.earliest_event_start_weekday, 23.75);
        self.earliest_event_start_weekend = self.earliest_event_start_weekend.clamp(0.0, 23.5);
        self.latest_event_start_weekend =
            self.latest_event_start_weekend.clamp(self.earliest_event_start_weekend, 23.75);
    }

    /// Upgrade a record written by an older schema version.
    ///
    /// Version 0 stored the second/night shift quotas on a 0..32 scale;
    /// they are rescaled by 3.125 to the current 0..100 scale.
    pub fn migrate(&mut self) {
        if self.version == 0 {
            self.second_shift_quota = (self.second_shift_quota as f32 * SHIFT_QUOTA_RESCALE) as u32;
            self.night_shift_quota = (self.night_shift_quota as f32 * SHIFT_QUOTA_RESCALE) as u32;
        }

        self.version = LATEST_CONFIG_VERSION;
    }
}
