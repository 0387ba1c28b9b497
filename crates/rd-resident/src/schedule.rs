//! The per-citizen schedule record and its storage.
//!
//! # Design
//!
//! There is no stored day plan: the record holds only the *next* transition
//! (`scheduled_state` + `scheduled_state_time`) and enough bookkeeping to
//! re-derive everything else each tick.  `scheduled_state == Unknown` means
//! "no pending decision, recompute on the next evaluation"; any other value
//! means "wait until `scheduled_state_time`, then execute".

use rd_core::{BuildingId, SimTime};

/// Current situation or next planned activity of a citizen.
///
/// `Go*` values are scheduled intents; their unprefixed counterparts are
/// observed locations.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResidentState {
    #[default]
    Unknown,
    /// Outside the scheduler's responsibility (dummy traffic, in custody).
    Ignored,
    InTransition,
    AtHome,
    AtWork,
    AtSchool,
    /// At a work-classified building that is neither the assigned workplace
    /// nor the assigned school.
    AtSchoolOrWork,
    Shopping,
    Relaxing,
    Visiting,
    InShelter,
    Evacuation,
    GoHome,
    GoToWork,
    GoToSchool,
    GoShopping,
    GoToRelax,
    GoToVisit,
    GoToShelter,
}

/// Assigned work shift.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorkShift {
    #[default]
    Unemployed,
    First,
    Second,
    Night,
    /// Day half of a two-shift continuous schedule.
    ContinuousDay,
    ContinuousNight,
    /// Temporary staff of a city event.
    Event,
}

/// Employment / enrollment status.  `Active` reads as "working" for workers
/// and "studying" for students.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorkStatus {
    #[default]
    None,
    Active,
    OnVacation,
}

/// Transient context bridging one planning decision to its execution.
/// Consumed (reset to `None`) when the transition executes.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScheduleHint {
    #[default]
    None,
    LocalShoppingOnly,
    LocalShoppingOnlyBeforeWork,
    LocalShoppingOnlyBeforeSchool,
    NoShoppingAnyMore,
    AttendingEvent,
    RelaxAtLeisureBuilding,
    RelaxNearbyOnly,
}

/// One citizen's schedule record.  Zero-valued when the citizen enters the
/// simulation; cleared back to zero when they leave it permanently.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CitizenSchedule {
    pub current_state: ResidentState,
    pub scheduled_state: ResidentState,
    /// The most recently executed scheduled state; used to detect stale
    /// intents after an interrupted commute.
    pub last_scheduled_state: ResidentState,
    /// The transition fires once simulated time reaches this.  `SimTime::ZERO`
    /// only while `scheduled_state == Unknown`.
    pub scheduled_state_time: SimTime,

    pub work_building: BuildingId,
    pub school_building: BuildingId,
    /// Venue of the event or visit currently being targeted.
    pub event_building: BuildingId,

    pub work_shift: WorkShift,
    pub work_status: WorkStatus,
    pub school_status: WorkStatus,
    pub vacation_days_left: u8,

    pub hint: ScheduleHint,
    /// Observability counter: failed destination searches since the last
    /// successful scheduling.
    pub find_visit_place_attempts: u8,

    // Derived when the shift/class is assigned; read by headcount queries.
    pub work_shift_start_hour: f32,
    pub work_shift_end_hour: f32,
    pub works_on_weekends: bool,
    pub school_class_start_hour: f32,
    pub school_class_end_hour: f32,

    /// Home→work departure timestamp of the current workday; zero when the
    /// last commute started elsewhere.
    pub departure_time: SimTime,
}

impl CitizenSchedule {
    /// Queue the next transition.
    pub fn schedule(&mut self, state: ResidentState, time: SimTime) {
        self.scheduled_state = state;
        self.scheduled_state_time = time;
    }

    /// Consume the pending transition, recording it as the last executed one.
    pub fn consume(&mut self) -> ResidentState {
        let state = self.scheduled_state;
        self.last_scheduled_state = state;
        self.scheduled_state = ResidentState::Unknown;
        self.scheduled_state_time = SimTime::ZERO;
        self.hint = ScheduleHint::None;
        state
    }

    /// Drop the pending transition without executing it.
    pub fn cancel(&mut self) {
        self.scheduled_state = ResidentState::Unknown;
        self.scheduled_state_time = SimTime::ZERO;
        self.hint = ScheduleHint::None;
    }

    /// `true` while a transition is queued.
    #[inline]
    pub fn is_scheduled(&self) -> bool {
        self.scheduled_state != ResidentState::Unknown
    }

    /// `true` if the citizen currently holds a job.
    #[inline]
    pub fn is_employed(&self) -> bool {
        self.work_building.is_some() && self.work_shift != WorkShift::Unemployed
    }
}

// ── ScheduleStore ─────────────────────────────────────────────────────────────

/// Dense schedule storage indexed by `CitizenId`.  Slot 0 (the sentinel)
/// stays zero-valued forever.
#[derive(Default)]
pub struct ScheduleStore {
    inner: Vec<CitizenSchedule>,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule of a citizen; the zero-valued default for ids never touched.
    #[inline]
    pub fn get(&self, citizen: rd_core::CitizenId) -> CitizenSchedule {
        self.inner.get(citizen.index()).copied().unwrap_or_default()
    }

    /// Mutable schedule, growing the table as needed.
    pub fn get_mut(&mut self, citizen: rd_core::CitizenId) -> &mut CitizenSchedule {
        let index = citizen.index();
        if index >= self.inner.len() {
            self.inner.resize(index + 1, CitizenSchedule::default());
        }
        &mut self.inner[index]
    }

    /// Clear a record back to zero-valued (permanent removal).
    pub fn reset(&mut self, citizen: rd_core::CitizenId) {
        if let Some(slot) = self.inner.get_mut(citizen.index()) {
            *slot = CitizenSchedule::default();
        }
    }

    /// Non-default records in ascending citizen order, for snapshots.
    pub fn entries(&self) -> Vec<(rd_core::CitizenId, CitizenSchedule)> {
        self.inner
            .iter()
            .enumerate()
            .filter(|(_, s)| **s != CitizenSchedule::default())
            .map(|(i, s)| (rd_core::CitizenId(i as u32), *s))
            .collect()
    }

    /// Rebuild the table from snapshot entries.
    pub fn restore(entries: impl IntoIterator<Item = (rd_core::CitizenId, CitizenSchedule)>) -> Self {
        let mut store = Self::new();
        for (citizen, schedule) in entries {
            *store.get_mut(citizen) = schedule;
        }
        store
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
