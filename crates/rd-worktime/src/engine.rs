//! The operating-hours engine: profile table plus the open/closed queries.
//!
//! # Design
//!
//! Profiles are created lazily on first query and cached in an `FxHashMap`.
//! The engine is the only writer: callers receive copies, never mutable
//! references, so reads within a tick need no synchronization once a profile
//! exists.  Buildings absent from the table (sentinel id, untracked
//! classifications) always report open / not restricted / not closing.

use rd_core::{BuildingId, DayClock, SimRng, SimulationConfig};
use rd_world::{BuildingClass, Buildings, Service, TravelTime};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::derive::{apply_policies, create_default, needs_work_time};
use crate::profile::WorkTime;

/// Lead window for [`OperatingHours::is_closing_soon`].
pub const CLOSING_LEAD_HOURS: f32 = 2.0;

/// Earliest hour an extended first shift may open.
const EARLIEST_OPENING: f32 = 5.5;

/// Continuous day-half boundaries.
const CONTINUOUS_BEGIN: f32 = 8.0;
const CONTINUOUS_END: f32 = 20.0;

/// Closing hour of two-shift schools (evening classes end).
const SCHOOL_SECOND_SHIFT_END: f32 = 22.0;

pub struct OperatingHours {
    table: FxHashMap<BuildingId, WorkTime>,
}

impl Default for OperatingHours {
    fn default() -> Self {
        Self::new()
    }
}

impl OperatingHours {
    pub fn new() -> Self {
        Self { table: FxHashMap::default() }
    }

    /// Cached profile, if one was ever created.
    #[inline]
    pub fn get(&self, building: BuildingId) -> Option<&WorkTime> {
        self.table.get(&building)
    }

    /// Profile for a tracked building, deriving and caching the default on
    /// first query.  `None` for untracked buildings and the sentinel.
    pub fn get_or_create<W: Buildings>(
        &mut self,
        world: &W,
        config: &SimulationConfig,
        rng: &mut SimRng,
        building: BuildingId,
    ) -> Option<WorkTime> {
        if building.is_none() {
            return None;
        }
        if let Some(existing) = self.table.get(&building) {
            return Some(*existing);
        }
        let class = world.class(building)?;
        if !needs_work_time(&class) {
            return None;
        }
        let profile = create_default(world, config, rng, building, &class);
        debug!(target: "schedule", %building, ?profile, "derived default work time");
        self.table.insert(building, profile);
        Some(profile)
    }

    /// Install a user/preset override.  Clears `is_default` so policy
    /// triggers leave it alone.
    pub fn set_override(&mut self, building: BuildingId, profile: WorkTime) {
        if let Some(existing) = self.table.get(&building) {
            if existing.is_locked {
                return;
            }
        }
        self.table.insert(building, WorkTime { is_default: false, ..profile });
    }

    /// Drop a building's profile (demolition, abandonment, reclassification).
    pub fn remove(&mut self, building: BuildingId) {
        self.table.remove(&building);
    }

    /// Re-derive a profile in place after a dependent condition changed
    /// (district policy, essential-industry flag).  Override flags suppress
    /// the update.  Returns `true` when the profile actually changed.
    pub fn update<W: Buildings>(&mut self, world: &W, building: BuildingId) -> bool {
        let Some(class) = world.class(building) else {
            return false;
        };
        let Some(current) = self.table.get(&building) else {
            return false;
        };
        match apply_policies(world, building, &class, current) {
            Some(updated) => {
                debug!(target: "schedule", %building, ?updated, "work time updated by policy");
                self.table.insert(building, updated);
                true
            }
            None => false,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// `true` if the building is in an open shift at the clock's current
    /// hour, counting it open `lead_hours` early.
    pub fn is_working<W: Buildings>(
        &mut self,
        world: &W,
        config: &SimulationConfig,
        clock: &DayClock,
        rng: &mut SimRng,
        building: BuildingId,
        lead_hours: f32,
    ) -> bool {
        if building.is_none() {
            return true;
        }
        let Some(class) = world.class(building) else {
            return true;
        };
        if !needs_work_time(&class) {
            return true;
        }
        if !world.is_active(building) {
            return false;
        }
        let Some(profile) = self.get_or_create(world, config, rng, building) else {
            return true;
        };

        if !shift_open(&profile, &class, config, clock, lead_hours) {
            return false;
        }

        // Under workforce-matters, an unstaffed building with employees on
        // its books counts as closed.
        if config.workforce_matters
            && world.workers_present(building) == 0
            && !world.workers(building).is_empty()
        {
            return false;
        }
        true
    }

    /// `true` once the current hour is within [`CLOSING_LEAD_HOURS`] of the
    /// building's effective closing boundary.
    pub fn is_closing_soon<W: Buildings>(
        &mut self,
        world: &W,
        config: &SimulationConfig,
        clock: &DayClock,
        rng: &mut SimRng,
        building: BuildingId,
    ) -> bool {
        if building.is_none() {
            return false;
        }
        let Some(class) = world.class(building) else {
            return false;
        };
        let Some(profile) = self.get_or_create(world, config, rng, building) else {
            return false;
        };
        if profile.is_always_open() {
            return false;
        }
        let (_, close) = day_window(&profile, &class, config);
        let remaining = close - clock.current_hour();
        (0.0..=CLOSING_LEAD_HOURS).contains(&remaining)
    }

    /// `true` when visiting the building now (or at the estimated arrival
    /// hour, for a journey starting at `from`) would violate the district
    /// noise restriction.
    pub fn is_noise_restricted<W: Buildings + TravelTime>(
        &self,
        world: &W,
        config: &SimulationConfig,
        clock: &DayClock,
        building: BuildingId,
        from: BuildingId,
    ) -> bool {
        if building.is_none() || !world.is_noise_restricted_area(building) {
            return false;
        }
        let hour = if from.is_some() {
            (clock.current_hour() + world.estimate_hours(from, building)) % 24.0
        } else {
            clock.current_hour()
        };
        hour >= config.go_to_sleep_hour || hour < config.wake_up_hour
    }

    // ── Snapshot support ──────────────────────────────────────────────────

    /// All cached profiles in ascending building order.
    pub fn entries(&self) -> Vec<(BuildingId, WorkTime)> {
        let mut entries: Vec<_> = self.table.iter().map(|(&id, &wt)| (id, wt)).collect();
        entries.sort_by_key(|&(id, _)| id);
        entries
    }

    /// Rebuild the table from snapshot entries.
    pub fn restore(entries: impl IntoIterator<Item = (BuildingId, WorkTime)>) -> Self {
        Self { table: entries.into_iter().collect() }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

// ── Shift-shape math ──────────────────────────────────────────────────────────

fn is_school(class: &BuildingClass) -> bool {
    matches!(class.service, Service::Education | Service::Campus)
}

/// Opening and closing hour for a profile that is not always open.
fn day_window(profile: &WorkTime, class: &BuildingClass, config: &SimulationConfig) -> (f32, f32) {
    let school = is_school(class);
    let begin = if school { config.school_begin } else { config.work_begin };
    let end = if school { config.school_end } else { config.work_end };

    if profile.has_continuous_work_shift {
        return (CONTINUOUS_BEGIN, CONTINUOUS_END);
    }

    let open = if profile.has_extended_work_shift {
        EARLIEST_OPENING.min(if school { begin } else { config.wake_up_hour })
    } else {
        begin
    };

    let close = match profile.work_shifts {
        1 => end,
        _ => {
            if school {
                SCHOOL_SECOND_SHIFT_END
            } else {
                config.go_to_sleep_hour
            }
        }
    };
    (open, close)
}

/// Pure function of hour × profile: shift-shape evaluation with weekend and
/// night exclusions applied first.
fn shift_open(
    profile: &WorkTime,
    class: &BuildingClass,
    config: &SimulationConfig,
    clock: &DayClock,
    lead_hours: f32,
) -> bool {
    if profile.is_always_open() {
        return true;
    }
    if clock.is_weekend() && !profile.work_at_weekends {
        return false;
    }
    if clock.is_night() && !profile.work_at_night {
        return false;
    }

    let (open, close) = day_window(profile, class, config);
    let hour = clock.current_hour();
    hour >= (open - lead_hours).max(0.0) && hour < close
}
