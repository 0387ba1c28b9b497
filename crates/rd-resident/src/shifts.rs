//! Work shift assignment and handover gating.

use rd_core::{BuildingId, CitizenId, SimRng, SimulationConfig};
use rd_world::{Buildings, CitizenLocation, Citizens};
use rd_worktime::WorkTime;
use tracing::debug;

use crate::schedule::{CitizenSchedule, ScheduleStore, WorkShift, WorkStatus};

/// Day boundaries of a shift, in hours; `(start, end)` wraps past midnight
/// when `start > end`.
pub fn shift_window(shift: WorkShift, config: &SimulationConfig) -> (f32, f32) {
    match shift {
        WorkShift::First => (config.work_begin, config.work_end),
        WorkShift::Second => (config.work_end, config.go_to_sleep_hour),
        WorkShift::Night => (config.go_to_sleep_hour, config.work_begin),
        WorkShift::ContinuousDay => (8.0, 20.0),
        WorkShift::ContinuousNight => (20.0, 8.0),
        WorkShift::Event | WorkShift::Unemployed => (0.0, 0.0),
    }
}

/// `true` when `hour` falls inside a possibly midnight-wrapping window.
#[inline]
pub fn hour_in_window(hour: f32, start: f32, end: f32) -> bool {
    if start == end {
        return false;
    }
    if start < end {
        (start..end).contains(&hour)
    } else {
        hour >= start || hour < end
    }
}

/// The shift that takes over from `shift` at its end boundary.
pub fn next_shift(shift: WorkShift) -> WorkShift {
    match shift {
        WorkShift::First => WorkShift::Second,
        WorkShift::Second => WorkShift::Night,
        WorkShift::Night => WorkShift::First,
        WorkShift::ContinuousDay => WorkShift::ContinuousNight,
        WorkShift::ContinuousNight => WorkShift::ContinuousDay,
        other => other,
    }
}

/// Count of a building's workers assigned to `shift` (regardless of where
/// they are right now).
pub fn shift_headcount<W: Buildings>(
    world: &W,
    store: &ScheduleStore,
    building: BuildingId,
    shift: WorkShift,
) -> u32 {
    world
        .workers(building)
        .into_iter()
        .filter(|&w| store.get(w).work_shift == shift)
        .count() as u32
}

/// Pick a shift for a newly hired worker.
///
/// Essential-service buildings balance headcount across their shifts, with
/// the tie-break order fixed: continuous-day beats continuous-night, and
/// first beats second beats night.  Everyone else rolls the configured shift
/// quotas.
pub fn choose_shift<W: Buildings + Citizens>(
    world: &W,
    store: &ScheduleStore,
    config: &SimulationConfig,
    rng: &mut SimRng,
    building: BuildingId,
    work_time: &WorkTime,
) -> WorkShift {
    let candidates: &[WorkShift] = if work_time.has_continuous_work_shift {
        if work_time.work_at_night {
            &[WorkShift::ContinuousDay, WorkShift::ContinuousNight]
        } else {
            &[WorkShift::ContinuousDay]
        }
    } else {
        match work_time.work_shifts {
            3 => &[WorkShift::First, WorkShift::Second, WorkShift::Night],
            2 => &[WorkShift::First, WorkShift::Second],
            _ => &[WorkShift::First],
        }
    };

    let essential = world
        .class(building)
        .is_some_and(|class| class.is_essential_service());
    if essential {
        // Earlier candidates win ties, which encodes the tie-break order.
        let mut best = candidates[0];
        let mut best_count = shift_headcount(world, store, building, best);
        for &shift in &candidates[1..] {
            let count = shift_headcount(world, store, building, shift);
            if count < best_count {
                best = shift;
                best_count = count;
            }
        }
        return best;
    }

    if work_time.has_continuous_work_shift {
        if work_time.work_at_night && rng.should_occur(config.continuous_night_shift_quota) {
            return WorkShift::ContinuousNight;
        }
        return WorkShift::ContinuousDay;
    }
    if work_time.work_shifts == 3 && rng.should_occur(config.night_shift_quota) {
        return WorkShift::Night;
    }
    if work_time.work_shifts >= 2 && rng.should_occur(config.second_shift_quota) {
        return WorkShift::Second;
    }
    WorkShift::First
}

/// Refresh employment bookkeeping after the host reassigned the workplace.
/// Returns `true` when anything changed.
pub fn update_work_shift<W: Buildings + Citizens>(
    world: &W,
    store: &mut ScheduleStore,
    config: &SimulationConfig,
    rng: &mut SimRng,
    citizen: CitizenId,
    work_time: Option<WorkTime>,
) -> bool {
    let assigned = world.work_building(citizen);
    let schedule = store.get(citizen);
    if schedule.work_building == assigned {
        return false;
    }

    if assigned.is_none() {
        let record = store.get_mut(citizen);
        record.work_building = BuildingId::NONE;
        record.work_shift = WorkShift::Unemployed;
        record.work_status = WorkStatus::None;
        record.work_shift_start_hour = 0.0;
        record.work_shift_end_hour = 0.0;
        record.works_on_weekends = false;
        return true;
    }

    let work_time = work_time.unwrap_or_else(WorkTime::always_open);
    let shift = choose_shift(world, store, config, rng, assigned, &work_time);
    let (start, end) = shift_window(shift, config);

    let record = store.get_mut(citizen);
    record.work_building = assigned;
    record.work_shift = shift;
    record.work_status = WorkStatus::Active;
    record.work_shift_start_hour = start;
    record.work_shift_end_hour = end;
    record.works_on_weekends = work_time.work_at_weekends;
    debug!(target: "schedule", %citizen, %assigned, ?shift, "work shift assigned");
    true
}

/// Handover gate for essential-service workers.
///
/// Returns `false` while leaving would break the handover: every active
/// next-shift worker must have arrived at the building, and at least one
/// such worker must exist.  Non-essential workplaces (and the gate being
/// disabled via `workforce_matters`) always allow leaving.
pub fn should_return_from_work<W: Buildings + Citizens>(
    world: &W,
    store: &ScheduleStore,
    config: &SimulationConfig,
    schedule: &CitizenSchedule,
) -> bool {
    if !config.workforce_matters {
        return true;
    }
    let building = schedule.work_building;
    let essential = world
        .class(building)
        .is_some_and(|class| class.is_essential_service());
    if !essential {
        return true;
    }

    let next = next_shift(schedule.work_shift);
    if next == schedule.work_shift {
        return true;
    }

    let mut any = false;
    for worker in world.workers(building) {
        let record = store.get(worker);
        if record.work_shift != next || record.work_status != WorkStatus::Active {
            continue;
        }
        any = true;
        let arrived = world.current_building(worker) == building
            && matches!(world.location(worker), CitizenLocation::Work | CitizenLocation::Visit);
        if !arrived {
            return false;
        }
    }
    // Nobody to hand over to: stay on duty.
    any
}
