//! School-day planning, symmetric to the work path but without shifts or
//! handover gating.

use rd_core::{BuildingId, CitizenId, DayClock, SimRng, SimulationConfig};
use rd_world::{Citizens, TravelTime};
use tracing::debug;

use crate::constants::{MAX_TRAVEL_HOURS, PREPARE_TO_WORK_HOURS, WORK_PLANNING_HORIZON_HOURS};
use crate::schedule::{CitizenSchedule, ResidentState, ScheduleHint, ScheduleStore, WorkStatus};
use crate::shifts::hour_in_window;

/// Refresh enrollment bookkeeping after the host reassigned the school.
/// Returns `true` when anything changed.
pub fn update_school<W: Citizens>(
    world: &W,
    store: &mut ScheduleStore,
    config: &SimulationConfig,
    citizen: CitizenId,
) -> bool {
    let assigned = world.school_building(citizen);
    if store.get(citizen).school_building == assigned {
        return false;
    }

    let record = store.get_mut(citizen);
    record.school_building = assigned;
    if assigned.is_none() {
        record.school_status = WorkStatus::None;
        record.school_class_start_hour = 0.0;
        record.school_class_end_hour = 0.0;
    } else {
        record.school_status = WorkStatus::Active;
        record.school_class_start_hour = config.school_begin;
        record.school_class_end_hour = config.school_end;
        debug!(target: "schedule", %citizen, %assigned, "enrolled");
    }
    true
}

/// Cascade step (b) for students: schedule the next departure for school.
pub fn try_schedule_school<W: TravelTime>(
    world: &W,
    config: &SimulationConfig,
    clock: &DayClock,
    rng: &mut SimRng,
    current_building: BuildingId,
    schedule: &mut CitizenSchedule,
) -> bool {
    if schedule.school_building.is_none() || schedule.school_status != WorkStatus::Active {
        return false;
    }
    // No classes on weekends.
    if clock.is_weekend() {
        return false;
    }

    let now = clock.now;
    let hour = clock.current_hour();
    let (start, end) = (schedule.school_class_start_hour, schedule.school_class_end_hour);

    if hour_in_window(hour, start, end) {
        schedule.schedule(ResidentState::GoToSchool, now);
        return true;
    }

    let class_start = now.future_hour(start);
    let travel = world
        .estimate_hours(current_building, schedule.school_building)
        .min(MAX_TRAVEL_HOURS);
    let mut departure = class_start.add_hours(-(travel + PREPARE_TO_WORK_HOURS));
    if departure < now {
        departure = now;
    }

    let lead = now.hours_until(departure);
    if lead > WORK_PLANNING_HORIZON_HOURS {
        return false;
    }

    if config.is_breakfast_time_enabled
        && !clock.is_night()
        && lead >= 2.0 * PREPARE_TO_WORK_HOURS
        && rng.should_occur(config.breakfast_quota)
    {
        schedule.hint = ScheduleHint::LocalShoppingOnlyBeforeSchool;
        schedule.schedule(ResidentState::GoShopping, now);
        return true;
    }

    schedule.schedule(ResidentState::GoToSchool, departure);
    true
}

/// End-of-classes return, attempted while the citizen is at school.
pub fn try_schedule_school_return(clock: &DayClock, schedule: &mut CitizenSchedule) -> bool {
    let hour = clock.current_hour();
    let (start, end) = (schedule.school_class_start_hour, schedule.school_class_end_hour);
    if hour_in_window(hour, start, end) {
        return false;
    }
    // An early arrival waits for class rather than turning around.
    let until_start = (start - hour).rem_euclid(24.0);
    let since_end = (hour - end).rem_euclid(24.0);
    if until_start < since_end {
        return false;
    }
    schedule.schedule(ResidentState::GoHome, clock.now);
    true
}
