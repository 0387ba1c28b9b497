//! Work-day planning: departures, breakfast detours, lunch breaks and the
//! end-of-shift return.

use rd_core::{BuildingId, DayClock, SimRng, SimulationConfig};
use rd_world::{Buildings, Citizens, TravelTime};
use tracing::trace;

use crate::constants::{
    MAX_LATENESS_HOURS, MAX_TRAVEL_HOURS, PREPARE_TO_WORK_HOURS, WORK_PLANNING_HORIZON_HOURS,
};
use crate::schedule::{CitizenSchedule, ResidentState, ScheduleHint, ScheduleStore, WorkStatus};
use crate::shifts::{hour_in_window, should_return_from_work};

/// `true` if the citizen's shift runs today.
pub fn works_today(schedule: &CitizenSchedule, clock: &DayClock) -> bool {
    schedule.works_on_weekends || !clock.is_weekend()
}

/// Cascade step (b) for workers: schedule the next departure for work, or a
/// breakfast detour ahead of it.  Returns `true` when something was
/// scheduled.
pub fn try_schedule_work<W: TravelTime>(
    world: &W,
    config: &SimulationConfig,
    clock: &DayClock,
    rng: &mut SimRng,
    current_building: BuildingId,
    schedule: &mut CitizenSchedule,
) -> bool {
    if !schedule.is_employed() || schedule.work_status != WorkStatus::Active {
        return false;
    }
    if !works_today(schedule, clock) {
        return false;
    }

    let now = clock.now;
    let hour = clock.current_hour();
    let (start, end) = (schedule.work_shift_start_hour, schedule.work_shift_end_hour);

    if hour_in_window(hour, start, end) {
        // Shift already running.  A worker browsing shops over lunch goes
        // back when the lunch window closes; anyone else leaves right away.
        let lunch = config.is_lunch_time_enabled
            && schedule.current_state == ResidentState::Shopping
            && hour_in_window(hour, config.lunch_begin, config.lunch_end);
        let when = if lunch { now.future_hour(config.lunch_end) } else { now };
        schedule.schedule(ResidentState::GoToWork, when);
        return true;
    }

    let shift_start = now.future_hour(start);
    let travel = world
        .estimate_hours(current_building, schedule.work_building)
        .min(MAX_TRAVEL_HOURS);
    let mut departure = shift_start.add_hours(-(travel + PREPARE_TO_WORK_HOURS));
    if !rng.should_occur(config.on_time_quota) {
        departure = departure.add_hours(rng.gen_range(0.0..MAX_LATENESS_HOURS));
    }
    if departure < now {
        departure = now;
    }

    let lead = now.hours_until(departure);
    if lead > WORK_PLANNING_HORIZON_HOURS {
        return false;
    }

    // Enough slack before leaving: maybe squeeze in a local breakfast run.
    if config.is_breakfast_time_enabled
        && !clock.is_night()
        && lead >= 2.0 * PREPARE_TO_WORK_HOURS
        && rng.should_occur(config.breakfast_quota)
    {
        schedule.hint = ScheduleHint::LocalShoppingOnlyBeforeWork;
        schedule.schedule(ResidentState::GoShopping, now);
        trace!(target: "schedule", "breakfast detour before work");
        return true;
    }

    schedule.departure_time = departure;
    schedule.schedule(ResidentState::GoToWork, departure);
    true
}

/// Lunch-break scheduling, attempted while the citizen is at work.
pub fn try_schedule_lunch<W: Buildings>(
    world: &W,
    config: &SimulationConfig,
    clock: &DayClock,
    rng: &mut SimRng,
    schedule: &mut CitizenSchedule,
) -> bool {
    if !config.is_lunch_time_enabled {
        return false;
    }
    let hour = clock.current_hour();
    let (start, end) = (schedule.work_shift_start_hour, schedule.work_shift_end_hour);
    // Only shifts that span the lunch window take lunch, and only before it
    // opens.
    if !hour_in_window(config.lunch_begin, start, end) || hour >= config.lunch_begin {
        return false;
    }
    if !rng.should_occur(config.lunch_quota) {
        return false;
    }
    // Never leave the building unstaffed over lunch.
    if config.workforce_matters && world.workers_present(schedule.work_building) <= 1 {
        return false;
    }
    schedule.hint = ScheduleHint::LocalShoppingOnly;
    schedule.schedule(ResidentState::GoShopping, clock.now.future_hour(config.lunch_begin));
    true
}

/// End-of-shift return, attempted while the citizen is at work.  Returns
/// `false` while the shift is still running or the handover gate holds the
/// worker in place.
pub fn try_schedule_return<W: Buildings + Citizens>(
    world: &W,
    store: &ScheduleStore,
    config: &SimulationConfig,
    clock: &DayClock,
    schedule: &mut CitizenSchedule,
) -> bool {
    let hour = clock.current_hour();
    let (start, end) = (schedule.work_shift_start_hour, schedule.work_shift_end_hour);
    if hour_in_window(hour, start, end) {
        return false;
    }
    // Outside the window could also mean an early arrival; a worker closer
    // to the upcoming start than to the past end waits on site.
    let until_start = (start - hour).rem_euclid(24.0);
    let since_end = (hour - end).rem_euclid(24.0);
    if until_start < since_end {
        return false;
    }
    if !should_return_from_work(world, store, config, schedule) {
        return false;
    }
    schedule.departure_time = rd_core::SimTime::ZERO;
    schedule.schedule(ResidentState::GoHome, clock.now);
    true
}
