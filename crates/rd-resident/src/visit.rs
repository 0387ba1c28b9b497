//! Shopping / relaxing / visiting excursions: planning the trip, carrying it
//! out, and the stay-or-leave decision while the visit lasts.

use rd_core::{BuildingId, CitizenId, DayClock, SimRng, SimTime, SimulationConfig};
use rd_world::{AgeGroup, Buildings, Citizens, Service, TravelTime, VisitPlaces, Weather};
use rd_worktime::OperatingHours;
use tracing::trace;

use crate::constants::{FIND_ANOTHER_PLACE_CHANCE, MAX_TRAVEL_HOURS, MAX_VISIT_PLACE_ATTEMPTS};
use crate::schedule::{CitizenSchedule, ResidentState, ScheduleHint};
use crate::spare_time::{relaxing_chance, shopping_chance};

/// `true` when an event starting at `start` falls inside the configured
/// attendance window for that day type.
fn event_window_permits(config: &SimulationConfig, clock: &DayClock, start: SimTime) -> bool {
    let hour = start.hour_of_day();
    let (earliest, latest) = if clock.weekend_enabled && start.is_weekend() {
        (config.earliest_event_start_weekend, config.latest_event_start_weekend)
    } else {
        (config.earliest_event_start_weekday, config.latest_event_start_weekday)
    };
    hour >= earliest && hour <= latest
}

/// Cascade step (c): probability-gated shopping excursion.
pub fn try_plan_shopping<W: Weather>(
    world: &W,
    config: &SimulationConfig,
    clock: &DayClock,
    rng: &mut SimRng,
    age: AgeGroup,
    schedule: &mut CitizenSchedule,
) -> bool {
    if world.is_bad_weather() {
        return false;
    }
    // Goods-need shopping is driven by the host; spontaneous trips go
    // through the for-fun quota.
    if !rng.should_occur(config.shopping_for_fun_quota) {
        return false;
    }
    if !rng.should_occur(shopping_chance(config, clock, age, schedule)) {
        return false;
    }
    if clock.is_night() {
        schedule.hint = ScheduleHint::LocalShoppingOnly;
    }
    schedule.schedule(ResidentState::GoShopping, clock.now);
    true
}

/// Cascade step (d): probability-gated relaxation or event attendance.
pub fn try_plan_relaxing<W: Weather + VisitPlaces + TravelTime + Buildings>(
    world: &W,
    config: &SimulationConfig,
    clock: &DayClock,
    rng: &mut SimRng,
    age: AgeGroup,
    current_building: BuildingId,
    schedule: &mut CitizenSchedule,
) -> bool {
    if world.is_bad_weather() {
        return false;
    }

    let chance = relaxing_chance(config, clock, age, schedule, 1);
    if !rng.should_occur(chance) {
        return false;
    }

    // An upcoming event takes precedence: back-compute the departure from
    // the start time and the travel estimate.
    if let Some((venue, start)) = world.upcoming_event(clock.now) {
        if event_window_permits(config, clock, start) {
            let travel = world.estimate_hours(current_building, venue).min(MAX_TRAVEL_HOURS);
            let mut departure = start.add_hours(-travel);
            if departure < clock.now {
                departure = clock.now;
            }
            schedule.event_building = venue;
            schedule.hint = ScheduleHint::AttendingEvent;
            schedule.schedule(ResidentState::GoToRelax, departure);
            trace!(target: "schedule", %venue, "attending event");
            return true;
        }
    }

    schedule.hint = if clock.is_night() {
        ScheduleHint::RelaxNearbyOnly
    } else {
        ScheduleHint::RelaxAtLeisureBuilding
    };
    schedule.schedule(ResidentState::GoToRelax, clock.now);
    true
}

/// Outcome of executing an excursion transition.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ExcursionOutcome {
    /// Moving toward a destination.
    Departed,
    /// No destination found (or move failed); caller sends the agent home.
    GoHome,
    /// Stayed put; nothing further scheduled.
    Stay,
}

/// Carry out a scheduled `GoShopping`.  `hint` is the consumed transition's
/// hint; exhaustive so new hints cannot be silently ignored here.
#[allow(clippy::too_many_arguments)]
pub fn execute_shopping<W: Buildings + Citizens + VisitPlaces + TravelTime>(
    world: &mut W,
    hours: &mut OperatingHours,
    config: &SimulationConfig,
    clock: &DayClock,
    rng: &mut SimRng,
    citizen: CitizenId,
    at_home: bool,
    hint: ScheduleHint,
    schedule: &mut CitizenSchedule,
) -> ExcursionOutcome {
    let local = match hint {
        ScheduleHint::NoShoppingAnyMore => return ExcursionOutcome::GoHome,
        ScheduleHint::LocalShoppingOnly
        | ScheduleHint::LocalShoppingOnlyBeforeWork
        | ScheduleHint::LocalShoppingOnlyBeforeSchool => true,
        ScheduleHint::None
        | ScheduleHint::AttendingEvent
        | ScheduleHint::RelaxAtLeisureBuilding
        | ScheduleHint::RelaxNearbyOnly => rng.should_occur(config.local_building_search_quota),
    };

    let near = world.current_building(citizen);
    let target = world.find_shop(near, local);
    if target.is_none() || !open_for_visit(world, hours, config, clock, rng, near, target) {
        schedule.find_visit_place_attempts = schedule.find_visit_place_attempts.saturating_add(1);
        return if at_home { ExcursionOutcome::Stay } else { ExcursionOutcome::GoHome };
    }
    if !world.start_moving(citizen, target) {
        return ExcursionOutcome::GoHome;
    }
    // One shopping trip per night: a chained re-shop decision goes home.
    if clock.is_night() {
        schedule.hint = ScheduleHint::NoShoppingAnyMore;
    }
    schedule.find_visit_place_attempts = 0;
    ExcursionOutcome::Departed
}

/// Carry out a scheduled `GoToRelax`.
#[allow(clippy::too_many_arguments)]
pub fn execute_relaxing<W: Buildings + Citizens + VisitPlaces + TravelTime>(
    world: &mut W,
    hours: &mut OperatingHours,
    config: &SimulationConfig,
    clock: &DayClock,
    rng: &mut SimRng,
    citizen: CitizenId,
    at_home: bool,
    hint: ScheduleHint,
    schedule: &mut CitizenSchedule,
) -> ExcursionOutcome {
    let near = world.current_building(citizen);

    let target = match hint {
        ScheduleHint::AttendingEvent if schedule.event_building.is_some() => {
            schedule.event_building
        }
        ScheduleHint::RelaxNearbyOnly => world.find_leisure(near, true),
        _ => world.find_leisure(near, false),
    };

    if target.is_none()
        || !world.is_active(target)
        || !open_for_visit(world, hours, config, clock, rng, near, target)
    {
        schedule.find_visit_place_attempts = schedule.find_visit_place_attempts.saturating_add(1);
        schedule.event_building = BuildingId::NONE;
        return if at_home { ExcursionOutcome::Stay } else { ExcursionOutcome::GoHome };
    }
    // Leisure at night must not disturb a restricted district.
    if hours.is_noise_restricted(world, config, clock, target, near) {
        return if at_home { ExcursionOutcome::Stay } else { ExcursionOutcome::GoHome };
    }
    if !world.start_moving(citizen, target) {
        schedule.event_building = BuildingId::NONE;
        return ExcursionOutcome::GoHome;
    }
    schedule.find_visit_place_attempts = 0;
    ExcursionOutcome::Departed
}

/// A destination only counts if it will be open on arrival.
fn open_for_visit<W: Buildings + TravelTime>(
    world: &W,
    hours: &mut OperatingHours,
    config: &SimulationConfig,
    clock: &DayClock,
    rng: &mut SimRng,
    from: BuildingId,
    target: BuildingId,
) -> bool {
    let lead = world.estimate_hours(from, target).min(MAX_TRAVEL_HOURS);
    hours.is_working(world, config, clock, rng, target, lead)
}

/// Stay-or-leave decision while observed Shopping / Relaxing / Visiting with
/// nothing scheduled.  Returns `true` when a transition was scheduled.
#[allow(clippy::too_many_arguments)]
pub fn process_visit_state<W: Buildings + Citizens + Weather>(
    world: &W,
    hours: &mut OperatingHours,
    config: &SimulationConfig,
    clock: &DayClock,
    rng: &mut SimRng,
    citizen: CitizenId,
    age: AgeGroup,
    schedule: &mut CitizenSchedule,
) -> bool {
    let building = world.current_building(citizen);

    let closed = !world.is_active(building)
        || !hours.is_working(world, config, clock, rng, building, 0.0)
        || hours.is_closing_soon(world, config, clock, rng, building);
    if closed || world.is_bad_weather() {
        schedule.schedule(ResidentState::GoHome, clock.now);
        return true;
    }

    if schedule.find_visit_place_attempts >= MAX_VISIT_PLACE_ATTEMPTS {
        schedule.schedule(ResidentState::GoHome, clock.now);
        return true;
    }

    // Parks hold visitors twice as long; seniors settle in at elder care.
    let multiplier = match world.class(building) {
        Some(c) if c.service == Service::Park => 2,
        Some(c) if c.service == Service::HealthCare && age == AgeGroup::Senior => 4,
        _ => 1,
    };
    let stay = relaxing_chance(config, clock, age, schedule, multiplier);
    if rng.should_occur(stay) {
        // Keep browsing here; re-decide next evaluation.
        return false;
    }

    if rng.should_occur(FIND_ANOTHER_PLACE_CHANCE) {
        let next = match schedule.current_state {
            ResidentState::Shopping => ResidentState::GoShopping,
            _ => ResidentState::GoToRelax,
        };
        schedule.schedule(next, clock.now);
    } else {
        schedule.schedule(ResidentState::GoHome, clock.now);
    }
    true
}
