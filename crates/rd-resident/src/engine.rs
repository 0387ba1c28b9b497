//! The per-citizen evaluation: classify, maybe replan, execute.
//!
//! # Design
//!
//! One call to [`ResidentEngine::evaluate`] per citizen per tick, in three
//! phases:
//!
//! 1. **classify** — derive `current_state` from the citizen's observed
//!    whereabouts, with the special cases (dead, dummy, arrested, sick,
//!    evacuating, stale commute) short-circuiting in that priority order;
//! 2. **maybe replan** — if nothing is scheduled, run the planning cascade
//!    in fixed priority order, stopping at the first rule that schedules;
//! 3. **execute** — once simulated time reaches `scheduled_state_time`,
//!    perform the transition.
//!
//! If the execute phase invalidates its own transition (target gone, move
//! failed mid-plan), the planning cascade is re-run once in the same tick,
//! never more, so a bad tick can idle a citizen but not loop.

use rd_core::{BuildingId, CitizenId, DayClock, SimRng, SimulationConfig};
use rd_world::{
    Buildings, CitizenLocation, Citizens, Service, StructureKind, VisitPlaces, World,
};
use rd_worktime::OperatingHours;
use tracing::{debug, trace};

use crate::home::{execute_go_home, plan_at_home};
use crate::schedule::{CitizenSchedule, ResidentState, ScheduleStore};
use crate::school::{try_schedule_school, try_schedule_school_return, update_school};
use crate::shifts::update_work_shift;
use crate::visit::{
    execute_relaxing, execute_shopping, process_visit_state, try_plan_relaxing,
    try_plan_shopping, ExcursionOutcome,
};
use crate::work::{try_schedule_lunch, try_schedule_return, try_schedule_work};

pub struct ResidentEngine {
    store: ScheduleStore,
}

impl Default for ResidentEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ResidentEngine {
    pub fn new() -> Self {
        Self { store: ScheduleStore::new() }
    }

    pub fn from_store(store: ScheduleStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ScheduleStore {
        &mut self.store
    }

    /// Permanently release a citizen from the simulation.
    pub fn release(&mut self, citizen: CitizenId) {
        self.store.reset(citizen);
    }

    /// One full evaluation of one citizen.
    pub fn evaluate<W: World>(
        &mut self,
        world: &mut W,
        hours: &mut OperatingHours,
        config: &SimulationConfig,
        clock: &DayClock,
        rng: &mut SimRng,
        citizen: CitizenId,
    ) {
        if citizen.is_none() || !world.exists(citizen) {
            return;
        }

        let flags = world.flags(citizen);
        if flags.dead {
            // Released from the simulation; the record returns to zero.
            self.store.reset(citizen);
            return;
        }
        if flags.dummy_traffic {
            self.store.get_mut(citizen).current_state = ResidentState::Ignored;
            return;
        }
        if flags.arrested {
            // Held until released from custody.
            let record = self.store.get_mut(citizen);
            record.cancel();
            record.current_state = ResidentState::Ignored;
            return;
        }

        // Cascade step (a): employment/enrollment bookkeeping.
        let assigned = world.work_building(citizen);
        let work_time = if assigned.is_some() {
            hours.get_or_create(world, config, rng, assigned)
        } else {
            None
        };
        update_work_shift(world, &mut self.store, config, rng, citizen, work_time);
        update_school(world, &mut self.store, config, citizen);

        let age = world.age_group(citizen);
        let mut schedule = self.store.get(citizen);

        classify(world, citizen, &mut schedule);

        // Sickness overrides the plan: head for care unless already under
        // way or there.
        if flags.sick
            && !matches!(
                schedule.current_state,
                ResidentState::Visiting | ResidentState::InTransition
            )
        {
            let care = world.find_care(world.current_building(citizen));
            if care.is_some() {
                schedule.event_building = care;
                schedule.schedule(ResidentState::GoToVisit, clock.now);
                debug!(target: "state", %citizen, "sick, heading for care");
            }
        } else if (flags.evacuating || world.is_evacuating(world.current_building(citizen)))
            && !matches!(
                schedule.current_state,
                ResidentState::InShelter | ResidentState::InTransition
            )
        {
            schedule.current_state = ResidentState::Evacuation;
            schedule.schedule(ResidentState::GoToShelter, clock.now);
        }

        recover_stale_intent(world, clock, citizen, &mut schedule);

        if !schedule.is_scheduled() {
            plan(&self.store, world, hours, config, clock, rng, citizen, age, &mut schedule);
        }

        if schedule.is_scheduled() && clock.now >= schedule.scheduled_state_time {
            let invalidated =
                execute(world, hours, config, clock, rng, citizen, age, &mut schedule);
            // Re-entrancy rule: one replan in the same tick, never a loop.
            if invalidated && !schedule.is_scheduled() {
                plan(&self.store, world, hours, config, clock, rng, citizen, age, &mut schedule);
            }
        }

        *self.store.get_mut(citizen) = schedule;
    }
}

// ── Phase 1: classify ─────────────────────────────────────────────────────────

fn classify<W: World>(world: &W, citizen: CitizenId, schedule: &mut CitizenSchedule) {
    let building = world.current_building(citizen);
    schedule.current_state = match world.location(citizen) {
        CitizenLocation::Hidden => ResidentState::Unknown,
        CitizenLocation::Moving => ResidentState::InTransition,
        CitizenLocation::Home => ResidentState::AtHome,
        CitizenLocation::Work => {
            if building == schedule.work_building {
                ResidentState::AtWork
            } else if building == schedule.school_building {
                ResidentState::AtSchool
            } else {
                ResidentState::AtSchoolOrWork
            }
        }
        CitizenLocation::Visit => match world.class(building) {
            Some(c) if c.kind == StructureKind::Shelter || c.service == Service::Disaster => {
                ResidentState::InShelter
            }
            Some(c) if c.is_relaxing_target() => ResidentState::Relaxing,
            Some(c) if c.is_shopping_target() => ResidentState::Shopping,
            _ => ResidentState::Visiting,
        },
    };
}

/// A commute whose destination vanished gets redirected home instead of
/// leaving the citizen stranded.
fn recover_stale_intent<W: World>(
    world: &W,
    clock: &DayClock,
    citizen: CitizenId,
    schedule: &mut CitizenSchedule,
) {
    if schedule.current_state != ResidentState::InTransition || schedule.is_scheduled() {
        return;
    }
    let heading_somewhere = matches!(
        schedule.last_scheduled_state,
        ResidentState::GoToWork | ResidentState::GoToSchool | ResidentState::GoToShelter
    );
    let target = world.current_building(citizen);
    if heading_somewhere && (!world.is_active(target) || target.is_none()) {
        trace!(target: "state", %citizen, "commute target gone, going home");
        schedule.schedule(ResidentState::GoHome, clock.now);
    }
}

// ── Phase 2: planning cascade ─────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn plan<W: World>(
    store: &ScheduleStore,
    world: &W,
    hours: &mut OperatingHours,
    config: &SimulationConfig,
    clock: &DayClock,
    rng: &mut SimRng,
    citizen: CitizenId,
    age: rd_world::AgeGroup,
    schedule: &mut CitizenSchedule,
) {
    let student = age.is_school_age() || world.flags(citizen).student;
    let current = world.current_building(citizen);

    match schedule.current_state {
        ResidentState::AtWork | ResidentState::AtSchoolOrWork => {
            if try_schedule_return(world, store, config, clock, schedule) {
                return;
            }
            try_schedule_lunch(world, config, clock, rng, schedule);
        }
        ResidentState::AtSchool => {
            try_schedule_school_return(clock, schedule);
        }
        ResidentState::Shopping | ResidentState::Relaxing | ResidentState::Visiting => {
            // Commitments first: the shift/class may resume mid-visit.
            if student {
                if try_schedule_school(world, config, clock, rng, current, schedule) {
                    return;
                }
            } else if try_schedule_work(world, config, clock, rng, current, schedule) {
                return;
            }
            process_visit_state(world, hours, config, clock, rng, citizen, age, schedule);
        }
        ResidentState::InShelter => {
            let evacuating =
                world.flags(citizen).evacuating || world.is_evacuating(current);
            if !evacuating {
                schedule.schedule(ResidentState::GoHome, clock.now);
            }
        }
        ResidentState::AtHome => {
            if student {
                if try_schedule_school(world, config, clock, rng, current, schedule) {
                    return;
                }
            } else if try_schedule_work(world, config, clock, rng, current, schedule) {
                return;
            }
            if try_plan_shopping(world, config, clock, rng, age, schedule) {
                return;
            }
            if try_plan_relaxing(world, config, clock, rng, age, current, schedule) {
                return;
            }
            plan_at_home(config, clock, rng, schedule);
        }
        // Moving, sheltering-in-progress, or out of scope: nothing to plan.
        ResidentState::InTransition
        | ResidentState::Evacuation
        | ResidentState::Ignored
        | ResidentState::Unknown => {}
        // Observed-only and intent states never appear as current here.
        _ => {}
    }
}

// ── Phase 3: execute ──────────────────────────────────────────────────────────

/// Perform the due transition.  Returns `true` when the transition turned
/// out to be invalid, signalling the caller to replan once.
#[allow(clippy::too_many_arguments)]
fn execute<W: World>(
    world: &mut W,
    hours: &mut OperatingHours,
    config: &SimulationConfig,
    clock: &DayClock,
    rng: &mut SimRng,
    citizen: CitizenId,
    age: rd_world::AgeGroup,
    schedule: &mut CitizenSchedule,
) -> bool {
    let at_home = schedule.current_state == ResidentState::AtHome;

    // Unrealized citizens skip excursions entirely: the "trip" happens off
    // screen as a no-op.
    if at_home
        && matches!(
            schedule.scheduled_state,
            ResidentState::GoShopping | ResidentState::GoToRelax | ResidentState::GoToVisit
        )
        && rng.should_occur(config.virtual_citizens_quota)
    {
        schedule.consume();
        return false;
    }

    let hint = schedule.hint;
    let state = schedule.consume();
    trace!(target: "state", %citizen, ?state, "executing transition");

    match state {
        ResidentState::GoHome => {
            if execute_go_home(world, citizen, schedule)
                && world.location(citizen) == CitizenLocation::Moving
            {
                schedule.current_state = ResidentState::InTransition;
            }
            false
        }

        ResidentState::GoToWork => {
            let work = schedule.work_building;
            if work.is_none() || !world.is_active(work) {
                return true;
            }
            if world.current_building(citizen) == work {
                schedule.current_state = ResidentState::AtWork;
                return false;
            }
            if at_home {
                schedule.departure_time = clock.now;
            }
            if world.start_moving(citizen, work) {
                schedule.current_state = ResidentState::InTransition;
                false
            } else {
                true
            }
        }

        ResidentState::GoToSchool => {
            let school = schedule.school_building;
            if school.is_none() || !world.is_active(school) {
                return true;
            }
            if world.current_building(citizen) == school {
                schedule.current_state = ResidentState::AtSchool;
                return false;
            }
            if world.start_moving(citizen, school) {
                schedule.current_state = ResidentState::InTransition;
                false
            } else {
                true
            }
        }

        ResidentState::GoShopping => {
            let outcome = execute_shopping(
                world, hours, config, clock, rng, citizen, at_home, hint, schedule,
            );
            finish_excursion(world, citizen, clock, outcome, schedule)
        }

        ResidentState::GoToRelax => {
            let outcome = execute_relaxing(
                world, hours, config, clock, rng, citizen, at_home, hint, schedule,
            );
            finish_excursion(world, citizen, clock, outcome, schedule)
        }

        ResidentState::GoToVisit => {
            let target = schedule.event_building;
            if target.is_none() || !world.is_active(target) {
                schedule.event_building = BuildingId::NONE;
                return true;
            }
            if world.start_moving(citizen, target) {
                schedule.current_state = ResidentState::InTransition;
                false
            } else {
                schedule.event_building = BuildingId::NONE;
                true
            }
        }

        ResidentState::GoToShelter => {
            let shelter = world.find_shelter(world.current_building(citizen));
            if shelter.is_some() && world.start_moving(citizen, shelter) {
                schedule.current_state = ResidentState::InTransition;
            }
            // No shelter available: shelter in place, re-check next tick.
            false
        }

        // Scheduled idle period: nothing to do.
        ResidentState::AtHome => false,

        // Anything else queued here is stale by definition.
        _ => true,
    }
}

fn finish_excursion<W: World>(
    world: &W,
    citizen: CitizenId,
    clock: &DayClock,
    outcome: ExcursionOutcome,
    schedule: &mut CitizenSchedule,
) -> bool {
    match outcome {
        ExcursionOutcome::Departed => {
            if world.location(citizen) == CitizenLocation::Moving {
                schedule.current_state = ResidentState::InTransition;
            }
            false
        }
        ExcursionOutcome::GoHome => {
            schedule.schedule(ResidentState::GoHome, clock.now);
            false
        }
        ExcursionOutcome::Stay => false,
    }
}
