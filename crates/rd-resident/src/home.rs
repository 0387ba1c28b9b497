//! Going home and idling there.

use rd_core::{DayClock, SimRng, SimulationConfig};
use rd_world::Citizens;

use crate::constants::STAY_HOME_ALL_DAY_CHANCE;
use crate::schedule::{CitizenSchedule, ResidentState};

/// Carry out a scheduled `GoHome`.  Returns `false` when no move could be
/// started (homeless, or no path); the schedule is left clear so the next
/// evaluation retries.
pub fn execute_go_home<W: Citizens>(
    world: &mut W,
    citizen: rd_core::CitizenId,
    schedule: &mut CitizenSchedule,
) -> bool {
    let home = world.home_building(citizen);
    if home.is_none() {
        schedule.current_state = ResidentState::Ignored;
        return false;
    }
    if world.current_building(citizen) == home {
        schedule.current_state = ResidentState::AtHome;
        return true;
    }
    world.start_moving(citizen, home)
}

/// Cascade step (e) while at home: sleep through the night, occasionally
/// declare a full lazy day, otherwise leave the schedule clear so the next
/// evaluation reconsiders.  Returns `true` when an idle period was
/// scheduled.
pub fn plan_at_home(
    config: &SimulationConfig,
    clock: &DayClock,
    rng: &mut SimRng,
    schedule: &mut CitizenSchedule,
) -> bool {
    if clock.is_night() {
        schedule.schedule(ResidentState::AtHome, clock.now.future_hour(config.wake_up_hour));
        return true;
    }
    if rng.should_occur(STAY_HOME_ALL_DAY_CHANCE) {
        schedule.schedule(ResidentState::AtHome, clock.now.future_hour(config.go_to_sleep_hour));
        return true;
    }
    false
}
