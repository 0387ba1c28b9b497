//! Vacation lifecycle: daily countdown, random starts, household sync.

use rd_core::{CitizenId, SimRng, SimulationConfig};
use rd_world::{Buildings, Citizens};
use tracing::debug;

use crate::constants::{FAMILY_VACATION_CHANCE, VACATION_START_CHANCE};
use crate::schedule::{ScheduleStore, WorkStatus};
use crate::shifts::shift_headcount;

fn put_on_vacation(store: &mut ScheduleStore, citizen: CitizenId, days: u8) {
    let record = store.get_mut(citizen);
    record.vacation_days_left = days;
    if record.work_status == WorkStatus::Active {
        record.work_status = WorkStatus::OnVacation;
    }
    if record.school_status == WorkStatus::Active {
        record.school_status = WorkStatus::OnVacation;
    }
}

/// Day-rollover pass for one citizen: tick down a running vacation, or
/// maybe start a new one.
pub fn process_new_day<W: Buildings + Citizens>(
    world: &W,
    store: &mut ScheduleStore,
    config: &SimulationConfig,
    rng: &mut SimRng,
    citizen: CitizenId,
) {
    let schedule = store.get(citizen);

    if schedule.vacation_days_left > 0 {
        let record = store.get_mut(citizen);
        record.vacation_days_left -= 1;
        if record.vacation_days_left == 0 {
            if record.work_status == WorkStatus::OnVacation {
                record.work_status = WorkStatus::Active;
            }
            if record.school_status == WorkStatus::OnVacation {
                record.school_status = WorkStatus::Active;
            }
            debug!(target: "schedule", %citizen, "vacation over");
        }
        return;
    }

    let engaged = schedule.work_status == WorkStatus::Active
        || schedule.school_status == WorkStatus::Active;
    if !engaged || !rng.should_occur(VACATION_START_CHANCE) {
        return;
    }

    // An essential-service worker whose shift would be left unstaffed skips
    // the vacation.
    if config.workforce_matters && schedule.is_employed() {
        let essential = world
            .class(schedule.work_building)
            .is_some_and(|class| class.is_essential_service());
        if essential
            && shift_headcount(world, store, schedule.work_building, schedule.work_shift) <= 1
        {
            return;
        }
    }

    let days = rng.gen_range(1..=config.max_vacation_length) as u8;
    put_on_vacation(store, citizen, days);
    debug!(target: "schedule", %citizen, days, "vacation started");

    // One-level household sync: the same duration, no re-rolls, never
    // recursing into the members' own households.
    if rng.should_occur(FAMILY_VACATION_CHANCE) {
        for member in world.household_members(citizen) {
            if member.is_none() || member == citizen {
                continue;
            }
            let m = store.get(member);
            let member_engaged = m.work_status == WorkStatus::Active
                || m.school_status == WorkStatus::Active;
            if member_engaged && m.vacation_days_left == 0 {
                put_on_vacation(store, member, days);
            }
        }
    }
}
