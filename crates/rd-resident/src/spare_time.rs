//! Spare-time excursion chances.
//!
//! The chance of going out is a function of age group and the hour of day,
//! tapering linearly over the final hours before the configured sleep hour.
//! At night only young citizens go out, at a fixed reduced chance.

use rd_core::{DayClock, SimulationConfig};
use rd_world::AgeGroup;

use crate::constants::NIGHT_LEISURE_CHANCE;
use crate::schedule::{CitizenSchedule, WorkStatus};

/// Hours before the sleep hour over which the go-out chance fades to zero.
const TAPER_HOURS: f32 = 4.0;

fn base_chance(age: AgeGroup) -> u32 {
    match age {
        AgeGroup::Child => 40,
        AgeGroup::Teen => 70,
        AgeGroup::Young => 90,
        AgeGroup::Adult => 70,
        AgeGroup::Senior => 40,
    }
}

/// Chance (0..=100) of leaving the house for a non-essential excursion.
pub fn go_out_chance(config: &SimulationConfig, clock: &DayClock, age: AgeGroup) -> u32 {
    if clock.is_night() {
        return if age == AgeGroup::Young { NIGHT_LEISURE_CHANCE } else { 0 };
    }
    let base = base_chance(age);
    let hour = clock.current_hour();
    let taper_start = config.go_to_sleep_hour - TAPER_HOURS;
    if hour < taper_start {
        return base;
    }
    let remaining = ((config.go_to_sleep_hour - hour) / TAPER_HOURS).clamp(0.0, 1.0);
    (base as f32 * remaining) as u32
}

/// Chance of a shopping trip right now.
pub fn shopping_chance(
    config: &SimulationConfig,
    clock: &DayClock,
    age: AgeGroup,
    schedule: &CitizenSchedule,
) -> u32 {
    let mut chance = go_out_chance(config, clock, age);
    // Vacationers have time on their hands.
    if schedule.work_status == WorkStatus::OnVacation
        || schedule.school_status == WorkStatus::OnVacation
    {
        chance = (chance * 3 / 2).min(100);
    }
    chance
}

/// Chance of a relaxation trip right now.  `chance_multiplier` lets callers
/// boost the stay-or-continue decision for especially attractive venues
/// (parks double it, seniors at elder care quadruple it).
pub fn relaxing_chance(
    config: &SimulationConfig,
    clock: &DayClock,
    age: AgeGroup,
    schedule: &CitizenSchedule,
    chance_multiplier: u32,
) -> u32 {
    let mut chance = go_out_chance(config, clock, age);
    if schedule.work_status == WorkStatus::OnVacation
        || schedule.school_status == WorkStatus::OnVacation
    {
        chance = chance * 3 / 2;
    }
    (chance * chance_multiplier.max(1)).min(100)
}
