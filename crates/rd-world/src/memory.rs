//! `MemoryWorld` — a complete in-memory implementation of all collaborator
//! traits.  Used by the sim driver and by every scenario test; the host
//! adapter in a real deployment replaces it wholesale.
//!
//! Slot 0 of both registries is reserved for the "no entity" sentinel, so
//! `add_building`/`add_citizen` hand out ids starting at 1.

use rd_core::{BuildingId, CitizenId, SimTime};
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::citizen::{AgeGroup, CitizenFlags, CitizenLocation};
use crate::classify::{BuildingClass, Service};
use crate::traits::{Buildings, Citizens, TravelTime, VisitPlaces, Weather, MAX_HOUSEHOLD};

// ── Records ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct BuildingRecord {
    pub class: BuildingClass,
    pub active: bool,
    pub evacuating: bool,
    pub night_tours: bool,
    pub noise_restricted_area: bool,
    pub essential_industry: bool,
    /// Coarse locality bucket used by local-only destination searches.
    pub neighborhood: u8,
    /// `false` marks a shop that has run out of goods.
    pub has_goods: bool,
}

#[derive(Clone, Debug, Default)]
pub struct CitizenRecord {
    pub age_group: AgeGroup,
    pub flags: CitizenFlags,
    pub location: CitizenLocation,
    pub current_building: BuildingId,
    pub home_building: BuildingId,
    pub work_building: BuildingId,
    pub school_building: BuildingId,
    pub household: [CitizenId; MAX_HOUSEHOLD],
    /// Arrival deadline while `location == Moving`; managed by the driver.
    pub arrival: Option<SimTime>,
}

// ── MemoryWorld ───────────────────────────────────────────────────────────────

/// In-memory world state implementing every collaborator trait.
pub struct MemoryWorld {
    buildings: Vec<BuildingRecord>,
    citizens: Vec<CitizenRecord>,
    /// Default door-to-door travel estimate, in hours.
    pub default_travel_hours: f32,
    /// Per-pair overrides of the travel estimate.
    travel_overrides: FxHashMap<(BuildingId, BuildingId), f32>,
    pub bad_weather: bool,
    /// Upcoming city events as (venue, start), kept sorted by start.
    events: Vec<(BuildingId, SimTime)>,
    /// Clock mirror, advanced by the driver so moves can compute arrivals.
    now: SimTime,
}

impl Default for MemoryWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self {
            // Slot 0 is the sentinel in both registries.
            buildings: vec![BuildingRecord::default()],
            citizens: vec![CitizenRecord::default()],
            default_travel_hours: 0.5,
            travel_overrides: FxHashMap::default(),
            bad_weather: false,
            events: Vec::new(),
            now: SimTime::ZERO,
        }
    }

    // ── Construction ──────────────────────────────────────────────────────

    pub fn add_building(&mut self, class: BuildingClass) -> BuildingId {
        let id = BuildingId(self.buildings.len() as u16);
        self.buildings.push(BuildingRecord {
            class,
            active: true,
            has_goods: true,
            ..Default::default()
        });
        id
    }

    pub fn add_citizen(&mut self, record: CitizenRecord) -> CitizenId {
        let id = CitizenId(self.citizens.len() as u32);
        self.citizens.push(record);
        id
    }

    pub fn building_mut(&mut self, building: BuildingId) -> &mut BuildingRecord {
        &mut self.buildings[building.index()]
    }

    pub fn citizen_mut(&mut self, citizen: CitizenId) -> &mut CitizenRecord {
        &mut self.citizens[citizen.index()]
    }

    pub fn citizen(&self, citizen: CitizenId) -> &CitizenRecord {
        &self.citizens[citizen.index()]
    }

    pub fn set_travel_hours(&mut self, from: BuildingId, to: BuildingId, hours: f32) {
        self.travel_overrides.insert((from, to), hours);
    }

    pub fn add_event(&mut self, venue: BuildingId, start: SimTime) {
        self.events.push((venue, start));
        self.events.sort_by_key(|&(_, start)| start);
    }

    // ── Driver hooks ──────────────────────────────────────────────────────

    /// Advance the world clock and complete any journeys whose arrival
    /// deadline has passed.  Called once per tick before evaluations.
    pub fn advance(&mut self, now: SimTime) {
        self.now = now;
        for record in &mut self.citizens {
            let arrived = matches!(record.arrival, Some(deadline) if deadline <= now);
            if arrived && record.location == CitizenLocation::Moving {
                record.arrival = None;
                record.location = if record.current_building == record.home_building {
                    CitizenLocation::Home
                } else if record.current_building == record.work_building
                    || record.current_building == record.school_building
                {
                    CitizenLocation::Work
                } else {
                    CitizenLocation::Visit
                };
            }
        }
    }

    fn find_service(&self, service: Service) -> BuildingId {
        self.buildings
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, b)| b.active && b.class.service == service)
            .map_or(BuildingId::NONE, |(i, _)| BuildingId(i as u16))
    }

    fn building(&self, building: BuildingId) -> Option<&BuildingRecord> {
        if building.is_none() {
            return None;
        }
        self.buildings.get(building.index())
    }
}

// ── Trait implementations ─────────────────────────────────────────────────────

impl Buildings for MemoryWorld {
    fn class(&self, building: BuildingId) -> Option<BuildingClass> {
        self.building(building).map(|b| b.class)
    }

    fn is_active(&self, building: BuildingId) -> bool {
        self.building(building).is_some_and(|b| b.active)
    }

    fn is_evacuating(&self, building: BuildingId) -> bool {
        self.building(building).is_some_and(|b| b.evacuating)
    }

    fn has_night_tours_policy(&self, building: BuildingId) -> bool {
        self.building(building).is_some_and(|b| b.night_tours)
    }

    fn is_noise_restricted_area(&self, building: BuildingId) -> bool {
        self.building(building).is_some_and(|b| b.noise_restricted_area)
    }

    fn is_essential_industry(&self, building: BuildingId) -> bool {
        self.building(building).is_some_and(|b| b.essential_industry)
    }

    fn workers_present(&self, building: BuildingId) -> u32 {
        if building.is_none() {
            return 0;
        }
        self.citizens
            .iter()
            .filter(|c| {
                c.work_building == building
                    && c.current_building == building
                    && matches!(c.location, CitizenLocation::Work | CitizenLocation::Visit)
            })
            .count() as u32
    }

    fn workers(&self, building: BuildingId) -> Vec<CitizenId> {
        if building.is_none() {
            return Vec::new();
        }
        self.citizens
            .iter()
            .enumerate()
            .filter(|(_, c)| c.work_building == building)
            .map(|(i, _)| CitizenId(i as u32))
            .collect()
    }
}

impl Citizens for MemoryWorld {
    fn exists(&self, citizen: CitizenId) -> bool {
        citizen.is_some() && citizen.index() < self.citizens.len()
    }

    fn age_group(&self, citizen: CitizenId) -> AgeGroup {
        self.citizens[citizen.index()].age_group
    }

    fn flags(&self, citizen: CitizenId) -> CitizenFlags {
        self.citizens[citizen.index()].flags
    }

    fn location(&self, citizen: CitizenId) -> CitizenLocation {
        self.citizens[citizen.index()].location
    }

    fn current_building(&self, citizen: CitizenId) -> BuildingId {
        self.citizens[citizen.index()].current_building
    }

    fn home_building(&self, citizen: CitizenId) -> BuildingId {
        self.citizens[citizen.index()].home_building
    }

    fn work_building(&self, citizen: CitizenId) -> BuildingId {
        self.citizens[citizen.index()].work_building
    }

    fn school_building(&self, citizen: CitizenId) -> BuildingId {
        self.citizens[citizen.index()].school_building
    }

    fn household_members(&self, citizen: CitizenId) -> [CitizenId; MAX_HOUSEHOLD] {
        self.citizens[citizen.index()].household
    }

    fn start_moving(&mut self, citizen: CitizenId, target: BuildingId) -> bool {
        if target.is_none() || !self.is_active(target) {
            return false;
        }
        let from = self.citizens[citizen.index()].current_building;
        let hours = self.estimate_hours(from, target);
        let record = &mut self.citizens[citizen.index()];
        record.location = CitizenLocation::Moving;
        record.current_building = target;
        record.arrival = Some(self.now.add_hours(hours));
        trace!(target: "movement", %citizen, %target, hours, "journey started");
        true
    }
}

impl TravelTime for MemoryWorld {
    fn estimate_hours(&self, from: BuildingId, to: BuildingId) -> f32 {
        if from == to {
            return 0.0;
        }
        self.travel_overrides
            .get(&(from, to))
            .copied()
            .unwrap_or(self.default_travel_hours)
    }
}

impl Weather for MemoryWorld {
    fn is_bad_weather(&self) -> bool {
        self.bad_weather
    }
}

impl VisitPlaces for MemoryWorld {
    fn find_shop(&self, near: BuildingId, local_only: bool) -> BuildingId {
        let neighborhood = self.building(near).map(|b| b.neighborhood);
        for (i, b) in self.buildings.iter().enumerate().skip(1) {
            if !b.active || !b.has_goods || !b.class.is_shopping_target() {
                continue;
            }
            if local_only && neighborhood.is_some_and(|n| b.neighborhood != n) {
                continue;
            }
            return BuildingId(i as u16);
        }
        BuildingId::NONE
    }

    fn find_leisure(&self, near: BuildingId, nearby_only: bool) -> BuildingId {
        let neighborhood = self.building(near).map(|b| b.neighborhood);
        for (i, b) in self.buildings.iter().enumerate().skip(1) {
            if !b.active || !b.class.is_relaxing_target() {
                continue;
            }
            if nearby_only && neighborhood.is_some_and(|n| b.neighborhood != n) {
                continue;
            }
            return BuildingId(i as u16);
        }
        BuildingId::NONE
    }

    fn find_care(&self, _near: BuildingId) -> BuildingId {
        self.find_service(Service::HealthCare)
    }

    fn find_shelter(&self, _near: BuildingId) -> BuildingId {
        self.find_service(Service::Disaster)
    }

    fn upcoming_event(&self, now: SimTime) -> Option<(BuildingId, SimTime)> {
        self.events.iter().copied().find(|&(_, start)| start > now)
    }
}
