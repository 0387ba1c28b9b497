//! Scenario tests driving the full stack against `MemoryWorld`.

use rd_core::{BuildingId, CitizenId, SimTime, SimulationConfig, LATEST_CONFIG_VERSION};
use rd_resident::{ResidentState, WorkShift, WorkStatus};
use rd_world::memory::CitizenRecord;
use rd_world::{AgeGroup, BuildingClass, CitizenLocation, Citizens, MemoryWorld, Service};
use rd_worktime::WorkTime;

use crate::{NoopObserver, SimError, SimObserver, Simulation, Snapshot};

fn test_config() -> SimulationConfig {
    SimulationConfig {
        workforce_matters: false,
        is_breakfast_time_enabled: false,
        is_lunch_time_enabled: false,
        shopping_for_fun_quota: 0,
        on_time_quota: 100,
        virtual_citizens_quota: 0,
        ..Default::default()
    }
}

fn worker_city() -> (MemoryWorld, BuildingId, BuildingId, CitizenId) {
    let mut world = MemoryWorld::new();
    let home = world.add_building(BuildingClass::of(Service::Residential));
    let office = world.add_building(BuildingClass::of(Service::Office));
    let citizen = world.add_citizen(CitizenRecord {
        age_group: AgeGroup::Adult,
        location: CitizenLocation::Home,
        current_building: home,
        home_building: home,
        work_building: office,
        ..Default::default()
    });
    (world, home, office, citizen)
}

#[derive(Default)]
struct CountingObserver {
    ticks: usize,
    evaluated: usize,
    days: Vec<u64>,
}

impl SimObserver for CountingObserver {
    fn on_tick_end(&mut self, _now: SimTime, evaluated: usize) {
        self.ticks += 1;
        self.evaluated += evaluated;
    }

    fn on_new_day(&mut self, day: u64) {
        self.days.push(day);
    }
}

mod tick_loop {
    use super::*;

    #[test]
    fn worker_commutes_and_returns_over_a_day() {
        let (world, home, office, citizen) = worker_city();
        let mut sim = Simulation::new(world, test_config(), 42);
        sim.track_citizen(citizen);

        // Midnight to 16:00: asleep, up at six, at the office by eight.
        sim.run_ticks(32, &mut NoopObserver);
        assert_eq!(sim.world().location(citizen), CitizenLocation::Work);
        assert_eq!(sim.world().current_building(citizen), office);

        // Through the end of the shift and the evening: back home.
        sim.run_ticks(15, &mut NoopObserver);
        assert_eq!(sim.world().current_building(citizen), home);
        assert_eq!(sim.world().location(citizen), CitizenLocation::Home);
        assert_eq!(
            sim.residents().store().get(citizen).current_state,
            ResidentState::AtHome
        );
    }

    #[test]
    fn observer_sees_every_tick_and_the_rollover() {
        let (world, _, _, citizen) = worker_city();
        let mut sim = Simulation::new(world, test_config(), 42);
        sim.track_citizen(citizen);

        let mut observer = CountingObserver::default();
        sim.run_ticks(49, &mut observer);
        assert_eq!(observer.ticks, 49);
        assert_eq!(observer.evaluated, 49);
        assert_eq!(observer.days, vec![1]);
    }

    #[test]
    fn rollover_ticks_vacations_down() {
        let (world, _, office, citizen) = worker_city();
        let mut sim = Simulation::new(world, test_config(), 42);
        sim.track_citizen(citizen);
        {
            let s = sim.residents_mut().store_mut().get_mut(citizen);
            s.work_building = office;
            s.work_shift = WorkShift::First;
            s.work_status = WorkStatus::OnVacation;
            s.vacation_days_left = 2;
        }

        sim.run_ticks(49, &mut NoopObserver);
        let s = sim.residents().store().get(citizen);
        assert_eq!(s.vacation_days_left, 1);
        assert_eq!(s.work_status, WorkStatus::OnVacation);
    }

    #[test]
    fn released_citizens_are_not_evaluated() {
        let (world, _, _, citizen) = worker_city();
        let mut sim = Simulation::new(world, test_config(), 42);
        sim.track_citizen(citizen);
        sim.release_citizen(citizen);

        let mut observer = CountingObserver::default();
        sim.run_ticks(4, &mut observer);
        assert_eq!(observer.evaluated, 0);
    }
}

mod queries {
    use super::*;

    #[test]
    fn office_hours_through_the_facade() {
        let (world, _, office, _) = worker_city();
        let mut sim = Simulation::new(world, test_config(), 42);
        sim.evaluate_building_tick(office);

        sim.step(SimTime::from_day_hour(0, 3.0), &mut NoopObserver);
        assert!(!sim.is_building_working(office));

        sim.step(SimTime::from_day_hour(0, 12.0), &mut NoopObserver);
        assert!(sim.is_building_working(office));

        // Single day shift: closing lead starts two hours before work end.
        sim.step(SimTime::from_day_hour(0, 17.0), &mut NoopObserver);
        assert!(sim.is_closing_soon(office));
    }

    #[test]
    fn noise_restriction_follows_the_night_window() {
        let (mut world, _, office, _) = worker_city();
        world.building_mut(office).noise_restricted_area = true;
        let mut sim = Simulation::new(world, test_config(), 42);

        sim.step(SimTime::from_day_hour(0, 12.0), &mut NoopObserver);
        assert!(!sim.is_noise_restricted(office, BuildingId::NONE));

        sim.step(SimTime::from_day_hour(0, 23.0), &mut NoopObserver);
        assert!(sim.is_noise_restricted(office, BuildingId::NONE));
    }

    #[test]
    fn demolished_building_loses_its_profile() {
        let (world, _, office, _) = worker_city();
        let mut sim = Simulation::new(world, test_config(), 42);
        sim.evaluate_building_tick(office);
        assert!(sim.hours().get(office).is_some());

        // An out-of-range id reads as class None.
        let gone = BuildingId(999);
        sim.evaluate_building_tick(gone);
        assert!(sim.hours().get(gone).is_none());
    }
}

mod persistence {
    use super::*;

    #[test]
    fn snapshot_round_trips_both_tables() {
        let (world, _, office, citizen) = worker_city();
        let mut sim = Simulation::new(world, test_config(), 42);
        sim.track_citizen(citizen);
        sim.evaluate_building_tick(office);
        {
            let s = sim.residents_mut().store_mut().get_mut(citizen);
            s.work_building = office;
            s.work_shift = WorkShift::First;
            s.work_status = WorkStatus::Active;
        }

        let snapshot = sim.snapshot();
        let json = snapshot.to_json().unwrap();
        let decoded = Snapshot::from_json(&json).unwrap();

        let (world2, _, _, _) = worker_city();
        let sim2 = Simulation::restore(world2, decoded, 42);
        assert_eq!(sim2.hours().entries(), snapshot.work_times);
        assert_eq!(
            sim2.residents().store().get(citizen),
            sim.residents().store().get(citizen)
        );
        assert_eq!(sim2.config(), sim.config());
    }

    #[test]
    fn version_zero_quotas_are_rescaled() {
        let snapshot = Snapshot {
            version: 0,
            config: SimulationConfig {
                version: 0,
                second_shift_quota: 4,
                night_shift_quota: 2,
                ..Default::default()
            },
            work_times: vec![(BuildingId(7), WorkTime::always_open())],
            schedules: Vec::new(),
        };
        let json = snapshot.to_json().unwrap();
        let decoded = Snapshot::from_json(&json).unwrap();

        assert_eq!(decoded.version, LATEST_CONFIG_VERSION);
        assert_eq!(decoded.config.version, LATEST_CONFIG_VERSION);
        assert_eq!(decoded.config.second_shift_quota, 12);
        assert_eq!(decoded.config.night_shift_quota, 6);
        assert_eq!(decoded.work_times, snapshot.work_times);
    }

    #[test]
    fn current_version_passes_through_unchanged() {
        let snapshot = Snapshot {
            version: LATEST_CONFIG_VERSION,
            config: SimulationConfig::default(),
            work_times: Vec::new(),
            schedules: Vec::new(),
        };
        let decoded = Snapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(decoded.config.second_shift_quota, 13);
        assert_eq!(decoded.config.night_shift_quota, 6);
    }

    #[test]
    fn future_versions_are_refused() {
        let snapshot = Snapshot {
            version: LATEST_CONFIG_VERSION + 1,
            config: SimulationConfig::default(),
            work_times: Vec::new(),
            schedules: Vec::new(),
        };
        let json = snapshot.to_json().unwrap();
        assert!(matches!(
            Snapshot::from_json(&json),
            Err(SimError::UnsupportedVersion(_))
        ));
    }
}
