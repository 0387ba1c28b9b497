//! Unit tests for profile derivation and the open/closed queries.

use rd_core::{BuildingId, DayClock, SimRng, SimTime, SimulationConfig};
use rd_world::memory::CitizenRecord;
use rd_world::{
    BuildingClass, CitizenLocation, MemoryWorld, Service, StructureKind, SubService,
};

use crate::engine::OperatingHours;
use crate::profile::WorkTime;

fn config() -> SimulationConfig {
    SimulationConfig { workforce_matters: false, ..Default::default() }
}

fn clock_at(day: u64, hour: f32, config: &SimulationConfig) -> DayClock {
    DayClock::new(
        SimTime::from_day_hour(day, hour),
        config.wake_up_hour,
        config.go_to_sleep_hour,
        config.is_weekend_enabled,
    )
}

fn leisure_class() -> BuildingClass {
    BuildingClass {
        service: Service::Commercial,
        sub_service: SubService::CommercialLeisure,
        level: 1,
        kind: StructureKind::Normal,
    }
}

#[cfg(test)]
mod profile {
    use super::*;

    #[test]
    fn single_shift_is_never_continuous() {
        for night in [false, true] {
            for continuous in [false, true] {
                for second in [false, true] {
                    let wt = WorkTime::compose(night, true, false, continuous, second);
                    if wt.work_shifts == 1 {
                        assert!(!wt.has_continuous_work_shift);
                    }
                }
            }
        }
    }

    #[test]
    fn continuous_runs_two_shifts() {
        let wt = WorkTime::compose(true, true, false, true, false);
        assert_eq!(wt.work_shifts, 2);
        assert!(wt.is_always_open());

        let day_only = WorkTime::compose(false, true, false, true, false);
        assert_eq!(day_only.work_shifts, 2);
        assert!(!day_only.is_always_open());
    }

    #[test]
    fn discrete_night_runs_three_shifts() {
        let wt = WorkTime::compose(true, true, false, false, false);
        assert_eq!(wt.work_shifts, 3);
        assert!(wt.is_always_open());
    }
}

#[cfg(test)]
mod derivation {
    use super::*;
    use crate::derive::needs_work_time;

    #[test]
    fn untracked_classifications() {
        assert!(!needs_work_time(&BuildingClass::of(Service::Residential)));
        assert!(!needs_work_time(&BuildingClass::of(Service::None)));
        let car_park = BuildingClass {
            service: Service::Road,
            kind: StructureKind::CarPark,
            ..Default::default()
        };
        assert!(!needs_work_time(&car_park));
        assert!(needs_work_time(&BuildingClass::of(Service::Office)));
    }

    #[test]
    fn healthcare_clinic_defaults_continuous_night() {
        // Service=HealthCare, level<4: continuous two-shift, works nights.
        let mut world = MemoryWorld::new();
        let clinic = world.add_building(BuildingClass {
            service: Service::HealthCare,
            level: 2,
            ..Default::default()
        });
        let cfg = config();
        let mut rng = SimRng::new(1);
        let mut engine = OperatingHours::new();
        let wt = engine.get_or_create(&world, &cfg, &mut rng, clinic).unwrap();
        assert!(wt.work_at_night);
        assert!(wt.has_continuous_work_shift);
        assert_eq!(wt.work_shifts, 2);

        // Open in the middle of the night and in the afternoon.
        assert!(engine.is_working(&world, &cfg, &clock_at(0, 2.0, &cfg), &mut rng, clinic, 0.0));
        assert!(engine.is_working(&world, &cfg, &clock_at(0, 14.0, &cfg), &mut rng, clinic, 0.0));
    }

    #[test]
    fn care_home_closes_at_night() {
        let mut world = MemoryWorld::new();
        let home = world.add_building(BuildingClass {
            service: Service::HealthCare,
            level: 4,
            ..Default::default()
        });
        let cfg = config();
        let mut rng = SimRng::new(1);
        let mut engine = OperatingHours::new();
        let wt = engine.get_or_create(&world, &cfg, &mut rng, home).unwrap();
        assert!(!wt.work_at_night);
        assert!(wt.work_at_weekends);
        assert!(!engine.is_working(&world, &cfg, &clock_at(0, 23.0, &cfg), &mut rng, home, 0.0));
    }

    #[test]
    fn office_defaults_single_daytime_shift() {
        let mut world = MemoryWorld::new();
        let office = world.add_building(BuildingClass::of(Service::Office));
        let cfg = config();
        let mut rng = SimRng::new(1);
        let mut engine = OperatingHours::new();
        let wt = engine.get_or_create(&world, &cfg, &mut rng, office).unwrap();
        assert_eq!(wt.work_shifts, 1);
        assert!(!wt.work_at_night);
        assert!(!wt.work_at_weekends);

        // Weekday 20:00 is outside the single shift.
        assert!(!engine.is_working(&world, &cfg, &clock_at(0, 20.0, &cfg), &mut rng, office, 0.0));
        assert!(engine.is_working(&world, &cfg, &clock_at(0, 10.0, &cfg), &mut rng, office, 0.0));
    }

    #[test]
    fn hotel_beats_its_service_default() {
        let mut world = MemoryWorld::new();
        let hotel = world.add_building(BuildingClass {
            service: Service::Commercial,
            sub_service: SubService::CommercialTourist,
            level: 1,
            kind: StructureKind::Hotel,
        });
        let cfg = config();
        let mut rng = SimRng::new(1);
        let mut engine = OperatingHours::new();
        let wt = engine.get_or_create(&world, &cfg, &mut rng, hotel).unwrap();
        assert!(wt.is_always_open());
    }

    #[test]
    fn essential_farm_works_nights() {
        let mut world = MemoryWorld::new();
        let farm_class = BuildingClass {
            service: Service::Industrial,
            sub_service: SubService::IndustrialFarming,
            ..Default::default()
        };
        let plain = world.add_building(farm_class);
        let essential = world.add_building(farm_class);
        world.building_mut(essential).essential_industry = true;

        let cfg = config();
        let mut rng = SimRng::new(1);
        let mut engine = OperatingHours::new();
        assert!(!engine.get_or_create(&world, &cfg, &mut rng, plain).unwrap().work_at_night);
        assert!(engine.get_or_create(&world, &cfg, &mut rng, essential).unwrap().is_always_open());
    }

    #[test]
    fn idempotent_without_updates() {
        let mut world = MemoryWorld::new();
        let b = world.add_building(leisure_class());
        let cfg = config();
        let mut rng = SimRng::new(9);
        let mut engine = OperatingHours::new();
        let first = engine.get_or_create(&world, &cfg, &mut rng, b).unwrap();
        let second = engine.get_or_create(&world, &cfg, &mut rng, b).unwrap();
        assert_eq!(first, second);
    }
}

#[cfg(test)]
mod queries {
    use super::*;

    #[test]
    fn sentinel_building_is_always_open() {
        let world = MemoryWorld::new();
        let cfg = config();
        let mut rng = SimRng::new(1);
        let mut engine = OperatingHours::new();
        for hour in [0.0, 3.0, 12.0, 23.5] {
            assert!(engine.is_working(
                &world,
                &cfg,
                &clock_at(0, hour, &cfg),
                &mut rng,
                BuildingId::NONE,
                0.0
            ));
        }
        assert!(engine.get(BuildingId::NONE).is_none());
    }

    #[test]
    fn three_shift_building_open_every_hour() {
        let mut world = MemoryWorld::new();
        let b = world.add_building(BuildingClass::of(Service::Monument));
        let cfg = config();
        let mut rng = SimRng::new(1);
        let mut engine = OperatingHours::new();
        assert_eq!(engine.get_or_create(&world, &cfg, &mut rng, b).unwrap().work_shifts, 3);
        for day in 0..7 {
            for hour in 0..48 {
                let clock = clock_at(day, hour as f32 * 0.5, &cfg);
                assert!(engine.is_working(&world, &cfg, &clock, &mut rng, b, 0.0));
            }
        }
    }

    #[test]
    fn single_shift_window_matches_work_hours() {
        let mut world = MemoryWorld::new();
        let office = world.add_building(BuildingClass::of(Service::Office));
        let cfg = config();
        let mut rng = SimRng::new(1);
        let mut engine = OperatingHours::new();
        for hour in 0..48 {
            let h = hour as f32 * 0.5;
            let open = engine.is_working(&world, &cfg, &clock_at(1, h, &cfg), &mut rng, office, 0.0);
            assert_eq!(open, (cfg.work_begin..cfg.work_end).contains(&h), "hour {h}");
        }
        // Closed all Saturday.
        assert!(!engine.is_working(&world, &cfg, &clock_at(5, 10.0, &cfg), &mut rng, office, 0.0));
    }

    #[test]
    fn lead_hours_open_the_building_early() {
        let mut world = MemoryWorld::new();
        let office = world.add_building(BuildingClass::of(Service::Office));
        let cfg = config();
        let mut rng = SimRng::new(1);
        let mut engine = OperatingHours::new();
        let clock = clock_at(0, cfg.work_begin - 0.5, &cfg);
        assert!(!engine.is_working(&world, &cfg, &clock, &mut rng, office, 0.0));
        assert!(engine.is_working(&world, &cfg, &clock, &mut rng, office, 1.0));
    }

    #[test]
    fn closing_soon_within_two_hours() {
        let mut world = MemoryWorld::new();
        let office = world.add_building(BuildingClass::of(Service::Office));
        let monument = world.add_building(BuildingClass::of(Service::Monument));
        let cfg = config();
        let mut rng = SimRng::new(1);
        let mut engine = OperatingHours::new();

        let mid_morning = clock_at(0, 10.0, &cfg);
        let late = clock_at(0, cfg.work_end - 1.0, &cfg);
        assert!(!engine.is_closing_soon(&world, &cfg, &mid_morning, &mut rng, office));
        assert!(engine.is_closing_soon(&world, &cfg, &late, &mut rng, office));
        assert!(!engine.is_closing_soon(&world, &cfg, &late, &mut rng, monument));
    }

    #[test]
    fn workforce_matters_forces_unstaffed_closed() {
        let mut world = MemoryWorld::new();
        let office = world.add_building(BuildingClass::of(Service::Office));
        world.add_citizen(CitizenRecord { work_building: office, ..Default::default() });

        let cfg = SimulationConfig { workforce_matters: true, ..Default::default() };
        let mut rng = SimRng::new(1);
        let mut engine = OperatingHours::new();
        let noon = clock_at(0, 12.0, &cfg);

        // One employee on the books, nobody inside.
        assert!(!engine.is_working(&world, &cfg, &noon, &mut rng, office, 0.0));

        let worker = rd_core::CitizenId(1);
        world.citizen_mut(worker).current_building = office;
        world.citizen_mut(worker).location = CitizenLocation::Work;
        assert!(engine.is_working(&world, &cfg, &noon, &mut rng, office, 0.0));
    }

    #[test]
    fn noise_restriction_checks_arrival_hour() {
        let mut world = MemoryWorld::new();
        let home = world.add_building(BuildingClass::of(Service::Residential));
        let bar = world.add_building(leisure_class());
        world.building_mut(bar).noise_restricted_area = true;
        world.set_travel_hours(home, bar, 2.0);

        let cfg = config();
        let engine = OperatingHours::new();

        // 23:00 now: restricted outright.
        let night = clock_at(0, 23.0, &cfg);
        assert!(engine.is_noise_restricted(&world, &cfg, &night, bar, BuildingId::NONE));

        // 21:00 now, but a two-hour trip arrives at 23:00.
        let evening = clock_at(0, 21.0, &cfg);
        assert!(!engine.is_noise_restricted(&world, &cfg, &evening, bar, BuildingId::NONE));
        assert!(engine.is_noise_restricted(&world, &cfg, &evening, bar, home));

        // Unrestricted area never restricts.
        world.building_mut(bar).noise_restricted_area = false;
        assert!(!engine.is_noise_restricted(&world, &cfg, &night, bar, BuildingId::NONE));
    }
}

#[cfg(test)]
mod updates {
    use super::*;

    #[test]
    fn noise_policy_trims_leisure_to_two_shifts() {
        // Scenario: leisure commerce loses its night shift under a newly
        // applied noise restriction, default profiles only.
        let mut world = MemoryWorld::new();
        let bar = world.add_building(leisure_class());
        let cfg = config();
        let mut rng = SimRng::new(1);
        let mut engine = OperatingHours::new();

        let before = engine.get_or_create(&world, &cfg, &mut rng, bar).unwrap();
        assert_eq!(before.work_shifts, 3);
        assert!(before.work_at_night);

        world.building_mut(bar).noise_restricted_area = true;
        assert!(engine.update(&world, bar));
        let after = *engine.get(bar).unwrap();
        assert_eq!(after.work_shifts, 2);
        assert!(!after.work_at_night);

        // And back again when the policy lifts.
        world.building_mut(bar).noise_restricted_area = false;
        assert!(engine.update(&world, bar));
        assert_eq!(engine.get(bar).unwrap().work_shifts, 3);
    }

    #[test]
    fn overrides_survive_policy_updates() {
        let mut world = MemoryWorld::new();
        let bar = world.add_building(leisure_class());
        let mut engine = OperatingHours::new();
        engine.set_override(bar, WorkTime::compose(false, false, false, false, false));

        world.building_mut(bar).noise_restricted_area = true;
        assert!(!engine.update(&world, bar));
        assert!(!engine.get(bar).unwrap().is_default);
        assert_eq!(engine.get(bar).unwrap().work_shifts, 1);
    }

    #[test]
    fn ignore_policy_suppresses_updates() {
        let mut world = MemoryWorld::new();
        let bar = world.add_building(leisure_class());
        let cfg = config();
        let mut rng = SimRng::new(1);
        let mut probe = OperatingHours::new();
        let wt = probe.get_or_create(&world, &cfg, &mut rng, bar).unwrap();
        let mut engine = OperatingHours::restore([(bar, WorkTime { ignore_policy: true, ..wt })]);

        world.building_mut(bar).noise_restricted_area = true;
        assert!(!engine.update(&world, bar));
    }

    #[test]
    fn update_without_profile_is_a_no_op() {
        let mut world = MemoryWorld::new();
        let b = world.add_building(BuildingClass::of(Service::Office));
        let mut engine = OperatingHours::new();
        assert!(!engine.update(&world, b));
    }

    #[test]
    fn remove_drops_the_profile() {
        let mut world = MemoryWorld::new();
        let b = world.add_building(BuildingClass::of(Service::Office));
        let cfg = config();
        let mut rng = SimRng::new(1);
        let mut engine = OperatingHours::new();
        engine.get_or_create(&world, &cfg, &mut rng, b);
        assert_eq!(engine.len(), 1);
        engine.remove(b);
        assert!(engine.is_empty());
    }
}
