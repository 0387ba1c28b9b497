//! Unit tests for the world boundary and the in-memory implementation.

#[cfg(test)]
mod classify {
    use crate::{BuildingClass, Service, StructureKind, SubService};

    #[test]
    fn essential_services() {
        assert!(BuildingClass::of(Service::HealthCare).is_essential_service());
        assert!(BuildingClass::of(Service::Fire).is_essential_service());
        assert!(!BuildingClass::of(Service::Commercial).is_essential_service());
        assert!(!BuildingClass::of(Service::Office).is_essential_service());
    }

    #[test]
    fn shopping_vs_relaxing() {
        let shop = BuildingClass::new(
            Service::Commercial,
            SubService::CommercialLow,
            1,
            StructureKind::Normal,
        );
        assert!(shop.is_shopping_target());
        assert!(!shop.is_relaxing_target());

        let bar = BuildingClass::new(
            Service::Commercial,
            SubService::CommercialLeisure,
            1,
            StructureKind::Normal,
        );
        assert!(!bar.is_shopping_target());
        assert!(bar.is_relaxing_target());

        assert!(BuildingClass::of(Service::Park).is_relaxing_target());
    }
}

#[cfg(test)]
mod memory {
    use rd_core::{BuildingId, CitizenId, SimTime};

    use crate::memory::CitizenRecord;
    use crate::{
        BuildingClass, Buildings, CitizenLocation, Citizens, MemoryWorld, Service, SubService,
        TravelTime, VisitPlaces,
    };

    fn shop_class() -> BuildingClass {
        BuildingClass {
            service: Service::Commercial,
            sub_service: SubService::CommercialLow,
            ..Default::default()
        }
    }

    #[test]
    fn sentinel_queries_are_harmless() {
        let world = MemoryWorld::new();
        assert!(world.class(BuildingId::NONE).is_none());
        assert!(!world.is_active(BuildingId::NONE));
        assert_eq!(world.workers_present(BuildingId::NONE), 0);
        assert!(world.workers(BuildingId::NONE).is_empty());
    }

    #[test]
    fn ids_start_at_one() {
        let mut world = MemoryWorld::new();
        let b = world.add_building(BuildingClass::of(Service::Office));
        assert_eq!(b, BuildingId(1));
        let c = world.add_citizen(CitizenRecord::default());
        assert_eq!(c, CitizenId(1));
    }

    #[test]
    fn move_and_arrive() {
        let mut world = MemoryWorld::new();
        let home = world.add_building(BuildingClass::of(Service::Residential));
        let work = world.add_building(BuildingClass::of(Service::Office));
        let c = world.add_citizen(CitizenRecord {
            home_building: home,
            work_building: work,
            current_building: home,
            location: CitizenLocation::Home,
            ..Default::default()
        });

        world.advance(SimTime::from_day_hour(0, 8.0));
        assert!(world.start_moving(c, work));
        assert_eq!(world.location(c), CitizenLocation::Moving);
        assert_eq!(world.current_building(c), work);

        // Default trip is half an hour; not there yet after ten minutes.
        world.advance(SimTime::from_day_hour(0, 8.2));
        assert_eq!(world.location(c), CitizenLocation::Moving);

        world.advance(SimTime::from_day_hour(0, 8.5));
        assert_eq!(world.location(c), CitizenLocation::Work);
        assert_eq!(world.workers_present(work), 1);
    }

    #[test]
    fn moving_to_inactive_building_fails() {
        let mut world = MemoryWorld::new();
        let b = world.add_building(BuildingClass::of(Service::Office));
        let c = world.add_citizen(CitizenRecord::default());
        world.building_mut(b).active = false;
        assert!(!world.start_moving(c, b));
        assert!(!world.start_moving(c, BuildingId::NONE));
    }

    #[test]
    fn travel_overrides() {
        let mut world = MemoryWorld::new();
        let a = world.add_building(BuildingClass::of(Service::Residential));
        let b = world.add_building(BuildingClass::of(Service::Office));
        assert_eq!(world.estimate_hours(a, a), 0.0);
        assert_eq!(world.estimate_hours(a, b), 0.5);
        world.set_travel_hours(a, b, 1.25);
        assert_eq!(world.estimate_hours(a, b), 1.25);
    }

    #[test]
    fn shop_search_respects_locality() {
        let mut world = MemoryWorld::new();
        let home = world.add_building(BuildingClass::of(Service::Residential));
        let far_shop = world.add_building(shop_class());
        world.building_mut(far_shop).neighborhood = 2;

        assert_eq!(world.find_shop(home, false), far_shop);
        assert!(world.find_shop(home, true).is_none());

        let near_shop = world.add_building(shop_class());
        assert_eq!(world.find_shop(home, true), near_shop);
    }

    #[test]
    fn shop_search_skips_empty_shelves() {
        let mut world = MemoryWorld::new();
        let home = world.add_building(BuildingClass::of(Service::Residential));
        let shop = world.add_building(shop_class());
        world.building_mut(shop).has_goods = false;
        assert!(world.find_shop(home, false).is_none());
    }

    #[test]
    fn upcoming_event_is_strictly_future() {
        let mut world = MemoryWorld::new();
        let venue = world.add_building(BuildingClass::of(Service::Monument));
        let start = SimTime::from_day_hour(0, 18.0);
        world.add_event(venue, start);

        let noon = SimTime::from_day_hour(0, 12.0);
        assert_eq!(world.upcoming_event(noon), Some((venue, start)));
        assert_eq!(world.upcoming_event(start), None);
    }
}
