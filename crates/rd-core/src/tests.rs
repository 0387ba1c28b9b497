//! Unit tests for rd-core primitives.

#[cfg(test)]
mod ids {
    use crate::{BuildingId, CitizenId};

    #[test]
    fn index_cast() {
        let id = CitizenId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(usize::from(id), 42);
    }

    #[test]
    fn ordering() {
        assert!(CitizenId(0) < CitizenId(1));
        assert!(BuildingId(100) > BuildingId(99));
    }

    #[test]
    fn zero_is_the_none_sentinel() {
        assert!(CitizenId::NONE.is_none());
        assert!(BuildingId::NONE.is_none());
        assert!(CitizenId(1).is_some());
        assert_eq!(CitizenId::default(), CitizenId::NONE);
    }

    #[test]
    fn display() {
        assert_eq!(CitizenId(7).to_string(), "CitizenId(7)");
        assert_eq!(BuildingId(3).to_string(), "BuildingId(3)");
    }
}

#[cfg(test)]
mod time {
    use crate::time::{MINUTES_PER_DAY, MINUTES_PER_HOUR};
    use crate::{DayClock, SimTime};

    #[test]
    fn day_and_weekday() {
        let t = SimTime::from_day_hour(0, 12.0);
        assert_eq!(t.day(), 0);
        assert_eq!(t.weekday(), 0); // Monday
        assert!(!t.is_weekend());

        let sat = SimTime::from_day_hour(5, 3.0);
        assert_eq!(sat.weekday(), 5);
        assert!(sat.is_weekend());

        let next_mon = SimTime::from_day_hour(7, 0.0);
        assert_eq!(next_mon.weekday(), 0);
    }

    #[test]
    fn hour_of_day_resolution() {
        let t = SimTime(MINUTES_PER_DAY + 9 * MINUTES_PER_HOUR + 30);
        assert!((t.hour_of_day() - 9.5).abs() < 1e-6);
    }

    #[test]
    fn add_hours_saturates_at_zero() {
        let t = SimTime::from_day_hour(0, 1.0);
        assert_eq!(t.add_hours(-2.0), SimTime::ZERO);
        assert_eq!(t.add_hours(1.5), SimTime::from_day_hour(0, 2.5));
    }

    #[test]
    fn future_hour_today_or_tomorrow() {
        let noon = SimTime::from_day_hour(2, 12.0);
        // Still ahead today.
        assert_eq!(noon.future_hour(18.0), SimTime::from_day_hour(2, 18.0));
        // Already passed: same hour tomorrow.
        assert_eq!(noon.future_hour(9.0), SimTime::from_day_hour(3, 9.0));
        // Exactly now counts as passed.
        assert_eq!(noon.future_hour(12.0), SimTime::from_day_hour(3, 12.0));
    }

    #[test]
    fn hours_until_is_signed() {
        let a = SimTime::from_day_hour(0, 10.0);
        let b = SimTime::from_day_hour(0, 12.5);
        assert!((a.hours_until(b) - 2.5).abs() < 1e-6);
        assert!((b.hours_until(a) + 2.5).abs() < 1e-6);
    }

    #[test]
    fn display() {
        let t = SimTime::from_day_hour(1, 9.5);
        assert_eq!(t.to_string(), "day 1 09:30");
    }

    #[test]
    fn clock_night_window() {
        let evening = DayClock::new(SimTime::from_day_hour(0, 22.5), 6.0, 22.0, true);
        assert!(evening.is_night());
        let dawn = DayClock::new(SimTime::from_day_hour(0, 5.0), 6.0, 22.0, true);
        assert!(dawn.is_night());
        let noon = DayClock::new(SimTime::from_day_hour(0, 12.0), 6.0, 22.0, true);
        assert!(!noon.is_night());
    }

    #[test]
    fn clock_weekend_gate() {
        let sat = SimTime::from_day_hour(5, 10.0);
        assert!(DayClock::new(sat, 6.0, 22.0, true).is_weekend());
        assert!(!DayClock::new(sat, 6.0, 22.0, false).is_weekend());
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            assert_eq!(r1.random_value(1000), r2.random_value(1000));
        }
    }

    #[test]
    fn should_occur_extremes() {
        let mut rng = SimRng::new(0);
        for _ in 0..100 {
            assert!(rng.should_occur(100));
            assert!(rng.should_occur(250));
            assert!(!rng.should_occur(0));
        }
    }

    #[test]
    fn should_occur_roughly_matches_quota() {
        let mut rng = SimRng::new(7);
        let hits = (0..10_000).filter(|_| rng.should_occur(30)).count();
        assert!((2_500..3_500).contains(&hits), "got {hits}");
    }

    #[test]
    fn random_value_bounds() {
        let mut rng = SimRng::new(1);
        assert_eq!(rng.random_value(0), 0);
        for _ in 0..1000 {
            assert!(rng.random_value(10) < 10);
        }
    }

    #[test]
    fn child_streams_diverge() {
        let mut parent = SimRng::new(1);
        let mut a = parent.child(0);
        let mut b = parent.child(1);
        let va: u64 = a.gen_range(0..u64::MAX);
        let vb: u64 = b.gen_range(0..u64::MAX);
        assert_ne!(va, vb);
    }
}

#[cfg(test)]
mod config {
    use crate::{SimulationConfig, LATEST_CONFIG_VERSION};

    #[test]
    fn defaults_are_valid() {
        let mut cfg = SimulationConfig::default();
        let before = cfg.clone();
        cfg.validate();
        assert_eq!(cfg, before, "defaults must survive validation unchanged");
    }

    #[test]
    fn validate_clamps_day_shape() {
        let mut cfg = SimulationConfig { wake_up_hour: 2.0, go_to_sleep_hour: 25.0, ..Default::default() };
        cfg.validate();
        assert_eq!(cfg.wake_up_hour, 4.0);
        assert_eq!(cfg.go_to_sleep_hour, 23.75);
    }

    #[test]
    fn validate_clamps_quotas() {
        let mut cfg = SimulationConfig {
            second_shift_quota: 0,
            night_shift_quota: 90,
            shopping_for_fun_quota: 80,
            lunch_quota: 150,
            ..Default::default()
        };
        cfg.validate();
        assert_eq!(cfg.second_shift_quota, 1);
        assert_eq!(cfg.night_shift_quota, 25);
        assert_eq!(cfg.shopping_for_fun_quota, 50);
        assert_eq!(cfg.lunch_quota, 100);
    }

    #[test]
    fn migrate_rescales_version_zero_shift_quotas() {
        let mut cfg = SimulationConfig {
            version: 0,
            second_shift_quota: 4,
            night_shift_quota: 2,
            ..Default::default()
        };
        cfg.migrate();
        assert_eq!(cfg.version, LATEST_CONFIG_VERSION);
        assert_eq!(cfg.second_shift_quota, 12); // 4 * 3.125 truncated
        assert_eq!(cfg.night_shift_quota, 6);
    }

    #[test]
    fn migrate_leaves_current_version_alone() {
        let mut cfg = SimulationConfig::default();
        let quotas = (cfg.second_shift_quota, cfg.night_shift_quota);
        cfg.migrate();
        assert_eq!((cfg.second_shift_quota, cfg.night_shift_quota), quotas);
    }
}
