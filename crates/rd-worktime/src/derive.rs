//! Default profile derivation.
//!
//! The special-case precedence here is load-bearing: hotels, area-main
//! buildings, warehouses and unique factories are recognized before any
//! generic service rule, the essential-industry flag overrides the
//! farming/forestry day-only default, and the noise policy trims leisure
//! commerce last.  Reordering these rules changes observable behavior.

use rd_core::{BuildingId, SimRng, SimulationConfig};
use rd_world::{BuildingClass, Buildings, Service, StructureKind, SubService};

use crate::profile::WorkTime;

/// Classification predicate: `false` for buildings that must never carry a
/// profile (absent profile = always open, no shift structure).
pub fn needs_work_time(class: &BuildingClass) -> bool {
    if matches!(
        class.kind,
        StructureKind::Decoration | StructureKind::OutsideConnection | StructureKind::CarPark
    ) {
        return false;
    }
    !matches!(class.service, Service::None | Service::Residential)
}

/// Derive the default profile for a tracked building.
pub fn create_default<W: Buildings>(
    world: &W,
    config: &SimulationConfig,
    rng: &mut SimRng,
    building: BuildingId,
    class: &BuildingClass,
) -> WorkTime {
    // Special structures first, regardless of service.
    match class.kind {
        StructureKind::Hotel
        | StructureKind::AreaMain
        | StructureKind::Warehouse
        | StructureKind::UniqueFactory => return WorkTime::always_open(),
        StructureKind::FishMarket => return WorkTime::compose(false, true, false, false, true),
        StructureKind::Bank => return WorkTime::compose(false, false, false, false, false),
        StructureKind::Shelter => return WorkTime::always_open(),
        _ => {}
    }

    match class.service {
        Service::Park => {
            let night = world.has_night_tours_policy(building);
            WorkTime::compose(night, true, true, false, false)
        }

        Service::Industrial => match class.sub_service {
            SubService::IndustrialFarming | SubService::IndustrialForestry => {
                if world.is_essential_industry(building) {
                    WorkTime::always_open()
                } else {
                    WorkTime::compose(false, true, false, false, false)
                }
            }
            SubService::IndustrialOil | SubService::IndustrialOre => WorkTime::always_open(),
            _ => WorkTime::compose(false, true, false, false, true),
        },

        Service::HealthCare => {
            if class.level >= 4 {
                // Recreational care: day visits only.
                WorkTime::compose(false, true, false, false, false)
            } else {
                WorkTime::compose(true, true, false, true, false)
            }
        }

        Service::Police
        | Service::Fire
        | Service::Electricity
        | Service::Water
        | Service::Garbage
        | Service::Disaster
        | Service::PublicTransport
        | Service::Road => WorkTime::compose(true, true, false, true, false),

        Service::Education | Service::Campus => {
            if class.level >= 3 || class.service == Service::Campus {
                let night_classes = rng.should_occur(config.night_class_quota);
                WorkTime::compose(false, false, true, false, night_classes)
            } else {
                WorkTime::compose(false, false, true, false, false)
            }
        }

        Service::Office => WorkTime::compose(false, false, false, false, false),

        Service::Commercial => match class.sub_service {
            SubService::CommercialLeisure | SubService::CommercialTourist => {
                let night = !world.is_noise_restricted_area(building);
                WorkTime::compose(night, true, false, false, true)
            }
            SubService::CommercialLow => {
                let night = rng.should_occur(config.open_low_commercial_at_night_quota);
                let weekends = rng.should_occur(config.open_commercial_at_weekends_quota);
                let second = rng.should_occur(config.open_commercial_second_shift_quota);
                WorkTime::compose(night, weekends, false, false, second)
            }
            _ => {
                let weekends = rng.should_occur(config.open_commercial_at_weekends_quota);
                let second = rng.should_occur(config.open_commercial_second_shift_quota);
                WorkTime::compose(false, weekends, false, false, second)
            }
        },

        Service::Fishing => WorkTime::compose(false, true, true, false, false),

        Service::Monument => WorkTime::always_open(),

        // Untracked services never reach this point; treat defensively as a
        // plain daytime profile.
        _ => WorkTime::default(),
    }
}

/// Policy-triggered in-place update.  Returns the adjusted profile, or
/// `None` when the current profile must be kept (override flags, or no rule
/// applies to this class).
pub fn apply_policies<W: Buildings>(
    world: &W,
    building: BuildingId,
    class: &BuildingClass,
    current: &WorkTime,
) -> Option<WorkTime> {
    if !current.accepts_policy_updates() {
        return None;
    }

    let updated = match class.kind {
        StructureKind::Hotel
        | StructureKind::AreaMain
        | StructureKind::Warehouse
        | StructureKind::UniqueFactory
        | StructureKind::Shelter => WorkTime::always_open(),
        StructureKind::FishMarket => WorkTime::compose(false, true, false, false, true),
        StructureKind::Bank => WorkTime::compose(false, false, false, false, false),
        _ => match class.service {
            // Offices shed an accidentally acquired second shift.
            Service::Office => WorkTime::compose(false, false, false, false, false),

            Service::PublicTransport | Service::Garbage | Service::Road => WorkTime::always_open(),

            Service::HealthCare => {
                if class.level >= 4 {
                    WorkTime::compose(false, true, false, false, false)
                } else {
                    WorkTime::compose(true, true, false, true, false)
                }
            }

            Service::Police | Service::Fire | Service::Electricity | Service::Water
            | Service::Disaster => WorkTime::compose(true, true, false, true, false),

            Service::Campus => {
                WorkTime::compose(false, false, true, false, true)
            }

            Service::Education => {
                if class.level >= 3 {
                    WorkTime::compose(false, false, true, false, true)
                } else {
                    WorkTime::compose(false, false, true, false, false)
                }
            }

            Service::Industrial => match class.sub_service {
                SubService::IndustrialFarming | SubService::IndustrialForestry => {
                    if world.is_essential_industry(building) {
                        WorkTime::always_open()
                    } else {
                        WorkTime::compose(false, true, false, false, false)
                    }
                }
                _ => return None,
            },

            Service::Park => {
                let night = world.has_night_tours_policy(building);
                WorkTime::compose(night, true, true, false, false)
            }

            Service::Commercial => match class.sub_service {
                SubService::CommercialLeisure | SubService::CommercialTourist => {
                    let night = !world.is_noise_restricted_area(building);
                    WorkTime::compose(night, true, false, false, true)
                }
                _ => return None,
            },

            _ => return None,
        },
    };

    // Preserve the override flags; only the schedule fields are re-derived.
    let updated = WorkTime {
        is_default: current.is_default,
        ignore_policy: current.ignore_policy,
        is_locked: current.is_locked,
        ..updated
    };
    (updated != *current).then_some(updated)
}
