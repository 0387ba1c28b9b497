//! Building classification taxonomy.
//!
//! The host registry exposes each building's service / sub-service / level
//! triple plus a structural kind.  The kind is a tagged variant computed once
//! by the host when the building spawns, replacing repeated runtime type
//! inspection of the building's controller object.

/// Top-level city service a building belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Service {
    #[default]
    None,
    Residential,
    Commercial,
    Industrial,
    Office,
    Electricity,
    Water,
    Garbage,
    HealthCare,
    Police,
    Fire,
    Disaster,
    Education,
    Campus,
    PublicTransport,
    Road,
    Park,
    Fishing,
    Monument,
}

/// Sub-service refinement; `None` for services without one.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubService {
    #[default]
    None,
    CommercialLow,
    CommercialHigh,
    CommercialLeisure,
    CommercialTourist,
    CommercialEco,
    IndustrialGeneric,
    IndustrialFarming,
    IndustrialForestry,
    IndustrialOil,
    IndustrialOre,
    OfficeGeneric,
    OfficeHighTech,
}

/// Structural kind, resolved once at spawn from the building's controller.
///
/// `Normal` is the overwhelming majority; the other variants mark the special
/// structures the operating-hours rules single out.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StructureKind {
    #[default]
    Normal,
    Hotel,
    Warehouse,
    UniqueFactory,
    /// Main administration building of an industry or campus area.
    AreaMain,
    CarPark,
    Bank,
    FishMarket,
    Shelter,
    OutsideConnection,
    Decoration,
}

/// The cached classification triple + kind for one building.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildingClass {
    pub service: Service,
    pub sub_service: SubService,
    /// Upgrade level, 1..=5.
    pub level: u8,
    pub kind: StructureKind,
}

impl BuildingClass {
    pub fn new(service: Service, sub_service: SubService, level: u8, kind: StructureKind) -> Self {
        Self { service, sub_service, level, kind }
    }

    /// Classification shorthand for a plain building of a service.
    pub fn of(service: Service) -> Self {
        Self { service, sub_service: SubService::None, level: 1, kind: StructureKind::Normal }
    }

    /// `true` for services exempt from headcount-zero closure and protected
    /// by shift-handover gating.
    pub fn is_essential_service(&self) -> bool {
        matches!(
            self.service,
            Service::Electricity
                | Service::Water
                | Service::Garbage
                | Service::HealthCare
                | Service::Police
                | Service::Fire
                | Service::Disaster
                | Service::PublicTransport
                | Service::Road
        )
    }

    /// `true` for commerce where a visiting agent counts as shopping rather
    /// than relaxing.
    pub fn is_shopping_target(&self) -> bool {
        self.service == Service::Commercial
            && !matches!(self.sub_service, SubService::CommercialLeisure | SubService::CommercialTourist)
    }

    /// `true` for leisure/tourist commerce and parks, where a visiting agent
    /// counts as relaxing.
    pub fn is_relaxing_target(&self) -> bool {
        matches!(self.sub_service, SubService::CommercialLeisure | SubService::CommercialTourist)
            || self.service == Service::Park
            || self.service == Service::Monument
    }
}
