//! External-collaborator interfaces.
//!
//! The scheduling core never touches the host's registries directly; every
//! query and mutation goes through these narrow traits so tests (and the sim
//! driver) can substitute an in-memory implementation.  All ID parameters use
//! 0 as the "no entity" sentinel; implementations must answer sentinel
//! queries harmlessly (closed/absent/zero) rather than panic.

use rd_core::{BuildingId, CitizenId, SimTime};

use crate::citizen::{AgeGroup, CitizenFlags, CitizenLocation};
use crate::classify::BuildingClass;

/// Maximum household members considered for synchronized vacations.
pub const MAX_HOUSEHOLD: usize = 4;

// ── Buildings ─────────────────────────────────────────────────────────────────

/// Read access to the host's building registry.
pub trait Buildings {
    /// Classification of a building; `None` for the sentinel or a
    /// nonexistent id.
    fn class(&self, building: BuildingId) -> Option<BuildingClass>;

    /// `false` once the building is collapsed, abandoned or deleted.
    fn is_active(&self, building: BuildingId) -> bool;

    /// `true` while the building's area is being evacuated.
    fn is_evacuating(&self, building: BuildingId) -> bool;

    /// District "night tours" policy, applicable to parks.
    fn has_night_tours_policy(&self, building: BuildingId) -> bool;

    /// District noise-restriction policy ("don't disturb the neighbors").
    fn is_noise_restricted_area(&self, building: BuildingId) -> bool;

    /// Host-side "essential industry" flag on farming/forestry buildings.
    fn is_essential_industry(&self, building: BuildingId) -> bool;

    /// Workers currently inside the building.
    fn workers_present(&self, building: BuildingId) -> u32;

    /// All citizens employed at the building, in registry order.
    fn workers(&self, building: BuildingId) -> Vec<CitizenId>;
}

// ── Citizens ──────────────────────────────────────────────────────────────────

/// Read/move access to the host's citizen registry.
pub trait Citizens {
    fn exists(&self, citizen: CitizenId) -> bool;
    fn age_group(&self, citizen: CitizenId) -> AgeGroup;
    fn flags(&self, citizen: CitizenId) -> CitizenFlags;
    fn location(&self, citizen: CitizenId) -> CitizenLocation;

    /// Building the citizen currently occupies (or is heading toward while
    /// `Moving`).  `BuildingId::NONE` when hidden.
    fn current_building(&self, citizen: CitizenId) -> BuildingId;

    fn home_building(&self, citizen: CitizenId) -> BuildingId;
    /// Workplace assigned by the host's employment system.
    fn work_building(&self, citizen: CitizenId) -> BuildingId;
    /// School assigned by the host's education system.
    fn school_building(&self, citizen: CitizenId) -> BuildingId;

    /// Other members of the citizen's household, padded with
    /// `CitizenId::NONE`.  Bounded, never recursive.
    fn household_members(&self, citizen: CitizenId) -> [CitizenId; MAX_HOUSEHOLD];

    /// Start moving the citizen toward `target`.  Returns `false` when the
    /// host cannot produce a path; the caller falls back to staying put.
    fn start_moving(&mut self, citizen: CitizenId, target: BuildingId) -> bool;
}

// ── TravelTime ────────────────────────────────────────────────────────────────

/// Black-box travel-time estimator.
pub trait TravelTime {
    /// Estimated door-to-door duration in fractional hours.
    fn estimate_hours(&self, from: BuildingId, to: BuildingId) -> f32;
}

// ── Weather ───────────────────────────────────────────────────────────────────

/// Weather snapshot; bad weather suppresses non-essential excursions.
pub trait Weather {
    fn is_bad_weather(&self) -> bool;
}

// ── VisitPlaces ───────────────────────────────────────────────────────────────

/// Destination search for excursions.  Returns `BuildingId::NONE` when no
/// candidate exists; callers never retry within a tick.
pub trait VisitPlaces {
    /// A commercial building with goods to sell.  `local_only` restricts the
    /// search to the neighborhood of `near`.
    fn find_shop(&self, near: BuildingId, local_only: bool) -> BuildingId;

    /// A leisure/park destination.  `nearby_only` restricts to walking range.
    fn find_leisure(&self, near: BuildingId, nearby_only: bool) -> BuildingId;

    /// A medical building accepting walk-in patients.
    fn find_care(&self, near: BuildingId) -> BuildingId;

    /// An operating evacuation shelter.
    fn find_shelter(&self, near: BuildingId) -> BuildingId;

    /// The next city event not yet started, as (venue, start time).
    fn upcoming_event(&self, now: SimTime) -> Option<(BuildingId, SimTime)>;
}

// ── World ─────────────────────────────────────────────────────────────────────

/// Everything the scheduling core needs from the host, as one bound.
pub trait World: Buildings + Citizens + TravelTime + Weather + VisitPlaces {}

impl<T: Buildings + Citizens + TravelTime + Weather + VisitPlaces> World for T {}
