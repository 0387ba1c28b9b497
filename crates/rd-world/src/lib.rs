//! `rd-world` — the boundary between the scheduling core and the host
//! simulation.
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`classify`]  | `Service`, `SubService`, `StructureKind`, `BuildingClass` |
//! | [`citizen`]   | `AgeGroup`, `CitizenLocation`, `CitizenFlags`           |
//! | [`traits`]    | `Buildings`, `Citizens`, `TravelTime`, `Weather`, `VisitPlaces` |
//! | [`memory`]    | `MemoryWorld`, a full in-memory implementation          |
//!
//! The upper crates are generic over these traits; `MemoryWorld` backs the
//! sim driver and every scenario test.

pub mod citizen;
pub mod classify;
pub mod memory;
pub mod traits;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use citizen::{AgeGroup, CitizenFlags, CitizenLocation};
pub use classify::{BuildingClass, Service, StructureKind, SubService};
pub use memory::{BuildingRecord, CitizenRecord, MemoryWorld};
pub use traits::{Buildings, Citizens, TravelTime, VisitPlaces, Weather, World, MAX_HOUSEHOLD};
