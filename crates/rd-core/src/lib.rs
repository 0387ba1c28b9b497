//! `rd-core` — foundational types for the `realday` scheduling core.
//!
//! This crate is a dependency of every other `rd-*` crate.  It intentionally
//! has no `rd-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`ids`]     | `CitizenId`, `BuildingId`                                |
//! | [`time`]    | `SimTime`, `DayClock`                                    |
//! | [`rng`]     | `SimRng` and the quota utility                           |
//! | [`config`]  | `SimulationConfig`, validation and migration             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                              |
//! |---------|---------------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on all public types (rd-sim snapshots).   |

pub mod config;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{SimulationConfig, LATEST_CONFIG_VERSION};
pub use ids::{BuildingId, CitizenId};
pub use rng::SimRng;
pub use time::{DayClock, SimTime};
