//! `rd-sim` — tick orchestrator for the realday scheduling core.
//!
//! Owns the three pieces of scheduler state — the operating-hours table, the
//! per-citizen schedule store and the deterministic RNG stream — and drives
//! them against a [`World`][rd_world::World] implementation one tick at a
//! time.  Also home to the snapshot blob the host persists in its save
//! container.
//!
//! # What lives here
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`sim`]      | `Simulation`: roster, tick loop, host-facing queries  |
//! | [`context`]  | `TickContext`, the explicit per-tick clock bundle     |
//! | [`observer`] | `SimObserver` callbacks, `NoopObserver`               |
//! | [`snapshot`] | `Snapshot` persistence and version migration          |
//! | [`error`]    | `SimError`, `SimResult`                               |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Runs the read-only roster prepass on Rayon's pool.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rd_sim::{NoopObserver, Simulation};
//! use rd_world::MemoryWorld;
//!
//! let mut sim = Simulation::new(MemoryWorld::new(), config, 42);
//! sim.track_citizen(citizen);
//! sim.run_ticks(48, &mut NoopObserver); // one simulated day
//! ```

pub mod context;
pub mod error;
pub mod observer;
pub mod sim;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use context::TickContext;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Simulation, TICK_MINUTES};
pub use snapshot::Snapshot;
