//! `rd-worktime` — per-building operating-hours resolution.
//!
//! Each tracked building carries a compact [`WorkTime`] profile (shift
//! count, night/weekend eligibility, shift continuity) derived lazily from
//! its classification and a handful of policy flags.  [`OperatingHours`]
//! owns the profile table and answers the three questions the resident
//! state machine keeps asking: is this building open right now, is it about
//! to close, and would going there disturb the neighbors.

pub mod derive;
pub mod engine;
pub mod profile;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use derive::needs_work_time;
pub use engine::{OperatingHours, CLOSING_LEAD_HOURS};
pub use profile::WorkTime;
