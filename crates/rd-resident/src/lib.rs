//! `rd-resident` — the per-citizen daily-activity state machine.
//!
//! Every simulated resident owns one compact [`CitizenSchedule`] record; no
//! full day plan is ever stored.  Each tick, [`ResidentEngine::evaluate`]
//! re-derives the citizen's situation, decides the next transition when
//! nothing is pending, and carries the pending transition out once its time
//! arrives.  External interruptions (sickness, arrest, death, evacuation,
//! building closure) are tolerated at any state by falling back to
//! conservative behavior, never by failing.
//!
//! # What lives here
//!
//! | Module         | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`schedule`]   | `CitizenSchedule`, `ResidentState`, `WorkShift`, `ScheduleHint`, `ScheduleStore` |
//! | [`engine`]     | `ResidentEngine`: classify / replan / execute         |
//! | [`shifts`]     | shift assignment, headcounts, handover gating         |
//! | [`work`]       | work departures, breakfast, lunch, end-of-shift       |
//! | [`school`]     | the symmetric school path                             |
//! | [`visit`]      | shopping/relaxing/event excursions                    |
//! | [`home`]       | going home, idling, sleeping                          |
//! | [`vacation`]   | vacation countdown, starts, household sync            |
//! | [`spare_time`] | age/hour-dependent go-out chances                     |
//! | [`constants`]  | fixed behavioral constants                            |

pub mod constants;
pub mod engine;
pub mod home;
pub mod schedule;
pub mod school;
pub mod shifts;
pub mod spare_time;
pub mod vacation;
pub mod visit;
pub mod work;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use engine::ResidentEngine;
pub use schedule::{
    CitizenSchedule, ResidentState, ScheduleHint, ScheduleStore, WorkShift, WorkStatus,
};
pub use shifts::{choose_shift, next_shift, shift_headcount, should_return_from_work};
pub use vacation::process_new_day;
