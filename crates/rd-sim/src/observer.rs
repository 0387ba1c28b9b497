//! Simulation observer trait for progress reporting and data collection.

use rd_core::SimTime;

/// Callbacks invoked by [`Simulation::step`][crate::Simulation::step] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _now: SimTime) {}

    /// Called at the end of each tick.  `evaluated` is the number of
    /// citizens that went through a full evaluation this tick.
    fn on_tick_end(&mut self, _now: SimTime, _evaluated: usize) {}

    /// Called once when a tick crosses a day boundary, before the vacation
    /// pass runs.
    fn on_new_day(&mut self, _day: u64) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
