//! The explicit per-tick context.

use rd_core::{DayClock, SimTime, SimulationConfig};

/// Clock-derived facts for one tick, assembled once at the tick boundary.
///
/// Every evaluation receives this by value; no scheduling rule ever reads
/// ambient time state.
#[derive(Copy, Clone, Debug)]
pub struct TickContext {
    pub clock: DayClock,
}

impl TickContext {
    /// Build the context for `now` from the configured day shape.
    pub fn at(config: &SimulationConfig, now: SimTime) -> Self {
        Self {
            clock: DayClock::new(
                now,
                config.wake_up_hour,
                config.go_to_sleep_hour,
                config.is_weekend_enabled,
            ),
        }
    }
}
