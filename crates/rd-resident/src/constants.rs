//! Fixed behavioral constants.  Everything tunable lives in
//! `SimulationConfig`; these are the values the behavior rules treat as part
//! of the algorithm itself.

/// Hours a citizen spends getting ready before leaving for work.
pub const PREPARE_TO_WORK_HOURS: f32 = 1.0;

/// Travel estimates are capped here when back-computing departures, so a
/// pathological route cannot push the departure into the previous day.
pub const MAX_TRAVEL_HOURS: f32 = 4.0;

/// A work departure further away than this is not scheduled yet, leaving
/// room for spare-time plans in between.
pub const WORK_PLANNING_HORIZON_HOURS: f32 = 4.0;

/// Chance to move on to another shop/venue instead of heading home when a
/// visit wraps up.
pub const FIND_ANOTHER_PLACE_CHANCE: u32 = 50;

/// Chance for young citizens to go out at night.
pub const NIGHT_LEISURE_CHANCE: u32 = 20;

/// Chance to stay home all day after waking up.
pub const STAY_HOME_ALL_DAY_CHANCE: u32 = 2;

/// Daily chance for an employed/enrolled citizen to start a vacation.
pub const VACATION_START_CHANCE: u32 = 2;

/// Chance a new vacation is extended to the whole household.
pub const FAMILY_VACATION_CHANCE: u32 = 30;

/// Failed destination searches before an excursion is abandoned for the day.
pub const MAX_VISIT_PLACE_ATTEMPTS: u8 = 3;

/// Maximum random lateness added when the on-time quota fails.
pub const MAX_LATENESS_HOURS: f32 = 1.0;
