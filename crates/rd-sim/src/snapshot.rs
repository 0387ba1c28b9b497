//! Snapshot persistence: both scheduler tables plus the configuration,
//! tagged with the schema version.
//!
//! The blob is opaque JSON; the host stores it in its own save container.
//! Decoding always migrates: a version-0 record comes out with the
//! second/night shift quotas rescaled from the old 0..32 scale (see
//! [`SimulationConfig::migrate`]).

use rd_core::{BuildingId, CitizenId, SimulationConfig, LATEST_CONFIG_VERSION};
use rd_resident::CitizenSchedule;
use rd_worktime::WorkTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{SimError, SimResult};

/// Everything the scheduling core persists across a save/load cycle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Schema version the record was written with.
    pub version: u32,
    pub config: SimulationConfig,
    /// Cached operating-hours profiles, ascending building order.
    pub work_times: Vec<(BuildingId, WorkTime)>,
    /// Non-default citizen schedules, ascending citizen order.
    pub schedules: Vec<(CitizenId, CitizenSchedule)>,
}

impl Snapshot {
    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode and migrate in one step.  Records written by a newer build are
    /// refused rather than misread.
    pub fn from_json(data: &str) -> SimResult<Snapshot> {
        let mut snapshot: Snapshot = serde_json::from_str(data)?;
        if snapshot.version > LATEST_CONFIG_VERSION {
            return Err(SimError::UnsupportedVersion(snapshot.version));
        }
        if snapshot.version < LATEST_CONFIG_VERSION {
            info!(
                target: "schedule",
                from = snapshot.version,
                to = LATEST_CONFIG_VERSION,
                "migrating snapshot"
            );
        }
        snapshot.config.version = snapshot.version;
        snapshot.config.migrate();
        snapshot.config.validate();
        snapshot.version = LATEST_CONFIG_VERSION;
        Ok(snapshot)
    }
}
