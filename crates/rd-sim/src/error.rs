use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("snapshot version {0} is newer than this build supports")]
    UnsupportedVersion(u32),
}

pub type SimResult<T> = Result<T, SimError>;
