//! Error taxonomy for the core pipeline.
//!
//! Only the fatal failure classes surface as `Err`. Recoverable faults
//! keep the pipeline running with in-band defaults: a truncated trainer
//! block reads as id 0, an unresolved raid slot is dropped from the
//! snapshot, an unresolved den keeps its entry with species 0.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A required table or sidecar file is absent or too small.
    #[error("missing or undersized resource: {path} ({detail})")]
    ResourceMissing { path: PathBuf, detail: String },

    /// A keyed block expected in every well-formed save is absent.
    #[error("save block {key:#010X} not found")]
    BlockNotFound { key: u32 },

    /// The container is shorter than the integrity tag it must carry.
    #[error("save container too short: {len} bytes")]
    TruncatedSave { len: usize },

    /// The pointer-chain provider could not produce the requested bytes.
    #[error("live memory read failed: {what}")]
    LiveRead { what: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
