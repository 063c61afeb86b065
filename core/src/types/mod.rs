//! Data types shared across the pipeline, one file per family.

mod den;
mod details;
mod enums;
mod raid_slot;

pub use den::{DenFlags, DenInfo, DenRaw, DenShiny};
pub use details::{RaidDetails, RaidInfo, Snapshot8, Snapshot9};
pub use enums::{
    AbilityPermission, DenRegion, GameProgress, GameVersion, Gender, RaidContent, RaidMap,
    ShinyPolicy, ShinyRank, TeraSpec,
};
pub use raid_slot::RaidSlot;
