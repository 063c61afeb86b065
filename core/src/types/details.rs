//! Generated raid details and the snapshot record bundles.

use serde::Serialize;

use crate::rewards::RewardItem;
use crate::types::{DenInfo, GameProgress, Gender, RaidContent, RaidMap, ShinyRank};

/// Everything the game's RNG determines for one raid encounter.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RaidDetails {
    pub seed: u32,
    pub shiny: ShinyRank,
    pub stars: u8,
    pub species: u16,
    pub form: u8,
    pub level: u8,
    pub tera_type: u8,
    pub ec: u32,
    pub pid: u32,
    pub ivs: [u8; 6],
    pub ability: u16,
    /// 1-based ability slot number (1, 2, or the hidden slot's raw tag).
    pub ability_number: u8,
    pub nature: u8,
    pub gender: Gender,
    pub height: u8,
    pub weight: u8,
    pub scale: u8,
    pub moves: [u16; 4],
}

/// One display-ready Gen9 raid.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RaidInfo {
    pub details: RaidDetails,
    /// Deterministic reward list for this raid's seed.
    pub rewards: Vec<RewardItem>,
    /// World coordinate from the sidecar, when the spawn point is known.
    pub coord: Option<[f32; 3]>,
    pub map: RaidMap,
    pub content: RaidContent,
    pub slot_index: usize,
}

/// Output of one Gen9 snapshot pass. Constructed once, read-only after.
#[derive(Debug, Serialize)]
pub struct Snapshot9 {
    pub raids: Vec<RaidInfo>,
    pub progress: GameProgress,
    pub trainer_id32: u32,
}

/// Output of one Gen8 snapshot pass.
#[derive(Debug, Serialize)]
pub struct Snapshot8 {
    pub dens: Vec<DenInfo>,
}
