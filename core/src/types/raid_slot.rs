//! One Gen9 raid spawn slot as stored in the save's raid arrays.

use crate::constants::RAID_SLOT_SIZE;
use crate::types::RaidContent;

/// 0x20-byte spawn record. All fields little-endian u32.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RaidSlot {
    pub enabled: bool,
    pub area_id: u32,
    pub lottery_group: u32,
    pub spawn_point_id: u32,
    pub seed: u32,
    pub content: u32,
    pub claimed_lp: bool,
}

impl RaidSlot {
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < RAID_SLOT_SIZE {
            return None;
        }
        let r32 = |offset: usize| {
            u32::from_le_bytes([
                data[offset],
                data[offset + 1],
                data[offset + 2],
                data[offset + 3],
            ])
        };
        Some(Self {
            enabled: r32(0x00) != 0,
            area_id: r32(0x04),
            lottery_group: r32(0x08),
            spawn_point_id: r32(0x0C),
            seed: r32(0x10),
            content: r32(0x18),
            claimed_lp: r32(0x1C) != 0,
        })
    }

    pub fn content_kind(&self) -> RaidContent {
        RaidContent::from_raw(self.content)
    }

    /// A slot takes part in the snapshot only when it is enabled, placed
    /// in a real area, and carries a supported content kind.
    pub fn is_relevant(&self) -> bool {
        self.enabled && self.area_id != 0 && self.content_kind().is_supported()
    }
}
