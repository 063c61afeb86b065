//! Locating the fixed-key blocks of a decoded save and decoding their
//! payloads into raid slots, den records, progress, and trainer id.

use crate::constants::{
    DEN_SIZE, KEY_DEN_CROWN_TUNDRA, KEY_DEN_ISLE_OF_ARMOR, KEY_DEN_VANILLA, KEY_MY_STATUS,
    KEY_RAID_DLC, KEY_RAID_PALDEA, KEY_UNLOCKED_3STAR, KEY_UNLOCKED_4STAR, KEY_UNLOCKED_5STAR,
    KEY_UNLOCKED_6STAR, KEY_UNLOCKED_RAIDS, RAID_COUNT_BLUEBERRY, RAID_COUNT_KITAKAMI,
    RAID_COUNT_PALDEA, RAID_DLC_REGION_SPAN, RAID_PALDEA_HEADER, RAID_SLOT_SIZE,
};
use crate::error::{CoreError, Result};
use crate::save::{find_block, Block, BlockType};
use crate::types::{DenRaw, GameProgress, RaidSlot};

/// Paldea raid array: a 0x10-byte header, then packed slots.
pub fn parse_paldea_slots(data: &[u8]) -> Vec<RaidSlot> {
    if data.len() < RAID_PALDEA_HEADER {
        return Vec::new();
    }
    parse_slots(&data[RAID_PALDEA_HEADER..], RAID_COUNT_PALDEA)
}

/// DLC raid array: Kitakami slots first, Blueberry slots at the second
/// region span.
pub fn parse_dlc_slots(data: &[u8]) -> (Vec<RaidSlot>, Vec<RaidSlot>) {
    let kitakami = if data.len() >= RAID_DLC_REGION_SPAN {
        parse_slots(&data[..RAID_DLC_REGION_SPAN], RAID_COUNT_KITAKAMI)
    } else {
        Vec::new()
    };
    let blueberry = if data.len() >= 2 * RAID_DLC_REGION_SPAN {
        parse_slots(&data[RAID_DLC_REGION_SPAN..], RAID_COUNT_BLUEBERRY)
    } else {
        Vec::new()
    };
    (kitakami, blueberry)
}

fn parse_slots(data: &[u8], max_count: usize) -> Vec<RaidSlot> {
    data.chunks_exact(RAID_SLOT_SIZE)
        .take(max_count)
        .filter_map(RaidSlot::from_bytes)
        .collect()
}

/// Per-region raid slot arrays out of a decoded save. The base-game
/// block must exist; the DLC block is absent on saves that never
/// visited those regions.
pub fn raid_slots(blocks: &[Block]) -> Result<(Vec<RaidSlot>, Vec<RaidSlot>, Vec<RaidSlot>)> {
    let paldea_block = find_block(blocks, KEY_RAID_PALDEA).ok_or(CoreError::BlockNotFound {
        key: KEY_RAID_PALDEA,
    })?;
    let paldea = parse_paldea_slots(&paldea_block.data);

    let (kitakami, blueberry) = match find_block(blocks, KEY_RAID_DLC) {
        Some(block) => parse_dlc_slots(&block.data),
        None => {
            log::debug!("save has no DLC raid block");
            (Vec::new(), Vec::new())
        }
    };

    Ok((paldea, kitakami, blueberry))
}

fn bool_block_set(blocks: &[Block], key: u32) -> bool {
    matches!(
        find_block(blocks, key),
        Some(block) if block.block_type == BlockType::BoolTrue
    )
}

/// Highest unlocked progress tier. Absent or false flags imply earlier
/// tiers only.
pub fn game_progress(blocks: &[Block]) -> GameProgress {
    if bool_block_set(blocks, KEY_UNLOCKED_6STAR) {
        GameProgress::Unlocked6Stars
    } else if bool_block_set(blocks, KEY_UNLOCKED_5STAR) {
        GameProgress::Unlocked5Stars
    } else if bool_block_set(blocks, KEY_UNLOCKED_4STAR) {
        GameProgress::Unlocked4Stars
    } else if bool_block_set(blocks, KEY_UNLOCKED_3STAR) {
        GameProgress::Unlocked3Stars
    } else if bool_block_set(blocks, KEY_UNLOCKED_RAIDS) {
        GameProgress::UnlockedRaids
    } else {
        GameProgress::Beginning
    }
}

/// Trainer id32 at offset 0x04 of the status block. A missing or
/// truncated block reads as 0 and the snapshot continues.
pub fn trainer_id32(blocks: &[Block]) -> u32 {
    match find_block(blocks, KEY_MY_STATUS) {
        Some(block) if block.data.len() >= 8 => {
            u32::from_le_bytes(block.data[0x04..0x08].try_into().unwrap())
        }
        Some(_) => {
            log::warn!("status block too short; trainer id defaults to 0");
            0
        }
        None => {
            log::warn!("no status block; trainer id defaults to 0");
            0
        }
    }
}

/// Trainer id32 out of a live status buffer; same layout as the block.
pub fn trainer_id32_from_buffer(data: &[u8]) -> u32 {
    if data.len() >= 8 {
        u32::from_le_bytes(data[0x04..0x08].try_into().unwrap())
    } else {
        0
    }
}

/// Packed den records out of a region buffer.
pub fn parse_dens(data: &[u8], count: usize) -> Vec<DenRaw> {
    data.chunks_exact(DEN_SIZE)
        .take(count)
        .filter_map(DenRaw::from_bytes)
        .collect()
}

/// The three Gen8 den arrays. All three blocks are present in every
/// well-formed save.
pub fn den_records(blocks: &[Block]) -> Result<(Vec<DenRaw>, Vec<DenRaw>, Vec<DenRaw>)> {
    let region = |key: u32, count: usize| -> Result<Vec<DenRaw>> {
        let block = find_block(blocks, key).ok_or(CoreError::BlockNotFound { key })?;
        Ok(parse_dens(&block.data, count))
    };
    Ok((
        region(KEY_DEN_VANILLA, crate::constants::DEN_COUNT_VANILLA)?,
        region(KEY_DEN_ISLE_OF_ARMOR, crate::constants::DEN_COUNT_ISLE_OF_ARMOR)?,
        region(KEY_DEN_CROWN_TUNDRA, crate::constants::DEN_COUNT_CROWN_TUNDRA)?,
    ))
}

/// Raw slot bytes for pipeline tests elsewhere in the crate.
#[cfg(test)]
pub(crate) fn test_slot_bytes(enabled: bool, area: u32, seed: u32, content: u32) -> Vec<u8> {
    let mut data = vec![0u8; RAID_SLOT_SIZE];
    data[0x00..0x04].copy_from_slice(&(enabled as u32).to_le_bytes());
    data[0x04..0x08].copy_from_slice(&area.to_le_bytes());
    data[0x08..0x0C].copy_from_slice(&1u32.to_le_bytes());
    data[0x0C..0x10].copy_from_slice(&2u32.to_le_bytes());
    data[0x10..0x14].copy_from_slice(&seed.to_le_bytes());
    data[0x18..0x1C].copy_from_slice(&content.to_le_bytes());
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEN_COUNT_ISLE_OF_ARMOR, DEN_COUNT_VANILLA};

    fn slot_bytes(enabled: bool, area: u32, seed: u32, content: u32) -> Vec<u8> {
        test_slot_bytes(enabled, area, seed, content)
    }

    fn paldea_payload(slots: &[Vec<u8>]) -> Vec<u8> {
        let mut data = vec![0u8; RAID_PALDEA_HEADER];
        for slot in slots {
            data.extend_from_slice(slot);
        }
        // Pad to the full array either way.
        data.resize(RAID_PALDEA_HEADER + RAID_COUNT_PALDEA * RAID_SLOT_SIZE, 0);
        data
    }

    #[test]
    fn test_paldea_skips_header_and_caps_count() {
        let payload = paldea_payload(&[slot_bytes(true, 3, 0x42, 0)]);
        let slots = parse_paldea_slots(&payload);
        assert_eq!(slots.len(), RAID_COUNT_PALDEA);
        assert!(slots[0].enabled);
        assert_eq!(slots[0].seed, 0x42);
        assert!(!slots[1].enabled);

        assert!(parse_paldea_slots(&[0u8; 4]).is_empty());
    }

    #[test]
    fn test_dlc_split_regions() {
        let mut payload = vec![0u8; 2 * RAID_DLC_REGION_SPAN];
        let kita = slot_bytes(true, 9, 0x111, 0);
        let blue = slot_bytes(true, 4, 0x222, 1);
        payload[..RAID_SLOT_SIZE].copy_from_slice(&kita);
        payload[RAID_DLC_REGION_SPAN..RAID_DLC_REGION_SPAN + RAID_SLOT_SIZE]
            .copy_from_slice(&blue);

        let (kitakami, blueberry) = parse_dlc_slots(&payload);
        assert_eq!(kitakami.len(), RAID_COUNT_KITAKAMI);
        assert_eq!(blueberry.len(), RAID_COUNT_BLUEBERRY);
        assert_eq!(kitakami[0].seed, 0x111);
        assert_eq!(blueberry[0].seed, 0x222);

        // A Kitakami-only buffer still parses that region.
        let (kitakami, blueberry) = parse_dlc_slots(&payload[..RAID_DLC_REGION_SPAN]);
        assert_eq!(kitakami.len(), RAID_COUNT_KITAKAMI);
        assert!(blueberry.is_empty());
    }

    #[test]
    fn test_raid_slots_requires_base_block() {
        let err = raid_slots(&[]).unwrap_err();
        assert!(matches!(err, CoreError::BlockNotFound { key } if key == KEY_RAID_PALDEA));

        let blocks = vec![Block::new_object(
            KEY_RAID_PALDEA,
            paldea_payload(&[slot_bytes(true, 1, 7, 0)]),
        )];
        let (paldea, kitakami, blueberry) = raid_slots(&blocks).unwrap();
        assert_eq!(paldea.len(), RAID_COUNT_PALDEA);
        assert!(kitakami.is_empty());
        assert!(blueberry.is_empty());
    }

    #[test]
    fn test_progress_picks_highest_true_flag() {
        let blocks = vec![
            Block::new(KEY_UNLOCKED_RAIDS, BlockType::BoolTrue),
            Block::new(KEY_UNLOCKED_3STAR, BlockType::BoolTrue),
            Block::new(KEY_UNLOCKED_4STAR, BlockType::BoolFalse),
        ];
        assert_eq!(game_progress(&blocks), GameProgress::Unlocked3Stars);

        let blocks = vec![Block::new(KEY_UNLOCKED_6STAR, BlockType::BoolTrue)];
        assert_eq!(game_progress(&blocks), GameProgress::Unlocked6Stars);

        assert_eq!(game_progress(&[]), GameProgress::Beginning);
    }

    #[test]
    fn test_trainer_id_reads_offset_four() {
        let mut status = vec![0u8; 0x68];
        status[0x04..0x08].copy_from_slice(&0x8765_4321u32.to_le_bytes());
        let blocks = vec![Block::new_object(KEY_MY_STATUS, status.clone())];
        assert_eq!(trainer_id32(&blocks), 0x8765_4321);
        assert_eq!(trainer_id32_from_buffer(&status), 0x8765_4321);
    }

    #[test]
    fn test_truncated_status_defaults_to_zero() {
        let blocks = vec![Block::new_object(KEY_MY_STATUS, vec![1; 7])];
        assert_eq!(trainer_id32(&blocks), 0);
        assert_eq!(trainer_id32(&[]), 0);
        assert_eq!(trainer_id32_from_buffer(&[1; 7]), 0);
    }

    #[test]
    fn test_den_records_need_all_regions() {
        let vanilla = vec![0u8; DEN_COUNT_VANILLA * DEN_SIZE];
        let blocks = vec![Block::new_object(KEY_DEN_VANILLA, vanilla)];
        let err = den_records(&blocks).unwrap_err();
        assert!(matches!(err, CoreError::BlockNotFound { key } if key == KEY_DEN_ISLE_OF_ARMOR));
    }

    #[test]
    fn test_den_records_parse_each_region() {
        let mut vanilla = vec![0u8; DEN_COUNT_VANILLA * DEN_SIZE];
        vanilla[0x12] = 1; // first den active
        let armor = vec![0u8; DEN_COUNT_ISLE_OF_ARMOR * DEN_SIZE];
        let tundra = vec![0u8; crate::constants::DEN_COUNT_CROWN_TUNDRA * DEN_SIZE];
        let blocks = vec![
            Block::new_object(KEY_DEN_VANILLA, vanilla),
            Block::new_object(KEY_DEN_ISLE_OF_ARMOR, armor),
            Block::new_object(KEY_DEN_CROWN_TUNDRA, tundra),
        ];
        let (vanilla, armor, tundra) = den_records(&blocks).unwrap();
        assert_eq!(vanilla.len(), DEN_COUNT_VANILLA);
        assert_eq!(armor.len(), DEN_COUNT_ISLE_OF_ARMOR);
        assert_eq!(tundra.len(), crate::constants::DEN_COUNT_CROWN_TUNDRA);
        assert!(vanilla[0].is_active());
        assert!(!vanilla[1].is_active());
    }
}
