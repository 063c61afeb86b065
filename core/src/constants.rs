//! Fixed constants shared across the pipeline: save-codec pads and
//! salts, block keys, record sizes, live-memory locations, and the
//! encounter/reward rate tables.

// =============================================================================
// Save codec
// =============================================================================

/// Repeating XOR pad applied over the whole save payload. The stride is
/// 127 bytes and is independent of block boundaries.
pub const XOR_PAD: [u8; 127] = [
    0xA0, 0x92, 0xD1, 0x06, 0x07, 0xDB, 0x32, 0xA1, 0xAE, 0x01, 0xF5, 0xC5, 0x1E, 0x84, 0x4F, 0xE3,
    0x53, 0xCA, 0x37, 0xF4, 0xA7, 0xB0, 0x4D, 0xA0, 0x18, 0xB7, 0xC2, 0x97, 0xDA, 0x5F, 0x53, 0x2B,
    0x75, 0xFA, 0x48, 0x16, 0xF8, 0xD4, 0x8A, 0x6F, 0x61, 0x05, 0xF4, 0xE2, 0xFD, 0x04, 0xB5, 0xA3,
    0x0F, 0xFC, 0x44, 0x92, 0xCB, 0x32, 0xE6, 0x1B, 0xB9, 0xB1, 0x2E, 0x01, 0xB0, 0x56, 0x53, 0x36,
    0xD2, 0xD1, 0x50, 0x3D, 0xDE, 0x5B, 0x2E, 0x0E, 0x52, 0xFD, 0xDF, 0x2F, 0x7B, 0xCA, 0x63, 0x50,
    0xA4, 0x67, 0x5D, 0x23, 0x17, 0xC0, 0x52, 0xE1, 0xA6, 0x30, 0x7C, 0x2B, 0xB6, 0x70, 0x36, 0x5B,
    0x2A, 0x27, 0x69, 0x33, 0xF5, 0x63, 0x7B, 0x36, 0x3F, 0x26, 0x9B, 0xA3, 0xED, 0x7A, 0x53, 0x00,
    0xA4, 0x48, 0xB3, 0x50, 0x9E, 0x14, 0xA0, 0x52, 0xDE, 0x7E, 0x10, 0x2B, 0x1B, 0x77, 0x6E,
];

/// 64-byte salt hashed before the plaintext payload.
pub const HASH_INTRO: [u8; 64] = [
    0x9E, 0xC9, 0x9C, 0xD7, 0x0E, 0xD3, 0x3C, 0x44, 0xFB, 0x93, 0x03, 0xDC, 0xEB, 0x39, 0xB4, 0x2A,
    0x19, 0x47, 0xE9, 0x63, 0x4B, 0xA2, 0x33, 0x44, 0x16, 0xBF, 0x82, 0xA2, 0xBA, 0x63, 0x55, 0xB6,
    0x3D, 0x9D, 0xF2, 0x4B, 0x5F, 0x7B, 0x6A, 0xB2, 0x62, 0x1D, 0xC2, 0x1B, 0x68, 0xE5, 0xC8, 0xB5,
    0x3A, 0x05, 0x90, 0x00, 0xE8, 0xA8, 0x10, 0x3D, 0xE2, 0xEC, 0xF0, 0x0C, 0xB2, 0xED, 0x4F, 0x6D,
];

/// 64-byte salt hashed after the plaintext payload.
pub const HASH_OUTRO: [u8; 64] = [
    0xD6, 0xC0, 0x1C, 0x59, 0x8B, 0xC8, 0xB8, 0xCB, 0x46, 0xE1, 0x53, 0xFC, 0x82, 0x8C, 0x75, 0x75,
    0x13, 0xE0, 0x45, 0xDF, 0x32, 0x69, 0x3C, 0x75, 0xF0, 0x59, 0xF8, 0xD9, 0xA2, 0x5F, 0xB2, 0x17,
    0xE0, 0x80, 0x52, 0xDB, 0xEA, 0x89, 0x73, 0x99, 0x75, 0x79, 0xAF, 0xCB, 0x2E, 0x80, 0x07, 0xE6,
    0xF1, 0x26, 0xE0, 0x03, 0x0A, 0xE6, 0x6F, 0xF6, 0x41, 0xBF, 0x7E, 0x59, 0xC2, 0xAE, 0x55, 0xFD,
];

/// Length of the trailing integrity tag.
pub const HASH_SIZE: usize = 32;

// =============================================================================
// Gen9 block keys
// =============================================================================

/// Paldea raid array: 0x10-byte header then up to 72 slots.
pub const KEY_RAID_PALDEA: u32 = 0xCAAC_8800;
/// DLC raid array: Kitakami at [0x0, 0xC80), Blueberry at [0xC80, 0x1900).
pub const KEY_RAID_DLC: u32 = 0x100B_93DA;
/// Trainer status block; id32 lives at offset 0x04.
pub const KEY_MY_STATUS: u32 = 0xE3E8_9BD1;

pub const KEY_UNLOCKED_RAIDS: u32 = 0x2702_5EBF;
pub const KEY_UNLOCKED_3STAR: u32 = 0xEC95_D8EF;
pub const KEY_UNLOCKED_4STAR: u32 = 0xA942_8DFE;
pub const KEY_UNLOCKED_5STAR: u32 = 0x9535_F471;
pub const KEY_UNLOCKED_6STAR: u32 = 0x6E7F_8220;

pub const RAID_SLOT_SIZE: usize = 0x20;
pub const RAID_PALDEA_HEADER: usize = 0x10;
pub const RAID_COUNT_PALDEA: usize = 72;
pub const RAID_COUNT_KITAKAMI: usize = 100;
pub const RAID_COUNT_BLUEBERRY: usize = 80;
/// Byte span of one DLC sub-region inside the DLC block.
pub const RAID_DLC_REGION_SPAN: usize = 0xC80;
pub const RAID_DLC_BLOCK_LEN: usize = 0x1900;

/// Display slot-index base per region.
pub const SLOT_BASE_PALDEA: usize = 0;
pub const SLOT_BASE_KITAKAMI: usize = 72;
pub const SLOT_BASE_BLUEBERRY: usize = 172;

// =============================================================================
// Gen8 block keys and den layout
// =============================================================================

pub const KEY_DEN_VANILLA: u32 = 0x9033_EB7B;
pub const KEY_DEN_ISLE_OF_ARMOR: u32 = 0x158D_A896;
pub const KEY_DEN_CROWN_TUNDRA: u32 = 0x148D_A703;

pub const DEN_SIZE: usize = 0x18;
pub const DEN_COUNT_VANILLA: usize = 100;
pub const DEN_COUNT_ISLE_OF_ARMOR: usize = 90;
pub const DEN_COUNT_CROWN_TUNDRA: usize = 86;
pub const DEN_COUNT_TOTAL: usize = 276;

/// Global den-index base per region.
pub const DEN_BASE_VANILLA: usize = 0;
pub const DEN_BASE_ISLE_OF_ARMOR: usize = 100;
pub const DEN_BASE_CROWN_TUNDRA: usize = 190;

/// Slots per nest table.
pub const NEST_SLOTS: usize = 12;

// =============================================================================
// Live-memory locations
// =============================================================================

/// Gen9 pointer chains. The first element is an offset from the game's
/// main-image base; the rest are dereference offsets.
pub const CHAIN_RAID_PALDEA: [u64; 4] = [0x47350D8, 0x1C0, 0x88, 0x40];
pub const CHAIN_RAID_DLC: [u64; 4] = [0x47350D8, 0x1C0, 0x88, 0xCD8];
pub const CHAIN_MY_STATUS: [u64; 6] = [0x47350D8, 0xD8, 0x08, 0xB8, 0x0, 0x40];

pub const LIVE_SIZE_RAID_PALDEA: usize = 0xC98;
pub const LIVE_SIZE_RAID_DLC: usize = 0x1910;
pub const LIVE_SIZE_MY_STATUS: usize = 0x68;

/// Gen8 den arrays sit at fixed heap offsets.
pub const HEAP_DEN_VANILLA: u64 = 0x450C_8A70;
pub const HEAP_DEN_ISLE_OF_ARMOR: u64 = 0x450C_94D8;
pub const HEAP_DEN_CROWN_TUNDRA: u64 = 0x450C_9F40;

// =============================================================================
// Record sizes for static tables
// =============================================================================

pub const PERSONAL_ENTRY_SIZE: usize = 0x50;
pub const ENCOUNTER_TEMPLATE_SIZE: usize = 0x3C;
/// species u16 + flawless u8 + five u32 star probabilities.
pub const NEST_SLOT_SIZE: usize = 23;

// =============================================================================
// Gen9 rate totals: [stars 1..=6] per region and version
// =============================================================================

pub const RATE_TOTALS_PALDEA_SCARLET: [i16; 6] = [5800, 5300, 7400, 8800, 9100, 6500];
pub const RATE_TOTALS_PALDEA_VIOLET: [i16; 6] = [5800, 5300, 7400, 8700, 9100, 6500];
pub const RATE_TOTALS_KITAKAMI_SCARLET: [i16; 6] = [1500, 1500, 2500, 2100, 2250, 2475];
pub const RATE_TOTALS_KITAKAMI_VIOLET: [i16; 6] = [1500, 1500, 2500, 2100, 2250, 2574];
pub const RATE_TOTALS_BLUEBERRY: [i16; 6] = [1100, 1100, 2000, 1900, 2100, 2600];

// =============================================================================
// Gen9 reward tables
// =============================================================================

/// Lottery roll counts by star tier (rows 1..=7 stars) and quintile of
/// the count roll (r < 10 / 40 / 70 / 90 / else).
pub const REWARD_SLOTS: [[u8; 5]; 7] = [
    [4, 5, 6, 7, 8],
    [4, 5, 6, 7, 8],
    [5, 6, 7, 8, 9],
    [5, 6, 7, 8, 9],
    [6, 7, 8, 9, 10],
    [7, 8, 9, 10, 11],
    [7, 8, 9, 10, 11],
];

/// Tera shard item id per type index 0..=17.
pub const TERA_SHARD_IDS: [u16; 18] = [
    1862, 1868, 1871, 1869, 1870, 1874, 1873, 1875, 1878, 1863, 1864, 1866, 1865, 1872, 1867,
    1876, 1877, 1879,
];

// =============================================================================
// Nature tables for the species with form-locked nature pools (id 849)
// =============================================================================

pub const NATURES_AMPED: [u8; 14] = [0, 3, 4, 6, 7, 8, 9, 11, 13, 14, 16, 19, 22, 24];
pub const NATURES_LOW_KEY: [u8; 12] = [1, 2, 5, 10, 12, 15, 16, 17, 18, 20, 21, 23];

/// Species id whose nature pool depends on form.
pub const SPECIES_FORM_NATURE: u16 = 849;

// =============================================================================
// Game titles
// =============================================================================

pub const TITLE_ID_SCARLET: u64 = 0x0100_A3D0_08C5_C000;
pub const TITLE_ID_VIOLET: u64 = 0x0100_8F60_08C5_E000;
pub const TITLE_ID_SWORD: u64 = 0x0100_ABF0_0896_8000;
pub const TITLE_ID_SHIELD: u64 = 0x0100_8DB0_08C2_C000;

/// Save container file name, identical for all supported titles.
pub const SAVE_FILE_NAME: &str = "main";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_length_is_prime_stride() {
        assert_eq!(XOR_PAD.len(), 127);
    }

    #[test]
    fn test_salt_lengths() {
        assert_eq!(HASH_INTRO.len(), 64);
        assert_eq!(HASH_OUTRO.len(), 64);
    }

    #[test]
    fn test_den_counts_sum_to_total() {
        assert_eq!(
            DEN_COUNT_VANILLA + DEN_COUNT_ISLE_OF_ARMOR + DEN_COUNT_CROWN_TUNDRA,
            DEN_COUNT_TOTAL
        );
    }

    #[test]
    fn test_dlc_region_span_holds_kitakami() {
        assert_eq!(RAID_DLC_REGION_SPAN, RAID_COUNT_KITAKAMI * RAID_SLOT_SIZE);
        assert_eq!(RAID_DLC_BLOCK_LEN, 2 * RAID_DLC_REGION_SPAN);
    }
}
