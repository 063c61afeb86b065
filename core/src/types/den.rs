//! Gen8 den records and the resolved per-den snapshot entry.

use bitflags::bitflags;
use serde::Serialize;

use crate::constants::DEN_SIZE;
use crate::types::DenRegion;

bitflags! {
    /// Flag byte at offset 0x13 of a den record.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct DenFlags: u8 {
        /// The den hosts an event/distribution encounter.
        const EVENT = 0b0000_0010;
    }
}

/// 0x18-byte den record as stored in the save and on the heap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DenRaw {
    raw: [u8; DEN_SIZE],
}

impl DenRaw {
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < DEN_SIZE {
            return None;
        }
        let mut raw = [0u8; DEN_SIZE];
        raw.copy_from_slice(&data[..DEN_SIZE]);
        Some(Self { raw })
    }

    pub fn seed(&self) -> u64 {
        u64::from_le_bytes(self.raw[0x08..0x10].try_into().unwrap())
    }

    /// Star byte, clamped to 4 (stars are stored 0-based, displayed 1-5).
    pub fn stars(&self) -> u8 {
        self.raw[0x10].min(4)
    }

    pub fn rand_roll(&self) -> u8 {
        self.raw[0x11]
    }

    /// 0 = inactive; odd = common beam; even non-zero = rare beam.
    pub fn den_type(&self) -> u8 {
        self.raw[0x12]
    }

    pub fn flags(&self) -> DenFlags {
        DenFlags::from_bits_truncate(self.raw[0x13])
    }

    pub fn is_active(&self) -> bool {
        self.den_type() > 0
    }

    pub fn is_rare(&self) -> bool {
        self.is_active() && self.den_type() & 1 == 0
    }

    pub fn is_event(&self) -> bool {
        self.flags().contains(DenFlags::EVENT)
    }
}

/// Shiny rank of a predicted Gen8 frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DenShiny {
    None,
    Star,
    Square,
}

/// Fully resolved den entry for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DenInfo {
    pub den_index: usize,
    pub region: DenRegion,
    pub seed: u64,
    pub stars: u8,
    pub is_active: bool,
    pub is_rare: bool,
    pub is_event: bool,
    /// 0 when the den is an event den or no slot matched.
    pub species: u16,
    pub flawless_ivs: u8,
    pub shiny: DenShiny,
    /// 1-based advance of the nearest shiny frame; 0 when none was found
    /// within the search bound.
    pub shiny_advance: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn den_bytes(seed: u64, stars: u8, roll: u8, den_type: u8, flag: u8) -> [u8; DEN_SIZE] {
        let mut data = [0u8; DEN_SIZE];
        data[0x08..0x10].copy_from_slice(&seed.to_le_bytes());
        data[0x10] = stars;
        data[0x11] = roll;
        data[0x12] = den_type;
        data[0x13] = flag;
        data
    }

    #[test]
    fn test_field_offsets() {
        let den = DenRaw::from_bytes(&den_bytes(0x1122_3344_5566_7788, 3, 0x7F, 1, 0)).unwrap();
        assert_eq!(den.seed(), 0x1122_3344_5566_7788);
        assert_eq!(den.stars(), 3);
        assert_eq!(den.rand_roll(), 0x7F);
        assert_eq!(den.den_type(), 1);
    }

    #[test]
    fn test_stars_clamp_to_four() {
        let den = DenRaw::from_bytes(&den_bytes(0, 9, 0, 1, 0)).unwrap();
        assert_eq!(den.stars(), 4);
    }

    #[test]
    fn test_den_type_classification() {
        let inactive = DenRaw::from_bytes(&den_bytes(0, 0, 0, 0, 0)).unwrap();
        assert!(!inactive.is_active());
        assert!(!inactive.is_rare());

        let common = DenRaw::from_bytes(&den_bytes(0, 0, 0, 1, 0)).unwrap();
        assert!(common.is_active());
        assert!(!common.is_rare());

        let rare = DenRaw::from_bytes(&den_bytes(0, 0, 0, 2, 0)).unwrap();
        assert!(rare.is_active());
        assert!(rare.is_rare());
    }

    #[test]
    fn test_event_flag_is_bit_one() {
        let event = DenRaw::from_bytes(&den_bytes(0, 0, 0, 1, 0b10)).unwrap();
        assert!(event.is_event());
        let plain = DenRaw::from_bytes(&den_bytes(0, 0, 0, 1, 0b01)).unwrap();
        assert!(!plain.is_event());
    }

    #[test]
    fn test_short_buffer_is_rejected() {
        assert!(DenRaw::from_bytes(&[0u8; 0x17]).is_none());
    }
}
