//! Enumerations shared by both generations of the pipeline.

use serde::Serialize;

use crate::constants::{
    TITLE_ID_SCARLET, TITLE_ID_SHIELD, TITLE_ID_SWORD, TITLE_ID_VIOLET,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameVersion {
    Scarlet,
    Violet,
    Sword,
    Shield,
}

impl GameVersion {
    pub fn title_id(self) -> u64 {
        match self {
            Self::Scarlet => TITLE_ID_SCARLET,
            Self::Violet => TITLE_ID_VIOLET,
            Self::Sword => TITLE_ID_SWORD,
            Self::Shield => TITLE_ID_SHIELD,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Scarlet => "Scarlet",
            Self::Violet => "Violet",
            Self::Sword => "Sword",
            Self::Shield => "Shield",
        }
    }

    pub fn is_gen9(self) -> bool {
        matches!(self, Self::Scarlet | Self::Violet)
    }

    pub fn is_gen8(self) -> bool {
        matches!(self, Self::Sword | Self::Shield)
    }
}

/// Gen9 region holding a raid array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RaidMap {
    Paldea,
    Kitakami,
    Blueberry,
}

impl RaidMap {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Paldea => "Paldea",
            Self::Kitakami => "Kitakami",
            Self::Blueberry => "Blueberry",
        }
    }
}

/// Gen8 region holding a den array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DenRegion {
    Vanilla,
    IsleOfArmor,
    CrownTundra,
}

impl DenRegion {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Vanilla => "Wild Area",
            Self::IsleOfArmor => "Isle of Armor",
            Self::CrownTundra => "Crown Tundra",
        }
    }
}

/// Story progress tier; gates the star roll of standard raids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum GameProgress {
    Beginning,
    UnlockedRaids,
    Unlocked3Stars,
    Unlocked4Stars,
    Unlocked5Stars,
    Unlocked6Stars,
}

/// Raid kind after decoding the slot's content word. Distribution and
/// mighty raids use externally distributed templates and are skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RaidContent {
    Standard,
    Black,
    Event,
    EventMighty,
}

impl RaidContent {
    /// Content word as stored in the raid slot.
    pub fn from_raw(value: u32) -> Self {
        match value {
            1 => Self::Black,
            2 => Self::Event,
            3 => Self::EventMighty,
            _ => Self::Standard,
        }
    }

    pub fn is_supported(self) -> bool {
        matches!(self, Self::Standard | Self::Black)
    }
}

/// Tera-type specification carried by an encounter template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TeraSpec {
    /// Pick type1/type2 of the species from a coin-flip draw.
    Default,
    /// Draw uniformly from the 18 types.
    Random,
    /// A fixed type (raw byte minus 2).
    Specific(u8),
}

impl TeraSpec {
    pub fn from_raw(value: u8) -> Self {
        match value {
            0 => Self::Default,
            1 => Self::Random,
            v => Self::Specific(v - 2),
        }
    }
}

/// Which ability slots a template may roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AbilityPermission {
    Any12 = 0,
    Any12H = 1,
    OnlyFirst = 2,
    OnlySecond = 4,
    OnlyHidden = 8,
}

impl AbilityPermission {
    /// Raw template byte 0..=4 maps onto the permission flags.
    pub fn from_raw(value: u8) -> Self {
        match value {
            1 => Self::Any12H,
            2 => Self::OnlyFirst,
            3 => Self::OnlySecond,
            4 => Self::OnlyHidden,
            _ => Self::Any12,
        }
    }
}

/// Shiny coercion policy carried by an encounter template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShinyPolicy {
    Random,
    Never,
    Always,
}

impl ShinyPolicy {
    pub fn from_raw(value: u8) -> Self {
        match value {
            1 => Self::Never,
            2 => Self::Always,
            _ => Self::Random,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Gender {
    Male,
    Female,
    Genderless,
}

/// Shiny rank of a generated creature. Square requires full equality of
/// the 16-bit xor halves; Star requires a difference below 16.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ShinyRank {
    None,
    Star,
    Square,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_generation_split() {
        assert!(GameVersion::Scarlet.is_gen9());
        assert!(GameVersion::Violet.is_gen9());
        assert!(GameVersion::Sword.is_gen8());
        assert!(GameVersion::Shield.is_gen8());
    }

    #[test]
    fn test_progress_ordering() {
        assert!(GameProgress::Unlocked6Stars > GameProgress::Unlocked5Stars);
        assert!(GameProgress::Beginning < GameProgress::UnlockedRaids);
    }

    #[test]
    fn test_content_decoding() {
        assert_eq!(RaidContent::from_raw(0), RaidContent::Standard);
        assert_eq!(RaidContent::from_raw(1), RaidContent::Black);
        assert_eq!(RaidContent::from_raw(2), RaidContent::Event);
        assert_eq!(RaidContent::from_raw(3), RaidContent::EventMighty);
        assert!(!RaidContent::Event.is_supported());
        assert!(!RaidContent::EventMighty.is_supported());
    }

    #[test]
    fn test_tera_spec_specific_offset() {
        assert_eq!(TeraSpec::from_raw(0), TeraSpec::Default);
        assert_eq!(TeraSpec::from_raw(1), TeraSpec::Random);
        assert_eq!(TeraSpec::from_raw(2), TeraSpec::Specific(0));
        assert_eq!(TeraSpec::from_raw(19), TeraSpec::Specific(17));
    }

    #[test]
    fn test_ability_permission_mapping() {
        assert_eq!(AbilityPermission::from_raw(0), AbilityPermission::Any12);
        assert_eq!(AbilityPermission::from_raw(1), AbilityPermission::Any12H);
        assert_eq!(AbilityPermission::from_raw(2), AbilityPermission::OnlyFirst);
        assert_eq!(AbilityPermission::from_raw(3), AbilityPermission::OnlySecond);
        assert_eq!(AbilityPermission::from_raw(4), AbilityPermission::OnlyHidden);
        assert_eq!(AbilityPermission::from_raw(9), AbilityPermission::Any12);
    }
}
