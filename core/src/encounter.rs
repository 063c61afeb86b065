//! Gen9 encounter templates and the seed → template resolver.
//!
//! Pool files are concatenations of 0x3C-byte records grouped by star
//! tier; the resolver walks them in file order and the first matching
//! rate window wins.

use std::fs;
use std::path::Path;

use crate::constants::{
    ENCOUNTER_TEMPLATE_SIZE, RATE_TOTALS_BLUEBERRY, RATE_TOTALS_KITAKAMI_SCARLET,
    RATE_TOTALS_KITAKAMI_VIOLET, RATE_TOTALS_PALDEA_SCARLET, RATE_TOTALS_PALDEA_VIOLET,
};
use crate::error::{CoreError, Result};
use crate::personal::PersonalTable;
use crate::rng::Xoroshiro128Plus;
use crate::types::{
    AbilityPermission, GameProgress, GameVersion, RaidContent, RaidMap, ShinyPolicy, TeraSpec,
};

/// One 0x3C-byte encounter template, augmented with the species's
/// gender-ratio byte at load time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncounterTemplate {
    pub species: u16,
    pub form: u8,
    /// Stored plus-one; 0 means "use the personal table ratio".
    pub gender: u8,
    pub ability: AbilityPermission,
    pub flawless_iv_count: u8,
    pub shiny: ShinyPolicy,
    pub level: u8,
    pub moves: [u16; 4],
    pub tera_type: TeraSpec,
    pub index: u8,
    pub stars: u8,
    pub rate_weight: u8,
    pub rate_min_scarlet: i16,
    pub rate_min_violet: i16,
    pub identifier: u32,
    pub fixed_reward_hash: u64,
    pub lottery_reward_hash: u64,
    pub extra_moves: [u16; 6],
    pub gender_ratio: u8,
}

impl EncounterTemplate {
    pub fn from_bytes(data: &[u8], personal_gender: u8) -> Option<Self> {
        if data.len() < ENCOUNTER_TEMPLATE_SIZE {
            return None;
        }
        let r16 = |o: usize| u16::from_le_bytes([data[o], data[o + 1]]);
        let r16s = |o: usize| i16::from_le_bytes([data[o], data[o + 1]]);
        let r32 = |o: usize| u32::from_le_bytes(data[o..o + 4].try_into().unwrap());
        let r64 = |o: usize| u64::from_le_bytes(data[o..o + 8].try_into().unwrap());

        Some(Self {
            species: r16(0x00),
            form: data[0x02],
            gender: data[0x03].saturating_sub(1),
            ability: AbilityPermission::from_raw(data[0x04]),
            flawless_iv_count: data[0x05],
            shiny: ShinyPolicy::from_raw(data[0x06]),
            level: data[0x07],
            moves: [r16(0x08), r16(0x0A), r16(0x0C), r16(0x0E)],
            tera_type: TeraSpec::from_raw(data[0x10]),
            index: data[0x11],
            stars: data[0x12],
            rate_weight: data[0x13],
            rate_min_scarlet: r16s(0x14),
            rate_min_violet: r16s(0x16),
            identifier: r32(0x18),
            fixed_reward_hash: r64(0x20),
            lottery_reward_hash: r64(0x28),
            extra_moves: [
                r16(0x30),
                r16(0x32),
                r16(0x34),
                r16(0x36),
                r16(0x38),
                r16(0x3A),
            ],
            gender_ratio: personal_gender,
        })
    }

    fn rate_min(&self, version: GameVersion) -> i16 {
        if version == GameVersion::Scarlet {
            self.rate_min_scarlet
        } else {
            self.rate_min_violet
        }
    }
}

/// All templates for one (region, content) pool.
#[derive(Clone, Debug, Default)]
pub struct EncounterTable {
    pub entries: Vec<EncounterTemplate>,
}

impl EncounterTable {
    pub fn load(path: &Path, personal: &PersonalTable) -> Result<Self> {
        let data = fs::read(path).map_err(|e| CoreError::ResourceMissing {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        let table = Self::from_raw(&data, personal);
        if table.entries.is_empty() {
            return Err(CoreError::ResourceMissing {
                path: path.to_path_buf(),
                detail: "no encounter templates".into(),
            });
        }
        log::info!("loaded {} encounter templates from {:?}", table.entries.len(), path);
        Ok(table)
    }

    pub fn from_raw(data: &[u8], personal: &PersonalTable) -> Self {
        let count = data.len() / ENCOUNTER_TEMPLATE_SIZE;
        let mut entries = Vec::with_capacity(count);
        for i in 0..count {
            let record = &data[i * ENCOUNTER_TEMPLATE_SIZE..];
            let species = u16::from_le_bytes([record[0], record[1]]);
            let form = record[0x02];
            let gender = personal.form_entry(species, form).gender_ratio();
            if let Some(template) = EncounterTemplate::from_bytes(record, gender) {
                entries.push(template);
            }
        }
        Self { entries }
    }
}

/// Total rate weight for `(stars, region, version)`. Out-of-range star
/// counts yield 0, which fails the resolve.
pub fn rate_total(stars: u8, map: RaidMap, version: GameVersion) -> i16 {
    if !(1..=6).contains(&stars) {
        return 0;
    }
    let scarlet = version == GameVersion::Scarlet;
    let table = match map {
        RaidMap::Paldea => {
            if scarlet {
                &RATE_TOTALS_PALDEA_SCARLET
            } else {
                &RATE_TOTALS_PALDEA_VIOLET
            }
        }
        RaidMap::Kitakami => {
            if scarlet {
                &RATE_TOTALS_KITAKAMI_SCARLET
            } else {
                &RATE_TOTALS_KITAKAMI_VIOLET
            }
        }
        RaidMap::Blueberry => &RATE_TOTALS_BLUEBERRY,
    };
    table[stars as usize - 1]
}

/// Star count for a standard raid, from one roll in [0, 100) against
/// the progress-tier thresholds.
pub fn seed_stars(rng: &mut Xoroshiro128Plus, progress: GameProgress) -> u8 {
    let roll = rng.next_bounded(100);
    match progress {
        GameProgress::Unlocked6Stars => {
            if roll > 70 {
                5
            } else if roll > 30 {
                4
            } else {
                3
            }
        }
        GameProgress::Unlocked5Stars => {
            if roll > 75 {
                5
            } else if roll > 40 {
                4
            } else {
                3
            }
        }
        GameProgress::Unlocked4Stars => {
            if roll > 70 {
                4
            } else if roll > 40 {
                3
            } else if roll > 20 {
                2
            } else {
                1
            }
        }
        GameProgress::Unlocked3Stars => {
            if roll > 70 {
                3
            } else if roll > 30 {
                2
            } else {
                1
            }
        }
        _ => {
            if roll > 80 {
                2
            } else {
                1
            }
        }
    }
}

/// Resolve a raid seed to its encounter template.
///
/// Draw order is star roll (standard raids only) then rate roll, both
/// from one generator seeded with the raid seed. The rate comparison
/// uses an unsigned wrap-around subtract: a rate roll below the
/// template's minimum becomes a huge value and fails the window test.
pub fn find_from_seed<'a>(
    seed: u32,
    entries: &'a [EncounterTemplate],
    version: GameVersion,
    progress: GameProgress,
    content: RaidContent,
    map: RaidMap,
) -> Option<&'a EncounterTemplate> {
    let mut rng = Xoroshiro128Plus::new(seed as u64);

    let stars = if content == RaidContent::Standard {
        seed_stars(&mut rng, progress)
    } else {
        // Black raids are always 6-star.
        6
    };

    let total = rate_total(stars, map, version);
    if total <= 0 {
        return None;
    }

    let rate_rand = rng.next_bounded(total as u64) as i32;

    entries.iter().find(|entry| {
        if entry.stars != stars {
            return false;
        }
        let min_rate = entry.rate_min(version);
        if min_rate < 0 {
            return false;
        }
        (rate_rand.wrapping_sub(min_rate as i32) as u32) < entry.rate_weight as u32
    })
}

/// Minimal template for tests elsewhere in the crate.
#[cfg(test)]
pub(crate) fn test_template(stars: u8, min: i16, weight: u8, species: u16) -> EncounterTemplate {
    EncounterTemplate {
        species,
        form: 0,
        gender: 0,
        ability: AbilityPermission::Any12,
        flawless_iv_count: stars.min(5),
        shiny: ShinyPolicy::Random,
        level: 50,
        moves: [1, 2, 3, 4],
        tera_type: TeraSpec::Random,
        index: 0,
        stars,
        rate_weight: weight,
        rate_min_scarlet: min,
        rate_min_violet: min,
        identifier: 0,
        fixed_reward_hash: 0,
        lottery_reward_hash: 0,
        extra_moves: [0; 6],
        gender_ratio: 0x7F,
    }
}
