//! Static data bundle: every table the pipeline needs, loaded once at
//! startup and borrowed by everything downstream.

use std::path::Path;

use crate::encounter::EncounterTable;
use crate::error::Result;
use crate::locations::LocationData;
use crate::nests::{NestHashes, NestPools};
use crate::personal::PersonalTable;
use crate::rewards::RewardTables;
use crate::types::{GameVersion, RaidContent, RaidMap};

pub struct Resources {
    pub personal: PersonalTable,
    pub locations: LocationData,
    pub paldea_standard: EncounterTable,
    pub paldea_black: EncounterTable,
    pub kitakami_standard: EncounterTable,
    pub kitakami_black: EncounterTable,
    pub blueberry_standard: EncounterTable,
    pub blueberry_black: EncounterTable,
    pub rewards: RewardTables,
    pub nest_hashes: NestHashes,
    pub nests_sword: NestPools,
    pub nests_shield: NestPools,
}

impl Resources {
    /// Load every sidecar out of `dir`. Coordinate sidecars degrade to
    /// empty maps; everything else is required.
    pub fn load(dir: &Path) -> Result<Self> {
        log::info!("loading resources from {:?}", dir);
        let personal = PersonalTable::load(&dir.join("personal.bin"))?;

        let encounters = |name: &str| EncounterTable::load(&dir.join(name), &personal);
        let paldea_standard = encounters("encounters_paldea_standard.bin")?;
        let paldea_black = encounters("encounters_paldea_black.bin")?;
        let kitakami_standard = encounters("encounters_kitakami_standard.bin")?;
        let kitakami_black = encounters("encounters_kitakami_black.bin")?;
        let blueberry_standard = encounters("encounters_blueberry_standard.bin")?;
        let blueberry_black = encounters("encounters_blueberry_black.bin")?;

        let rewards = RewardTables::load(
            &dir.join("rewards_fixed.bin"),
            &dir.join("rewards_lottery.bin"),
        )?;

        let nest_hashes = NestHashes::load(&dir.join("nest_hashes.bin"))?;
        let nests_sword = NestPools::load(&dir.join("nests_sword.bin"))?;
        let nests_shield = NestPools::load(&dir.join("nests_shield.bin"))?;

        let locations = LocationData::load(
            &dir.join("locations_paldea.json"),
            &dir.join("locations_kitakami.json"),
            &dir.join("locations_blueberry.json"),
        );

        Ok(Self {
            personal,
            locations,
            paldea_standard,
            paldea_black,
            kitakami_standard,
            kitakami_black,
            blueberry_standard,
            blueberry_black,
            rewards,
            nest_hashes,
            nests_sword,
            nests_shield,
        })
    }

    pub fn encounter_table(&self, map: RaidMap, content: RaidContent) -> &EncounterTable {
        let black = content == RaidContent::Black;
        match map {
            RaidMap::Paldea => {
                if black {
                    &self.paldea_black
                } else {
                    &self.paldea_standard
                }
            }
            RaidMap::Kitakami => {
                if black {
                    &self.kitakami_black
                } else {
                    &self.kitakami_standard
                }
            }
            RaidMap::Blueberry => {
                if black {
                    &self.blueberry_black
                } else {
                    &self.blueberry_standard
                }
            }
        }
    }

    pub fn nest_pools(&self, version: GameVersion) -> &NestPools {
        if version == GameVersion::Sword {
            &self.nests_sword
        } else {
            &self.nests_shield
        }
    }
}
