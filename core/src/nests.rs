//! Gen8 nest tables, the den encounter resolver, and the shiny-advance
//! predictor.

use std::fs;
use std::path::Path;

use crate::constants::{DEN_COUNT_TOTAL, NEST_SLOTS, NEST_SLOT_SIZE};
use crate::error::{CoreError, Result};
use crate::rng::Xoroshiro128Plus;
use crate::types::{DenRaw, DenShiny};

/// One slot of a 12-entry nest table: a species, its guaranteed IV
/// count, and one selection weight per star tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NestSlot {
    pub species: u16,
    pub flawless_ivs: u8,
    pub probabilities: [u32; 5],
}

impl NestSlot {
    fn from_bytes(data: &[u8]) -> Self {
        let mut probabilities = [0u32; 5];
        for (i, p) in probabilities.iter_mut().enumerate() {
            let offset = 3 + i * 4;
            *p = u32::from_le_bytes(data[offset..offset + 4].try_into().unwrap());
        }
        Self {
            species: u16::from_le_bytes([data[0], data[1]]),
            flawless_ivs: data[2],
            probabilities,
        }
    }
}

/// Per-den pair of nest ids; the rare column is selected by an even
/// den-type byte.
pub struct NestHashes {
    pairs: Vec<(u8, u8)>,
}

impl NestHashes {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path).map_err(|e| CoreError::ResourceMissing {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        if data.len() < DEN_COUNT_TOTAL * 2 {
            return Err(CoreError::ResourceMissing {
                path: path.to_path_buf(),
                detail: format!("expected {} bytes, found {}", DEN_COUNT_TOTAL * 2, data.len()),
            });
        }
        Ok(Self::from_raw(&data))
    }

    pub fn from_raw(data: &[u8]) -> Self {
        let pairs = data
            .chunks_exact(2)
            .take(DEN_COUNT_TOTAL)
            .map(|pair| (pair[0], pair[1]))
            .collect();
        Self { pairs }
    }

    pub fn nest_id(&self, den_index: usize, rare: bool) -> u8 {
        let (normal, rare_id) = self.pairs.get(den_index).copied().unwrap_or((0, 0));
        if rare {
            rare_id
        } else {
            normal
        }
    }
}

/// All nest tables for one version, indexed by nest id.
pub struct NestPools {
    nests: Vec<[NestSlot; NEST_SLOTS]>,
}

impl NestPools {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path).map_err(|e| CoreError::ResourceMissing {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        let pools = Self::from_raw(&data);
        if pools.nests.is_empty() {
            return Err(CoreError::ResourceMissing {
                path: path.to_path_buf(),
                detail: "no nest tables".into(),
            });
        }
        log::info!("loaded {} nest tables from {:?}", pools.nests.len(), path);
        Ok(pools)
    }

    pub fn from_raw(data: &[u8]) -> Self {
        let nest_size = NEST_SLOTS * NEST_SLOT_SIZE;
        let nests = data
            .chunks_exact(nest_size)
            .map(|chunk| {
                let mut slots = [NestSlot::default(); NEST_SLOTS];
                for (i, slot) in slots.iter_mut().enumerate() {
                    *slot = NestSlot::from_bytes(&chunk[i * NEST_SLOT_SIZE..]);
                }
                slots
            })
            .collect();
        Self { nests }
    }

    pub fn from_nests(nests: Vec<[NestSlot; NEST_SLOTS]>) -> Self {
        Self { nests }
    }

    pub fn nest(&self, nest_id: u8) -> Option<&[NestSlot; NEST_SLOTS]> {
        self.nests.get(nest_id as usize)
    }
}

/// Resolve a den's species and guaranteed IV count.
///
/// Event dens resolve to species 0 without consulting the tables.
/// Inactive dens always use the normal nest column. The walk starts
/// from an accumulator of 1 and the first slot pushing it past the
/// stored roll byte wins.
pub fn resolve_den(
    den: &DenRaw,
    den_index: usize,
    hashes: &NestHashes,
    pools: &NestPools,
) -> (u16, u8) {
    if den.is_active() && den.is_event() {
        return (0, 0);
    }

    let nest_id = hashes.nest_id(den_index, den.is_rare());
    let Some(table) = pools.nest(nest_id) else {
        return (0, 0);
    };

    let stars = den.stars() as usize;
    let rand_roll = den.rand_roll() as u32;
    let mut accumulated = 1u32;

    for slot in table {
        let probability = if stars < 5 { slot.probabilities[stars] } else { 0 };
        accumulated += probability;
        if accumulated > rand_roll {
            return (slot.species, slot.flawless_ivs);
        }
    }

    (0, 0)
}

/// Scan forward from `seed` for the nearest shiny frame.
///
/// Each advance re-seeds the generator from the current chain value;
/// the first draw doubles as both that frame's EC and the next chain
/// seed. Returns the rank and the 1-based advance, or `(None, 0)` when
/// nothing is found within `max_advances`.
pub fn predict_shiny(seed: u64, max_advances: u32) -> (DenShiny, u32) {
    let mut current = seed;

    for advance in 0..max_advances {
        let mut rng = Xoroshiro128Plus::new(current);
        current = rng.next();

        let sid_tid = rng.next() as u32;
        let pid = rng.next() as u32;

        let psv = (pid >> 16) ^ (pid & 0xFFFF);
        let tsv = (sid_tid >> 16) ^ (sid_tid & 0xFFFF);

        if psv == tsv {
            return (DenShiny::Square, advance + 1);
        }
        if (psv ^ tsv) < 16 {
            return (DenShiny::Star, advance + 1);
        }
    }

    (DenShiny::None, 0)
}
