//! Gen9 creature generation: a fixed-order draw protocol that maps a
//! 32-bit raid seed plus an encounter template to the exact creature
//! the game will spawn.

use crate::personal::{PersonalInfo, PersonalTable};
use crate::rng::Xoroshiro128Plus;
use crate::shiny;
use crate::types::{AbilityPermission, Gender, RaidDetails, ShinyPolicy, ShinyRank, TeraSpec};

use crate::constants::{NATURES_AMPED, NATURES_LOW_KEY, SPECIES_FORM_NATURE};
use crate::encounter::EncounterTemplate;

const IV_UNSET: i32 = -1;
const IV_MAX: i32 = 31;

/// Tera type for a seed. Runs on its own generator instance; the main
/// sequence re-seeds separately, which is the game's behavior.
pub fn tera_type(
    seed: u64,
    spec: TeraSpec,
    species: u16,
    form: u8,
    personal: &PersonalTable,
) -> u8 {
    if let TeraSpec::Specific(tera) = spec {
        return tera;
    }

    let mut rng = Xoroshiro128Plus::new(seed);
    if spec == TeraSpec::Random {
        return rng.next_bounded(18) as u8;
    }

    // Default: coin flip between the species's own types.
    let entry = personal.form_entry(species, form);
    if rng.next_bounded(2) == 0 {
        entry.type1()
    } else {
        entry.type2()
    }
}

fn roll_gender(ratio: u8, roll: u64) -> Gender {
    let threshold = match ratio {
        0x1F => 12,
        0x3F => 25,
        0x7F => 50,
        0xBF => 75,
        0xE1 => 89,
        _ => 50,
    };
    if roll < threshold {
        Gender::Female
    } else {
        Gender::Male
    }
}

fn resolved_ability(personal: &PersonalTable, species: u16, form: u8, ability_num: u32) -> u16 {
    let entry = personal.form_entry(species, form);
    let index = ability_num >> 1;
    if index < entry.ability_count() {
        entry.ability_at(index)
    } else {
        index as u16
    }
}

/// Generate the full creature for `seed`. Pure: equal inputs always
/// produce structurally equal output.
pub fn generate(
    seed: u32,
    encounter: &EncounterTemplate,
    id32: u32,
    personal: &PersonalTable,
) -> RaidDetails {
    // The upper half of the seed is zeroed by construction: raids carry
    // 32-bit seeds even though the generator state is 128-bit.
    let tera = tera_type(
        seed as u64,
        encounter.tera_type,
        encounter.species,
        encounter.form,
        personal,
    );

    let mut rng = Xoroshiro128Plus::new(seed as u64);

    let ec = rng.next_bounded(u32::MAX as u64) as u32;
    let fake_tid = rng.next() as u32;
    let mut pid = rng.next() as u32;

    let rank = match encounter.shiny {
        ShinyPolicy::Random => {
            let xor = shiny::shiny_xor(pid, fake_tid);
            if xor < 16 {
                let xor_type = if xor == 0 { 0 } else { 1 };
                shiny::force_shiny_state(true, &mut pid, id32, xor_type);
                if xor == 0 {
                    ShinyRank::Square
                } else {
                    ShinyRank::Star
                }
            } else {
                shiny::force_shiny_state(false, &mut pid, id32, xor);
                ShinyRank::None
            }
        }
        ShinyPolicy::Always => {
            let tid = fake_tid as u16;
            let sid = (fake_tid >> 16) as u16;
            if shiny::shiny_xor(pid, fake_tid) > 16 {
                pid = shiny::shiny_pid(tid, sid, pid, 0);
            }
            if !shiny::is_shiny(id32, pid) {
                let xor = shiny::shiny_xor(pid, fake_tid);
                pid = shiny::shiny_pid(
                    id32 as u16,
                    (id32 >> 16) as u16,
                    pid,
                    if xor == 0 { 0 } else { 1 },
                );
            }
            if shiny::shiny_xor(pid, fake_tid) == 0 {
                ShinyRank::Square
            } else {
                ShinyRank::Star
            }
        }
        ShinyPolicy::Never => {
            if shiny::is_shiny(fake_tid, pid) {
                pid ^= 0x1000_0000;
            }
            if shiny::is_shiny(id32, pid) {
                pid ^= 0x1000_0000;
            }
            ShinyRank::None
        }
    };

    // Flawless slots first (re-rolling collisions), then fill the rest
    // in slot order.
    let mut ivs = [IV_UNSET; 6];
    for _ in 0..encounter.flawless_iv_count {
        loop {
            let index = rng.next_bounded(6) as usize;
            if ivs[index] == IV_UNSET {
                ivs[index] = IV_MAX;
                break;
            }
        }
    }
    for iv in ivs.iter_mut() {
        if *iv == IV_UNSET {
            *iv = rng.next_bounded(IV_MAX as u64 + 1) as i32;
        }
    }

    let ability_num = match encounter.ability {
        AbilityPermission::Any12H => (rng.next_bounded(3) << 1) as u32,
        AbilityPermission::Any12 => (rng.next_bounded(2) << 1) as u32,
        permission => permission as u32,
    };
    let ability = resolved_ability(personal, encounter.species, encounter.form, ability_num);
    let ability_number = if ability_num == 0 { 1 } else { ability_num as u8 };

    let gender = match encounter.gender_ratio {
        PersonalInfo::RATIO_GENDERLESS => Gender::Genderless,
        PersonalInfo::RATIO_FEMALE => Gender::Female,
        PersonalInfo::RATIO_MALE => Gender::Male,
        ratio => roll_gender(ratio, rng.next_bounded(100)),
    };

    let nature = if encounter.species == SPECIES_FORM_NATURE {
        if encounter.form == 0 {
            NATURES_AMPED[rng.next_bounded(NATURES_AMPED.len() as u64) as usize]
        } else {
            NATURES_LOW_KEY[rng.next_bounded(NATURES_LOW_KEY.len() as u64) as usize]
        }
    } else {
        rng.next_bounded(25) as u8
    };

    let height = (rng.next_bounded(0x81) + rng.next_bounded(0x80)) as u8;
    let weight = (rng.next_bounded(0x81) + rng.next_bounded(0x80)) as u8;
    let scale = (rng.next_bounded(0x81) + rng.next_bounded(0x80)) as u8;

    RaidDetails {
        seed,
        shiny: rank,
        stars: encounter.stars,
        species: encounter.species,
        form: encounter.form,
        level: encounter.level,
        tera_type: tera,
        ec,
        pid,
        ivs: ivs.map(|iv| iv as u8),
        ability,
        ability_number,
        nature,
        gender,
        height,
        weight,
        scale,
        moves: encounter.moves,
    }
}
