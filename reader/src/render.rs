//! Plain-text rendering of snapshot results.

use raid_core::types::{DenShiny, Gender, ShinyRank, Snapshot8, Snapshot9};

fn shiny_label(rank: ShinyRank) -> &'static str {
    match rank {
        ShinyRank::None => "-",
        ShinyRank::Star => "star",
        ShinyRank::Square => "square",
    }
}

fn gender_label(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "M",
        Gender::Female => "F",
        Gender::Genderless => "-",
    }
}

pub fn print_gen9(snapshot: &Snapshot9) {
    println!(
        "progress {:?}, trainer id32 {:#010X}, {} active raids",
        snapshot.progress,
        snapshot.trainer_id32,
        snapshot.raids.len()
    );
    println!(
        "{:<5} {:<10} {:<5} {:<8} {:<6} {:<7} {:<18} {:<4} {:<6} {:<10}",
        "slot", "map", "stars", "species", "level", "tera", "ivs", "sex", "shiny", "seed"
    );

    for raid in &snapshot.raids {
        let d = &raid.details;
        let ivs = d
            .ivs
            .iter()
            .map(|iv| iv.to_string())
            .collect::<Vec<_>>()
            .join("/");
        println!(
            "{:<5} {:<10} {:<5} {:<8} {:<6} {:<7} {:<18} {:<4} {:<6} {:#010X}",
            raid.slot_index,
            raid.map.display_name(),
            d.stars,
            format!("{}-{}", d.species, d.form),
            d.level,
            d.tera_type,
            ivs,
            gender_label(d.gender),
            shiny_label(d.shiny),
            d.seed,
        );
        if let Some([x, y, z]) = raid.coord {
            println!("      at ({:.1}, {:.1}, {:.1})", x, y, z);
        }
        if !raid.rewards.is_empty() {
            let rewards = raid
                .rewards
                .iter()
                .map(|r| format!("{}x{}", r.item_id, r.amount))
                .collect::<Vec<_>>()
                .join(", ");
            println!("      rewards: {}", rewards);
        }
    }
}

pub fn print_gen8(snapshot: &Snapshot8) {
    let active = snapshot.dens.iter().filter(|d| d.is_active).count();
    println!("{} dens, {} active", snapshot.dens.len(), active);
    println!(
        "{:<5} {:<14} {:<7} {:<8} {:<6} {:<6} {:<7} {:<9} {:<18}",
        "den", "region", "active", "species", "stars", "rare", "event", "shiny", "seed"
    );

    for den in &snapshot.dens {
        let shiny = match den.shiny {
            DenShiny::None => "-".to_string(),
            DenShiny::Star => format!("star@{}", den.shiny_advance),
            DenShiny::Square => format!("square@{}", den.shiny_advance),
        };
        println!(
            "{:<5} {:<14} {:<7} {:<8} {:<6} {:<6} {:<7} {:<9} {:#018X}",
            den.den_index,
            den.region.display_name(),
            den.is_active,
            den.species,
            den.stars + 1,
            den.is_rare,
            den.is_event,
            shiny,
            den.seed,
        );
    }
}
