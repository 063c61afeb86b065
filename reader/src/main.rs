//! Command-line front end: loads the static tables, runs one snapshot
//! pass, and prints the result.

mod render;

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use raid_core::den_reader::DenReader;
use raid_core::reader::RaidReader;
use raid_core::resources::Resources;
use raid_core::types::GameVersion;

#[derive(Parser)]
#[command(name = "raidwatch", about = "Inspect active raid spawns in a save container")]
struct Cli {
    /// Directory holding the static data sidecars.
    #[arg(long, default_value = "data")]
    data: PathBuf,

    /// Mirror log output into this file.
    #[arg(long)]
    log_file: Option<String>,

    /// Log at debug level.
    #[arg(long)]
    verbose: bool,

    /// Emit the snapshot as JSON instead of a table.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read the current raid spawns out of a Gen9 save container.
    Save9 {
        /// Decrypted save container ("main" file).
        #[arg(long)]
        save: PathBuf,
        #[arg(long, value_enum)]
        version: Gen9Version,
    },
    /// Read the current den states out of a Gen8 save container.
    Save8 {
        #[arg(long)]
        save: PathBuf,
        #[arg(long, value_enum)]
        version: Gen8Version,
        /// Forward-search bound for the shiny predictor.
        #[arg(long, default_value_t = raid_core::den_reader::DEFAULT_MAX_ADVANCES)]
        max_advances: u32,
    },
    /// Snapshot a running Gen9 game (needs an attached memory provider).
    Live9 {
        #[arg(long, value_enum)]
        version: Gen9Version,
    },
    /// Snapshot a running Gen8 game (needs an attached memory provider).
    Live8 {
        #[arg(long, value_enum)]
        version: Gen8Version,
        #[arg(long, default_value_t = raid_core::den_reader::DEFAULT_MAX_ADVANCES)]
        max_advances: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Gen9Version {
    Scarlet,
    Violet,
}

impl From<Gen9Version> for GameVersion {
    fn from(value: Gen9Version) -> Self {
        match value {
            Gen9Version::Scarlet => GameVersion::Scarlet,
            Gen9Version::Violet => GameVersion::Violet,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Gen8Version {
    Sword,
    Shield,
}

impl From<Gen8Version> for GameVersion {
    fn from(value: Gen8Version) -> Self {
        match value {
            Gen8Version::Sword => GameVersion::Sword,
            Gen8Version::Shield => GameVersion::Shield,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    raid_core::initialize_logger(level, cli.log_file.as_deref())
        .context("failed to initialize logging")?;

    let resources = Resources::load(&cli.data)
        .with_context(|| format!("failed to load resources from {:?}", cli.data))?;

    match cli.command {
        Command::Save9 { save, version } => {
            let snapshot = RaidReader::new(&resources)
                .read_save(&save, version.into())
                .with_context(|| format!("failed to read {:?}", save))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                render::print_gen9(&snapshot);
            }
        }
        Command::Save8 {
            save,
            version,
            max_advances,
        } => {
            let snapshot = DenReader::new(&resources)
                .with_max_advances(max_advances)
                .read_save(&save, version.into())
                .with_context(|| format!("failed to read {:?}", save))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                render::print_gen8(&snapshot);
            }
        }
        Command::Live9 { .. } | Command::Live8 { .. } => {
            // The live paths need a debugger-service memory provider,
            // which this host binary does not ship.
            bail!("live mode requires an attached memory provider");
        }
    }

    Ok(())
}
