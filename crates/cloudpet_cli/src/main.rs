//! CLI driver for the pet core.
//!
//! # Responsibility
//! - Stand in for the presentation layer: read pet records, emit intents.
//! - Keep output line-oriented so it stays easy to script against.

use clap::{Parser, Subcommand};
use cloudpet_core::db::open_db;
use cloudpet_core::{
    core_version, init_logging, list_types, parse_pet_id, IntentOutcome, LogLevel, PetCollection,
    PetFactory, PetIntent, SnapshotStore, SqliteSlotRepository, DEFAULT_SLOT_KEY,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "cloudpet", version, about = "Adopt and raise cloud-service pets")]
struct Cli {
    /// SQLite file holding the durable slot.
    #[arg(long, default_value = "cloudpet.db")]
    db: PathBuf,
    /// Slot key inside the database.
    #[arg(long, default_value = DEFAULT_SLOT_KEY)]
    slot: String,
    /// Absolute directory for rolling log files; logging is off when omitted.
    #[arg(long)]
    log_dir: Option<PathBuf>,
    #[arg(long)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List pet archetypes.
    Types,
    /// List adopted pets.
    List,
    /// Adopt a new pet.
    Adopt { name: String, type_id: String },
    /// Interact once with a pet.
    Interact { id: String },
    /// Show per-service capacity.
    Status,
    /// Print the core version.
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| LogLevel::default_for_build().as_str().to_string());
        if let Err(err) = init_logging(&level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Types => {
            for archetype in list_types() {
                println!(
                    "{}\t{} {}\t{}\tgrowth={}\t{}",
                    archetype.id,
                    archetype.icon,
                    archetype.name,
                    archetype.cloud_service,
                    archetype.growth_rate,
                    archetype.abilities.join(", ")
                );
            }
            return Ok(());
        }
        Command::Version => {
            println!("cloudpet_core version={}", core_version());
            return Ok(());
        }
        _ => {}
    }

    let conn = open_db(&cli.db)?;
    let repo = SqliteSlotRepository::try_new(&conn)?;
    let mut collection = PetCollection::open(SnapshotStore::with_slot_key(repo, cli.slot));
    let mut factory = PetFactory::new();

    match cli.command {
        Command::List => {
            for pet in collection.all() {
                println!(
                    "{}\t{}\t{}\tlvl={}\thappiness={}\txp={}/100\tcreated={}",
                    pet.id,
                    pet.name,
                    pet.type_id,
                    pet.level,
                    pet.happiness,
                    pet.experience,
                    pet.created_at.to_rfc3339()
                );
            }
        }
        Command::Adopt { name, type_id } => {
            let outcome =
                collection.dispatch(&mut factory, PetIntent::AdoptPet { name, type_id })?;
            if let IntentOutcome::Adopted(id) = outcome {
                println!("adopted {id}");
            }
        }
        Command::Interact { id } => {
            let outcome = match parse_pet_id(&id) {
                Some(id) => {
                    collection.dispatch(&mut factory, PetIntent::InteractWithPet { id })?
                }
                None => IntentOutcome::Ignored,
            };
            match outcome {
                IntentOutcome::Interacted(result) => println!(
                    "lvl={} happiness={} xp={}{}",
                    result.level,
                    result.happiness,
                    result.experience,
                    if result.leveled_up() { " (level up!)" } else { "" }
                ),
                _ => println!("no pet with id {id}"),
            }
        }
        Command::Status => {
            println!("active pets: {}", collection.len());
            for line in collection.service_status() {
                println!(
                    "{}\tpets={}\tcapacity={}%",
                    line.cloud_service, line.pet_count, line.capacity
                );
            }
        }
        Command::Types | Command::Version => {}
    }

    Ok(())
}
