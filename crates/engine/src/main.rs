//! Character sheet command-line tool.
//!
//! A thin wrapper over the engine library for working with character files
//! by hand. Run without arguments for usage.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use charsheet_domain::value_objects::CharacterName;
use charsheet_domain::Character;
use charsheet_engine::{
    CharacterFileStore, ClockPort, FsPortraitLoader, PortraitLoader, StorageSettings, SystemClock,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "\
usage: charsheet <command> [args]

commands:
  new <path> <name>          create a character file
  show <path>                print a character summary
  validate <path>            check a character file
  timeline <path>            list narrative events in order
  portrait <path> <image>    set the character portrait from an image file
  backups <path>             list backups of a character file
  restore <backup> <path>    replace a character file with a backup
  recent                     list recently used files
  forget <path>              remove a file from the recent list";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    New { path: PathBuf, name: String },
    Show { path: PathBuf },
    Validate { path: PathBuf },
    Timeline { path: PathBuf },
    Portrait { path: PathBuf, image: PathBuf },
    Backups { path: PathBuf },
    Restore { backup: PathBuf, path: PathBuf },
    Recent,
    Forget { path: PathBuf },
}

impl Command {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let Some((name, rest)) = args.split_first() else {
            bail!("{}", USAGE);
        };
        let path = |i: usize| -> anyhow::Result<PathBuf> {
            rest.get(i)
                .map(PathBuf::from)
                .with_context(|| format!("missing argument for '{}'\n\n{}", name, USAGE))
        };

        let command = match name.as_str() {
            "new" => {
                let path = path(0)?;
                if rest.len() < 2 {
                    bail!("missing character name\n\n{}", USAGE);
                }
                Command::New {
                    path,
                    name: rest[1..].join(" "),
                }
            }
            "show" => Command::Show { path: path(0)? },
            "validate" => Command::Validate { path: path(0)? },
            "timeline" => Command::Timeline { path: path(0)? },
            "portrait" => Command::Portrait {
                path: path(0)?,
                image: path(1)?,
            },
            "backups" => Command::Backups { path: path(0)? },
            "restore" => Command::Restore {
                backup: path(0)?,
                path: path(1)?,
            },
            "recent" => Command::Recent,
            "forget" => Command::Forget { path: path(0)? },
            other => bail!("unknown command '{}'\n\n{}", other, USAGE),
        };
        Ok(command)
    }
}

fn main() -> anyhow::Result<()> {
    load_dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "charsheet_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    let settings = StorageSettings::from_env();
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
    let mut store = CharacterFileStore::new(settings, clock.clone());

    run(command, &mut store, clock.as_ref())
}

fn run(
    command: Command,
    store: &mut CharacterFileStore,
    clock: &dyn ClockPort,
) -> anyhow::Result<()> {
    match command {
        Command::New { path, name } => {
            if path.exists() {
                bail!("{} already exists", path.display());
            }
            let name = CharacterName::new(name)?;
            let mut character = Character::new(name, clock.now());
            store.save(&mut character, &path)?;
            println!("Created {} ({})", character.name(), character.id());
        }
        Command::Show { path } => {
            let character = store.load(&path)?;
            print_summary(&character);
        }
        Command::Validate { path } => {
            store.validate_file(&path)?;
            println!("{}: ok", path.display());
        }
        Command::Timeline { path } => {
            let character = store.load(&path)?;
            if character.narrative_events().is_empty() {
                println!("No events");
            }
            for event in character.narrative_events() {
                let date = if event.date().is_empty() {
                    "undated"
                } else {
                    event.date()
                };
                println!(
                    "{:>20}  [{:>2}] {} ({:?})",
                    date,
                    event.importance(),
                    event.title(),
                    event.timeline_key().confidence()
                );
            }
        }
        Command::Portrait { path, image } => {
            let loader = FsPortraitLoader::new(store.settings().max_portrait_bytes);
            let encoded = loader.load_encoded(&image)?;
            let mut character = store.load(&path)?;
            character.set_image_data(Some(encoded), clock.now());
            store.save(&mut character, &path)?;
            println!("Portrait set from {}", image.display());
        }
        Command::Backups { path } => {
            let backups = store.list_backups(&path)?;
            if backups.is_empty() {
                println!("No backups of {}", path.display());
            }
            for backup in backups {
                println!("{}", backup.path.display());
            }
        }
        Command::Restore { backup, path } => {
            let previous = store.restore_backup(&backup, &path)?;
            println!("Restored {} from {}", path.display(), backup.display());
            if let Some(previous) = previous {
                println!("Previous content kept in {}", previous.display());
            }
        }
        Command::Recent => {
            if store.recent_files().is_empty() {
                println!("No recent files");
            }
            for file in store.recent_files() {
                println!("{}", file.display());
            }
        }
        Command::Forget { path } => {
            if store.forget_recent(&path)? {
                println!("Removed {} from recent files", path.display());
            } else {
                println!("{} was not in recent files", path.display());
            }
        }
    }
    Ok(())
}

fn print_summary(character: &Character) {
    let profile = character.enneagram();
    let stats = character.stats();

    println!("{} (level {})", character.name(), character.level().value());
    println!("  id:        {}", character.id());
    println!(
        "  enneagram: {} ({}, integrates to {}, disintegrates to {})",
        profile.label(),
        profile.main_type().display_name(),
        profile.integration_point(),
        profile.disintegration_point()
    );
    for (ability, value) in stats.iter() {
        println!("  {:<13} {:>2} ({:+})", ability.display_name(), value, stats.modifier(ability));
    }
    println!("  total {} / average {:.1}", stats.total_points(), stats.average());
    if !character.relationships().is_empty() {
        println!("  relationships:");
        for rel in character.relationships() {
            println!(
                "    {} - {} ({}/10)",
                rel.target_name(),
                rel.relationship_type().display_name(),
                rel.strength()
            );
        }
    }
    println!("  events: {}", character.narrative_events().len());
    if character.image_data().is_some() {
        println!("  portrait: yes");
    }
}

/// Load `.env.local` then `.env` from the working directory, if present.
fn load_dotenv() {
    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = Path::new(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
