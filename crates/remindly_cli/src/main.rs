//! Local inspection tool for a Remindly database.
//!
//! # Responsibility
//! - Verify `remindly_core` linkage without the mobile shell.
//! - List, count and add reminders against a SQLite file.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use remindly_core::{
    init_logging_from_config, parse_iso, BirthdayForm, Category, ConfigOverrides, CoreConfig,
    ReminderService, SqliteKeyValueStore,
};

#[derive(Debug, Parser)]
#[command(name = "remindly", version, about = "Inspect and edit a Remindly reminder database")]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "REMINDLY_DB_PATH")]
    db: Option<String>,

    /// Directory for rolling log files (disabled when unset)
    #[arg(long, env = "REMINDLY_LOG_DIR")]
    log_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "REMINDLY_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print core linkage info
    Ping,

    /// Print every record of one category as JSON
    List {
        /// Storage key: birthdays, anniversaries, healthCheckups, vaccinations, medicine_reminders
        category: Category,
    },

    /// Count records per category
    Stats,

    /// Add a birthday reminder
    AddBirthday {
        #[arg(long)]
        name: String,
        /// ISO-8601 date, e.g. 1990-04-12T00:00:00.000Z
        #[arg(long)]
        date: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CoreConfig::resolve(&ConfigOverrides {
        db_path: cli.db,
        log_level: cli.log_level,
        log_dir: cli.log_dir,
    });
    init_logging_from_config(&config).map_err(anyhow::Error::msg)?;

    if let Command::Ping = cli.command {
        println!("remindly_core ping={}", remindly_core::ping());
        println!("remindly_core version={}", remindly_core::core_version());
        return Ok(());
    }

    let provider = SqliteKeyValueStore::open(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    let service = ReminderService::from_provider(provider);

    match cli.command {
        Command::Ping => {}
        Command::List { category } => {
            let records = service
                .list(category)
                .with_context(|| format!("failed to load {category}"))?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Command::Stats => {
            for category in Category::ALL {
                match service.store().count(category) {
                    Ok(count) => println!("{category}: {count}"),
                    Err(err) => println!("{category}: unreadable ({err})"),
                }
            }
        }
        Command::AddBirthday { name, date } => {
            let date = parse_iso(&date).context("invalid --date")?;
            let form = BirthdayForm::default().with_name(name).with_date(date);
            let record = match service.save_birthday(&form) {
                Ok(record) => record,
                Err(err) => bail!("{}: {err}", err.user_message()),
            };
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }
    Ok(())
}
