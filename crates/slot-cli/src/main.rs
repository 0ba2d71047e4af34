//! `slots` CLI — collect half-hour availability and pick meeting times.
//!
//! ## Usage
//!
//! ```sh
//! # Submit availability in UTC
//! slots submit --name Alice --day1 09:00,09:30
//!
//! # Submit local times; they are converted to UTC for the given date
//! slots submit --name Bob --timezone America/New_York --date 2026-03-02 --day1 09:00
//!
//! # Best pair of slots (default), best single slot, or the dual-day greedy pick
//! slots best
//! slots best --mode single --json
//! slots best --mode dual-day
//!
//! # Single or pair selection over the day-2 column
//! slots best --day 2
//!
//! # Per-slot popularity over both days
//! slots heatmap
//!
//! # Admin
//! slots list
//! slots delete Alice Bob
//! slots clear --yes
//! ```
//!
//! Configuration is read from `slots.toml` and `SLOTS_*` environment variables;
//! see [`config`].

mod config;
mod render;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use slot_engine::{
    build_index_with, convert_days, load_records, select_best, select_dual_day, split_slots,
    AvailabilityRecord, Day, Heatmap, JsonFileStore, RecordStore, SelectionMode, SlotId, SlotPolicy,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{BestMode, Config, LogConfig};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Collect half-hour availability and pick meeting times"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./slots.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Record store file, overriding the configured `store_path`
    #[arg(long, global = true)]
    store: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record one participant's availability
    Submit {
        /// Participant name
        #[arg(short, long)]
        name: String,
        /// Comma-separated half-hour slots for day 1 (HH:MM)
        #[arg(long, alias = "slots", default_value = "")]
        day1: String,
        /// Comma-separated half-hour slots for day 2 (HH:MM)
        #[arg(long, default_value = "")]
        day2: String,
        /// IANA timezone the slots are given in (UTC if omitted)
        #[arg(short, long)]
        timezone: Option<String>,
        /// Date used to resolve the timezone offset (today if omitted)
        #[arg(long, requires = "timezone")]
        date: Option<NaiveDate>,
    },
    /// Show the best meeting time(s)
    Best {
        /// Selection mode (defaults to the configured mode)
        #[arg(short, long, value_enum)]
        mode: Option<BestMode>,
        /// Day column to select from in single and pair mode
        #[arg(short, long, value_enum, default_value = "1")]
        day: DayArg,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show how many participants are available at each slot
    Heatmap {
        #[arg(long)]
        json: bool,
    },
    /// List all submitted records
    List {
        #[arg(long)]
        json: bool,
    },
    /// Delete every record submitted under the given names
    Delete {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Delete all records
    Clear {
        /// Confirm deletion of every record
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DayArg {
    #[value(name = "1")]
    One,
    #[value(name = "2")]
    Two,
}

impl From<DayArg> for Day {
    fn from(day: DayArg) -> Self {
        match day {
            DayArg::One => Day::One,
            DayArg::Two => Day::Two,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    init_logging(&config.log);
    tracing::debug!(?config, "configuration loaded");

    let store = JsonFileStore::new(&config.store_path);

    match cli.command {
        Commands::Submit {
            name,
            day1,
            day2,
            timezone,
            date,
        } => {
            let record = intake(name, &day1, &day2, timezone, date)?;
            store
                .insert(record.clone())
                .with_context(|| format!("Failed to write {}", store.path().display()))?;
            println!("Recorded availability for {}.", record.name);
        }
        Commands::Best { mode, day, json } => {
            let records = load_records(&store);
            let mode = mode.unwrap_or(config.mode);
            let text = match mode {
                BestMode::DualDay => {
                    let selection = select_dual_day(&records);
                    if json {
                        to_json(&selection)?
                    } else {
                        render::dual_day(&selection)
                    }
                }
                BestMode::Single | BestMode::Pair => {
                    let policy = if config.strict_slots {
                        SlotPolicy::Strict
                    } else {
                        SlotPolicy::Permissive
                    };
                    let day = Day::from(day);
                    let report = build_index_with(&records, policy, day);
                    if !report.rejected.is_empty() {
                        tracing::warn!(count = report.rejected.len(), "ignored invalid slot tokens");
                    }
                    let selection_mode = if mode == BestMode::Single {
                        SelectionMode::Single
                    } else {
                        SelectionMode::Pair
                    };
                    let selection = select_best(&report.index, selection_mode);
                    if selection.is_empty() && !records.is_empty() {
                        // Records exist, just none with slots on this day.
                        if json {
                            to_json(&serde_json::json!({
                                "kind": "no_availability",
                                "day": render::day_number(day),
                                "records": records.len(),
                            }))?
                        } else {
                            render::no_availability(day, records.len())
                        }
                    } else if json {
                        to_json(&selection)?
                    } else {
                        render::selection(&selection, selection_mode == SelectionMode::Pair)
                    }
                }
            };
            println!("{}", text.trim_end());
        }
        Commands::Heatmap { json } => {
            let heatmap = Heatmap::build(&load_records(&store));
            if json {
                println!("{}", to_json(&heatmap)?);
            } else {
                print!("{}", render::heatmap(&heatmap));
            }
        }
        Commands::List { json } => {
            let records = store
                .list_all()
                .with_context(|| format!("Failed to read {}", store.path().display()))?;
            if json {
                println!("{}", to_json(&records)?);
            } else {
                print!("{}", render::records(&records));
            }
        }
        Commands::Delete { names } => {
            let removed = store
                .delete(&names)
                .with_context(|| format!("Failed to update {}", store.path().display()))?;
            println!("Deleted {removed} record(s).");
        }
        Commands::Clear { yes } => {
            if !yes {
                bail!("Refusing to delete all records without --yes");
            }
            store
                .clear()
                .with_context(|| format!("Failed to clear {}", store.path().display()))?;
            println!("All records deleted.");
        }
    }

    Ok(())
}

/// Build a validated record from submitted form values.
///
/// Without a timezone the slots must already be catalog UTC slots. With one,
/// they are local catalog slots converted to UTC on `date` (today by default).
fn intake(
    name: String,
    day1: &str,
    day2: &str,
    timezone: Option<String>,
    date: Option<NaiveDate>,
) -> Result<AvailabilityRecord> {
    let (times, times_day2) = match &timezone {
        Some(tz) => {
            let on = date.unwrap_or_else(|| Utc::now().date_naive());
            convert_days(day1, day2, tz, on)
                .with_context(|| format!("Failed to convert slots from {tz}"))?
        }
        None => {
            for token in split_slots(day1).chain(split_slots(day2)) {
                token.parse::<SlotId>()?;
            }
            (join(day1), join(day2))
        }
    };

    let record = AvailabilityRecord {
        name: name.trim().to_string(),
        timezone,
        times,
        times_day2,
    };
    record.validate()?;
    Ok(record)
}

fn join(raw: &str) -> String {
    split_slots(raw).collect::<Vec<_>>().join(",")
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(log: &LogConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));

    if log.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
