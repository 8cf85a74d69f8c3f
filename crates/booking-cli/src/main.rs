//! `roombook` CLI: list rooms, quote prices, and replay booking sessions.
//!
//! ## Usage
//!
//! ```sh
//! # Show the room catalog
//! roombook rooms
//!
//! # Price a booking without storing it
//! roombook quote --room 101 --start 2026-03-16T03:30:00Z --end 2026-03-16T05:30:00Z
//!
//! # Replay a session script (stdin → stdout) with a pinned clock
//! roombook replay --now 2026-03-01T00:00:00Z < session.json
//!
//! # Custom policy and room catalog
//! roombook --policy policy.json --rooms rooms.json replay -i session.json -o results.json
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=debug` for per-operation detail.

mod replay;

use std::io::{self, Read};

use anyhow::{Context, Result};
use booking_engine::time::parse_timestamp;
use booking_engine::{BookingLedger, BookingPolicy, FixedClock, PolicyConfig, RoomCatalog};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "roombook",
    version,
    about = "Meeting-room booking engine CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Booking policy JSON file (peak windows, multiplier, timezone, limits)
    #[arg(long, global = true)]
    policy: Option<String>,

    /// Room catalog JSON file (array of {id, name, baseHourlyRate, capacity})
    #[arg(long, global = true)]
    rooms: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the room catalog as JSON
    Rooms,
    /// Price an interval in a room, with the per-hour breakdown
    Quote {
        /// Room id
        #[arg(long)]
        room: String,
        /// Start time (ISO 8601)
        #[arg(long)]
        start: String,
        /// End time (ISO 8601)
        #[arg(long)]
        end: String,
    },
    /// Run a JSON array of booking operations against a fresh ledger
    Replay {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Pin the clock to this instant (defaults to the current time)
        #[arg(long)]
        now: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let policy = load_policy(cli.policy.as_deref())?;
    let catalog = load_catalog(cli.rooms.as_deref())?;

    match cli.command {
        Commands::Rooms => {
            let json = serde_json::to_string_pretty(catalog.all())?;
            println!("{}", json);
        }
        Commands::Quote { room, start, end } => {
            let room = catalog.get(&room)?;
            let start = parse_timestamp(&start, "start")?;
            let end = parse_timestamp(&end, "end")?;
            let quote = booking_engine::quote(start, end, room.base_hourly_rate, &policy)
                .context("Failed to price interval")?;
            println!("{}", serde_json::to_string_pretty(&quote)?);
        }
        Commands::Replay { input, output, now } => {
            let script = read_input(input.as_deref())?;
            let operations: Vec<replay::Operation> =
                serde_json::from_str(&script).context("Failed to parse replay script")?;

            let now = match now {
                Some(raw) => parse_timestamp(&raw, "now")?,
                None => Utc::now(),
            };
            tracing::info!(operations = operations.len(), %now, "replaying session");

            let ledger = BookingLedger::with_clock(policy, FixedClock::new(now));
            let results = replay::run(operations, &ledger, &catalog);
            let json = serde_json::to_string_pretty(&results)?;
            write_output(output.as_deref(), &json)?;
        }
    }

    Ok(())
}

fn load_policy(path: Option<&str>) -> Result<BookingPolicy> {
    let Some(path) = path else {
        return Ok(BookingPolicy::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read policy file: {}", path))?;
    let config = PolicyConfig::from_json(&raw)?;
    BookingPolicy::try_from(config).with_context(|| format!("Invalid policy in {}", path))
}

fn load_catalog(path: Option<&str>) -> Result<RoomCatalog> {
    let Some(path) = path else {
        return Ok(RoomCatalog::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rooms file: {}", path))?;
    RoomCatalog::from_json(&raw).with_context(|| format!("Invalid room catalog in {}", path))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
