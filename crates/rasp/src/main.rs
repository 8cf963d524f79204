use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Parser;
use guap_rasp::{RaspClient, RaspConfig, Search};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Checks whether a GUAP room is free, slot by slot, on a given weekday.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Building title, e.g. "Ленсовета 14"
    #[arg(long)]
    building: String,

    /// Room title, e.g. "14-09"
    #[arg(long)]
    room: String,

    /// Weekday title, e.g. "Понедельник"
    #[arg(long)]
    day: String,

    /// Slot to check; repeat for several. Defaults to 1 through 6
    #[arg(long = "slot")]
    slots: Vec<u8>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// API base URL (overrides the config file and RASP_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print the selected day as JSON
    #[arg(long)]
    dump: bool,
}

fn load_config(args: &Args) -> anyhow::Result<RaspConfig> {
    let config = match &args.config {
        Some(path) => RaspConfig::load_from_file(path)
            .map_err(|e| anyhow!("{e}"))
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => RaspConfig::default(),
    };

    let mut config = config
        .apply_env()
        .map_err(|e| anyhow!("{e}"))
        .context("Invalid environment override")?;

    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.timeout_secs = timeout_secs;
    }

    Ok(config)
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    info!(base_url = %config.base_url(), timeout_secs = config.timeout_secs, "Using timetable API");

    let client = RaspClient::with_config(config)?;
    let room = Search::new(client)
        .select_building(&args.building)
        .await?
        .select_room(&args.room)
        .await?;
    let day = room.select_day(&args.day)?;

    if args.dump {
        println!("{}", serde_json::to_string_pretty(day.day())?);
    }

    let slots = if args.slots.is_empty() {
        (1..=6).collect()
    } else {
        args.slots
    };

    println!("{} / {} / {}", args.building, args.room, args.day);
    for number in slots {
        let slot = day.select_slot(number);
        println!("Пара № {number}: {}", slot.evaluate_occupancy());
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(Args::parse()).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}
