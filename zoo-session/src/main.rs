//! Headless zoo session runner.
//!
//! Run with: cargo run --bin zoo-headless -- --config zoo.toml
//!
//! Loads the saved profile, plays a scripted session (buy an animal, play
//! with everyone, let the zoo decay), prints moods and counters, and saves
//! the profile again. With `--realtime-secs` the tokio timers drive decay
//! instead of simulated time.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use parking_lot::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use zoo_core::config::{GeneralConfig, ZooConfig};
use zoo_core::persistence::{ProfileStore, SqliteProfileStore};
use zoo_core::types::{AnimalId, Language};
use zoo_session::{SessionDriver, Zoo};

#[derive(Parser)]
#[command(name = "zoo-headless")]
#[command(about = "Play a scripted zoo session without a UI")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "ZOO_CONFIG")]
    config: Option<PathBuf>,

    /// Override the profile database path
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Minutes of neglect to simulate after playing
    #[arg(long, default_value_t = 5)]
    neglect_minutes: u64,

    /// Run the tokio timers for this many seconds instead of simulating
    #[arg(long, default_value_t = 0)]
    realtime_secs: u64,

    /// Switch the UI language (de, en, es, fr, ja)
    #[arg(long)]
    language: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json: bool,

    /// Print session events as JSON lines
    #[arg(long)]
    events: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ZooConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ZooConfig::default(),
    };
    if let Some(path) = &args.profile {
        config.persistence.path = path.display().to_string();
    }
    init_tracing(&config.general, args.json);

    let store = SqliteProfileStore::from_config(&config.persistence)
        .with_context(|| format!("opening profile at {}", config.persistence.path))?;
    let saved = store.load().context("reading saved profile")?;
    if saved.is_none() {
        info!("No saved profile, starting fresh");
    }

    let mut zoo = Zoo::bundled(config, saved).context("building zoo")?;
    if let Some(code) = &args.language {
        match code.parse::<Language>() {
            Ok(language) => zoo.set_language(language),
            Err(e) => warn!(error = %e, "Ignoring language"),
        }
    }

    println!("Stars: {}  Language: {}", zoo.stars(), zoo.language().native_name());
    buy_cheapest(&mut zoo);
    play_with_everyone(&mut zoo)?;
    print_moods(&zoo)?;

    let zoo = if args.realtime_secs > 0 {
        let shared = Arc::new(Mutex::new(zoo));
        let driver = SessionDriver::spawn(Arc::clone(&shared));
        tokio::time::sleep(Duration::from_secs(args.realtime_secs)).await;
        driver.shutdown().await;
        Arc::try_unwrap(shared)
            .map_err(|_| anyhow::anyhow!("zoo still shared after shutdown"))?
            .into_inner()
    } else {
        let neglect = neglect_duration(args.neglect_minutes);
        zoo.advance_decay(neglect);
        zoo.tick_clock(neglect);
        zoo.stop();
        zoo
    };

    println!("\nAfter {} of neglect (clock {}):", describe_wait(&args), zoo.clock());
    print_moods(&zoo)?;

    if args.events {
        for event in zoo.drain_events() {
            println!("{}", serde_json::to_string(&event)?);
        }
    }

    zoo.save_profile(&store).context("saving profile")?;
    println!("\nSaved {} stars to {}", zoo.stars(), store.path().display());
    print!("\n{}", zoo.counters().snapshot().to_prometheus());
    Ok(())
}

fn init_tracing(general: &GeneralConfig, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&general.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json || general.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Buy the cheapest locked animal the balance covers, if any.
fn buy_cheapest(zoo: &mut Zoo) {
    let stars = zoo.stars();
    let pick = zoo
        .registry()
        .locked()
        .filter(|a| a.cost <= stars)
        .min_by_key(|a| (a.cost, a.id))
        .map(|a| (a.id, a.name.clone()));
    match pick {
        Some((id, name)) => match zoo.purchase_unlock(id) {
            Ok(receipt) => println!("Bought {name} for {} stars", receipt.cost),
            Err(e) => warn!(error = %e, "Purchase failed"),
        },
        None => println!("Nothing affordable in the shop"),
    }
}

/// Open every unlocked animal's game, report a short run of progress and
/// settle it.
fn play_with_everyone(zoo: &mut Zoo) -> Result<()> {
    let ids: Vec<AnimalId> = zoo.registry().unlocked().map(|a| a.id).collect();
    for id in ids {
        let session = zoo.start_game(id)?;
        let mut report = session.reporter();
        for progress in [20.0, 55.0, 90.0] {
            report(progress);
        }
        let receipt = zoo.finish_game(session)?;
        println!(
            "Played with {id}: +{} stars (balance {})",
            receipt.stars_granted, receipt.balance
        );
        zoo.step_world(16.0);
    }
    Ok(())
}

fn print_moods(zoo: &Zoo) -> Result<()> {
    let ids: Vec<AnimalId> = zoo.registry().unlocked().map(|a| a.id).collect();
    for id in ids {
        let report = zoo.mood_of(id)?;
        let vitals = zoo.registry().get(id)?.vitals;
        println!("  {} {}  [{vitals}]", report.emoji, report.message());
    }
    Ok(())
}

/// Simulated neglect; absurdly large inputs saturate instead of overflowing.
fn neglect_duration(minutes: u64) -> Duration {
    Duration::from_secs(minutes.saturating_mul(60))
}

fn describe_wait(args: &Args) -> String {
    if args.realtime_secs > 0 {
        format!("{}s (live timers)", args.realtime_secs)
    } else {
        format!("{} min", args.neglect_minutes)
    }
}
