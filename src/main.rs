use chrono::{Local, NaiveDate};
use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use coffeeconnection::calendar::PeriodState;
use coffeeconnection::chat::{ConsoleNotifier, Notifier, SlackClient};
use coffeeconnection::RunSettings;
use coffeeconnection::domain::RunOutcome;
use coffeeconnection::history::HistoryStore;
use config::Config;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = config::data_dir().join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("coffeeconnection.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    match cli.action() {
        Commands::Run { dry_run } => handle_run_command(today, dry_run, config).await,
        Commands::Status => handle_status_command(today, config),
        Commands::Reset => handle_reset_command(config),
    }
}

async fn handle_run_command(today: NaiveDate, dry_run: bool, config: &Config) -> Result<()> {
    info!("Running for {} (dry run: {})", today, dry_run);

    let mut settings = config.run_settings()?;
    let slack = SlackClient::new(config.slack_config(dry_run)?).context("Failed to create Slack client")?;

    // A dry run works on a scratch copy so the real history is left alone
    let scratch = if dry_run {
        let scratch = std::env::temp_dir().join(format!("coffeeconnection-dry-run-{}.txt", std::process::id()));
        if settings.history_file.exists() {
            fs::copy(&settings.history_file, &scratch).context("Failed to copy history for dry run")?;
        }
        settings.history_file = scratch.clone();
        Some(scratch)
    } else {
        None
    };

    let console = ConsoleNotifier::new();
    let notifier: &dyn Notifier = if dry_run { &console } else { &slack };

    let mut rng = rand::rng();
    let outcome = coffeeconnection::coffeeconnection(&settings, &slack, notifier, today, &mut rng).await;

    if let Some(scratch) = scratch {
        let _ = fs::remove_file(scratch);
    }

    report_outcome(&outcome.context("Matching run failed")?);
    Ok(())
}

fn report_outcome(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::DayOff => println!("{}", "No coffee today".yellow()),
        RunOutcome::NothingToDo => println!("{}", "Everyone already had a coffee this period".cyan()),
        RunOutcome::Matched { matches, leftover } => {
            for pair in matches {
                println!("{} {}", "Matched:".green(), pair);
            }
            if !leftover.is_empty() {
                println!("{} {} still waiting", "Queue:".cyan(), leftover.len());
            }
        }
    }
}

fn handle_status_command(today: NaiveDate, config: &Config) -> Result<()> {
    info!("Status for {}", today);
    let settings: RunSettings = config.run_settings()?;
    let period: PeriodState = settings.period(today);

    println!("{} {}", "Date:".green(), today);
    println!("  Epoch: {} ({}-week period)", settings.epoch, settings.week_period);
    if !period.epoch_is_aligned() {
        println!("  {}", "Epoch is not a Monday, days left may be off".yellow());
    }
    println!("  Days since epoch: {}", period.days_since_epoch());
    println!("  Reset day: {}", period.is_reset_day());
    println!("  Day off: {}", period.is_off(&settings.days_off));
    println!("  Working days left: {}", period.working_days_left());

    let store = settings.store();
    let history = store.load().context("Failed to load history")?;
    println!("{} {}", "History:".green(), store.path().display());
    println!("  {} member(s) already had a coffee", history.len());
    for member in history.iter() {
        println!("    {}", member);
    }
    Ok(())
}

fn handle_reset_command(config: &Config) -> Result<()> {
    let store = HistoryStore::new(&config.history_file);
    info!("Manual reset of {}", store.path().display());
    store.reset().context("Failed to reset history")?;
    println!("{} {}", "Reset:".red(), store.path().display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config: Config = config::load_config(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config.as_ref().map(PathBuf::as_path));

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
