mod doctor_cmd;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use tallyforge_channels::{BotState, ChannelAdapter, DiscordAdapter, DiscordMembership, DiscordSink};
use tallyforge_commands::handlers::{HelpHandler, PayoutNowHandler, ResetWeekHandler, StatusHandler};
use tallyforge_commands::{CommandDispatcher, CommandRegistry};
use tallyforge_config::{config_dir, config_file_path, load_config, validate, TallyForgeConfig};
use tallyforge_core::{PayoutTrigger, TallyError};
use tallyforge_ledger::ContributionStore;
use tallyforge_ocr::{OcrEngine, PreprocessParams, TesseractCli};
use tallyforge_payroll::PayoutEngine;
use tallyforge_scheduler::PayoutScheduler;

#[derive(Parser)]
#[command(name = "tallyforge")]
#[command(about = "TallyForge — receipt-OCR payroll bot for Discord")]
#[command(version)]
struct Cli {
    /// Path to the config file (default: ~/.tallyforge/config.yaml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot: Discord adapter plus the payout scheduler.
    Run,
    /// Run a manual payout once from the terminal and exit.
    Payout,
    /// Clear the current week's receipts without paying out.
    ResetWeek,
    /// Check config, storage, and the OCR toolchain.
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));
    let config = load_config(&config_path).await?;

    tallyforge_logging::init(
        &config.logging.level,
        config.logging.log_dir.as_deref().map(Path::new),
    );

    match cli.command {
        Commands::Run => {
            ensure_deployable(&config)?;
            run_bot(config).await
        }
        Commands::Payout => {
            ensure_deployable(&config)?;
            run_manual_payout(&config).await
        }
        Commands::ResetWeek => reset_week(&config).await,
        Commands::Doctor => doctor_cmd::run(&config, &config_path).await,
    }
}

/// Refuse to start against a config that cannot work.
fn ensure_deployable(config: &TallyForgeConfig) -> Result<()> {
    let report = validate(config);
    for warning in &report.warnings {
        eprintln!("⚠️  {warning}");
    }
    if !report.is_valid() {
        for error in &report.errors {
            eprintln!("❌ {error}");
        }
        return Err(TallyError::Config(
            "config is not deployable; run `tallyforge doctor` for details".to_string(),
        )
        .into());
    }
    Ok(())
}

fn build_engine(config: &TallyForgeConfig) -> Result<(Arc<ContributionStore>, Arc<PayoutEngine>)> {
    let store = Arc::new(ContributionStore::open(&config.storage.db_path)?);
    let membership = Arc::new(DiscordMembership::new(
        &config.discord.token,
        config.discord.guild_id,
    ));
    let sink = Arc::new(DiscordSink::new(&config.discord.token));
    let engine = Arc::new(PayoutEngine::new(
        store.clone(),
        membership,
        sink,
        config.discord.payments_channel_id,
        config.payroll.currency_symbol.clone(),
    ));
    Ok((store, engine))
}

async fn run_bot(config: TallyForgeConfig) -> Result<()> {
    let (store, engine) = build_engine(&config)?;

    let registry = Arc::new(CommandRegistry::builtin());
    let mut dispatcher = CommandDispatcher::new(registry.clone());
    dispatcher.register("status", Arc::new(StatusHandler { engine: engine.clone() }));
    dispatcher.register("payout_now", Arc::new(PayoutNowHandler { engine: engine.clone() }));
    dispatcher.register("reset_week", Arc::new(ResetWeekHandler { engine: engine.clone() }));
    dispatcher.register(
        "help",
        Arc::new(HelpHandler {
            registry: registry.clone(),
            prefix: config.discord.command_prefix.clone(),
        }),
    );

    let ocr: Arc<dyn OcrEngine> = Arc::new(TesseractCli::new(
        config.ocr.tesseract_cmd.clone(),
        config.ocr.language.clone(),
    ));

    let payout_weekday = config
        .payroll
        .parsed_weekday()
        .context("Invalid payout weekday in config")?;
    let scheduler = PayoutScheduler::new(store.clone(), engine.clone(), payout_weekday);
    tokio::spawn(scheduler.run());

    let state = Arc::new(BotState {
        store,
        ocr,
        registry,
        dispatcher: Arc::new(dispatcher),
        proof_channel_id: config.discord.proof_channel_id,
        command_prefix: config.discord.command_prefix.clone(),
        currency_symbol: config.payroll.currency_symbol.clone(),
        preprocess: PreprocessParams {
            min_width: config.ocr.min_width,
            scale_factor: config.ocr.scale_factor,
        },
    });

    let adapter = DiscordAdapter::new(config.discord.token.clone(), state);
    info!(adapter = adapter.name(), "TallyForge starting");
    adapter.start().await
}

async fn run_manual_payout(config: &TallyForgeConfig) -> Result<()> {
    let (_store, engine) = build_engine(config)?;
    let report = engine.run_payout(PayoutTrigger::Manual).await?;

    if report.is_empty() {
        println!("Payout ran, but the week had no receipts.");
    } else {
        println!(
            "Payout published for {} member(s); the week has been cleared.",
            report.lines.len()
        );
    }
    Ok(())
}

async fn reset_week(config: &TallyForgeConfig) -> Result<()> {
    let store = ContributionStore::open(&config.storage.db_path)?;
    let deleted = store.clear_current_week().await?;
    println!("Current week cleared ({deleted} receipt(s) deleted).");
    Ok(())
}
