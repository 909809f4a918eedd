// In app/src/main.rs

use anyhow::{Context, Result};
use app_config::Settings;
use clap::{Args, Parser, Subcommand};
use core_types::{ExposureState, RandomIdGenerator, TradeIntent};
use execution::{ExecutionWrapper, OrderSubmitter, PaperSubmitter};
use journal::Journal;
use risk::{AccountState, PreTradeGuard, RiskEngine};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::prelude::*;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "A pre-trade risk gate. Sizes, vets and journals trades before anything reaches a venue."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs the pre-trade guard on a trade and prints the decision as JSON.
    Evaluate {
        #[command(flatten)]
        trade: TradeArgs,
    },

    /// Drafts an order, asks for the confirmation phrase and submits it to the paper venue.
    Trade {
        #[command(flatten)]
        trade: TradeArgs,

        /// Confirmation text. Read from stdin when omitted.
        #[arg(long)]
        confirm: Option<String>,
    },
}

/// Account, exposure and intent flags shared by every subcommand.
#[derive(Args, Debug)]
struct TradeArgs {
    /// The trading symbol (e.g., "BTCUSDT").
    #[arg(short, long)]
    symbol: String,

    /// "long" or "short".
    #[arg(long)]
    side: String,

    #[arg(long)]
    entry: Decimal,

    #[arg(long)]
    stop: Decimal,

    #[arg(long, default_value = "1")]
    leverage: Decimal,

    #[arg(long, default_value = "1")]
    contract_multiplier: Decimal,

    /// Start-of-day equity.
    #[arg(long)]
    equity: Decimal,

    /// Realized PnL so far today. Negative for a loss.
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pnl: Decimal,

    #[arg(long, default_value_t = 0)]
    consecutive_losses: u32,

    /// Engage the manual kill switch.
    #[arg(long)]
    kill_switch: bool,

    /// Risk already committed to open positions, as a fraction of equity.
    #[arg(long, default_value = "0")]
    open_risk: Decimal,

    /// An open position already exists on this symbol.
    #[arg(long)]
    has_position: bool,
}

impl TradeArgs {
    fn account(&self) -> AccountState {
        AccountState {
            start_of_day_equity: self.equity,
            realized_pnl_today: self.pnl,
            consecutive_losses: self.consecutive_losses,
            manual_kill_switch: self.kill_switch,
        }
    }

    fn exposure(&self) -> ExposureState {
        ExposureState {
            open_risk_percent: self.open_risk,
            has_open_position_same_symbol: self.has_position,
        }
    }

    fn intent(&self) -> TradeIntent {
        TradeIntent::new(self.symbol.as_str(), &self.side, self.entry, self.stop, self.leverage)
            .with_contract_multiplier(self.contract_multiplier)
    }
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let settings = app_config::load_settings().context("failed to load settings")?;

    // Logs go to stderr so stdout carries only JSON.
    let level: tracing::Level = settings
        .app
        .log_level
        .parse()
        .with_context(|| format!("invalid log level '{}'", settings.app.log_level))?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();

    let cli = Cli::parse();

    tracing::info!(environment = %settings.app.environment, "Starting riskgate");

    match cli.command {
        Commands::Evaluate { trade } => handle_evaluate(&settings, &trade)?,
        Commands::Trade { trade, confirm } => handle_trade(&settings, &trade, confirm).await?,
    }

    Ok(())
}

fn build_guard(settings: &Settings) -> Result<PreTradeGuard> {
    let engine = RiskEngine::new(settings.risk.clone())?;
    Ok(PreTradeGuard::new(engine))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn flush(journal: &Journal) -> Result<()> {
    match journal.flush_to_file(None)? {
        Some(path) => tracing::info!(path = %path.display(), "Journal flushed."),
        None => tracing::debug!("Journal empty, nothing flushed."),
    }
    Ok(())
}

// --- "Evaluate" Subcommand Logic ---

fn handle_evaluate(settings: &Settings, args: &TradeArgs) -> Result<()> {
    let guard = build_guard(settings)?;
    let journal = Journal::new(settings.journal.log_dir.clone());

    let intent = args.intent();
    let exposure = args.exposure();
    let decision = guard.evaluate(&args.account(), &intent, &exposure);
    journal.record_decision(&decision, Some(&intent), Some(&exposure));

    print_json(&decision)?;
    flush(&journal)
}

// --- "Trade" Subcommand Logic ---

async fn handle_trade(settings: &Settings, args: &TradeArgs, confirm: Option<String>) -> Result<()> {
    let journal = Arc::new(Journal::new(settings.journal.log_dir.clone()));
    let wrapper = ExecutionWrapper::with_settings(
        build_guard(settings)?,
        journal.clone(),
        settings.execution.clone(),
        Arc::new(RandomIdGenerator::short()),
    )?;

    // The journal is flushed whether or not the trade went through.
    let outcome = run_trade(&wrapper, args, confirm).await;
    flush(&journal)?;
    outcome
}

async fn run_trade(wrapper: &ExecutionWrapper, args: &TradeArgs, confirm: Option<String>) -> Result<()> {
    let (decision, draft) = wrapper.draft_order(&args.account(), &args.intent(), &args.exposure());
    print_json(&decision)?;

    let Some(draft) = draft else {
        tracing::warn!(reason = %decision.reason, "Trade blocked before drafting.");
        return Ok(());
    };
    print_json(&draft)?;

    let text = match confirm {
        Some(text) => text,
        None => prompt_confirmation(wrapper.confirmation_phrase())?,
    };
    let confirmed = wrapper.confirm_order(Some(draft), &text)?;

    let mut submitter = PaperSubmitter::new();
    tracing::info!(submitter = submitter.name(), "Submitting confirmed order.");
    let receipt = submitter.submit(&confirmed).await?;
    print_json(&receipt)
}

fn prompt_confirmation(phrase: &str) -> Result<String> {
    eprint!("Type {phrase} to submit this order: ");
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read confirmation from stdin")?;
    Ok(line)
}
