use bridge_client::HttpBridge;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use configuration::Config;
use core_types::{ConvictionBand, RegimeReport, RegimeSeverity};
use engine::ScanEngine;
use history::LedgerStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// The main entry point for the Sentinel regime scanner.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if one exists.
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config()?;
    tracing::debug!(bridge = %config.bridge.url, "configuration loaded");

    // Execute the appropriate command
    match cli.command {
        Commands::Scan(args) => handle_scan(args, &config).await?,
        Commands::Audit(args) => handle_audit(args, &config).await?,
        Commands::History => handle_history(&config),
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A macro regime scanner over a remote analysis bridge.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one scan and print the regime report.
    Scan(ScanArgs),
    /// Run one scan and print only the audit block (pipe-friendly).
    Audit(AuditArgs),
    /// Show the rolling history of past scans.
    History,
}

#[derive(Parser)]
struct ScanArgs {
    /// The instrument to scan (e.g. "USDJPY=X"). Falls back to the
    /// configured default.
    #[arg(long)]
    instrument: Option<String>,

    /// Report mode passed through to the bridge (e.g. "macro").
    #[arg(long)]
    mode: Option<String>,

    /// Also print the audit block after the report.
    #[arg(long)]
    audit: bool,
}

#[derive(Parser)]
struct AuditArgs {
    /// The instrument to scan (e.g. "USDJPY=X"). Falls back to the
    /// configured default.
    #[arg(long)]
    instrument: Option<String>,

    /// Report mode passed through to the bridge (e.g. "macro").
    #[arg(long)]
    mode: Option<String>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn build_engine(config: &Config) -> ScanEngine {
    let bridge = Arc::new(HttpBridge::new(&config.bridge));
    let store = LedgerStore::new(&config.scanner.history_path);
    ScanEngine::new(bridge, store)
}

/// Handles the orchestration of a single scan invocation.
async fn handle_scan(args: ScanArgs, config: &Config) -> anyhow::Result<()> {
    let instrument = args
        .instrument
        .unwrap_or_else(|| config.scanner.default_instrument.clone());

    let mut engine = build_engine(config);
    let report = match engine.scan(&instrument, args.mode.as_deref()).await {
        Ok(report) => report,
        Err(e) => {
            // Failure is terminal for this invocation; re-running the
            // command is the retry.
            eprintln!("SCAN FAILED: {}", e);
            std::process::exit(1);
        }
    };

    print_report(&report);

    if args.audit {
        println!();
        println!("{}", audit::render(&report));
    }

    Ok(())
}

/// Scans and emits only the audit block, for piping into clipboard tools.
async fn handle_audit(args: AuditArgs, config: &Config) -> anyhow::Result<()> {
    let instrument = args
        .instrument
        .unwrap_or_else(|| config.scanner.default_instrument.clone());

    let mut engine = build_engine(config);
    let report = match engine.scan(&instrument, args.mode.as_deref()).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("SCAN FAILED: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", audit::render(&report));
    Ok(())
}

/// Renders the persisted scan history as a table.
fn handle_history(config: &Config) {
    let ledger = LedgerStore::new(&config.scanner.history_path).load();
    if ledger.is_empty() {
        println!("No scan history yet.");
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["TIME", "INSTRUMENT", "REGIME", "CONVICTION"]);
    for entry in ledger.entries() {
        table.add_row(vec![
            entry.time.clone(),
            entry.instrument.clone(),
            entry.regime.clone(),
            format!("{}/4", entry.conviction),
        ]);
    }
    println!("{table}");
}

/// Prints the human-facing scan summary block.
fn print_report(report: &RegimeReport) {
    let severity = match report.severity() {
        RegimeSeverity::Critical => "CRITICAL",
        RegimeSeverity::Elevated => "ELEVATED",
        RegimeSeverity::Benign => "BENIGN",
        RegimeSeverity::Unknown => "UNKNOWN",
    };
    let band = match report.conviction_band() {
        ConvictionBand::Strong => "strong",
        ConvictionBand::Moderate => "moderate",
        ConvictionBand::Weak => "weak",
    };

    println!("--- {} ---", report.instrument);
    println!("REGIME: {} [{}]", report.regime, severity);
    println!(
        "CONVICTION: {}/4 ({})",
        report.scores.conviction, band
    );
    if let Some(stress) = report.scores.stress {
        println!("SOVEREIGN STRESS: {}/4", stress);
    }
    if let Some(completeness) = report.completeness {
        println!("INTEGRITY: {}%", completeness);
    }
    if let Some(alignment) = report.alignment {
        println!("ALIGNMENT: {}%", alignment);
    }
    if let Some(alpha) = &report.alpha {
        println!("ALPHA: {}", alpha);
    }
    if let Some(analysis) = &report.analysis {
        println!();
        println!("{}", analysis);
    }
}
