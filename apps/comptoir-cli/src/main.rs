//! # Comptoir CLI
//!
//! Operator command line for a Comptoir shop: one invocation, one engine
//! command, JSON out.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       CLI Startup                                       │
//! │                                                                         │
//! │  1. Parse arguments (clap)                                             │
//! │                                                                         │
//! │  2. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • Default: info,comptoir=debug; override with RUST_LOG              │
//! │                                                                         │
//! │  3. Load Configuration ───────────────────────────────────────────────► │
//! │     • defaults → comptoir.toml → COMPTOIR_* → --data-dir                │
//! │                                                                         │
//! │  4. Open Engine ──────────────────────────────────────────────────────► │
//! │     • JsonFileStore in the data dir                                     │
//! │     • Missing / corrupt records fall back to defaults                   │
//! │                                                                         │
//! │  5. Run the command, print JSON, exit 0 (or error JSON, exit 1)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod commands;
mod config;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::{category, dashboard, product, sale, seed, settings};
use config::AppConfig;

/// Comptoir - single-shop point of sale
#[derive(Parser)]
#[command(
    name = "comptoir",
    version,
    about = "Comptoir - single-shop point of sale",
    long_about = "Manage the catalog, record sales and read the dashboard of a Comptoir shop.",
    propagate_version = true
)]
pub struct Cli {
    /// Config file (default: platform config dir / comptoir.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory holding the JSON records
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Category management
    #[command(subcommand)]
    Category(category::CategoryCommands),

    /// Product management
    #[command(subcommand)]
    Product(product::ProductCommands),

    /// Sales
    #[command(subcommand)]
    Sale(sale::SaleCommands),

    /// Show the alert log, most recent first
    Notifications(settings::NotificationsArgs),

    /// Post an alert
    Notify(settings::NotifyArgs),

    /// Settings
    #[command(subcommand)]
    Settings(settings::SettingsCommands),

    /// Dashboard metrics
    Dashboard,

    /// Fill an empty shop with a demo catalog
    Seed(seed::SeedArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(cli) {
        output::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    // An explicit --config must load; the implicit one degrades to defaults.
    let mut config = match cli.config.as_deref() {
        Some(path) => AppConfig::load(Some(path))?,
        None => AppConfig::load_or_default(None),
    };
    if let Some(dir) = cli.data_dir {
        config.store.data_dir = Some(dir);
    }

    let mut engine = commands::open_engine(&config)?;
    info!(data_dir = ?config.store.data_dir, "Engine ready");

    match cli.command {
        Commands::Category(cmd) => category::execute(cmd, &mut engine),
        Commands::Product(cmd) => product::execute(cmd, &mut engine),
        Commands::Sale(cmd) => sale::execute(cmd, &mut engine),
        Commands::Notifications(args) => settings::notifications(args, &engine),
        Commands::Notify(args) => settings::notify(args, &mut engine),
        Commands::Settings(cmd) => settings::execute(cmd, &mut engine),
        Commands::Dashboard => dashboard::execute(&engine),
        Commands::Seed(args) => seed::execute(args, &mut engine),
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=comptoir_engine=trace` - Show trace for the engine only
/// - Default: INFO, DEBUG for comptoir crates
fn init_tracing() {
    // Targets match by prefix: `comptoir` covers every comptoir_* crate.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,comptoir=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
