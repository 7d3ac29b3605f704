//! # CLI Commands
//!
//! Each submodule maps one clap subcommand tree onto engine calls.
//!
//! ## Command Categories
//! - [`category`] - Category add / delete / list
//! - [`product`] - Product add / update / delete / list / search
//! - [`sale`] - Sale quote / record / list
//! - [`settings`] - Settings, alert log, manual alerts
//! - [`dashboard`] - Dashboard summary
//! - [`seed`] - Demo catalog

pub mod category;
pub mod dashboard;
pub mod product;
pub mod sale;
pub mod seed;
pub mod settings;

use anyhow::{Context, Result};
use comptoir_engine::PosEngine;
use comptoir_store::{JsonFileStore, StoreConfig};

use crate::config::AppConfig;

/// The engine type every command runs against.
pub type Engine = PosEngine<JsonFileStore>;

/// Opens the engine on the configured data directory.
pub fn open_engine(config: &AppConfig) -> Result<Engine> {
    let data_dir = config.data_dir()?;
    let store = JsonFileStore::open(StoreConfig::new(&data_dir).pretty(config.store.pretty))
        .with_context(|| format!("opening data directory {}", data_dir.display()))?;

    Ok(PosEngine::open(store).with_dashboard_options(config.dashboard_options()?))
}
