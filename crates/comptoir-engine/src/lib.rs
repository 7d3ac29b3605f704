//! # comptoir-engine: The Comptoir Command Handler
//!
//! [`PosEngine`] is the one object the UI (or the CLI) talks to. It holds the
//! catalog, the sale history, the alert log and the settings, applies the
//! rules from `comptoir-core`, and saves what changed through a
//! `comptoir-store` backend.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UI / comptoir-cli                                                     │
//! │       │  engine.record_sale(&request)                                   │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              comptoir-engine (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   PosEngine ──► comptoir-core (rules, alerts, dashboard)       │   │
//! │  │       │                                                         │   │
//! │  │       └──────► comptoir-store (load on open, save on change)   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - `PosEngine` and its commands
//! - [`error`] - `EngineError` with machine-readable codes

pub mod engine;
pub mod error;

pub use engine::{PosEngine, SaleOutcome};
pub use error::{EngineError, EngineResult, ErrorCode};
