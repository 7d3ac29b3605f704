//! # comptoir-store: Persistence Layer for Comptoir
//!
//! This crate provides the key-value store the engine persists its state to.
//! Each piece of state is one named JSON document.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Comptoir Data Flow                               │
//! │                                                                         │
//! │  PosEngine::record_sale                                                │
//! │       │  save(pos-products), save(pos-sales), save(pos-notifications)  │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 comptoir-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ KeyValueStore │    │ JsonFileStore │    │ MemoryStore  │  │   │
//! │  │   │  (store.rs)   │◄───│  (file.rs)    │    │ (memory.rs)  │  │   │
//! │  │   │ load_or_      │    │ <key>.json    │    │ HashMap      │  │   │
//! │  │   │ default, save │    │ atomic write  │    │ tests        │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/comptoir/pos-*.json                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `KeyValueStore` trait and typed helpers
//! - [`file`] - File-backed store and its configuration
//! - [`memory`] - In-memory store
//! - [`keys`] - Record names
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use comptoir_store::{JsonFileStore, KeyValueStore, StateKey, StoreConfig};
//!
//! let mut store = JsonFileStore::open(StoreConfig::new("./data"))?;
//! let settings = store.load_or_default(StateKey::Settings, Settings::default());
//! store.save(StateKey::Settings, &settings)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod file;
pub mod keys;
pub mod memory;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use file::{JsonFileStore, StoreConfig};
pub use keys::StateKey;
pub use memory::MemoryStore;
pub use store::KeyValueStore;
