//! # comptoir-core: Pure Business Logic for Comptoir
//!
//! This crate is the **heart** of Comptoir. It holds the catalog, the sale
//! transaction rules, the alert rules and the dashboard aggregation as pure
//! code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Comptoir Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  UI layer / comptoir-cli                        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              comptoir-engine (PosEngine)                        │   │
//! │  │    record_sale, add_product, delete_category, dashboard ...     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ comptoir-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌─────────────┐ ┌──────────┐ ┌─────────────┐    │   │
//! │  │   │ catalog  │ │ transaction │ │  alerts  │ │  dashboard  │    │   │
//! │  │   │ Category │ │ quote_sale  │ │ AlertLog │ │ totals      │    │   │
//! │  │   │ Product  │ │ commit_sale │ │ email    │ │ top sellers │    │   │
//! │  │   └──────────┘ └─────────────┘ └──────────┘ └─────────────┘    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK READS • PURE FUNCTIONS                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, Product, Sale, Notification, Settings)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Input shape validation
//! - [`catalog`] - Catalog Store (categories, products, stock adjustment)
//! - [`transaction`] - Sale lookup, validation, derivation and commit
//! - [`alerts`] - Append-only alert log with simulated email expansion
//! - [`dashboard`] - Read-only derived metrics
//!
//! ## Example Usage
//!
//! ```rust
//! use comptoir_core::catalog::Catalog;
//! use comptoir_core::transaction::{commit_sale, SaleRequest, SalesLedger};
//! use comptoir_core::{Money, NewCategory, NewProduct};
//!
//! let mut catalog = Catalog::default();
//! let drinks = catalog
//!     .add_category(NewCategory::new("Boissons", "🥤"))
//!     .unwrap();
//! let cola = catalog
//!     .add_product(NewProduct {
//!         name: "Cola".into(),
//!         category_id: drinks.id.clone(),
//!         stock: 12,
//!         sale_price: Money::from_major(100),
//!         purchase_price: Money::from_major(60),
//!     })
//!     .unwrap();
//!
//! let mut ledger = SalesLedger::default();
//! let committed = commit_sale(
//!     &mut catalog,
//!     &mut ledger,
//!     &SaleRequest::new(&cola.id, 2),
//!     chrono::Utc::now(),
//! )
//! .unwrap();
//!
//! assert_eq!(committed.sale.total, Money::from_major(200));
//! assert_eq!(committed.product.stock, 10);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod alerts;
pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod money;
pub mod transaction;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Products with `0 < stock <= LOW_STOCK_THRESHOLD` are "low stock".
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Number of products shown in the top sellers ranking.
pub const TOP_SELLERS_LIMIT: usize = 5;

/// Length of the daily revenue window, today included.
pub const REVENUE_WINDOW_DAYS: i64 = 7;

/// Reference stock level for the stock fill gauge.
pub const STOCK_GAUGE_MAX: i64 = 100;

/// Generates a fresh entity id (UUID v4).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
