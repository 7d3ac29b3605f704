//! # Transaction Engine
//!
//! Validates and commits sales against the catalog.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sale Request (product, qty)                      │
//! │                                  │                                      │
//! │  1. Lookup    product exists?  ──┼── no ──► ProductNotFound             │
//! │  2. Validate  1 ≤ qty ≤ stock? ──┼── no ──► Validation / Insufficient   │
//! │  3. Derive    total fits i64?  ──┼── no ──► OutOfRange                  │
//! │               (quote_sale stops here)                                   │
//! │  4. Commit    stock −= qty, total_sales += qty, sale prepended          │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                     CommittedSale { sale, product }                     │
//! │          (caller notifies: success, then low/out-of-stock alert)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every step before commit is read-only, so a rejected request leaves the
//! catalog and the ledger exactly as they were.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::new_id;
use crate::types::{Product, Sale};
use crate::validation::validate_quantity;

// =============================================================================
// Request / Quote
// =============================================================================

/// A request to sell `quantity` units of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleRequest {
    pub product_id: String,
    #[ts(type = "number")]
    pub quantity: i64,
}

impl SaleRequest {
    pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
        SaleRequest {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// The derived figures of a sale that has not been committed.
///
/// Backs the sale form preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleQuote {
    pub product_id: String,
    pub product_name: String,
    #[ts(type = "number")]
    pub quantity: i64,
    pub unit_price: Money,
    pub total: Money,
    pub profit: Money,
    /// Stock left once the sale is committed.
    #[ts(type = "number")]
    pub remaining_stock: i64,
}

/// Runs lookup, validation and derivation without touching any state.
pub fn quote_sale(catalog: &Catalog, request: &SaleRequest) -> CoreResult<SaleQuote> {
    let product = catalog
        .product(&request.product_id)
        .ok_or_else(|| CoreError::ProductNotFound(request.product_id.clone()))?;

    validate_quantity(request.quantity)?;
    if request.quantity > product.stock {
        return Err(CoreError::InsufficientStock {
            product: product.name.clone(),
            available: product.stock,
            requested: request.quantity,
        });
    }

    derive(product, request.quantity)
}

/// Sale figures in checked arithmetic: a price too large for the quantity
/// is refused here, before anything is mutated.
fn derive(product: &Product, quantity: i64) -> CoreResult<SaleQuote> {
    let unit_price = product.sale_price;
    let total = unit_price
        .checked_multiply_quantity(quantity)
        .ok_or_else(|| ValidationError::out_of_range("total"))?;
    let profit = unit_price
        .checked_sub(product.purchase_price)
        .and_then(|margin| margin.checked_multiply_quantity(quantity))
        .ok_or_else(|| ValidationError::out_of_range("profit"))?;

    Ok(SaleQuote {
        product_id: product.id.clone(),
        product_name: product.name.clone(),
        quantity,
        unit_price,
        total,
        profit,
        remaining_stock: product.stock - quantity,
    })
}

// =============================================================================
// Commit
// =============================================================================

/// Result of a committed sale: the new record and the product after the
/// stock mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommittedSale {
    pub sale: Sale,
    pub product: Product,
}

/// Validates and commits a sale as one step.
///
/// ## Errors
/// - `ProductNotFound` for an unknown product
/// - `Validation` for a quantity below 1
/// - `InsufficientStock` when the quantity exceeds the stock on hand
/// - `Validation` (out of range) when the total, profit or sales counter
///   would overflow
///
/// On error nothing is mutated.
pub fn commit_sale(
    catalog: &mut Catalog,
    ledger: &mut SalesLedger,
    request: &SaleRequest,
    now: DateTime<Utc>,
) -> CoreResult<CommittedSale> {
    let quote = quote_sale(catalog, request)?;

    // Stock first: if it refuses, the ledger has not been touched.
    let product = catalog.adjust_stock_for_sale(&quote.product_id, quote.quantity)?;

    let sale = Sale {
        id: new_id(),
        date: now,
        product_id: quote.product_id,
        product_name: quote.product_name,
        quantity: quote.quantity,
        unit_price: quote.unit_price,
        total: quote.total,
        profit: quote.profit,
    };
    ledger.record(sale.clone());

    Ok(CommittedSale { sale, product })
}

// =============================================================================
// Sales Ledger
// =============================================================================

/// Immutable sale history, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesLedger {
    sales: Vec<Sale>,
}

impl SalesLedger {
    /// Wraps persisted sales, assumed most recent first.
    pub fn from_sales(sales: Vec<Sale>) -> Self {
        SalesLedger { sales }
    }

    fn record(&mut self, sale: Sale) {
        self.sales.insert(0, sale);
    }

    pub fn as_slice(&self) -> &[Sale] {
        &self.sales
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
