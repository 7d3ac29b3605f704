//! # Domain Types
//!
//! Core domain types used throughout Comptoir.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │◄──│    Product      │   │      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name           │   │  category_id    │   │  product_id     │       │
//! │  │  icon           │   │  stock          │   │  product_name * │       │
//! │  └─────────────────┘   │  sale_price     │   │  unit_price *   │       │
//! │                        │  purchase_price │   │  total, profit  │       │
//! │                        │  total_sales    │   └─────────────────┘       │
//! │                        └─────────────────┘   * snapshot at commit      │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  Notification   │   │    Settings     │                             │
//! │  │  info|warning|  │   │  notification_  │                             │
//! │  │  error|success  │   │  email          │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names serialize in camelCase, which is the persisted record shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::{LOW_STOCK_THRESHOLD, STOCK_GAUGE_MAX};

// =============================================================================
// Category
// =============================================================================

/// A product category. `id` never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Emoji shown next to the name.
    pub icon: String,
}

/// Input for creating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewCategory {
    pub name: String,
    pub icon: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, icon: impl Into<String>) -> Self {
        NewCategory {
            name: name.into(),
            icon: icon.into(),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Category at assignment time (not re-validated afterwards).
    pub category_id: String,
    /// Units on hand.
    #[ts(type = "number")]
    pub stock: i64,
    pub sale_price: Money,
    pub purchase_price: Money,
    /// Units sold over the product's lifetime.
    #[ts(type = "number")]
    pub total_sales: i64,
}

impl Product {
    /// Margin on a single unit at current prices.
    #[inline]
    pub fn unit_margin(&self) -> Money {
        self.sale_price - self.purchase_price
    }

    #[inline]
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::of(self.stock)
    }
}

/// Input for creating a product. `total_sales` always starts at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub category_id: String,
    #[ts(type = "number")]
    pub stock: i64,
    pub sale_price: Money,
    pub purchase_price: Money,
}

/// Product list filter used by the products screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    /// Case-insensitive substring of the product name. Empty matches all.
    #[serde(default)]
    pub name: String,
    /// Restrict to one category. `None` means all categories.
    #[serde(default)]
    pub category_id: Option<String>,
}

// =============================================================================
// Stock Level
// =============================================================================

/// Stock classification shared by alerts and dashboard buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum StockLevel {
    /// `stock == 0`
    Out,
    /// `0 < stock <= LOW_STOCK_THRESHOLD`
    Low,
    /// Anything above the threshold.
    Healthy,
}

impl StockLevel {
    pub fn of(stock: i64) -> Self {
        if stock <= 0 {
            StockLevel::Out
        } else if stock <= LOW_STOCK_THRESHOLD {
            StockLevel::Low
        } else {
            StockLevel::Healthy
        }
    }
}

/// Fill ratio of the stock gauge, in percent, capped at 100.
pub fn stock_fill_percent(stock: i64) -> u8 {
    if stock <= 0 {
        return 0;
    }
    (stock.min(STOCK_GAUGE_MAX) * 100 / STOCK_GAUGE_MAX) as u8
}

// =============================================================================
// Sale
// =============================================================================

/// An immutable sale record.
///
/// `product_name` and `unit_price` are snapshots taken at commit time; they
/// do not follow later product edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Sale {
    pub id: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub product_id: String,
    pub product_name: String,
    #[ts(type = "number")]
    pub quantity: i64,
    pub unit_price: Money,
    /// `unit_price × quantity`
    pub total: Money,
    /// `(unit_price − purchase_price_at_commit) × quantity`
    pub profit: Money,
}

// =============================================================================
// Notification
// =============================================================================

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum NotificationType {
    Info,
    Warning,
    Error,
    Success,
}

impl NotificationType {
    /// Warnings and errors are forwarded to the notification email.
    #[inline]
    pub fn is_escalated(&self) -> bool {
        matches!(self, NotificationType::Warning | NotificationType::Error)
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationType::Info => write!(f, "info"),
            NotificationType::Warning => write!(f, "warning"),
            NotificationType::Error => write!(f, "error"),
            NotificationType::Success => write!(f, "success"),
        }
    }
}

/// An append-only alert log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Notification {
    pub id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// Settings
// =============================================================================

/// Mutable application settings singleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Settings {
    /// Where simulated alert emails go. Empty disables the simulation.
    #[serde(default)]
    pub notification_email: String,
}

impl Settings {
    /// The configured email address, if any.
    pub fn email(&self) -> Option<&str> {
        let email = self.notification_email.trim();
        (!email.is_empty()).then_some(email)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            notification_email: "admin@example.com".to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
