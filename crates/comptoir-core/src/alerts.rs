//! # Alert Dispatcher
//!
//! Append-only notification log with the simulated email expansion.
//!
//! ## Expansion Rule
//! ```text
//! dispatch("Cola is out of stock", error)
//!      │
//!      ├──► Notification { type: error, t }                 always
//!      │
//!      └──► warning|error AND email set?
//!                │ yes
//!                ▼
//!           Notification { type: info, t + 1ms,
//!             "[Simulated email] sent to a@b.com: Cola is out of stock" }
//! ```
//!
//! Exactly one synthetic alert per qualifying alert. Nothing is deduplicated
//! against earlier sends and nothing is ever removed from the log.

use chrono::{DateTime, Duration, Utc};

use crate::new_id;
use crate::types::{Notification, NotificationType, Product, Settings, StockLevel};

// =============================================================================
// Alert Log
// =============================================================================

/// Notification history, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertLog {
    notifications: Vec<Notification>,
}

impl AlertLog {
    /// Wraps persisted notifications, assumed most recent first.
    pub fn from_notifications(notifications: Vec<Notification>) -> Self {
        AlertLog { notifications }
    }

    /// Appends an alert and, when it qualifies, its simulated email.
    ///
    /// Returns the emitted notifications in emission order.
    pub fn dispatch(
        &mut self,
        message: impl Into<String>,
        kind: NotificationType,
        settings: &Settings,
        now: DateTime<Utc>,
    ) -> Vec<Notification> {
        let original = Notification {
            id: new_id(),
            message: message.into(),
            kind,
            timestamp: now,
        };

        let mut emitted = vec![original.clone()];
        if let Some(email) = settings.email().filter(|_| kind.is_escalated()) {
            emitted.push(Notification {
                id: new_id(),
                message: simulated_email(email, &original.message),
                kind: NotificationType::Info,
                timestamp: now + Duration::milliseconds(1),
            });
        }

        for notification in &emitted {
            self.notifications.insert(0, notification.clone());
        }
        emitted
    }

    pub fn as_slice(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

// =============================================================================
// Messages
// =============================================================================

/// Body of the synthetic info alert that stands in for an email.
pub fn simulated_email(email: &str, message: &str) -> String {
    format!("[Simulated email] sent to {email}: {message}")
}

/// Success alert for a committed sale.
pub fn sale_recorded(quantity: i64, product_name: &str) -> String {
    format!("Sale of {quantity}x \"{product_name}\" recorded.")
}

/// Error alert for a rejected sale.
pub fn sale_cancelled(reason: &str) -> String {
    format!("{reason}. Sale cancelled.")
}

/// Stock alert for a product just after a sale, if its level calls for one.
///
/// ```rust
/// use comptoir_core::alerts::stock_alert;
/// use comptoir_core::{Money, NotificationType, Product};
///
/// let product = Product {
///     id: "p1".into(),
///     name: "Cola".into(),
///     category_id: "c1".into(),
///     stock: 0,
///     sale_price: Money::from_major(100),
///     purchase_price: Money::from_major(60),
///     total_sales: 12,
/// };
/// let (_, kind) = stock_alert(&product).unwrap();
/// assert_eq!(kind, NotificationType::Error);
/// ```
pub fn stock_alert(product: &Product) -> Option<(String, NotificationType)> {
    match product.stock_level() {
        StockLevel::Out => Some((
            format!("Out of stock for \"{}\".", product.name),
            NotificationType::Error,
        )),
        StockLevel::Low => Some((
            format!(
                "Low stock for \"{}\" ({} left).",
                product.name, product.stock
            ),
            NotificationType::Warning,
        )),
        StockLevel::Healthy => None,
    }
}

pub fn category_added(name: &str) -> String {
    format!("Category \"{name}\" added successfully.")
}

pub fn category_deleted(name: &str) -> String {
    format!("Category \"{name}\" deleted.")
}

pub fn category_in_use(name: &str) -> String {
    format!("Cannot delete category \"{name}\". It still contains products.")
}

pub fn product_added(name: &str) -> String {
    format!("Product \"{name}\" added successfully.")
}

pub fn product_updated(name: &str) -> String {
    format!("Product \"{name}\" updated.")
}

pub fn product_deleted(name: &str) -> String {
    format!("Product \"{name}\" deleted.")
}

pub const SETTINGS_UPDATED: &str = "Settings updated.";

// =============================================================================
// Unit Tests
// =============================================================================
