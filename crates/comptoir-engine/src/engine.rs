//! # POS Engine
//!
//! The single command handler that owns all application state.
//!
//! ## Command Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  command (add_product, record_sale, ...)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  comptoir-core rule ──── Err ──► error alert ──► save notifications    │
//! │       │ Ok                                   └──► Err(EngineError)     │
//! │       ▼                                                                 │
//! │  alerts (success / info, then stock alerts)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  save the records that changed ── Err ──► Err(PERSISTENCE_ERROR)       │
//! │       │ Ok                                 (memory keeps the change)    │
//! │       ▼                                                                 │
//! │  Ok(result)                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutations run one at a time through `&mut self`; reads see the last
//! committed write. There is no background work and no locking.

use chrono::{Local, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use comptoir_core::alerts::{self, AlertLog};
use comptoir_core::catalog::{Catalog, CategoryUsage};
use comptoir_core::dashboard::{self, DashboardOptions, DashboardSummary};
use comptoir_core::transaction::{self, commit_sale, SaleQuote, SaleRequest, SalesLedger};
use comptoir_core::validation::validate_email;
use comptoir_core::{
    Category, CoreError, NewCategory, NewProduct, Notification, NotificationType, Product,
    ProductFilter, Sale, Settings,
};
use comptoir_store::{KeyValueStore, StateKey};

use crate::error::{EngineError, EngineResult};

// =============================================================================
// Results
// =============================================================================

/// What a committed sale produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleOutcome {
    pub sale: Sale,
    /// The product after the stock mutation.
    pub product: Product,
    /// Alerts emitted by the sale, in emission order.
    pub notifications: Vec<Notification>,
}

// =============================================================================
// PosEngine
// =============================================================================

/// Catalog, sales, alerts and settings behind one command surface.
///
/// ## Usage
/// ```rust
/// use comptoir_core::transaction::SaleRequest;
/// use comptoir_core::{Money, NewCategory, NewProduct};
/// use comptoir_engine::PosEngine;
/// use comptoir_store::MemoryStore;
///
/// let mut engine = PosEngine::open(MemoryStore::new());
/// let drinks = engine.add_category(NewCategory::new("Boissons", "🥤")).unwrap();
/// let cola = engine
///     .add_product(NewProduct {
///         name: "Cola".into(),
///         category_id: drinks.id,
///         stock: 12,
///         sale_price: Money::from_major(100),
///         purchase_price: Money::from_major(60),
///     })
///     .unwrap();
///
/// let outcome = engine.record_sale(&SaleRequest::new(&cola.id, 2)).unwrap();
/// assert_eq!(outcome.product.stock, 10);
/// ```
#[derive(Debug)]
pub struct PosEngine<S: KeyValueStore> {
    store: S,
    catalog: Catalog,
    ledger: SalesLedger,
    alerts: AlertLog,
    settings: Settings,
    options: DashboardOptions,
}

impl<S: KeyValueStore> PosEngine<S> {
    /// Loads every record from `store`, using defaults for anything missing
    /// or unreadable.
    pub fn open(store: S) -> Self {
        let categories: Vec<Category> = store.load_or_default(StateKey::Categories, Vec::new());
        let products: Vec<Product> = store.load_or_default(StateKey::Products, Vec::new());
        let sales: Vec<Sale> = store.load_or_default(StateKey::Sales, Vec::new());
        let notifications: Vec<Notification> =
            store.load_or_default(StateKey::Notifications, Vec::new());
        let settings = store.load_or_default(StateKey::Settings, Settings::default());

        info!(
            categories = categories.len(),
            products = products.len(),
            sales = sales.len(),
            notifications = notifications.len(),
            "Engine state loaded"
        );

        PosEngine {
            store,
            catalog: Catalog::from_parts(categories, products),
            ledger: SalesLedger::from_sales(sales),
            alerts: AlertLog::from_notifications(notifications),
            settings,
            options: DashboardOptions::default(),
        }
    }

    /// Sets how the dashboard ranks and labels.
    pub fn with_dashboard_options(mut self, options: DashboardOptions) -> Self {
        self.options = options;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn categories(&self) -> &[Category] {
        self.catalog.categories()
    }

    pub fn products(&self) -> &[Product] {
        self.catalog.products()
    }

    /// Sale history, most recent first.
    pub fn sales(&self) -> &[Sale] {
        self.ledger.as_slice()
    }

    /// Alert log, most recent first.
    pub fn notifications(&self) -> &[Notification] {
        self.alerts.as_slice()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn product(&self, id: &str) -> EngineResult<&Product> {
        self.catalog
            .product(id)
            .ok_or_else(|| EngineError::not_found("Product", id))
    }

    pub fn search_products(&self, filter: &ProductFilter) -> Vec<&Product> {
        self.catalog.search(filter)
    }

    pub fn category_usage(&self) -> Vec<CategoryUsage> {
        self.catalog.product_counts()
    }

    /// Previews a sale without committing it or raising alerts.
    pub fn quote_sale(&self, request: &SaleRequest) -> EngineResult<SaleQuote> {
        Ok(transaction::quote_sale(&self.catalog, request)?)
    }

    /// Dashboard for today in the local time zone.
    pub fn dashboard(&self) -> DashboardSummary {
        self.dashboard_at(Local::now().date_naive(), &Local)
    }

    /// Dashboard for an arbitrary day and time zone.
    pub fn dashboard_at<Tz: TimeZone>(&self, today: NaiveDate, tz: &Tz) -> DashboardSummary {
        dashboard::summarize(
            self.catalog.products(),
            self.ledger.as_slice(),
            today,
            tz,
            &self.options,
        )
    }

    // =========================================================================
    // Catalog Commands
    // =========================================================================

    pub fn add_category(&mut self, input: NewCategory) -> EngineResult<Category> {
        debug!(name = %input.name, "add_category");

        let category = match self.catalog.add_category(input) {
            Ok(category) => category,
            Err(e) => return Err(self.reject_plain(e)),
        };

        info!(id = %category.id, name = %category.name, "Category added");
        self.alert(alerts::category_added(&category.name), NotificationType::Success);
        self.persist(&[StateKey::Categories, StateKey::Notifications])?;
        Ok(category)
    }

    /// Deletes a category that no product references.
    pub fn delete_category(&mut self, id: &str) -> EngineResult<Category> {
        debug!(id = %id, "delete_category");

        let category = match self.catalog.delete_category(id) {
            Ok(category) => category,
            Err(e @ CoreError::CategoryInUse { .. }) => {
                let name = self.catalog.category(id).map(|c| c.name.clone());
                let message = alerts::category_in_use(name.as_deref().unwrap_or(id));
                return Err(self.reject(e, message));
            }
            Err(e) => return Err(self.reject_plain(e)),
        };

        info!(id = %category.id, name = %category.name, "Category deleted");
        self.alert(alerts::category_deleted(&category.name), NotificationType::Info);
        self.persist(&[StateKey::Categories, StateKey::Notifications])?;
        Ok(category)
    }

    pub fn add_product(&mut self, input: NewProduct) -> EngineResult<Product> {
        debug!(name = %input.name, category_id = %input.category_id, "add_product");

        let product = match self.catalog.add_product(input) {
            Ok(product) => product,
            Err(e) => return Err(self.reject_plain(e)),
        };

        info!(
            id = %product.id,
            name = %product.name,
            stock = product.stock,
            sale_price = %product.sale_price,
            "Product added"
        );
        self.alert(alerts::product_added(&product.name), NotificationType::Success);
        self.persist(&[StateKey::Products, StateKey::Notifications])?;
        Ok(product)
    }

    /// Full replace by id.
    ///
    /// Stock written here bypasses the sale path and raises no stock alert.
    pub fn update_product(&mut self, product: Product) -> EngineResult<Product> {
        debug!(id = %product.id, "update_product");

        let product = match self.catalog.update_product(product) {
            Ok(product) => product,
            Err(e) => return Err(self.reject_plain(e)),
        };

        info!(id = %product.id, name = %product.name, stock = product.stock, "Product updated");
        self.alert(alerts::product_updated(&product.name), NotificationType::Info);
        self.persist(&[StateKey::Products, StateKey::Notifications])?;
        Ok(product)
    }

    /// Deletes a product. Its sales stay in the history.
    pub fn delete_product(&mut self, id: &str) -> EngineResult<Product> {
        debug!(id = %id, "delete_product");

        let product = match self.catalog.delete_product(id) {
            Ok(product) => product,
            Err(e) => return Err(self.reject_plain(e)),
        };

        info!(id = %product.id, name = %product.name, "Product deleted");
        self.alert(alerts::product_deleted(&product.name), NotificationType::Info);
        self.persist(&[StateKey::Products, StateKey::Notifications])?;
        Ok(product)
    }

    // =========================================================================
    // Sale Commands
    // =========================================================================

    /// Validates and commits a sale, then raises its alerts.
    ///
    /// ## Alert Order
    /// 1. `success` for the sale
    /// 2. `warning` if the stock is now low, or `error` if it is now zero
    ///
    /// Each warning or error is followed by its simulated email when an
    /// address is configured. A rejected sale only raises one `error`.
    pub fn record_sale(&mut self, request: &SaleRequest) -> EngineResult<SaleOutcome> {
        debug!(
            product_id = %request.product_id,
            quantity = request.quantity,
            "record_sale"
        );

        let committed = match commit_sale(&mut self.catalog, &mut self.ledger, request, Utc::now())
        {
            Ok(committed) => committed,
            Err(e) => {
                let message = alerts::sale_cancelled(&e.to_string());
                return Err(self.reject(e, message));
            }
        };

        info!(
            sale_id = %committed.sale.id,
            product = %committed.sale.product_name,
            quantity = committed.sale.quantity,
            total = %committed.sale.total,
            profit = %committed.sale.profit,
            stock_left = committed.product.stock,
            "Sale committed"
        );

        let mut notifications = self.alert(
            alerts::sale_recorded(committed.sale.quantity, &committed.sale.product_name),
            NotificationType::Success,
        );
        if let Some((message, kind)) = alerts::stock_alert(&committed.product) {
            notifications.extend(self.alert(message, kind));
        }

        self.persist(&[
            StateKey::Products,
            StateKey::Sales,
            StateKey::Notifications,
        ])?;

        Ok(SaleOutcome {
            sale: committed.sale,
            product: committed.product,
            notifications,
        })
    }

    // =========================================================================
    // Settings & Alerts
    // =========================================================================

    pub fn update_settings(&mut self, settings: Settings) -> EngineResult<Settings> {
        debug!("update_settings");

        let notification_email = match validate_email(&settings.notification_email) {
            Ok(email) => email,
            Err(e) => return Err(self.reject_plain(e.into())),
        };
        self.settings = Settings { notification_email };

        info!(email = %self.settings.notification_email, "Settings updated");
        self.alert(alerts::SETTINGS_UPDATED, NotificationType::Success);
        self.persist(&[StateKey::Settings, StateKey::Notifications])?;
        Ok(self.settings.clone())
    }

    /// Posts a caller-defined alert, with the usual email expansion.
    pub fn notify(
        &mut self,
        message: impl Into<String>,
        kind: NotificationType,
    ) -> EngineResult<Vec<Notification>> {
        let emitted = self.alert(message, kind);
        self.persist(&[StateKey::Notifications])?;
        Ok(emitted)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn alert(&mut self, message: impl Into<String>, kind: NotificationType) -> Vec<Notification> {
        self.alerts
            .dispatch(message, kind, &self.settings, Utc::now())
    }

    fn reject_plain(&mut self, err: CoreError) -> EngineError {
        let message = err.to_string();
        self.reject(err, message)
    }

    /// Surfaces a refused command as an error alert.
    fn reject(&mut self, err: CoreError, message: String) -> EngineError {
        warn!(error = %err, "Command rejected");
        self.alert(message, NotificationType::Error);
        // The domain error is what the caller needs; a failed save here is
        // only logged.
        let _ = self.persist(&[StateKey::Notifications]);
        err.into()
    }

    /// Saves the given records, attempting all of them even after a failure.
    fn persist(&mut self, keys: &[StateKey]) -> EngineResult<()> {
        let mut first_error = None;

        for &key in keys {
            let result = match key {
                StateKey::Categories => self.store.save(key, self.catalog.categories()),
                StateKey::Products => self.store.save(key, self.catalog.products()),
                StateKey::Sales => self.store.save(key, self.ledger.as_slice()),
                StateKey::Notifications => self.store.save(key, self.alerts.as_slice()),
                StateKey::Settings => self.store.save(key, &self.settings),
            };

            if let Err(e) = result {
                error!(key = %key, error = %e, "Failed to save record");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use comptoir_core::Money;
    use comptoir_store::MemoryStore;

    fn engine_with_cola(stock: i64) -> (PosEngine<MemoryStore>, Product) {
        let mut engine = PosEngine::open(MemoryStore::new());
        let drinks = engine
            .add_category(NewCategory::new("Boissons", "🥤"))
            .unwrap();
        let cola = engine
            .add_product(NewProduct {
                name: "Cola".to_string(),
                category_id: drinks.id,
                stock,
                sale_price: Money::from_major(100),
                purchase_price: Money::from_major(60),
            })
            .unwrap();
        (engine, cola)
    }

    #[test]
    fn test_open_uses_defaults() {
        let engine = PosEngine::open(MemoryStore::new());
        assert!(engine.categories().is_empty());
        assert!(engine.sales().is_empty());
        assert_eq!(engine.settings().notification_email, "admin@example.com");
    }

    #[test]
    fn test_open_survives_corrupt_records() {
        let store = MemoryStore::new()
            .with_raw(StateKey::Products, "[{\"broken\":")
            .with_raw(StateKey::Settings, r#"{"notificationEmail":"ops@shop.fr"}"#);
        let engine = PosEngine::open(store);
        assert!(engine.products().is_empty());
        assert_eq!(engine.settings().notification_email, "ops@shop.fr");
    }

    #[test]
    fn test_mutations_are_persisted() {
        let (engine, cola) = engine_with_cola(12);
        let raw = engine.store().raw(StateKey::Products).unwrap();
        assert!(raw.contains(&cola.id));
        assert!(engine.store().raw(StateKey::Categories).is_some());
        assert!(engine.store().raw(StateKey::Sales).is_none());
    }

    #[test]
    fn test_reopen_restores_state() {
        let (mut engine, cola) = engine_with_cola(12);
        engine.record_sale(&SaleRequest::new(&cola.id, 3)).unwrap();

        let reopened = PosEngine::open(engine.store().clone());
        assert_eq!(reopened.product(&cola.id).unwrap().stock, 9);
        assert_eq!(reopened.sales().len(), 1);
        assert_eq!(reopened.notifications(), engine.notifications());
    }

    #[test]
    fn test_catalog_notifications() {
        let (mut engine, cola) = engine_with_cola(12);
        engine.delete_product(&cola.id).unwrap();

        let kinds: Vec<NotificationType> = engine.notifications().iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NotificationType::Info,
                NotificationType::Success,
                NotificationType::Success,
            ]
        );
        assert_eq!(engine.notifications()[0].message, "Product \"Cola\" deleted.");
    }

    #[test]
    fn test_rejected_sale_raises_error_alert() {
        let (mut engine, cola) = engine_with_cola(1);
        engine
            .update_settings(Settings {
                notification_email: String::new(),
            })
            .unwrap();
        let before = engine.notifications().len();

        let err = engine.record_sale(&SaleRequest::new(&cola.id, 5)).unwrap_err();

        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(engine.notifications().len(), before + 1);
        let alert = &engine.notifications()[0];
        assert_eq!(alert.kind, NotificationType::Error);
        assert!(alert.message.ends_with("Sale cancelled."));
        assert!(engine.sales().is_empty());
    }

    #[test]
    fn test_invalid_quantity_is_validation_error() {
        let (mut engine, cola) = engine_with_cola(5);
        let err = engine.record_sale(&SaleRequest::new(&cola.id, 0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(engine.product(&cola.id).unwrap().stock, 5);
    }

    #[test]
    fn test_failed_save_is_reported_but_kept_in_memory() {
        let (mut engine, cola) = engine_with_cola(12);
        engine.store_mut().set_read_only(true);

        let err = engine.record_sale(&SaleRequest::new(&cola.id, 1)).unwrap_err();

        assert_eq!(err.code, ErrorCode::PersistenceError);
        assert_eq!(engine.product(&cola.id).unwrap().stock, 11);
        assert_eq!(engine.sales().len(), 1);
    }

    #[test]
    fn test_update_settings_rejects_bad_email() {
        let mut engine = PosEngine::open(MemoryStore::new());
        let err = engine
            .update_settings(Settings {
                notification_email: "not an email".to_string(),
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(engine.settings().notification_email, "admin@example.com");
    }

    #[test]
    fn test_update_product_stock_raises_no_stock_alert() {
        let (mut engine, cola) = engine_with_cola(12);
        engine
            .update_product(Product {
                stock: 0,
                ..cola.clone()
            })
            .unwrap();

        assert_eq!(engine.notifications()[0].kind, NotificationType::Info);
        assert!(engine
            .notifications()
            .iter()
            .all(|n| n.kind != NotificationType::Error));
    }

    #[test]
    fn test_quote_sale_has_no_side_effects() {
        let (engine, cola) = engine_with_cola(12);
        let before = engine.notifications().len();
        let quote = engine.quote_sale(&SaleRequest::new(&cola.id, 4)).unwrap();
        assert_eq!(quote.total, Money::from_major(400));
        assert_eq!(engine.notifications().len(), before);
    }

    #[test]
    fn test_notify_expands_email() {
        let mut engine = PosEngine::open(MemoryStore::new());
        let emitted = engine.notify("Printer offline", NotificationType::Warning).unwrap();
        assert_eq!(emitted.len(), 2);
        assert!(emitted[1].message.contains("admin@example.com"));
    }
}
