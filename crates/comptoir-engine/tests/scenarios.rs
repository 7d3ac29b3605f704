//! End-to-end behaviour of the engine over an in-memory store.

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;

use comptoir_core::transaction::SaleRequest;
use comptoir_core::{
    Category, Money, NewCategory, NewProduct, NotificationType, Product, Settings,
};
use comptoir_engine::{ErrorCode, PosEngine};
use comptoir_store::{JsonFileStore, MemoryStore, StoreConfig};

// =============================================================================
// Fixtures
// =============================================================================

fn engine_with_email(email: &str) -> PosEngine<MemoryStore> {
    let mut engine = PosEngine::open(MemoryStore::new());
    engine
        .update_settings(Settings {
            notification_email: email.to_string(),
        })
        .unwrap();
    engine
}

fn add_cola(engine: &mut PosEngine<MemoryStore>, stock: i64) -> (Category, Product) {
    let drinks = engine
        .add_category(NewCategory::new("Boissons", "🥤"))
        .unwrap();
    let cola = engine
        .add_product(NewProduct {
            name: "Cola".to_string(),
            category_id: drinks.id.clone(),
            stock,
            sale_price: Money::from_major(100),
            purchase_price: Money::from_major(60),
        })
        .unwrap();
    (drinks, cola)
}

fn kinds(notifications: &[comptoir_core::Notification]) -> Vec<NotificationType> {
    notifications.iter().map(|n| n.kind).collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn scenario_a_sale_into_low_stock() {
    let mut engine = engine_with_email("");
    let (_, cola) = add_cola(&mut engine, 12);

    let outcome = engine.record_sale(&SaleRequest::new(&cola.id, 2)).unwrap();

    assert_eq!(outcome.product.stock, 10);
    assert_eq!(outcome.product.total_sales, 2);
    assert_eq!(outcome.sale.total, Money::from_major(200));
    assert_eq!(outcome.sale.profit, Money::from_major(80));
    assert_eq!(
        kinds(&outcome.notifications),
        vec![NotificationType::Success, NotificationType::Warning]
    );
}

#[test]
fn scenario_b_sale_empties_stock() {
    let mut engine = engine_with_email("");
    let (_, cola) = add_cola(&mut engine, 12);
    engine.record_sale(&SaleRequest::new(&cola.id, 2)).unwrap();

    let outcome = engine.record_sale(&SaleRequest::new(&cola.id, 10)).unwrap();

    assert_eq!(outcome.product.stock, 0);
    assert_eq!(outcome.product.total_sales, 12);
    assert_eq!(
        kinds(&outcome.notifications),
        vec![NotificationType::Success, NotificationType::Error]
    );
}

#[test]
fn scenario_c_sale_against_empty_stock() {
    let mut engine = engine_with_email("");
    let (_, cola) = add_cola(&mut engine, 0);

    let err = engine
        .record_sale(&SaleRequest::new(&cola.id, 1))
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InsufficientStock);
    assert_eq!(engine.product(&cola.id).unwrap().stock, 0);
    assert!(engine.sales().is_empty());
    assert_eq!(engine.notifications()[0].kind, NotificationType::Error);
}

#[test]
fn sale_total_out_of_range_is_rejected() {
    let mut engine = engine_with_email("");
    let (_, cola) = add_cola(&mut engine, 12);
    engine
        .update_product(Product {
            sale_price: "92233720368547758".parse().unwrap(),
            ..cola.clone()
        })
        .unwrap();

    let err = engine
        .record_sale(&SaleRequest::new(&cola.id, 2))
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ValidationError);
    assert_eq!(engine.product(&cola.id).unwrap().stock, 12);
    assert_eq!(engine.product(&cola.id).unwrap().total_sales, 0);
    assert!(engine.sales().is_empty());
    assert_eq!(engine.notifications()[0].kind, NotificationType::Error);
}

#[test]
fn sales_counter_overflow_is_rejected() {
    let mut engine = engine_with_email("");
    let (_, cola) = add_cola(&mut engine, 12);
    engine
        .update_product(Product {
            total_sales: i64::MAX,
            ..cola.clone()
        })
        .unwrap();

    let err = engine
        .record_sale(&SaleRequest::new(&cola.id, 1))
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ValidationError);
    assert_eq!(engine.product(&cola.id).unwrap().stock, 12);
    assert!(engine.sales().is_empty());

    // The dashboard still renders with the saturated figures.
    let summary = engine.dashboard_at(Utc::now().date_naive(), &Utc);
    assert_eq!(summary.top_sellers[0].revenue, Money::from_cents(i64::MAX));
}

#[test]
fn scenario_d_category_deletion_guard() {
    let mut engine = engine_with_email("");
    let (drinks, _) = add_cola(&mut engine, 5);
    let snacks = engine
        .add_category(NewCategory::new("Snacks", "🍪"))
        .unwrap();

    let err = engine.delete_category(&drinks.id).unwrap_err();
    assert_eq!(err.code, ErrorCode::CategoryInUse);
    assert_eq!(engine.categories().len(), 2);
    assert!(engine.notifications()[0].message.contains("Boissons"));

    engine.delete_category(&snacks.id).unwrap();
    assert_eq!(engine.categories().len(), 1);
    assert_eq!(engine.categories()[0].id, drinks.id);
}

#[test]
fn scenario_e_low_stock_email() {
    let mut engine = engine_with_email("a@b.com");
    let (_, cola) = add_cola(&mut engine, 12);

    let outcome = engine.record_sale(&SaleRequest::new(&cola.id, 2)).unwrap();

    assert_eq!(
        kinds(&outcome.notifications),
        vec![
            NotificationType::Success,
            NotificationType::Warning,
            NotificationType::Info,
        ]
    );
    let warning = &outcome.notifications[1];
    let email = &outcome.notifications[2];
    assert!(email.message.contains("a@b.com"));
    assert!(email.message.contains(&warning.message));
    assert!(email.timestamp > warning.timestamp);

    // The log is most recent first: the email sits right above its warning.
    assert_eq!(engine.notifications()[0], *email);
    assert_eq!(engine.notifications()[1], *warning);
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn out_of_stock_cascade_never_warns() {
    let mut engine = engine_with_email("");
    let (_, cola) = add_cola(&mut engine, 7);

    let outcome = engine.record_sale(&SaleRequest::new(&cola.id, 7)).unwrap();

    assert_eq!(
        kinds(&outcome.notifications),
        vec![NotificationType::Success, NotificationType::Error]
    );
}

#[test]
fn email_expansion_matches_qualifying_alerts() {
    let mut with_email = engine_with_email("ops@shop.fr");
    let mut without_email = engine_with_email("");

    for engine in [&mut with_email, &mut without_email] {
        let (drinks, cola) = add_cola(engine, 3);
        engine.record_sale(&SaleRequest::new(&cola.id, 1)).unwrap(); // warning
        engine.record_sale(&SaleRequest::new(&cola.id, 2)).unwrap(); // error
        let _ = engine.record_sale(&SaleRequest::new(&cola.id, 1)); // rejected: error
        let _ = engine.delete_category(&drinks.id); // in use: error
    }

    let qualifying = |engine: &PosEngine<MemoryStore>| {
        engine
            .notifications()
            .iter()
            .filter(|n| n.kind.is_escalated())
            .count()
    };
    let emails = |engine: &PosEngine<MemoryStore>| {
        engine
            .notifications()
            .iter()
            .filter(|n| n.message.starts_with("[Simulated email]"))
            .count()
    };

    assert_eq!(qualifying(&with_email), 4);
    assert_eq!(emails(&with_email), 4);
    assert_eq!(qualifying(&without_email), 4);
    assert_eq!(emails(&without_email), 0);
}

#[test]
fn sale_records_keep_their_derivation() {
    let mut engine = engine_with_email("");
    let (_, cola) = add_cola(&mut engine, 50);

    engine.record_sale(&SaleRequest::new(&cola.id, 4)).unwrap();
    engine
        .update_product(Product {
            sale_price: Money::from_major(130),
            purchase_price: Money::from_major(70),
            ..engine.product(&cola.id).unwrap().clone()
        })
        .unwrap();
    engine.record_sale(&SaleRequest::new(&cola.id, 2)).unwrap();

    let sales = engine.sales();
    assert_eq!(sales[0].total, Money::from_major(260));
    assert_eq!(sales[0].profit, Money::from_major(120));
    assert_eq!(sales[1].total, Money::from_major(400));
    assert_eq!(sales[1].profit, Money::from_major(160));

    // Top sellers are priced at current prices, so they drift from history.
    let summary = engine.dashboard_at(Utc::now().date_naive(), &Utc);
    assert_eq!(summary.top_sellers[0].revenue, Money::from_major(130 * 6));
    assert_eq!(summary.totals.total_revenue, Money::from_major(660));
}

#[test]
fn dashboard_reflects_last_commit() {
    let mut engine = engine_with_email("");
    let (_, cola) = add_cola(&mut engine, 12);
    let today = Utc::now().date_naive();

    assert_eq!(engine.dashboard_at(today, &Utc).low_stock_count, 0);

    engine.record_sale(&SaleRequest::new(&cola.id, 5)).unwrap();
    let summary = engine.dashboard_at(today, &Utc);

    assert_eq!(summary.low_stock_count, 1);
    assert_eq!(summary.totals.sales_count, 1);
    assert_eq!(summary.revenue_trend.len(), 7);
    assert_eq!(summary.revenue_trend[6].revenue, Money::from_major(500));
}

#[test]
fn dashboard_for_past_day_ignores_later_sales() {
    let mut engine = engine_with_email("");
    let (_, cola) = add_cola(&mut engine, 12);
    engine.record_sale(&SaleRequest::new(&cola.id, 1)).unwrap();

    let long_ago = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let summary = engine.dashboard_at(long_ago, &Utc);
    assert!(summary.revenue_trend.iter().all(|d| d.revenue.is_zero()));
    assert_eq!(summary.totals.sales_count, 1);
}

#[test]
fn file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let open = || {
        let store = JsonFileStore::open(StoreConfig::new(dir.path())).unwrap();
        PosEngine::open(store)
    };

    let mut engine = open();
    let drinks = engine
        .add_category(NewCategory::new("Boissons", "🥤"))
        .unwrap();
    let cola = engine
        .add_product(NewProduct {
            name: "Cola".to_string(),
            category_id: drinks.id,
            stock: 12,
            sale_price: Money::from_cents(1250),
            purchase_price: Money::from_major(6),
        })
        .unwrap();
    engine.record_sale(&SaleRequest::new(&cola.id, 2)).unwrap();
    drop(engine);

    let reopened = open();
    assert_eq!(reopened.product(&cola.id).unwrap().stock, 10);
    assert_eq!(reopened.sales()[0].total, Money::from_major(25));
    assert_eq!(reopened.settings().notification_email, "admin@example.com");

    let raw = std::fs::read_to_string(dir.path().join("pos-sales.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["unitPrice"], serde_json::json!(12.5));
    assert_eq!(json[0]["productName"], "Cola");
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    /// Property: after any mix of accepted and refused sales, stock plus
    /// units sold equals the initial stock.
    #[test]
    fn engine_conserves_stock(
        initial in 0i64..60,
        quantities in prop::collection::vec(0i64..25, 0..20)
    ) {
        let mut engine = engine_with_email("");
        let (_, cola) = add_cola(&mut engine, initial);
        let mut sold = 0;

        for qty in quantities {
            let available = engine.product(&cola.id).unwrap().stock;
            match engine.record_sale(&SaleRequest::new(&cola.id, qty)) {
                Ok(outcome) => sold += outcome.sale.quantity,
                Err(err) if qty > available => {
                    prop_assert_eq!(err.code, ErrorCode::InsufficientStock);
                    prop_assert_eq!(engine.product(&cola.id).unwrap().stock, available);
                }
                Err(err) => prop_assert_eq!(err.code, ErrorCode::ValidationError),
            }
        }

        let product = engine.product(&cola.id).unwrap();
        prop_assert_eq!(product.stock, initial - sold);
        prop_assert_eq!(product.total_sales, sold);
    }
}
