//! # Demo Catalog
//!
//! Fills an empty shop with a small catalog for trying the CLI out.
//!
//! ## Usage
//! ```bash
//! # Catalog only
//! comptoir seed
//!
//! # Catalog plus 20 sales spread over the products
//! comptoir seed --sales 20
//! ```
//!
//! Stock levels are derived from the product index so the dashboard shows
//! every band: out of stock, low, healthy.

use anyhow::Result;
use clap::Args;
use comptoir_core::transaction::SaleRequest;
use comptoir_core::{Money, NewCategory, NewProduct};
use serde::Serialize;
use tracing::{info, warn};

use super::Engine;
use crate::output;

/// Demo categories and their products.
const CATALOG: &[(&str, &str, &[&str])] = &[
    ("Boissons", "🥤", &["Eau minérale", "Jus d'orange", "Limonade", "Café"]),
    ("Snacks", "🍪", &["Chips", "Cookies", "Barre chocolatée"]),
    ("Épicerie", "🛒", &["Pâtes", "Riz", "Huile d'olive", "Sucre"]),
    ("Crèmerie", "🧀", &["Lait", "Yaourt nature", "Camembert"]),
];

/// Stock per product, cycled by index.
const STOCKS: &[i64] = &[0, 4, 9, 25, 60, 120];

#[derive(Args)]
pub struct SeedArgs {
    /// Number of sales to record after the catalog is created
    #[arg(short, long, default_value = "0")]
    sales: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SeedReport {
    categories: usize,
    products: usize,
    sales: usize,
    skipped: bool,
}

pub fn execute(args: SeedArgs, engine: &mut Engine) -> Result<()> {
    if !engine.products().is_empty() || !engine.categories().is_empty() {
        warn!(
            products = engine.products().len(),
            categories = engine.categories().len(),
            "Shop already has data, skipping seed"
        );
        return output::print_json(&SeedReport {
            categories: 0,
            products: 0,
            sales: 0,
            skipped: true,
        });
    }

    let mut product_ids = Vec::new();
    let mut seed = 0usize;

    for (name, icon, products) in CATALOG {
        let category = engine.add_category(NewCategory::new(*name, *icon))?;

        for product_name in products.iter() {
            let product = engine.add_product(demo_product(product_name, &category.id, seed))?;
            product_ids.push(product.id);
            seed += 1;
        }
    }

    let mut recorded = 0;
    for i in 0..args.sales {
        let product_id = &product_ids[(i * 5) % product_ids.len()];
        let quantity = 1 + (i % 3) as i64;

        // Skip products that cannot cover the sale so the log stays clean.
        if engine.product(product_id)?.stock < quantity {
            continue;
        }
        engine.record_sale(&SaleRequest::new(product_id.as_str(), quantity))?;
        recorded += 1;
    }

    info!(
        categories = CATALOG.len(),
        products = product_ids.len(),
        sales = recorded,
        "Seed complete"
    );

    output::print_json(&SeedReport {
        categories: CATALOG.len(),
        products: product_ids.len(),
        sales: recorded,
        skipped: false,
    })
}

/// Builds one demo product; prices and stock vary with `seed`.
fn demo_product(name: &str, category_id: &str, seed: usize) -> NewProduct {
    // Sale price: 0.99 - 8.98
    let price_cents = 99 + ((seed * 173) % 800) as i64;
    // Cost: 55-74% of the price
    let cost_pct = 55 + ((seed * 7) % 20) as i64;

    NewProduct {
        name: name.to_string(),
        category_id: category_id.to_string(),
        stock: STOCKS[seed % STOCKS.len()],
        sale_price: Money::from_cents(price_cents),
        purchase_price: Money::from_cents(price_cents * cost_pct / 100),
    }
}
