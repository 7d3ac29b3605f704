//! # Aggregation Layer
//!
//! Read-only metrics derived from the catalog and the sale history.
//!
//! Nothing here is cached: every call recomputes from the inputs, so a
//! dashboard built right after a commit always reflects it.
//!
//! ## Views
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  totals         Σ sale.total, Σ sale.profit, count                     │
//! │  low_stock      0 < stock ≤ 10, ascending by stock                     │
//! │  out_of_stock   stock == 0, catalog order                              │
//! │  top_sellers    by total_sales desc, priced at CURRENT prices          │
//! │  daily_revenue  7 days ending today, oldest → newest, local days       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Top seller revenue and profit use the product's current prices, not the
//! prices recorded on each sale. They drift from the sale history once a
//! price changes.

use chrono::{Duration, Locale, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Product, Sale, StockLevel};
use crate::{REVENUE_WINDOW_DAYS, TOP_SELLERS_LIMIT};

// =============================================================================
// View Types
// =============================================================================

/// Headline figures over the whole sale history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SalesTotals {
    pub total_revenue: Money,
    pub total_profit: Money,
    pub sales_count: usize,
}

/// A product in the top sellers ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TopSeller {
    pub product_id: String,
    pub name: String,
    #[ts(type = "number")]
    pub total_sales: i64,
    /// `sale_price × total_sales` at current prices.
    pub revenue: Money,
    /// `(sale_price − purchase_price) × total_sales` at current prices.
    pub profit: Money,
}

/// One day of the revenue trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DailyRevenue {
    /// Capitalised short weekday, e.g. `Dim.` or `Sun`.
    pub name: String,
    /// Date in the locale's format, e.g. `18/10/2026`.
    pub date: String,
    #[ts(as = "String")]
    pub day: NaiveDate,
    pub revenue: Money,
}

/// Everything the dashboard screen shows, in one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardSummary {
    pub totals: SalesTotals,
    pub low_stock_count: usize,
    pub low_stock: Vec<Product>,
    pub out_of_stock: Vec<Product>,
    pub top_sellers: Vec<TopSeller>,
    pub revenue_trend: Vec<DailyRevenue>,
}

/// Presentation knobs for [`summarize`].
#[derive(Debug, Clone, Copy)]
pub struct DashboardOptions {
    pub top_sellers: usize,
    pub locale: Locale,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        DashboardOptions {
            top_sellers: TOP_SELLERS_LIMIT,
            locale: Locale::fr_FR,
        }
    }
}

// =============================================================================
// Aggregations
// =============================================================================

pub fn totals(sales: &[Sale]) -> SalesTotals {
    SalesTotals {
        total_revenue: sales.iter().map(|s| s.total).sum(),
        total_profit: sales.iter().map(|s| s.profit).sum(),
        sales_count: sales.len(),
    }
}

/// Products with `0 < stock ≤ 10`, lowest stock first.
pub fn low_stock(products: &[Product]) -> Vec<&Product> {
    let mut low: Vec<&Product> = products
        .iter()
        .filter(|p| p.stock_level() == StockLevel::Low)
        .collect();
    low.sort_by_key(|p| p.stock);
    low
}

pub fn out_of_stock(products: &[Product]) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| p.stock_level() == StockLevel::Out)
        .collect()
}

/// The `limit` best selling products.
///
/// Ties keep catalog order. Products that never sold are still ranked when
/// there are fewer than `limit` sellers. Revenue and profit saturate rather
/// than overflow, since they combine today's price with a lifetime counter.
pub fn top_sellers(products: &[Product], limit: usize) -> Vec<TopSeller> {
    let mut ranked: Vec<&Product> = products.iter().collect();
    ranked.sort_by(|a, b| b.total_sales.cmp(&a.total_sales));

    ranked
        .into_iter()
        .take(limit)
        .map(|p| TopSeller {
            product_id: p.id.clone(),
            name: p.name.clone(),
            total_sales: p.total_sales,
            revenue: p.sale_price.multiply_quantity(p.total_sales),
            profit: p.unit_margin().multiply_quantity(p.total_sales),
        })
        .collect()
}

/// Revenue per day over the 7 days ending `today`, oldest first.
///
/// Sales are bucketed by their calendar day in `tz`. Sales outside the
/// window are ignored; days without sales report zero.
pub fn daily_revenue<Tz: TimeZone>(
    sales: &[Sale],
    today: NaiveDate,
    tz: &Tz,
    locale: Locale,
) -> Vec<DailyRevenue> {
    let first_day = today - Duration::days(REVENUE_WINDOW_DAYS - 1);

    let mut series: Vec<DailyRevenue> = (0..REVENUE_WINDOW_DAYS)
        .map(|offset| {
            let day = first_day + Duration::days(offset);
            DailyRevenue {
                name: weekday_label(day, locale),
                date: date_label(day, locale),
                day,
                revenue: Money::zero(),
            }
        })
        .collect();

    for sale in sales {
        let day = sale.date.with_timezone(tz).date_naive();
        if day < first_day || day > today {
            continue;
        }
        let index = (day - first_day).num_days() as usize;
        series[index].revenue += sale.total;
    }

    series
}

/// Builds the full dashboard in one pass over the inputs.
pub fn summarize<Tz: TimeZone>(
    products: &[Product],
    sales: &[Sale],
    today: NaiveDate,
    tz: &Tz,
    options: &DashboardOptions,
) -> DashboardSummary {
    let low_stock: Vec<Product> = low_stock(products).into_iter().cloned().collect();

    DashboardSummary {
        totals: totals(sales),
        low_stock_count: low_stock.len(),
        low_stock,
        out_of_stock: out_of_stock(products).into_iter().cloned().collect(),
        top_sellers: top_sellers(products, options.top_sellers),
        revenue_trend: daily_revenue(sales, today, tz, options.locale),
    }
}

// =============================================================================
// Labels
// =============================================================================

fn weekday_label(day: NaiveDate, locale: Locale) -> String {
    capitalize(&at_midnight(day).format_localized("%a", locale).to_string())
}

fn date_label(day: NaiveDate, locale: Locale) -> String {
    at_midnight(day).format_localized("%x", locale).to_string()
}

fn at_midnight(day: NaiveDate) -> chrono::DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
