//! Product commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use comptoir_core::{stock_fill_percent, Money, NewProduct, Product, ProductFilter, StockLevel};
use serde::Serialize;

use super::Engine;
use crate::output;

#[derive(Subcommand)]
pub enum ProductCommands {
    /// Create a product
    Add {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Category ID
        #[arg(short, long)]
        category: String,

        /// Units on hand
        #[arg(short, long, default_value = "0")]
        stock: i64,

        /// Sale price, e.g. 12.50
        #[arg(short, long)]
        price: Money,

        /// Purchase price, e.g. 7.20
        #[arg(long)]
        cost: Money,
    },

    /// Update a product; omitted fields keep their value
    Update(UpdateArgs),

    /// Delete a product (its sales stay in the history)
    Delete {
        /// Product ID
        id: String,
    },

    /// List every product
    List,

    /// Search by name and category
    Search {
        /// Case-insensitive name fragment
        #[arg(short, long, default_value = "")]
        name: String,

        /// Restrict to this category ID
        #[arg(short, long)]
        category: Option<String>,
    },
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Product ID
    id: String,

    #[arg(long)]
    name: Option<String>,

    /// Category ID
    #[arg(long)]
    category: Option<String>,

    /// Overwrites the stock directly (no stock alert)
    #[arg(long)]
    stock: Option<i64>,

    #[arg(long)]
    price: Option<Money>,

    #[arg(long)]
    cost: Option<Money>,

    #[arg(long)]
    total_sales: Option<i64>,
}

/// A product as listed: the record plus its stock gauge.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductRow<'a> {
    #[serde(flatten)]
    product: &'a Product,
    stock_level: StockLevel,
    stock_fill: u8,
}

fn rows<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<ProductRow<'a>> {
    products
        .into_iter()
        .map(|product| ProductRow {
            product,
            stock_level: product.stock_level(),
            stock_fill: stock_fill_percent(product.stock),
        })
        .collect()
}

pub fn execute(cmd: ProductCommands, engine: &mut Engine) -> Result<()> {
    match cmd {
        ProductCommands::Add {
            name,
            category,
            stock,
            price,
            cost,
        } => {
            let product = engine.add_product(NewProduct {
                name,
                category_id: category,
                stock,
                sale_price: price,
                purchase_price: cost,
            })?;
            output::print_json(&product)
        }
        ProductCommands::Update(args) => {
            let mut product = engine.product(&args.id)?.clone();
            if let Some(name) = args.name {
                product.name = name;
            }
            if let Some(category) = args.category {
                product.category_id = category;
            }
            if let Some(stock) = args.stock {
                product.stock = stock;
            }
            if let Some(price) = args.price {
                product.sale_price = price;
            }
            if let Some(cost) = args.cost {
                product.purchase_price = cost;
            }
            if let Some(total_sales) = args.total_sales {
                product.total_sales = total_sales;
            }
            let product = engine.update_product(product)?;
            output::print_json(&product)
        }
        ProductCommands::Delete { id } => {
            let product = engine.delete_product(&id)?;
            output::print_json(&product)
        }
        ProductCommands::List => output::print_json(&rows(engine.products())),
        ProductCommands::Search { name, category } => {
            let filter = ProductFilter {
                name,
                category_id: category,
            };
            output::print_json(&rows(engine.search_products(&filter)))
        }
    }
}
