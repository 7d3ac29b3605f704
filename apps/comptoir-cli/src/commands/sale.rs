//! Sale commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use comptoir_core::transaction::SaleRequest;

use super::Engine;
use crate::output;

#[derive(Subcommand)]
pub enum SaleCommands {
    /// Preview a sale without recording it
    Quote(SaleArgs),

    /// Record a sale
    Record(SaleArgs),

    /// Sale history, most recent first
    List {
        /// Maximum number of sales shown
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[derive(Args)]
pub struct SaleArgs {
    /// Product ID
    #[arg(short, long)]
    product: String,

    /// Units sold
    #[arg(short, long, default_value = "1")]
    quantity: i64,
}

impl SaleArgs {
    fn request(&self) -> SaleRequest {
        SaleRequest::new(&self.product, self.quantity)
    }
}

pub fn execute(cmd: SaleCommands, engine: &mut Engine) -> Result<()> {
    match cmd {
        SaleCommands::Quote(args) => output::print_json(&engine.quote_sale(&args.request())?),
        SaleCommands::Record(args) => output::print_json(&engine.record_sale(&args.request())?),
        SaleCommands::List { limit } => {
            let sales = engine.sales();
            let shown = limit.unwrap_or(sales.len()).min(sales.len());
            output::print_json(&sales[..shown])
        }
    }
}
