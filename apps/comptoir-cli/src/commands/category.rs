//! Category commands.

use anyhow::Result;
use clap::Subcommand;
use comptoir_core::NewCategory;

use super::Engine;
use crate::output;

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a category
    Add {
        /// Category name
        #[arg(short, long)]
        name: String,

        /// Emoji icon
        #[arg(short, long, default_value = "📦")]
        icon: String,
    },

    /// Delete a category (refused while products use it)
    Delete {
        /// Category ID
        id: String,
    },

    /// List categories with their product counts
    List,
}

pub fn execute(cmd: CategoryCommands, engine: &mut Engine) -> Result<()> {
    match cmd {
        CategoryCommands::Add { name, icon } => {
            let category = engine.add_category(NewCategory::new(name, icon))?;
            output::print_json(&category)
        }
        CategoryCommands::Delete { id } => {
            let category = engine.delete_category(&id)?;
            output::print_json(&category)
        }
        CategoryCommands::List => output::print_json(&engine.category_usage()),
    }
}
