//! Dashboard command.

use anyhow::Result;

use super::Engine;
use crate::output;

/// Prints the dashboard for today in the local time zone.
pub fn execute(engine: &Engine) -> Result<()> {
    output::print_json(&engine.dashboard())
}
