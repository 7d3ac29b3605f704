//! Output helpers.
//!
//! Results go to stdout as pretty JSON; failures go to stderr as JSON so
//! scripts can branch on the error code.

use anyhow::Result;
use comptoir_engine::EngineError;
use serde::Serialize;
use serde_json::json;

/// Print a command result to stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a failure to stderr.
///
/// Engine errors keep their `{code, message}` shape; anything else is
/// reported with the `INTERNAL` code.
pub fn print_error(err: &anyhow::Error) {
    let internal = || json!({ "code": "INTERNAL", "message": format!("{err:#}") });
    let body = match err.downcast_ref::<EngineError>() {
        Some(engine_err) => serde_json::to_value(engine_err).unwrap_or_else(|_| internal()),
        None => internal(),
    };
    eprintln!("{body:#}");
}
