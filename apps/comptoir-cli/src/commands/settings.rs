//! Settings and alert log commands.

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use comptoir_core::{NotificationType, Settings};

use super::Engine;
use crate::output;

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings
    Show,

    /// Set the address that receives simulated alert emails ("" disables)
    SetEmail {
        email: String,
    },
}

#[derive(Args)]
pub struct NotificationsArgs {
    /// Maximum number of alerts shown
    #[arg(short, long)]
    limit: Option<usize>,
}

#[derive(Args)]
pub struct NotifyArgs {
    /// Alert text
    message: String,

    /// Alert severity
    #[arg(short, long, value_enum, default_value_t = Kind::Info)]
    kind: Kind,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Kind {
    Info,
    Warning,
    Error,
    Success,
}

impl From<Kind> for NotificationType {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Info => NotificationType::Info,
            Kind::Warning => NotificationType::Warning,
            Kind::Error => NotificationType::Error,
            Kind::Success => NotificationType::Success,
        }
    }
}

pub fn execute(cmd: SettingsCommands, engine: &mut Engine) -> Result<()> {
    match cmd {
        SettingsCommands::Show => output::print_json(engine.settings()),
        SettingsCommands::SetEmail { email } => {
            let settings = engine.update_settings(Settings {
                notification_email: email,
            })?;
            output::print_json(&settings)
        }
    }
}

pub fn notifications(args: NotificationsArgs, engine: &Engine) -> Result<()> {
    let all = engine.notifications();
    let shown = args.limit.unwrap_or(all.len()).min(all.len());
    output::print_json(&all[..shown])
}

pub fn notify(args: NotifyArgs, engine: &mut Engine) -> Result<()> {
    let emitted = engine.notify(args.message, args.kind.into())?;
    output::print_json(&emitted)
}
