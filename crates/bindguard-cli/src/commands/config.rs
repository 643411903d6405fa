//! config command - show the effective configuration

use super::CommandContext;
use anyhow::Result;
use std::process::ExitCode;
use tracing::warn;

pub fn execute(ctx: &CommandContext) -> Result<ExitCode> {
    if ctx.is_json() {
        println!("{}", serde_json::to_string_pretty(&ctx.config)?);
    } else {
        print!("{}", toml::to_string_pretty(&ctx.config)?);
    }

    if let Err(e) = ctx.config.validate() {
        warn!("Configuration is not usable for binding: {}", e);
    }

    Ok(ExitCode::SUCCESS)
}
