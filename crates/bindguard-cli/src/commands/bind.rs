//! bind command - guarded bind against the configured server

use super::{exit_status, CommandContext};
use anyhow::{Context, Result};
use bindguard_auth::{BindAttempt, BindOutcome, GuardedBinder, Ldap3Binder};
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;
use tracing::debug;

#[derive(Serialize)]
struct BindResult<'a> {
    server: &'a str,
    bind_dn: &'a str,
    bound: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejected: Option<bindguard_auth::ValidationResult>,
}

pub async fn execute(
    ctx: &CommandContext,
    password: Option<String>,
    bind_dn: Option<String>,
) -> Result<ExitCode> {
    run(ctx, password, bind_dn).await.map(ExitCode::from)
}

/// Guarded bind returning the process status: 0 when bound, 2 when skipped.
/// Bind failures are errors.
async fn run(
    ctx: &CommandContext,
    password: Option<String>,
    bind_dn: Option<String>,
) -> Result<u8> {
    let ldap = &ctx.config.ldap;
    ldap.validate().context("Invalid LDAP configuration")?;

    let address = ldap.address()?;
    let bind_dn = bind_dn.unwrap_or_else(|| ldap.bind_dn.clone());

    debug!("Guarded bind to {} as {}", address, bind_dn);

    let guard = GuardedBinder::new(Ldap3Binder::new(ldap));
    let outcome = guard
        .bind(BindAttempt::new(address.clone(), bind_dn.clone(), password))
        .await
        .with_context(|| format!("LDAP bind to {} failed", address))?;

    let rejected = match outcome {
        BindOutcome::Bound => None,
        BindOutcome::Skipped(result) => Some(result),
    };

    if ctx.is_json() {
        let output = BindResult {
            server: &address,
            bind_dn: &bind_dn,
            bound: outcome.is_bound(),
            rejected,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if let Some(result) = rejected {
        super::check::print_result(ctx, result);
        ctx.info(&format!("{}", "Bind skipped".yellow()));
    } else {
        ctx.info(&format!(
            "{} {} as {}",
            "Bound to".green(),
            address,
            bind_dn.cyan()
        ));
    }

    Ok(exit_status(outcome.is_bound()))
}
