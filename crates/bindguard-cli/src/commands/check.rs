//! check command - validate a bind password offline

use super::{exit_code, CommandContext};
use anyhow::Result;
use bindguard_auth::{BindAttempt, BindCredentialValidator, ValidationResult};
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;

#[derive(Serialize)]
struct CheckResult {
    result: ValidationResult,
    allowed: bool,
    reason: &'static str,
}

pub fn execute(
    ctx: &CommandContext,
    password: Option<String>,
    bind_dn: Option<String>,
) -> Result<ExitCode> {
    let result = evaluate(password, bind_dn, &ctx.config.ldap.server_url);

    if ctx.is_json() {
        let output = CheckResult {
            result,
            allowed: result.is_allowed(),
            reason: result.description(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_result(ctx, result);
    }

    Ok(exit_code(result.is_allowed()))
}

fn evaluate(password: Option<String>, bind_dn: Option<String>, server: &str) -> ValidationResult {
    let validator = BindCredentialValidator::new();

    match bind_dn {
        Some(dn) => validator.validate_attempt(&BindAttempt::new(server, dn, password)),
        None => validator.validate(password.as_deref()),
    }
}

pub(super) fn print_result(ctx: &CommandContext, result: ValidationResult) {
    let tag = if result.is_allowed() {
        result.as_str().green().bold()
    } else {
        result.as_str().red().bold()
    };
    ctx.info(&format!("{}: {}", tag, result.description()));
}
