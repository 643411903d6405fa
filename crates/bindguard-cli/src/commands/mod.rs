//! CLI command implementations

pub mod bind;
pub mod check;
pub mod config;

use crate::OutputFormat;
use anyhow::{Context, Result};
use bindguard_core::config::BindguardConfig;
use std::io::BufRead;
use std::process::ExitCode;

/// Exit code for an attempt rejected by validation
pub const EXIT_REJECTED: u8 = 2;

/// Context passed to all commands
pub struct CommandContext {
    pub config: BindguardConfig,
    pub output_format: OutputFormat,
    pub quiet: bool,
}

impl CommandContext {
    /// Check if output should be JSON
    pub fn is_json(&self) -> bool {
        matches!(self.output_format, OutputFormat::Json)
    }

    /// Print info message if not quiet
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg);
        }
    }
}

/// Resolve the password from the command line or stdin.
///
/// `--password-stdin` wins over `--password`, which may have been filled in
/// from `BINDGUARD_PASSWORD` without the user asking for it.
pub fn read_password(password: Option<String>, from_stdin: bool) -> Result<Option<String>> {
    resolve_password(password, from_stdin, std::io::stdin().lock())
}

fn resolve_password(
    password: Option<String>,
    from_stdin: bool,
    reader: impl BufRead,
) -> Result<Option<String>> {
    if from_stdin {
        read_password_line(reader)
    } else {
        Ok(password)
    }
}

/// Read one line, dropping only the line terminator. Surrounding
/// whitespace is part of the password and is left for validation.
fn read_password_line(mut reader: impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;

    if read == 0 {
        return Ok(None);
    }

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }

    Ok(Some(line))
}

/// Process status for an allowed (0) or rejected attempt. Errors exit with 1.
fn exit_status(allowed: bool) -> u8 {
    if allowed {
        0
    } else {
        EXIT_REJECTED
    }
}

fn exit_code(allowed: bool) -> ExitCode {
    ExitCode::from(exit_status(allowed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_password_line() {
        assert_eq!(
            read_password_line("s3cr3t\n".as_bytes()).unwrap(),
            Some("s3cr3t".to_string())
        );
        assert_eq!(
            read_password_line("  padded \r\nignored\n".as_bytes()).unwrap(),
            Some("  padded ".to_string())
        );
        assert_eq!(
            read_password_line("\n".as_bytes()).unwrap(),
            Some(String::new())
        );
        assert_eq!(read_password_line("".as_bytes()).unwrap(), None);
    }

    #[test]
    fn test_stdin_password_takes_precedence() {
        assert_eq!(
            resolve_password(Some("from-env".to_string()), true, "from-stdin\n".as_bytes())
                .unwrap(),
            Some("from-stdin".to_string())
        );
        assert_eq!(
            resolve_password(Some("from-env".to_string()), false, "from-stdin\n".as_bytes())
                .unwrap(),
            Some("from-env".to_string())
        );
        assert_eq!(
            resolve_password(Some("from-env".to_string()), true, "".as_bytes()).unwrap(),
            None
        );
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(true), 0);
        assert_eq!(exit_status(false), EXIT_REJECTED);
        assert_eq!(EXIT_REJECTED, 2);
    }

    #[test]
    fn test_password_from_args() {
        assert_eq!(
            read_password(Some("s3cr3t".to_string()), false).unwrap(),
            Some("s3cr3t".to_string())
        );
        assert_eq!(read_password(None, false).unwrap(), None);
    }
}
