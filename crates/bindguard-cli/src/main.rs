//! Bindguard - LDAP bind credential guard
//!
//! Checks bind passwords before they reach an LDAP server and performs
//! guarded binds against a configured directory.

mod commands;

use anyhow::Result;
use bindguard_core::config::BindguardConfig;
use clap::{Parser, Subcommand, ValueEnum};
use commands::CommandContext;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "bindguard")]
#[command(version = bindguard_core::VERSION)]
#[command(about = "Validate LDAP bind credentials before binding", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, env = "BINDGUARD_CONFIG")]
    config: Option<String>,

    /// LDAP server URL (ldap:// or ldaps://)
    #[arg(long, global = true, env = "BINDGUARD_SERVER_URL")]
    server: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "BINDGUARD_LOG_LEVEL")]
    log_level: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    output: OutputFormat,

    /// Suppress informational output
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a bind password without contacting the server
    Check {
        /// Candidate bind password
        #[arg(long, env = "BINDGUARD_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Read the password from the first line of stdin (overrides --password)
        #[arg(long)]
        password_stdin: bool,

        /// Also validate this bind DN
        #[arg(long)]
        bind_dn: Option<String>,
    },

    /// Validate, then bind against the configured server
    Bind {
        /// Bind password
        #[arg(long, env = "BINDGUARD_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Read the password from the first line of stdin (overrides --password)
        #[arg(long)]
        password_stdin: bool,

        /// Bind DN (defaults to ldap.bind_dn from the configuration)
        #[arg(long)]
        bind_dn: Option<String>,
    },

    /// Show the effective configuration
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = if let Some(config_path) = &cli.config {
        BindguardConfig::from_file(config_path)?
    } else {
        BindguardConfig::from_env()
    };

    // Override with CLI args
    if let Some(server) = cli.server {
        config.ldap.server_url = server;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_logging(&config);

    let ctx = CommandContext {
        config,
        output_format: cli.output,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Check {
            password,
            password_stdin,
            bind_dn,
        } => {
            let password = commands::read_password(password, password_stdin)?;
            commands::check::execute(&ctx, password, bind_dn)
        }
        Commands::Bind {
            password,
            password_stdin,
            bind_dn,
        } => {
            let password = commands::read_password(password, password_stdin)?;
            commands::bind::execute(&ctx, password, bind_dn).await
        }
        Commands::Config => commands::config::execute(&ctx),
    }
}

fn init_logging(config: &BindguardConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let json = config.logging.is_json();

    tracing_subscriber::registry()
        .with(
            json.then(|| fmt::layer().json().with_writer(std::io::stderr)),
        )
        .with(
            (!json).then(|| fmt::layer().with_target(true).with_writer(std::io::stderr)),
        )
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_stdin_alongside_password() {
        let cli = Cli::try_parse_from([
            "bindguard",
            "bind",
            "--password",
            "s3cr3t",
            "--password-stdin",
        ])
        .unwrap();

        match cli.command {
            Commands::Bind {
                password,
                password_stdin,
                ..
            } => {
                assert_eq!(password.as_deref(), Some("s3cr3t"));
                assert!(password_stdin);
            }
            _ => panic!("expected bind command"),
        }
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
