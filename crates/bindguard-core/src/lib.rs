//! Bindguard Core Library
//!
//! Shared configuration and error types for the Bindguard LDAP bind guard.

pub mod config;
pub mod error;

pub use config::BindguardConfig;
pub use error::{Error, Result};

/// Bindguard version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default port for plain LDAP and STARTTLS
pub const DEFAULT_LDAP_PORT: u16 = 389;

/// Default port for LDAP over TLS
pub const DEFAULT_LDAPS_PORT: u16 = 636;

/// LDAP result code for invalid credentials
pub const RC_INVALID_CREDENTIALS: u32 = 49;

/// LDAP result code for unwilling to perform (disabled or locked account)
pub const RC_UNWILLING_TO_PERFORM: u32 = 53;
