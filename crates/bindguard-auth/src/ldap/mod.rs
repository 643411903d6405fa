//! LDAP bind credential guard
//!
//! Provides:
//! - Bind password and bind DN validation
//! - A typestate token that only validated attempts can produce
//! - A guarded bind that never dials the server for a rejected attempt

mod client;
mod types;
mod validator;

pub use client::{GuardedBinder, Ldap3Binder, LdapBinder};
pub use types::*;
pub use validator::BindCredentialValidator;
