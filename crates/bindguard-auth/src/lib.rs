//! Authentication guards for Bindguard

pub mod ldap;

pub use ldap::{
    BindAttempt, BindCredentialValidator, BindOutcome, GuardedBinder, Ldap3Binder, LdapBinder,
    ValidatedAttempt, ValidationResult,
};
