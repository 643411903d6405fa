//! Bind attempt and validation result types

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Bind Attempt
// ============================================================================

/// A single request to bind against an LDAP server.
///
/// Created per incoming request and owned by the caller. The password is
/// untrusted input and may be absent, empty, or whitespace.
#[derive(Clone, PartialEq, Eq)]
pub struct BindAttempt {
    /// Server address as `host:port`
    pub server_address: String,

    /// Distinguished name to bind as
    /// Example: "cn=admin,dc=example,dc=com"
    pub bind_dn: String,

    /// Candidate bind password
    pub password: Option<String>,
}

impl BindAttempt {
    pub fn new(
        server_address: impl Into<String>,
        bind_dn: impl Into<String>,
        password: Option<String>,
    ) -> Self {
        Self {
            server_address: server_address.into(),
            bind_dn: bind_dn.into(),
            password,
        }
    }

    /// Build an attempt whose password is the first `password` parameter of
    /// a URL query string. A missing parameter leaves the password absent.
    pub fn from_query(
        server_address: impl Into<String>,
        bind_dn: impl Into<String>,
        query: &str,
    ) -> Self {
        let password = url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .find(|(key, _)| key == "password")
            .map(|(_, value)| value.into_owned());

        Self::new(server_address, bind_dn, password)
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

impl fmt::Debug for BindAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindAttempt")
            .field("server_address", &self.server_address)
            .field("bind_dn", &self.bind_dn)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

// ============================================================================
// Validated Attempt
// ============================================================================

/// A bind attempt that passed validation.
///
/// Only [`BindCredentialValidator`](super::BindCredentialValidator) can
/// construct one, so a bind collaborator taking this type never sees an
/// empty password.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidatedAttempt {
    server_address: String,
    bind_dn: String,
    password: String,
}

impl ValidatedAttempt {
    pub(crate) fn new(server_address: String, bind_dn: String, password: String) -> Self {
        Self {
            server_address,
            bind_dn,
            password,
        }
    }

    pub fn server_address(&self) -> &str {
        &self.server_address
    }

    pub fn bind_dn(&self) -> &str {
        &self.bind_dn
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for ValidatedAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedAttempt")
            .field("server_address", &self.server_address)
            .field("bind_dn", &self.bind_dn)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// Validation Result
// ============================================================================

/// Outcome of validating bind credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationResult {
    /// Safe to bind
    Allow,
    /// Password absent, empty or whitespace-only. Binding would be anonymous.
    RejectEmptyPassword,
    /// Bind DN or password carries input the server must not see
    RejectUnsanitizedInput,
}

impl ValidationResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, ValidationResult::Allow)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationResult::Allow => "allow",
            ValidationResult::RejectEmptyPassword => "reject_empty_password",
            ValidationResult::RejectUnsanitizedInput => "reject_unsanitized_input",
        }
    }

    /// Human readable reason
    pub fn description(&self) -> &'static str {
        match self {
            ValidationResult::Allow => "credentials may be used to bind",
            ValidationResult::RejectEmptyPassword => {
                "password is empty; the server would treat the bind as anonymous"
            }
            ValidationResult::RejectUnsanitizedInput => {
                "bind DN or password contains unsanitized input"
            }
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Bind Outcome
// ============================================================================

/// Result of a guarded bind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    /// The server accepted the bind
    Bound,
    /// Validation rejected the attempt; no bind was made
    Skipped(ValidationResult),
}

impl BindOutcome {
    pub fn is_bound(&self) -> bool {
        matches!(self, BindOutcome::Bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query() {
        let attempt = BindAttempt::from_query(
            "ldap.example.com:389",
            "cn=admin,dc=example,dc=com",
            "?user=admin&password=s3cr3t&password=second",
        );
        assert_eq!(attempt.password(), Some("s3cr3t"));

        let attempt = BindAttempt::from_query("ldap.example.com:389", "cn=admin", "password=a%20b");
        assert_eq!(attempt.password(), Some("a b"));

        let attempt = BindAttempt::from_query("ldap.example.com:389", "cn=admin", "user=admin");
        assert_eq!(attempt.password(), None);

        let attempt = BindAttempt::from_query("ldap.example.com:389", "cn=admin", "password=");
        assert_eq!(attempt.password(), Some(""));
    }

    #[test]
    fn test_debug_redacts_password() {
        let attempt = BindAttempt::new(
            "ldap.example.com:389",
            "cn=admin,dc=example,dc=com",
            Some("s3cr3t".to_string()),
        );
        let rendered = format!("{:?}", attempt);
        assert!(!rendered.contains("s3cr3t"));
        assert!(rendered.contains("<redacted>"));

        let validated = ValidatedAttempt::new(
            attempt.server_address.clone(),
            attempt.bind_dn.clone(),
            "s3cr3t".to_string(),
        );
        assert!(!format!("{:?}", validated).contains("s3cr3t"));
    }

    #[test]
    fn test_result_serialization() {
        let json = serde_json::to_string(&ValidationResult::RejectEmptyPassword).unwrap();
        assert_eq!(json, "\"reject_empty_password\"");
        assert_eq!(
            ValidationResult::RejectUnsanitizedInput.to_string(),
            "reject_unsanitized_input"
        );
        assert!(ValidationResult::Allow.is_allowed());
        assert!(!ValidationResult::RejectEmptyPassword.is_allowed());
    }
}
