//! Bind credential validation
//!
//! An LDAP simple bind with an empty password is an unauthenticated bind
//! (RFC 4513 §5.1.2). Many servers report success for it, so a caller that
//! forwards an empty or blank password straight to `bind` silently skips
//! authentication. The validator decides, before any network traffic,
//! whether a candidate password may be used.

use crate::ldap::types::{BindAttempt, ValidatedAttempt, ValidationResult};

/// Pure, stateless credential checks. Never logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct BindCredentialValidator;

impl BindCredentialValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a candidate bind password.
    ///
    /// Absent, empty and whitespace-only passwords are rejected with
    /// [`ValidationResult::RejectEmptyPassword`]; anything else is allowed.
    ///
    /// Whitespace is Unicode whitespace ([`char::is_whitespace`]), wider than
    /// the ASCII `[\t\n\f\r ]` of a regex `^\s*$` check. Passwords made only
    /// of characters such as U+00A0, U+3000, vertical tab or U+0085 are
    /// rejected here although an ASCII `\s` check would let them through.
    pub fn validate<'a>(&self, password: impl Into<Option<&'a str>>) -> ValidationResult {
        match password.into() {
            Some(p) if !is_blank(p) => ValidationResult::Allow,
            _ => ValidationResult::RejectEmptyPassword,
        }
    }

    /// Validate a whole bind attempt: the password first, then the bind DN
    /// and control characters in either field.
    pub fn validate_attempt(&self, attempt: &BindAttempt) -> ValidationResult {
        let result = self.validate(attempt.password());
        if !result.is_allowed() {
            return result;
        }

        // An empty name with a password is an unauthenticated bind as well
        if is_blank(&attempt.bind_dn) {
            return ValidationResult::RejectUnsanitizedInput;
        }

        if attempt.bind_dn.chars().any(char::is_control) {
            return ValidationResult::RejectUnsanitizedInput;
        }

        let password = attempt.password().unwrap_or_default();
        if password.chars().any(|c| c.is_control() && !c.is_whitespace()) {
            return ValidationResult::RejectUnsanitizedInput;
        }

        ValidationResult::Allow
    }

    /// Validate an attempt and, when allowed, hand back the token a bind
    /// collaborator accepts.
    pub fn check(&self, attempt: BindAttempt) -> Result<ValidatedAttempt, ValidationResult> {
        match self.validate_attempt(&attempt) {
            ValidationResult::Allow => {
                let BindAttempt {
                    server_address,
                    bind_dn,
                    password,
                } = attempt;
                Ok(ValidatedAttempt::new(
                    server_address,
                    bind_dn,
                    password.unwrap_or_default(),
                ))
            }
            rejected => Err(rejected),
        }
    }
}

fn is_blank(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DN: &str = "cn=admin,dc=example,dc=com";
    const SERVER: &str = "ldap.example.com:389";

    fn attempt(dn: &str, password: Option<&str>) -> BindAttempt {
        BindAttempt::new(SERVER, dn, password.map(str::to_string))
    }

    #[test]
    fn test_empty_password_rejected() {
        let v = BindCredentialValidator::new();
        assert_eq!(v.validate(""), ValidationResult::RejectEmptyPassword);
        assert_eq!(v.validate(None), ValidationResult::RejectEmptyPassword);
    }

    #[test]
    fn test_whitespace_password_rejected() {
        let v = BindCredentialValidator::new();
        for blank in ["   ", "\t", "\n", " \t\r\n ", "\u{00a0}", "\u{2003}\u{3000}"] {
            assert_eq!(
                v.validate(blank),
                ValidationResult::RejectEmptyPassword,
                "{:?} should be rejected",
                blank
            );
        }
    }

    #[test]
    fn test_unicode_whitespace_is_blank() {
        let v = BindCredentialValidator::new();
        for blank in ["\u{a0}", "\u{3000}", "\u{b}", "\u{85}", "\u{c} \u{a0}"] {
            assert_eq!(
                v.validate(blank),
                ValidationResult::RejectEmptyPassword,
                "{:?} should be rejected",
                blank
            );
        }
    }

    #[test]
    fn test_non_blank_password_allowed() {
        let v = BindCredentialValidator::new();
        for password in ["s3cr3t", " s3cr3t ", "x", "\tpass\n", "pässwörd", "*"] {
            assert_eq!(v.validate(password), ValidationResult::Allow, "{:?}", password);
        }
    }

    #[test]
    fn test_validate_is_idempotent() {
        let v = BindCredentialValidator::new();
        for input in ["", "   ", "s3cr3t"] {
            assert_eq!(v.validate(input), v.validate(input));
        }
    }

    #[test]
    fn test_validate_attempt() {
        let v = BindCredentialValidator::new();

        assert_eq!(
            v.validate_attempt(&attempt(DN, Some("s3cr3t"))),
            ValidationResult::Allow
        );
        assert_eq!(
            v.validate_attempt(&attempt(DN, None)),
            ValidationResult::RejectEmptyPassword
        );
        // The password check wins over the DN check
        assert_eq!(
            v.validate_attempt(&attempt("", Some(" "))),
            ValidationResult::RejectEmptyPassword
        );
        assert_eq!(
            v.validate_attempt(&attempt("  ", Some("s3cr3t"))),
            ValidationResult::RejectUnsanitizedInput
        );
        assert_eq!(
            v.validate_attempt(&attempt("cn=admin\0,dc=example,dc=com", Some("s3cr3t"))),
            ValidationResult::RejectUnsanitizedInput
        );
        assert_eq!(
            v.validate_attempt(&attempt(DN, Some("s3cr3t\0"))),
            ValidationResult::RejectUnsanitizedInput
        );
        assert_eq!(
            v.validate_attempt(&attempt(DN, Some("pass\u{1b}[2J"))),
            ValidationResult::RejectUnsanitizedInput
        );
        // Whitespace control characters inside a real password are fine
        assert_eq!(
            v.validate_attempt(&attempt(DN, Some("pass\tword"))),
            ValidationResult::Allow
        );
    }

    #[test]
    fn test_check_produces_validated_attempt() {
        let v = BindCredentialValidator::new();

        let validated = v.check(attempt(DN, Some("s3cr3t"))).unwrap();
        assert_eq!(validated.server_address(), SERVER);
        assert_eq!(validated.bind_dn(), DN);
        assert_eq!(validated.password(), "s3cr3t");

        assert_eq!(
            v.check(attempt(DN, Some(""))).unwrap_err(),
            ValidationResult::RejectEmptyPassword
        );
    }
}
