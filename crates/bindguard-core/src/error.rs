//! Error types for Bindguard

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // Connection Errors
    #[error("Failed to connect to LDAP server: {0}")]
    Connection(String),

    #[error("LDAP operation timed out after {0} seconds")]
    Timeout(u64),

    // Bind Errors
    #[error("LDAP bind failed with code {code}: {message}")]
    BindFailed { code: u32, message: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is disabled or locked")]
    AccountDisabled,

    // Configuration Errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::Connection(_) => "ConnectionFailed",
            Error::Timeout(_) => "Timeout",
            Error::BindFailed { .. } => "BindFailed",
            Error::InvalidCredentials => "InvalidCredentials",
            Error::AccountDisabled => "AccountDisabled",
            Error::InvalidConfig(_) => "InvalidConfig",
            Error::Io(_) => "InternalError",
            Error::Other(_) => "InternalError",
        }
    }

    /// Map a non-zero LDAP result code from a bind response to an error
    pub fn from_bind_code(code: u32, message: impl Into<String>) -> Self {
        match code {
            crate::RC_INVALID_CREDENTIALS => Error::InvalidCredentials,
            crate::RC_UNWILLING_TO_PERFORM => Error::AccountDisabled,
            _ => Error::BindFailed {
                code,
                message: message.into(),
            },
        }
    }

    /// Whether retrying the same bind could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Connection(_) | Error::Timeout(_) | Error::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_code_mapping() {
        assert!(matches!(
            Error::from_bind_code(49, "invalid"),
            Error::InvalidCredentials
        ));
        assert!(matches!(
            Error::from_bind_code(53, "unwilling"),
            Error::AccountDisabled
        ));

        let err = Error::from_bind_code(32, "no such object");
        assert_eq!(err.code(), "BindFailed");
        assert_eq!(
            err.to_string(),
            "LDAP bind failed with code 32: no such object"
        );
    }

    #[test]
    fn test_transient_errors() {
        assert!(Error::Connection("refused".into()).is_transient());
        assert!(Error::Timeout(10).is_transient());
        assert!(!Error::InvalidCredentials.is_transient());
        assert!(!Error::InvalidConfig("x".into()).is_transient());
    }
}
