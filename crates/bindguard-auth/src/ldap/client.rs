//! Guarded LDAP bind
//!
//! [`LdapBinder`] is the dial-and-bind collaborator. [`Ldap3Binder`] talks to
//! a real server over LDAP, LDAPS or STARTTLS. [`GuardedBinder`] validates
//! every attempt first and only calls the collaborator on `Allow`.

use crate::ldap::types::{BindAttempt, BindOutcome, ValidatedAttempt};
use crate::ldap::validator::BindCredentialValidator;
use async_trait::async_trait;
use bindguard_core::config::LdapServerConfig;
use bindguard_core::{Error, Result};
use ldap3::{LdapConnAsync, LdapConnSettings};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Dials an LDAP server and performs a simple bind
#[async_trait]
pub trait LdapBinder: Send + Sync {
    /// Bind with the attempt's DN and password. Failures are returned to the
    /// caller and never terminate the process.
    async fn bind(&self, attempt: &ValidatedAttempt) -> Result<()>;
}

/// [`LdapBinder`] backed by the `ldap3` client.
///
/// Scheme, STARTTLS and timeout come from the [`LdapServerConfig`] the binder
/// was built with; the host comes from each attempt. Attempts are expected to
/// carry [`LdapServerConfig::address`]. Any other address is dialed with the
/// configured scheme and logged.
#[derive(Debug, Clone)]
pub struct Ldap3Binder {
    use_tls: bool,
    start_tls: bool,
    timeout: Duration,
    configured_address: Option<String>,
}

impl Ldap3Binder {
    pub fn new(config: &LdapServerConfig) -> Self {
        Self {
            use_tls: config.server_url.starts_with("ldaps://"),
            start_tls: config.start_tls,
            timeout: Duration::from_secs(config.timeout_seconds),
            configured_address: config.address().ok(),
        }
    }

    /// Whether `address` is the server this binder was configured for
    pub fn is_configured_server(&self, address: &str) -> bool {
        self.configured_address.as_deref() == Some(address)
    }

    fn server_url(&self, address: &str) -> String {
        let scheme = if self.use_tls { "ldaps" } else { "ldap" };
        format!("{}://{}", scheme, address)
    }

    async fn dial_and_bind(&self, attempt: &ValidatedAttempt) -> Result<()> {
        let settings = LdapConnSettings::new()
            .set_conn_timeout(self.timeout)
            .set_starttls(self.start_tls);

        if !self.is_configured_server(attempt.server_address()) {
            warn!(
                server = %attempt.server_address(),
                "Attempt targets a server other than the configured one; using the configured scheme"
            );
        }

        let url = self.server_url(attempt.server_address());
        debug!("Connecting to LDAP server: {}", url);

        let (conn, mut ldap) = LdapConnAsync::with_settings(settings, &url)
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        ldap3::drive!(conn);

        let result = ldap
            .simple_bind(attempt.bind_dn(), attempt.password())
            .await
            .map_err(|e| Error::Connection(format!("Bind request failed: {}", e)))?;

        let _ = ldap.unbind().await;

        if result.rc != 0 {
            return Err(Error::from_bind_code(result.rc, result.text));
        }

        Ok(())
    }
}

#[async_trait]
impl LdapBinder for Ldap3Binder {
    async fn bind(&self, attempt: &ValidatedAttempt) -> Result<()> {
        match tokio::time::timeout(self.timeout, self.dial_and_bind(attempt)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout(self.timeout.as_secs())),
        }
    }
}

/// Validates bind attempts before handing them to an [`LdapBinder`]
pub struct GuardedBinder<B> {
    validator: BindCredentialValidator,
    binder: B,
}

impl<B: LdapBinder> GuardedBinder<B> {
    pub fn new(binder: B) -> Self {
        Self {
            validator: BindCredentialValidator::new(),
            binder,
        }
    }

    /// Validate `attempt` and bind only when it is allowed.
    ///
    /// A rejected attempt returns [`BindOutcome::Skipped`] without touching
    /// the collaborator. Collaborator failures are returned as errors.
    pub async fn bind(&self, attempt: BindAttempt) -> Result<BindOutcome> {
        let server = attempt.server_address.clone();

        let validated = match self.validator.check(attempt) {
            Ok(validated) => validated,
            Err(rejected) => {
                warn!(
                    server = %server,
                    result = %rejected,
                    "Skipping LDAP bind: {}",
                    rejected.description()
                );
                return Ok(BindOutcome::Skipped(rejected));
            }
        };

        if let Err(e) = self.binder.bind(&validated).await {
            if e.is_transient() {
                warn!(server = %validated.server_address(), "LDAP server unavailable: {}", e);
            } else {
                error!(
                    server = %validated.server_address(),
                    bind_dn = %validated.bind_dn(),
                    "LDAP bind rejected: {}",
                    e
                );
            }
            return Err(e);
        }

        info!(
            server = %validated.server_address(),
            bind_dn = %validated.bind_dn(),
            "LDAP bind succeeded"
        );
        Ok(BindOutcome::Bound)
    }

    pub fn binder(&self) -> &B {
        &self.binder
    }
}
