//! Configuration for Bindguard
//!
//! Example config:
//! ```toml
//! [ldap]
//! server_url = "ldap://ldap.example.com:389"
//! bind_dn = "cn=admin,dc=example,dc=com"
//! start_tls = false
//! timeout_seconds = 10
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BindguardConfig {
    #[serde(default)]
    pub ldap: LdapServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BindguardConfig {
    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        toml::from_str(&content)
            .map_err(|e| crate::Error::InvalidConfig(format!("Failed to parse config: {}", e)))
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from defaults overridden by `BINDGUARD_*` variables
    /// resolved through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("BINDGUARD_SERVER_URL") {
            config.ldap.server_url = url;
        }
        if let Some(dn) = lookup("BINDGUARD_BIND_DN") {
            config.ldap.bind_dn = dn;
        }
        if let Some(start_tls) = lookup("BINDGUARD_START_TLS") {
            config.ldap.start_tls = start_tls == "true" || start_tls == "1";
        }
        if let Some(timeout) = lookup("BINDGUARD_TIMEOUT_SECONDS") {
            if let Ok(t) = timeout.parse() {
                config.ldap.timeout_seconds = t;
            }
        }
        if let Some(level) = lookup("BINDGUARD_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(format) = lookup("BINDGUARD_LOG_FORMAT") {
            config.logging.format = format;
        }

        config
    }

    pub fn validate(&self) -> crate::Result<()> {
        self.ldap.validate()?;
        self.logging.validate()
    }
}

/// LDAP server the guarded bind dials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LdapServerConfig {
    /// LDAP server URL (ldap:// or ldaps://)
    /// Example: "ldap://ldap.example.com:389"
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Default bind DN when the caller does not supply one
    /// Example: "cn=admin,dc=example,dc=com"
    #[serde(default)]
    pub bind_dn: String,

    /// Upgrade plain connections with STARTTLS
    #[serde(default)]
    pub start_tls: bool,

    /// Connection and operation timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_server_url() -> String {
    "ldap://localhost:389".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for LdapServerConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            bind_dn: String::new(),
            start_tls: false,
            timeout_seconds: default_timeout(),
        }
    }
}

impl LdapServerConfig {
    pub fn validate(&self) -> crate::Result<()> {
        let url = self.parsed_url()?;

        if url.host_str().map_or(true, str::is_empty) {
            return Err(crate::Error::InvalidConfig(
                "Server URL must include a host".into(),
            ));
        }

        if url.scheme() == "ldaps" && self.start_tls {
            return Err(crate::Error::InvalidConfig(
                "STARTTLS cannot be combined with an ldaps:// URL".into(),
            ));
        }

        if self.timeout_seconds == 0 {
            return Err(crate::Error::InvalidConfig(
                "timeout_seconds must be greater than zero".into(),
            ));
        }

        Ok(())
    }

    /// `host:port` of the configured server, with the scheme's default port
    pub fn address(&self) -> crate::Result<String> {
        let url = self.parsed_url()?;
        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| crate::Error::InvalidConfig("Server URL must include a host".into()))?;

        let port = url.port().unwrap_or(match url.scheme() {
            "ldaps" => crate::DEFAULT_LDAPS_PORT,
            _ => crate::DEFAULT_LDAP_PORT,
        });

        Ok(format!("{}:{}", host, port))
    }

    fn parsed_url(&self) -> crate::Result<Url> {
        if self.server_url.is_empty() {
            return Err(crate::Error::InvalidConfig("Server URL is required".into()));
        }

        let url = Url::parse(&self.server_url).map_err(|e| {
            crate::Error::InvalidConfig(format!("Invalid server URL {}: {}", self.server_url, e))
        })?;

        match url.scheme() {
            "ldap" | "ldaps" => Ok(url),
            other => Err(crate::Error::InvalidConfig(format!(
                "Server URL must start with ldap:// or ldaps://, got {}://",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }

    pub fn validate(&self) -> crate::Result<()> {
        match self.format.to_ascii_lowercase().as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(crate::Error::InvalidConfig(format!(
                "Unknown log format: {}",
                other
            ))),
        }
    }
}
