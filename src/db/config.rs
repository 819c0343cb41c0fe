//! Credentials and the connection configuration derived from them.
//!
//! `Credential` is what the host hands over. `ConnectionConfig` is the one-shot
//! value the connector consumes to open a connection.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Connection secrets and parameters supplied by the host platform.
///
/// Missing fields fall back to QuestDB's PostgreSQL wire defaults. The SSL
/// mode is read from either `ssl` or `sslMode`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default = "default_password")]
    pub password: String,
    #[serde(default, rename = "ssl", alias = "sslMode", skip_serializing_if = "Option::is_none")]
    pub ssl_mode: Option<String>,
}

pub(crate) fn default_host() -> String {
    "localhost".to_string()
}

pub(crate) fn default_port() -> u16 {
    8812
}

pub(crate) fn default_database() -> String {
    "qdb".to_string()
}

pub(crate) fn default_user() -> String {
    "admin".to_string()
}

pub(crate) fn default_password() -> String {
    "quest".to_string()
}

impl Default for Credential {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database: default_database(),
            user: default_user(),
            password: default_password(),
            ssl_mode: None,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .field("ssl_mode", &self.ssl_mode)
            .finish()
    }
}

/// Configuration handed to a `Connector` to open exactly one connection.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    /// False only when the credential's SSL mode is absent or `"disable"`.
    pub ssl: bool,
    /// The credential's SSL mode verbatim, or `"disable"` when absent.
    pub ssl_mode: String,
}

impl ConnectionConfig {
    /// Build a connection config from a credential. Never fails.
    pub fn from_credential(credential: &Credential) -> Self {
        let ssl = !matches!(credential.ssl_mode.as_deref(), None | Some("disable"));
        let ssl_mode = credential
            .ssl_mode
            .clone()
            .unwrap_or_else(|| "disable".to_string());

        Self {
            host: credential.host.clone(),
            port: credential.port,
            database: credential.database.clone(),
            user: credential.user.clone(),
            password: credential.password.clone(),
            ssl,
            ssl_mode,
        }
    }

    /// Resolve the SSL mode string into the mode used to build the TLS connector.
    ///
    /// Unrecognized modes are treated as `require`.
    pub fn tls_mode(&self) -> SslMode {
        if !self.ssl {
            return SslMode::Disable;
        }
        SslMode::from_name(&self.ssl_mode).unwrap_or_else(|| {
            warn!(ssl_mode = %self.ssl_mode, "Unrecognized SSL mode, treating as 'require'");
            SslMode::Require
        })
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .field("ssl", &self.ssl)
            .field("ssl_mode", &self.ssl_mode)
            .finish()
    }
}

/// libpq-style SSL modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SslMode {
    Disable,
    Allow,
    Prefer,
    Require,
    VerifyCa,
    VerifyFull,
}

impl SslMode {
    /// Parse a libpq SSL mode name. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "disable" => Some(Self::Disable),
            "allow" => Some(Self::Allow),
            "prefer" => Some(Self::Prefer),
            "require" => Some(Self::Require),
            "verify-ca" => Some(Self::VerifyCa),
            "verify-full" => Some(Self::VerifyFull),
            _ => None,
        }
    }

    /// Whether the server certificate is checked against trusted roots.
    pub fn verifies_certificate(&self) -> bool {
        matches!(self, Self::VerifyCa | Self::VerifyFull)
    }
}
