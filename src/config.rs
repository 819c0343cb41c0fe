//! Configuration file handling for QuestDB credentials.
//!
//! Credentials are resolved from, in order:
//! 1. an explicit config file path (`--config`)
//! 2. `.questdb.json` in the current directory
//! 3. `QUESTDB_*` environment variables
//!
//! If none of these is present the node runs without credentials and fails
//! with a configuration error.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::db::{Credential, DbError};

/// Default config file name, looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".questdb.json";

/// Top-level configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    pub credentials: Credential,
}

impl ConfigFile {
    /// Load configuration from the given path.
    ///
    /// # Errors
    ///
    /// Returns `DbError::InvalidConfig` if the file cannot be read or is not
    /// valid JSON of the expected shape.
    pub fn load_from(path: &Path) -> Result<Self, DbError> {
        let content = fs::read_to_string(path).map_err(|e| DbError::InvalidConfig {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;

        serde_json::from_str(&content).map_err(|e| DbError::InvalidConfig {
            message: format!(
                "Invalid JSON in {}: {}\n\n\
                 Expected:\n\
                 {{\n  \
                   \"credentials\": {{\n    \
                     \"host\": \"localhost\",\n    \
                     \"port\": 8812,\n    \
                     \"database\": \"qdb\",\n    \
                     \"user\": \"admin\",\n    \
                     \"password\": \"quest\",\n    \
                     \"ssl\": \"disable\"\n  \
                   }}\n\
                 }}",
                path.display(),
                e
            ),
        })
    }

    /// Load `.questdb.json` from the current directory, if it exists.
    pub fn load() -> Result<Option<Self>, DbError> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }
}

/// Environment variables read by `credentials_from_env`.
const ENV_VARS: [&str; 6] = [
    "QUESTDB_HOST",
    "QUESTDB_PORT",
    "QUESTDB_DATABASE",
    "QUESTDB_USER",
    "QUESTDB_PASSWORD",
    "QUESTDB_SSL",
];

/// Build credentials from `QUESTDB_*` environment variables.
///
/// Returns `Ok(None)` when none of them is set. Unset variables take the
/// QuestDB defaults.
pub fn credentials_from_env() -> Result<Option<Credential>, DbError> {
    if ENV_VARS.iter().all(|name| std::env::var(name).is_err()) {
        return Ok(None);
    }

    let mut credential = Credential::default();
    if let Ok(host) = std::env::var("QUESTDB_HOST") {
        credential.host = host;
    }
    if let Ok(port) = std::env::var("QUESTDB_PORT") {
        credential.port = port.parse().map_err(|_| DbError::InvalidConfig {
            message: format!("QUESTDB_PORT is not a valid port: '{}'", port),
        })?;
    }
    if let Ok(database) = std::env::var("QUESTDB_DATABASE") {
        credential.database = database;
    }
    if let Ok(user) = std::env::var("QUESTDB_USER") {
        credential.user = user;
    }
    if let Ok(password) = std::env::var("QUESTDB_PASSWORD") {
        credential.password = password;
    }
    credential.ssl_mode = std::env::var("QUESTDB_SSL").ok();

    Ok(Some(credential))
}

/// Resolve credentials from config file and environment.
///
/// Priority: explicit path > `.questdb.json` > environment.
pub fn resolve_credentials(explicit: Option<&Path>) -> Result<Option<Credential>, DbError> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "Loading credentials from config file");
        return ConfigFile::load_from(path).map(|c| Some(c.credentials));
    }

    if let Some(config) = ConfigFile::load()? {
        debug!(path = CONFIG_FILE_NAME, "Loaded credentials from config file");
        return Ok(Some(config.credentials));
    }

    let from_env = credentials_from_env()?;
    if from_env.is_some() {
        debug!("Loaded credentials from environment");
    }
    Ok(from_env)
}
