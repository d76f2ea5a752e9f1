//! Connection and timeout settings.
//!
//! The connection string is looked up in order:
//! 1. the `MONGO_URI` environment variable
//! 2. a `MONGO_URI=` line in a local env-file (`.env` by default)
//! 3. a local JSON config file (`config.json` by default):
//! ```json
//! { "mongo_uri": "mongodb://localhost:27017", "database": "test_data", "collection": "snapshot" }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::DomainError;

pub const URI_VAR: &str = "MONGO_URI";
pub const DEFAULT_ENV_FILE: &str = ".env";
pub const DEFAULT_CONFIG_FILE: &str = "config.json";
pub const DEFAULT_DATABASE: &str = "test_data";
pub const DEFAULT_COLLECTION: &str = "snapshot";

/// Contents of the JSON config file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct FileConfig {
    #[serde(default, alias = "MONGO_URI", alias = "mongoUri")]
    mongo_uri: Option<String>,
    #[serde(default)]
    database: Option<String>,
    #[serde(default)]
    collection: Option<String>,
}

impl FileConfig {
    fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let parsed: Result<Self, String> = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()));

        match parsed {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring unreadable config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    /// Environment variable holding the connection string.
    pub uri_var: String,
    pub env_file: PathBuf,
    pub config_file: PathBuf,
    /// Explicit database name; falls back to the config file, then the default.
    pub database: Option<String>,
    pub collection: Option<String>,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            uri_var: URI_VAR.to_string(),
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            database: None,
            collection: None,
        }
    }
}

impl ConnectionSettings {
    pub fn resolve_uri(&self) -> Result<String, DomainError> {
        if let Some(uri) = non_empty(std::env::var(&self.uri_var).ok()) {
            debug!("Using connection string from ${}", self.uri_var);
            return Ok(uri);
        }

        if let Some(uri) = self.uri_from_env_file() {
            debug!("Using connection string from {}", self.env_file.display());
            return Ok(uri);
        }

        if let Some(uri) = non_empty(FileConfig::load(&self.config_file).mongo_uri) {
            debug!("Using connection string from {}", self.config_file.display());
            return Ok(uri);
        }

        Err(DomainError::config(format!("missing {}", self.uri_var)))
    }

    fn uri_from_env_file(&self) -> Option<String> {
        if !self.env_file.exists() {
            return None;
        }

        let entries = match dotenvy::from_path_iter(&self.env_file) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Ignoring env file {}: {}", self.env_file.display(), e);
                return None;
            }
        };

        for entry in entries {
            match entry {
                Ok((key, value)) if key == self.uri_var => return non_empty(Some(value)),
                Ok(_) => {}
                Err(e) => {
                    warn!("Stopped reading env file {}: {}", self.env_file.display(), e);
                    return None;
                }
            }
        }

        None
    }

    pub fn database(&self) -> String {
        non_empty(self.database.clone())
            .or_else(|| non_empty(FileConfig::load(&self.config_file).database))
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string())
    }

    pub fn collection(&self) -> String {
        non_empty(self.collection.clone())
            .or_else(|| non_empty(FileConfig::load(&self.config_file).collection))
            .unwrap_or_else(|| DEFAULT_COLLECTION.to_string())
    }
}

/// Upper bounds for store operations.
#[derive(Debug, Clone, Copy)]
pub struct OperationTimeouts {
    pub connect: Duration,
    /// find-one, insert, update, delete
    pub point: Duration,
    /// full-collection scan
    pub scan: Duration,
}

impl Default for OperationTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            point: Duration::from_secs(10),
            scan: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    /// Settings rooted in `dir` with a variable name no other test touches.
    fn settings(dir: &TempDir, var: &str) -> ConnectionSettings {
        ConnectionSettings {
            uri_var: var.to_string(),
            env_file: dir.path().join(".env"),
            config_file: dir.path().join("config.json"),
            database: None,
            collection: None,
        }
    }

    #[test]
    fn test_missing_everywhere_is_config_error() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir, "WINLOSE_TEST_URI_MISSING");

        let err = settings.resolve_uri().unwrap_err();
        assert!(matches!(err, DomainError::Config(_)));
    }

    #[test]
    fn test_env_var_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".env"), "WINLOSE_TEST_URI_ENV=mongodb://file\n").unwrap();
        std::env::set_var("WINLOSE_TEST_URI_ENV", "mongodb://env");

        let uri = settings(&dir, "WINLOSE_TEST_URI_ENV").resolve_uri().unwrap();
        assert_eq!(uri, "mongodb://env");
    }

    #[test]
    fn test_env_file_before_config_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".env"),
            "# local\nPORT=9000\nWINLOSE_TEST_URI_FILE=\"mongodb://dotenv\"\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("config.json"),
            r#"{"mongo_uri": "mongodb://json"}"#,
        )
        .unwrap();

        let uri = settings(&dir, "WINLOSE_TEST_URI_FILE").resolve_uri().unwrap();
        assert_eq!(uri, "mongodb://dotenv");
    }

    #[test]
    fn test_json_config_fallback_and_names() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.json"),
            r#"{"MONGO_URI": "mongodb://json", "database": "reports"}"#,
        )
        .unwrap();

        let settings = settings(&dir, "WINLOSE_TEST_URI_JSON");
        assert_eq!(settings.resolve_uri().unwrap(), "mongodb://json");
        assert_eq!(settings.database(), "reports");
        assert_eq!(settings.collection(), DEFAULT_COLLECTION);
    }

    #[test]
    fn test_malformed_config_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.json"), "{not json").unwrap();

        let settings = settings(&dir, "WINLOSE_TEST_URI_BAD_JSON");
        assert!(settings.resolve_uri().is_err());
        assert_eq!(settings.database(), DEFAULT_DATABASE);
    }
}
