use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite file holding the document collections
    pub database: PathBuf,
    pub host: String,
    pub port: u16,
    /// Directory for daily-rotated log files, stdout when unset
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from("database/tutor_desk.db"),
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_dir: None,
        }
    }
}

impl Config {
    /// Load from a TOML file, falling back to defaults for missing keys.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// sqlx connection url, creating the database file if it is missing
    pub fn database_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.database.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("desk.toml");
        std::fs::write(&path, "port = 9090\nlog_dir = \"logs\"\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.log_dir, Some(PathBuf::from("logs")));
        assert_eq!(
            config.database_url(),
            "sqlite://database/tutor_desk.db?mode=rwc"
        );
    }

    #[test]
    fn test_missing_config_file() {
        assert!(Config::load("./does/not/exist.toml").is_err());
    }
}
