//! snippetbox.toml configuration and CLI overrides.
//!
//! Precedence is CLI flag, then config file, then built-in default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_ADDR: &str = "0.0.0.0:4000";
pub const DEFAULT_DSN: &str = "postgres://web@localhost/snippetbox";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_STATIC_DIR: &str = snippetbox_web::STATIC_DIR;

/// Values as they appear in a config file; every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub addr: Option<String>,
    pub dsn: Option<String>,
    pub max_connections: Option<u32>,
    pub static_dir: Option<PathBuf>,
    pub reap_interval_secs: Option<u64>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Layer `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merge(self, overrides: FileConfig) -> Self {
        Self {
            addr: overrides.addr.or(self.addr),
            dsn: overrides.dsn.or(self.dsn),
            max_connections: overrides.max_connections.or(self.max_connections),
            static_dir: overrides.static_dir.or(self.static_dir),
            reap_interval_secs: overrides.reap_interval_secs.or(self.reap_interval_secs),
        }
    }
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub addr: String,
    pub dsn: String,
    pub max_connections: u32,
    pub static_dir: PathBuf,
    /// Zero disables the expiry reaper.
    pub reap_interval_secs: u64,
}

impl From<FileConfig> for Config {
    fn from(f: FileConfig) -> Self {
        Self {
            addr: f.addr.unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            dsn: f.dsn.unwrap_or_else(|| DEFAULT_DSN.to_string()),
            max_connections: f.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS),
            static_dir: f
                .static_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            reap_interval_secs: f.reap_interval_secs.unwrap_or(0),
        }
    }
}

impl Config {
    /// Resolve from an optional config file plus CLI overrides.
    pub fn load(path: Option<&Path>, overrides: FileConfig) -> anyhow::Result<Self> {
        let file = match path {
            Some(p) => FileConfig::from_file(p)?,
            None => FileConfig::default(),
        };
        Ok(file.merge(overrides).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_file_or_flags() {
        let config = Config::load(None, FileConfig::default()).unwrap();
        assert_eq!(config.addr, DEFAULT_ADDR);
        assert_eq!(config.dsn, DEFAULT_DSN);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.static_dir, PathBuf::from(DEFAULT_STATIC_DIR));
        assert_eq!(config.reap_interval_secs, 0);
    }

    #[test]
    fn default_static_dir_holds_shipped_assets() {
        let config = Config::load(None, FileConfig::default()).unwrap();
        assert!(config.static_dir.join("css/main.css").is_file());
    }

    #[test]
    fn file_values_apply_when_flags_absent() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
addr = "127.0.0.1:8080"
dsn = "postgres://web:pass@db/snippetbox"
reap_interval_secs = 3600
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path()), FileConfig::default()).unwrap();
        assert_eq!(config.addr, "127.0.0.1:8080");
        assert_eq!(config.dsn, "postgres://web:pass@db/snippetbox");
        assert_eq!(config.reap_interval_secs, 3600);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "addr = \"127.0.0.1:8080\"\nmax_connections = 20").unwrap();

        let overrides = FileConfig {
            addr: Some("127.0.0.1:9000".to_string()),
            ..Default::default()
        };
        let config = Config::load(Some(file.path()), overrides).unwrap();
        assert_eq!(config.addr, "127.0.0.1:9000");
        assert_eq!(config.max_connections, 20);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "listen = \"127.0.0.1:8080\"").unwrap();

        assert!(Config::load(Some(file.path()), FileConfig::default()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = Path::new("/nonexistent/snippetbox.toml");
        assert!(Config::load(Some(path), FileConfig::default()).is_err());
    }
}
