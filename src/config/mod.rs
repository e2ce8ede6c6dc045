use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Maximum number of audit rows fetched for one timeline view.
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,
    /// Days covered by the timeline when no `--range` is given.
    #[serde(default = "default_window_days")]
    pub default_window_days: u32,
    /// `--filled-by` value selecting entries nobody signed.
    #[serde(default = "default_unfilled_sentinel")]
    pub unfilled_sentinel: String,
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,
}

fn default_fetch_limit() -> usize {
    500
}
fn default_window_days() -> u32 {
    7
}
fn default_unfilled_sentinel() -> String {
    "none".to_string()
}
fn default_wrap_width() -> usize {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            fetch_limit: default_fetch_limit(),
            default_window_days: default_window_days(),
            unfilled_sentinel: default_unfilled_sentinel(),
            wrap_width: default_wrap_width(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("bookinglog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".bookinglog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("bookinglog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("bookinglog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(path).map_err(|_| AppError::ConfigLoad(path.to_path_buf()))?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();

        tracing::debug!(path = %path.display(), database = %cfg.database, "configuration loaded");
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = Self::with_database(db_path.clone()).to_yaml()?;
            let conf = Self::config_file();
            fs::File::create(&conf)
                .and_then(|mut file| file.write_all(yaml.as_bytes()))
                .map_err(|_| AppError::ConfigSave(conf.clone()))?;
            success(format!("Config file: {}", conf.display()));
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookinglog.conf");
        fs::write(&path, "database: /tmp/x.sqlite\nfetch_limit: 50\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.fetch_limit, 50);
        assert_eq!(cfg.default_window_days, 7);
        assert_eq!(cfg.unfilled_sentinel, "none");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.conf")).unwrap();
        assert_eq!(cfg.fetch_limit, 500);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.conf");
        fs::write(&path, "database: [unclosed\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(AppError::Config(_))));
    }
}
