use crate::error::{Error, Result};
use directories::BaseDirs;
use serde::Deserialize;
use std::{fs, path::PathBuf};

/// Where the API lives. Matches the original client's default dev server.
const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Travelog API server. `TRAVELOG_API_URL` overrides the
    /// config file.
    pub api_base_url: String,
    /// Base URL that storage-relative media paths (`/uploads/...`) resolve
    /// against. Defaults to `api_base_url`.
    pub storage_base_url: String,
    /// How many entries the recent timeline shows by default.
    pub recent_limit: usize,
    /// Absolute directory where the session cookie and preferences live.
    pub state_dir: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_base_url: Option<String>,
    storage_base_url: Option<String>,
    recent_limit: Option<usize>,
    state_dir: Option<PathBuf>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native),
    /// apply defaults and the `TRAVELOG_API_URL` environment override.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_default();

        let api_base_url = std::env::var("TRAVELOG_API_URL")
            .ok()
            .or(file_config.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = api_base_url.trim_end_matches('/').to_string();

        let storage_base_url = file_config
            .storage_base_url
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| api_base_url.clone());

        let state_dir = file_config.state_dir.unwrap_or_else(Self::default_state_dir);

        Ok(Self {
            api_base_url,
            storage_base_url,
            recent_limit: file_config.recent_limit.unwrap_or(DEFAULT_RECENT_LIMIT),
            state_dir,
        })
    }

    /// Default state root: `{data_dir}/travelog`
    /// - macOS:   `~/Library/Application Support/travelog`
    /// - Linux:   `$XDG_DATA_HOME/travelog` or `~/.local/share/travelog`
    /// - Windows: `%APPDATA%\travelog`
    fn default_state_dir() -> PathBuf {
        if let Some(base) = BaseDirs::new() {
            let mut p = base.data_dir().to_path_buf();
            p.push("travelog");
            p
        } else {
            PathBuf::from("./travelog")
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b
                .home_dir()
                .join(".config")
                .join("travelog")
                .join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("travelog").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s = fs::read_to_string(&path)?;
            return Self::parse_file(&s)
                .map_err(|e| Error::Config(format!("parsing {}: {e}", path.display())));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> std::result::Result<FileConfig, toml::de::Error> {
        toml::from_str::<FileConfig>(s)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Test helper to create a default `Config` for testing purposes.
    ///
    /// This is the single source of truth for test configuration.
    /// If you add a field to `Config`, you only need to update it here.
    pub(crate) fn mk_config(state_dir: PathBuf) -> Config {
        Config {
            api_base_url: "http://localhost:5000".to_string(),
            storage_base_url: "http://localhost:5000".to_string(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            state_dir,
        }
    }

    #[test]
    fn candidates_prioritize_xdg_then_native() {
        if let Some(b) = BaseDirs::new() {
            let expected_xdg = b
                .home_dir()
                .join(".config")
                .join("travelog")
                .join("config.toml");
            let expected_native = b.config_dir().join("travelog").join("config.toml");
            let c = super::Config::config_file_paths();
            assert_eq!(c.first(), Some(&expected_xdg));
            assert_eq!(c.get(1), Some(&expected_native));
        }
    }

    #[test]
    fn parse_file_accepts_api_and_storage_urls() {
        let toml = r#"
            api_base_url = "https://travelog.example.com"
            storage_base_url = "https://cdn.example.com"
            recent_limit = 10
        "#;
        let fc = super::Config::parse_file(toml).unwrap();
        assert_eq!(
            fc.api_base_url.as_deref(),
            Some("https://travelog.example.com")
        );
        assert_eq!(fc.storage_base_url.as_deref(), Some("https://cdn.example.com"));
        assert_eq!(fc.recent_limit, Some(10));
    }

    #[test]
    fn parse_file_accepts_empty_config() {
        let fc = super::Config::parse_file("").unwrap();
        assert!(fc.api_base_url.is_none());
        assert!(fc.state_dir.is_none());
    }
}
