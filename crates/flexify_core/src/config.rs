use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::paths::{config_json_path, load_config_json, storage_json_path};

pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub http_proxy: String,
    #[serde(default)]
    pub https_proxy: String,
    #[serde(default)]
    pub no_proxy: bool,
    #[serde(default)]
    pub storage_path: Option<PathBuf>,
}

const CONFIG_FILE_PATH: &str = "config.toml";

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn parse_bool_env(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            http_proxy: String::new(),
            https_proxy: String::new(),
            no_proxy: false,
            storage_path: None,
        }
    }
}

impl Config {
    /// Load `~/.flexify/config.json`, falling back to `./config.toml`, then
    /// apply environment overrides.
    pub fn load() -> Self {
        let mut config = Self::from_files(&config_json_path(), Path::new(CONFIG_FILE_PATH));
        config.apply_env_overrides();
        config
    }

    fn from_files(json_path: &Path, toml_path: &Path) -> Self {
        if json_path.exists() {
            match load_config_json::<Config>(json_path) {
                Ok(config) => return config,
                Err(e) => log::warn!("Ignoring {}: {e}", json_path.display()),
            }
        }

        if toml_path.exists() {
            match std::fs::read_to_string(toml_path) {
                Ok(content) => match toml::from_str::<Config>(&content) {
                    Ok(config) => return config,
                    Err(e) => log::warn!("Ignoring malformed {}: {e}", toml_path.display()),
                },
                Err(e) => log::warn!("Failed to read {}: {e}", toml_path.display()),
            }
        }

        Config::default()
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(api_base) = std::env::var("FLEXIFY_API_BASE") {
            self.api_base = api_base;
        }
        if let Ok(http_proxy) = std::env::var("HTTP_PROXY") {
            self.http_proxy = http_proxy;
        }
        if let Ok(https_proxy) = std::env::var("HTTPS_PROXY") {
            self.https_proxy = https_proxy;
        }
        if let Ok(no_proxy) = std::env::var("FLEXIFY_NO_PROXY") {
            self.no_proxy = parse_bool_env(&no_proxy);
        }
        if let Ok(storage_path) = std::env::var("FLEXIFY_STORAGE_PATH") {
            self.storage_path = Some(PathBuf::from(storage_path));
        }
    }

    /// Configuration pointing at `api_base` with every other field defaulted.
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            ..Self::default()
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    pub fn resolved_storage_path(&self) -> PathBuf {
        self.storage_path.clone().unwrap_or_else(storage_json_path)
    }
}
