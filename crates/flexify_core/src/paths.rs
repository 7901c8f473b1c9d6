use std::path::{Path, PathBuf};

/// The Flexify data directory (`~/.flexify`)
pub fn flexify_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join(".flexify")
}

/// Path of `config.json`
pub fn config_json_path() -> PathBuf {
    flexify_dir().join("config.json")
}

/// Path of the durable key-value store backing the session
pub fn storage_json_path() -> PathBuf {
    flexify_dir().join("storage.json")
}

/// Load a JSON config file
pub fn load_config_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    if !path.exists() {
        return Err(format!("Config file not found: {}", path.display()));
    }
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read config: {e}"))?;
    serde_json::from_str(&content).map_err(|e| format!("Failed to parse config: {e}"))
}
