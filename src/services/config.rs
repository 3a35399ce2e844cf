use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub general: General,
}

#[derive(Debug, Deserialize, Default)]
pub struct General {
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
}

pub fn load_config() -> anyhow::Result<ConfigFile> {
    let home = std::env::var("HOME")?;
    let path = PathBuf::from(home).join(".config/romdeck/config.toml");
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

/// Flag beats config file beats built-in default.
pub fn resolve_server(flag: Option<&str>, config: &ConfigFile) -> String {
    flag.map(str::to_string)
        .or_else(|| config.general.server.clone())
        .unwrap_or_else(|| crate::cli::DEFAULT_SERVER_SOURCE.to_string())
}

pub fn request_timeout(config: &ConfigFile) -> Duration {
    Duration::from_millis(config.general.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS))
}
