use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// What happens when writing the downloaded body to disk fails in
/// fire-and-forget mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteErrorPolicy {
    /// Report the error and keep the process alive.
    #[default]
    Report,
    /// Report the error, then exit the process with status 1.
    Fatal,
}

/// Global configuration loaded from `~/.config/fetchsave/config.toml`.
///
/// Every limit defaults to "none": downloads are unbounded in size and time
/// unless configured otherwise.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Abort the transfer once the body grows past this many bytes.
    #[serde(default)]
    pub max_body_bytes: Option<u64>,
    /// Upper bound on the whole transfer, in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Upper bound on connection setup only, in seconds.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Accept `http://` URLs as well as `https://`.
    #[serde(default)]
    pub allow_plain_http: bool,
    /// "report" (default) or "fatal".
    #[serde(default)]
    pub on_write_error: WriteErrorPolicy,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fetchsave")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)
            .with_context(|| format!("failed to write default config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let cfg: FetchConfig =
        toml::from_str(&data).with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(cfg)
}
