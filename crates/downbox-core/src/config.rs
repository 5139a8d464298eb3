use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Storage backend override. When absent, the host capability is probed
/// at handler construction and the registry path is preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveBackend {
    /// Staged-insert-then-write through the media registry.
    Registry,
    /// Plain write into the Downloads directory, no registry step.
    Direct,
}

/// Global configuration loaded from `~/.config/downbox/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownboxConfig {
    /// Override for the Downloads directory; defaults to the OS user
    /// Downloads folder.
    #[serde(default)]
    pub downloads_dir: Option<PathBuf>,
    /// Backend override: "registry" or "direct". Absent = probe.
    #[serde(default)]
    pub backend: Option<SaveBackend>,
    /// Sync staged files to disk before publishing them.
    #[serde(default = "default_fsync")]
    pub fsync: bool,
}

fn default_fsync() -> bool {
    true
}

impl Default for DownboxConfig {
    fn default() -> Self {
        Self {
            downloads_dir: None,
            backend: None,
            fsync: true,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("downbox")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DownboxConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = DownboxConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: DownboxConfig = toml::from_str(&data)?;
    Ok(cfg)
}
