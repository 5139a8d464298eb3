//! Downloads-area resolution.

use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::PathBuf;

use crate::config::DownboxConfig;

/// Resolves the directory saves are written into: the config override
/// if set, else the OS user Downloads directory, else the home
/// directory. The directory is created if missing.
pub fn downloads_dir(cfg: &DownboxConfig) -> Result<PathBuf> {
    let dir = match &cfg.downloads_dir {
        Some(d) => d.clone(),
        None => default_downloads_dir()?,
    };
    fs::create_dir_all(&dir)
        .with_context(|| format!("create downloads dir {}", dir.display()))?;
    Ok(dir)
}

fn default_downloads_dir() -> Result<PathBuf> {
    let user_dirs = UserDirs::new().context("no home directory for the current user")?;
    if let Some(dl) = user_dirs.download_dir() {
        return Ok(dl.to_path_buf());
    }
    Ok(user_dirs.home_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_override_is_used_and_created() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("nested/downloads");
        let cfg = DownboxConfig {
            downloads_dir: Some(target.clone()),
            ..Default::default()
        };
        let dir = downloads_dir(&cfg).unwrap();
        assert_eq!(dir, target);
        assert!(dir.is_dir());
    }
}
