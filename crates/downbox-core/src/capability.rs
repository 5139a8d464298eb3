//! Host capability probe selecting the storage sink.
//!
//! The original branch-on-OS-version is expressed as a queried
//! capability: the registry path is preferred, the direct path is the
//! fallback, and config can pin either.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::config::{DownboxConfig, SaveBackend};

/// Which write path the save handler uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageCapability {
    /// Staged-insert-then-write through the media registry.
    MediaRegistry,
    /// Plain write into the Downloads directory, no registry step.
    LegacyDirect,
}

/// State directory holding the registry database.
pub fn registry_state_dir() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("downbox")?;
    Ok(xdg_dirs.get_state_home())
}

/// Queries the host capability once, at handler construction.
///
/// A `backend` override in config wins. Otherwise the registry path is
/// used when its state directory can be prepared, and the direct sink
/// when it cannot.
pub fn detect(cfg: &DownboxConfig) -> StorageCapability {
    match cfg.backend {
        Some(SaveBackend::Registry) => return StorageCapability::MediaRegistry,
        Some(SaveBackend::Direct) => return StorageCapability::LegacyDirect,
        None => {}
    }

    match registry_state_dir().and_then(|dir| {
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }) {
        Ok(_) => StorageCapability::MediaRegistry,
        Err(e) => {
            tracing::warn!("registry state dir unavailable ({e:#}), using direct writes");
            StorageCapability::LegacyDirect
        }
    }
}
