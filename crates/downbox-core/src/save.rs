//! The save operation: validate, pick the sink, persist, identify.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::capability::{self, StorageCapability};
use crate::checksum;
use crate::config::DownboxConfig;
use crate::downloads;
use crate::error::SaveError;
use crate::filename::sanitize_file_name;
use crate::mime::mime_type_for;
use crate::registry::{entry_uri, parse_entry_uri, EntryState, NewEntry, Registry};
use crate::storage::{self, StagedFile};

/// Handler for the save-to-downloads operation. Construct once; each
/// call is independent and leaves nothing behind beyond the written
/// file and its registry entry.
pub struct SaveHandler {
    downloads_dir: PathBuf,
    capability: StorageCapability,
    registry: Option<Registry>,
    fsync: bool,
}

impl SaveHandler {
    /// Build a handler from configuration: resolves the Downloads area,
    /// queries the host capability, and opens the registry when the
    /// registry path is selected.
    pub async fn from_config(cfg: &DownboxConfig) -> Result<Self> {
        let downloads_dir = downloads::downloads_dir(cfg)?;
        let capability = capability::detect(cfg);
        let registry = match capability {
            StorageCapability::MediaRegistry => {
                let registry = Registry::open_default().await?;
                // Crash debris: pending rows whose files never appeared.
                let purged = registry.purge_stale_pending().await?;
                if purged > 0 {
                    tracing::debug!(purged, "purged stale pending registry entries");
                }
                Some(registry)
            }
            StorageCapability::LegacyDirect => None,
        };
        Ok(Self {
            downloads_dir,
            capability,
            registry,
            fsync: cfg.fsync,
        })
    }

    /// Handler over explicit parts. Used by tests and embedders that
    /// manage their own directories; `downloads_dir` must exist.
    pub fn new(
        downloads_dir: PathBuf,
        capability: StorageCapability,
        registry: Option<Registry>,
    ) -> Self {
        Self {
            downloads_dir,
            capability,
            registry,
            fsync: true,
        }
    }

    pub fn downloads_dir(&self) -> &Path {
        &self.downloads_dir
    }

    /// The registry, when the handler runs on the registry path.
    pub fn registry(&self) -> Option<&Registry> {
        self.registry.as_ref()
    }

    /// Persist `bytes` under `file_name` in the Downloads area and
    /// return an identifier for the written file: a content URI on the
    /// registry path, an absolute path on the direct path.
    ///
    /// An absent argument fails with `InvalidArgs` before anything is
    /// written; any underlying failure surfaces as `Save` with the
    /// cause's message.
    pub async fn save_to_downloads(
        &self,
        bytes: Option<&[u8]>,
        file_name: Option<&str>,
    ) -> Result<String, SaveError> {
        let (Some(bytes), Some(file_name)) = (bytes, file_name) else {
            return Err(SaveError::InvalidArgs);
        };

        let name = sanitize_file_name(file_name);
        match self.capability {
            StorageCapability::MediaRegistry => self
                .save_via_registry(bytes, &name)
                .await
                .map_err(SaveError::from),
            StorageCapability::LegacyDirect => {
                self.save_direct(bytes, &name).map_err(SaveError::from)
            }
        }
    }

    /// Staged-insert-then-write through the media registry: declare the
    /// entry, write to the staging file, rename into place, publish.
    async fn save_via_registry(&self, bytes: &[u8], name: &str) -> Result<String> {
        let registry = self.registry.as_ref().context("registry not opened")?;
        let mime = mime_type_for(name);
        let target = storage::unique_target(&self.downloads_dir, name);
        let digest = checksum::sha256_bytes(bytes);
        let path_str = target.to_string_lossy();

        let id = registry
            .insert_pending(&NewEntry {
                display_name: name,
                mime_type: mime,
                path: &path_str,
                size_bytes: bytes.len() as i64,
                sha256: Some(&digest),
            })
            .await
            .context("registry insert")?;

        if let Err(err) = self.write_staged(&target, bytes) {
            // A failed save leaves nothing visible: drop the row, keep
            // the original error.
            if let Err(e) = registry.discard(id).await {
                tracing::warn!(id, "discard after failed save: {e:#}");
            }
            return Err(err);
        }

        registry.mark_published(id).await.context("registry publish")?;
        tracing::info!(id, path = %target.display(), mime, "saved to downloads");
        Ok(entry_uri(id))
    }

    fn write_staged(&self, target: &Path, bytes: &[u8]) -> Result<()> {
        let mut staged = StagedFile::create(target)?;
        match fill_staged(&mut staged, bytes, self.fsync) {
            Ok(()) => staged.publish(target),
            Err(err) => {
                if let Err(e) = staged.discard() {
                    tracing::debug!("discard staging file: {e:#}");
                }
                Err(err)
            }
        }
    }

    /// Plain write into the public directory, no registry step.
    fn save_direct(&self, bytes: &[u8], name: &str) -> Result<String> {
        let target = storage::unique_target(&self.downloads_dir, name);
        storage::write_direct(&target, bytes)?;
        tracing::info!(path = %target.display(), "saved to downloads (direct)");
        Ok(target.display().to_string())
    }

    /// Dereference an identifier returned by a save: content URIs go
    /// through the ledger (published entries only), plain paths pass
    /// through untouched.
    pub async fn resolve(&self, identifier: &str) -> Result<PathBuf> {
        if let Some(id) = parse_entry_uri(identifier) {
            let registry = self
                .registry
                .as_ref()
                .context("no registry on this host for content URIs")?;
            let entry = registry
                .get_entry(id)
                .await?
                .with_context(|| format!("no registry entry {id}"))?;
            if entry.state != EntryState::Published {
                anyhow::bail!("registry entry {id} is not published");
            }
            return Ok(PathBuf::from(entry.path));
        }
        Ok(PathBuf::from(identifier))
    }
}

fn fill_staged(staged: &mut StagedFile, bytes: &[u8], fsync: bool) -> Result<()> {
    staged.preallocate(bytes.len() as u64)?;
    staged.write_all(bytes)?;
    if fsync {
        staged.sync()?;
    }
    Ok(())
}
