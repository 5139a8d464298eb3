//! Staged write: preallocate, write, sync, atomic publish.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::io::AsRawFd;

use super::pending_path;

/// A staging file for one save, created at `<final>.pending`. `publish`
/// renames it onto the final path; `discard` removes it after a failed
/// write so nothing partial stays visible.
pub struct StagedFile {
    file: File,
    staging: PathBuf,
}

impl StagedFile {
    /// Create the staging file for `final_path`, truncating any stale
    /// leftover from an earlier failed save.
    pub fn create(final_path: &Path) -> Result<Self> {
        let staging = pending_path(final_path);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&staging)
            .with_context(|| format!("create staging file {}", staging.display()))?;
        Ok(StagedFile { file, staging })
    }

    /// Preallocate `size` bytes. On Unix tries `posix_fallocate` for
    /// real block allocation; falls back to `set_len` on failure or
    /// non-Unix.
    pub fn preallocate(&mut self, size: u64) -> Result<()> {
        #[cfg(unix)]
        {
            let fd = self.file.as_raw_fd();
            let r = unsafe { libc::posix_fallocate(fd, 0, size as libc::off_t) };
            if r == 0 {
                return Ok(());
            }
            tracing::debug!(errno = r, "posix_fallocate failed, falling back to set_len");
        }
        self.file
            .set_len(size)
            .context("failed to preallocate staging file")?;
        Ok(())
    }

    /// Write the whole payload.
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.file
            .write_all(bytes)
            .with_context(|| format!("write staging file {}", self.staging.display()))?;
        Ok(())
    }

    /// Sync file data to disk. Call before `publish` for durability.
    pub fn sync(&self) -> Result<()> {
        self.file.sync_all().context("sync staging file")?;
        Ok(())
    }

    /// Atomically rename the staging file onto `final_path`. Consumes
    /// the writer and closes the handle first. Fails if `final_path` is
    /// on a different filesystem.
    pub fn publish(self, final_path: &Path) -> Result<()> {
        let StagedFile { file, staging } = self;
        drop(file);
        std::fs::rename(&staging, final_path).with_context(|| {
            format!(
                "failed to rename {} to {}",
                staging.display(),
                final_path.display()
            )
        })?;
        Ok(())
    }

    /// Remove the staging file after a failed save. Consumes the writer.
    pub fn discard(self) -> Result<()> {
        let StagedFile { file, staging } = self;
        drop(file);
        match std::fs::remove_file(&staging) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("remove staging file {}", staging.display())),
        }
    }
}
