//! File writes into the Downloads area.
//!
//! The staged sink writes to a `.pending` sibling (preallocated, synced)
//! and atomically renames into place; the direct sink writes the target
//! in one pass with no staging step. Collisions with existing files are
//! resolved by ` (n)` suffixes, never by overwrite.

mod direct;
mod staged;

pub use direct::write_direct;
pub use staged::StagedFile;

use std::path::{Path, PathBuf};

/// Suffix of staging files awaiting publish.
pub const PENDING_SUFFIX: &str = ".pending";

/// Staging path for a final target (`report.pdf` → `report.pdf.pending`).
pub fn pending_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(PENDING_SUFFIX);
    PathBuf::from(o)
}

/// Picks a target path in `dir` that collides with neither an existing
/// file nor an in-flight staging file: `name.ext`, then `name (1).ext`,
/// `name (2).ext`, ...
pub fn unique_target(dir: &Path, file_name: &str) -> PathBuf {
    let first = dir.join(file_name);
    if !first.exists() && !pending_path(&first).exists() {
        return first;
    }

    let (stem, ext) = split_name(file_name);
    let mut n: u32 = 1;
    loop {
        let candidate = if ext.is_empty() {
            format!("{stem} ({n})")
        } else {
            format!("{stem} ({n}).{ext}")
        };
        let path = dir.join(&candidate);
        if !path.exists() && !pending_path(&path).exists() {
            return path;
        }
        n += 1;
    }
}

/// Splits `name.ext` into stem and extension. Names with no dot, or a
/// single leading dot, have no extension.
fn split_name(file_name: &str) -> (&str, &str) {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, ext),
        _ => (file_name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn pending_path_appends_suffix() {
        let p = pending_path(Path::new("report.pdf"));
        assert_eq!(p.to_string_lossy(), "report.pdf.pending");
        let p2 = pending_path(Path::new("/tmp/notes.txt"));
        assert_eq!(p2.to_string_lossy(), "/tmp/notes.txt.pending");
    }

    #[test]
    fn unique_target_first_free() {
        let dir = tempfile::tempdir().unwrap();
        let t = unique_target(dir.path(), "report.pdf");
        assert_eq!(t, dir.path().join("report.pdf"));
    }

    #[test]
    fn unique_target_counts_up() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("report.pdf"), b"a").unwrap();
        let t = unique_target(dir.path(), "report.pdf");
        assert_eq!(t, dir.path().join("report (1).pdf"));

        fs::write(&t, b"b").unwrap();
        let t2 = unique_target(dir.path(), "report.pdf");
        assert_eq!(t2, dir.path().join("report (2).pdf"));
    }

    #[test]
    fn unique_target_no_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("README"), b"a").unwrap();
        let t = unique_target(dir.path(), "README");
        assert_eq!(t, dir.path().join("README (1)"));
    }

    #[test]
    fn unique_target_avoids_inflight_staging() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("report.pdf.pending"), b"a").unwrap();
        let t = unique_target(dir.path(), "report.pdf");
        assert_eq!(t, dir.path().join("report (1).pdf"));
    }

    #[test]
    fn leading_dot_name_keeps_whole_stem() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".bashrc"), b"a").unwrap();
        let t = unique_target(dir.path(), ".bashrc");
        assert_eq!(t, dir.path().join(".bashrc (1)"));
    }

    #[test]
    fn staged_write_publish_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("output.bin");

        let mut staged = StagedFile::create(&final_path).unwrap();
        staged.preallocate(5).unwrap();
        staged.write_all(b"hello").unwrap();
        staged.sync().unwrap();
        staged.publish(&final_path).unwrap();

        assert!(!pending_path(&final_path).exists());
        assert_eq!(fs::read(&final_path).unwrap(), b"hello");
    }

    #[test]
    fn staged_discard_removes_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("output.bin");

        let mut staged = StagedFile::create(&final_path).unwrap();
        staged.write_all(b"partial").unwrap();
        staged.discard().unwrap();

        assert!(!pending_path(&final_path).exists());
        assert!(!final_path.exists());
    }

    #[test]
    fn direct_write_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("notes.txt");
        write_direct(&target, b"direct bytes").unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"direct bytes");
    }
}
