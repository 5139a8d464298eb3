//! `downbox verify` – recompute a saved entry's digest and compare.

use anyhow::{bail, Context, Result};
use downbox_core::checksum;
use downbox_core::registry::parse_entry_uri;
use downbox_core::save::SaveHandler;
use std::path::Path;

pub async fn run_verify(handler: &SaveHandler, identifier: &str) -> Result<()> {
    let Some(id) = parse_entry_uri(identifier) else {
        bail!("not a registry identifier: {identifier}");
    };
    let registry = handler.registry().context("no registry on this host")?;
    let entry = registry
        .get_entry(id)
        .await?
        .with_context(|| format!("no registry entry {id}"))?;
    let Some(recorded) = entry.sha256.as_deref() else {
        bail!("entry {id} has no recorded checksum");
    };

    let actual = checksum::sha256_path(Path::new(&entry.path))?;
    if actual != recorded {
        bail!(
            "checksum mismatch for {}: recorded {recorded}, actual {actual}",
            entry.path
        );
    }
    println!("OK  {}  {}", actual, entry.path);
    Ok(())
}
