//! `downbox list` – show media registry entries.

use anyhow::Result;
use downbox_core::save::SaveHandler;

pub async fn run_list(handler: &SaveHandler) -> Result<()> {
    let Some(registry) = handler.registry() else {
        println!("No registry on this host (direct backend).");
        return Ok(());
    };
    let entries = registry.list_entries().await?;
    if entries.is_empty() {
        println!("No entries in registry.");
        return Ok(());
    }
    println!(
        "{:<6} {:<10} {:<16} {:<10} {}",
        "ID", "STATE", "MIME", "SIZE", "NAME"
    );
    for e in entries {
        println!(
            "{:<6} {:<10} {:<16} {:<10} {}",
            e.id,
            e.state.as_str(),
            e.mime_type,
            e.size_bytes,
            e.display_name
        );
    }
    Ok(())
}
