//! `downbox resolve` – dereference an identifier to a filesystem path.

use anyhow::Result;
use downbox_core::save::SaveHandler;

pub async fn run_resolve(handler: &SaveHandler, identifier: &str) -> Result<()> {
    let path = handler.resolve(identifier).await?;
    println!("{}", path.display());
    Ok(())
}
