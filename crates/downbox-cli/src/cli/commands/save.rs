//! `downbox save` – save a local file or stdin into the Downloads area.

use anyhow::{Context, Result};
use downbox_core::save::SaveHandler;
use std::io::Read;
use std::path::Path;

pub async fn run_save(handler: &SaveHandler, input: &Path, name: Option<&str>) -> Result<()> {
    let (bytes, derived) = read_input(input)?;
    let file_name = name
        .map(str::to_owned)
        .or(derived)
        .context("no file name; pass --name when reading from stdin")?;

    let identifier = handler
        .save_to_downloads(Some(&bytes), Some(&file_name))
        .await?;
    println!("{identifier}");
    Ok(())
}

fn read_input(input: &Path) -> Result<(Vec<u8>, Option<String>)> {
    if input == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("read stdin")?;
        return Ok((buf, None));
    }
    let bytes =
        std::fs::read(input).with_context(|| format!("read {}", input.display()))?;
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());
    Ok((bytes, name))
}
