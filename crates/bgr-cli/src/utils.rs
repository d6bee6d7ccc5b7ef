use anyhow::{Context, Result};
use serde::Serialize;
use tokio::fs;

/// Read a whole document.
///
/// # Errors
///
/// When failed to read the file or the content is not utf-8.
pub async fn read_document(path: &str) -> Result<String> {
    fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read document {path}"))
}

/// Print `value` as pretty json on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}
