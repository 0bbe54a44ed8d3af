use anyhow::Result;
use std::path::PathBuf;

use super::load_entry_chunks;

/// Print reduced entry chunks as JSON
pub fn run(bundle: PathBuf) -> Result<()> {
    let chunks = load_entry_chunks(&bundle)?;
    println!("{}", serde_json::to_string_pretty(&chunks)?);
    Ok(())
}
