//! File and stdout helpers shared by the commands

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

use locdiff_core::Document;

/// Read and parse an HTML file
pub fn read_document(path: &Path) -> Result<Document> {
    let html = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Document::parse(&html))
}

/// Write `content` to `path`, or to stdout when no path is given
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}
