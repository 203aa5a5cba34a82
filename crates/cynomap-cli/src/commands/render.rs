//! Render command handler.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use cynomap_lib::JumpRange;

use super::MapContext;
use crate::output::{render_document, OutputFormat};

/// Handle the render subcommand.
///
/// Writes the map to `output` when given, otherwise to stdout.
pub fn handle_render(
    context: &MapContext,
    range: JumpRange,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let map = context.compute(range)?;
    let document = render_document(&map, format)?;

    match output {
        Some(path) => {
            fs::write(path, &document)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = document.len(), "map written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(document.as_bytes())
                .context("failed to write map to stdout")?;
        }
    }

    Ok(())
}
