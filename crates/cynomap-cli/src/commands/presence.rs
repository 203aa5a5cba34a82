//! Presence command handler.

use anyhow::Result;

use cynomap_lib::JumpRange;

use super::MapContext;
use crate::output::format_presence;

/// Handle the presence subcommand.
///
/// Presence does not depend on jump range; the default range is used.
pub fn handle_presence(context: &MapContext) -> Result<()> {
    let map = context.compute(JumpRange::default())?;
    print!("{}", format_presence(&map));
    Ok(())
}
