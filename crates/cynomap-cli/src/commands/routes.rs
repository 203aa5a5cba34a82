//! Routes command handler.

use anyhow::Result;

use cynomap_lib::JumpRange;

use super::MapContext;
use crate::output::format_routes;

/// Handle the routes subcommand.
pub fn handle_routes(context: &MapContext, range: JumpRange) -> Result<()> {
    let map = context.compute(range)?;
    print!("{}", format_routes(&map));
    Ok(())
}
