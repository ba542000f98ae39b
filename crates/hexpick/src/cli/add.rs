//! `add` subcommand — record a color as the most recent entry.

use std::path::Path;

use super::{HexColor, Result, open_locked_session};

pub(super) fn cmd_add(color: &str, config_path: Option<&Path>) -> Result<()> {
    let color = HexColor::parse(color.trim())?;
    let mut session = open_locked_session(config_path)?;
    session.record_color(color.clone())?;
    println!("{color}");
    Ok(())
}
