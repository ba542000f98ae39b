//! `clear` subcommand — remove every history entry.

use std::path::Path;

use super::{Result, open_locked_session};

pub(super) fn cmd_clear(config_path: Option<&Path>) -> Result<()> {
    let mut session = open_locked_session(config_path)?;
    let removed = session.history().len();
    session.clear_history()?;
    println!(
        "Cleared {removed} color{}",
        if removed == 1 { "" } else { "s" }
    );
    Ok(())
}
