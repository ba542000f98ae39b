//! `select` subcommand — re-select a history entry and copy it.

use std::path::Path;

use super::{Result, maybe_copy, open_locked_session, resolve_entry};

/// Move an entry to the front. A color that isn't in the history yet goes
/// through the capacity-enforcing insert instead, so selecting can never grow
/// the history past its capacity.
pub(super) fn cmd_select(entry: &str, no_copy: bool, config_path: Option<&Path>) -> Result<()> {
    // The history lock is released before the clipboard tool runs.
    let (color, settings) = {
        let mut session = open_locked_session(config_path)?;
        let color = resolve_entry(session.history(), entry)?;
        if session.history().contains(&color) {
            session.select(color.clone())?;
        } else {
            log::info!("{color} is not in the history, recording it as a new pick");
            session.record_color(color.clone())?;
        }
        (color, session.settings().clone())
    };

    let copied = maybe_copy(&settings, &color, no_copy);
    if copied {
        println!("{color} (copied)");
    } else {
        println!("{color}");
    }
    Ok(())
}
