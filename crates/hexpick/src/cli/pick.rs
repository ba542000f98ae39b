//! `pick` subcommand — run the pick tool, record and copy the color.
//!
//! The pick tool can sit waiting for a click for up to a minute, so the
//! history is loaded only after it returns. The pick lock keeps a second
//! `pick` from opening another picker meanwhile; `add`, `select` and `clear`
//! can still write, and their changes are in the history we load afterwards.

use std::path::Path;

use super::{
    ColorJson, HexpickError, PickOutput, Result, Session, Settings, command, lock, maybe_copy,
    settings_path,
};

pub(super) fn cmd_pick(json: bool, no_copy: bool, config_path: Option<&Path>) -> Result<()> {
    let path = settings_path(config_path)?;
    // Warnings are logged when the locked session loads the file below.
    let (settings, _) = Settings::load_from(&path);

    let _pick = lock::acquire_pick_lock(&path)?;
    let output = command::run_pick_command(&settings.pick_command, command::PICK_TIMEOUT)?;

    let (color, settings, history_len) = {
        let mut session = Session::open_locked(&path, lock::LOCK_TIMEOUT)?;
        let Some(color) = session.record_pick(&output)? else {
            return Err(HexpickError::Parse(
                "pick tool output contained no color (cancelled?)".into(),
            ));
        };
        let history_len = session.history().len();
        (color, session.settings().clone(), history_len)
    };
    let copied = maybe_copy(&settings, &color, no_copy);

    if json {
        let out = PickOutput {
            color: ColorJson::from(&color),
            copied,
            history_len,
        };
        match serde_json::to_string_pretty(&out) {
            Ok(s) => println!("{s}"),
            Err(e) => log::error!("serializing pick result: {e}"),
        }
    } else if copied {
        println!("{color} (copied)");
    } else {
        println!("{color}");
    }
    Ok(())
}
