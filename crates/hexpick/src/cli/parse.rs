//! `parse` subcommand — extract the color from pick tool output.

use std::path::Path;

use super::{ColorJson, HexpickError, Result, Settings};

pub(super) fn cmd_parse(file: Option<&str>, json: bool, config_path: Option<&Path>) -> Result<()> {
    let settings = match config_path {
        Some(p) => Settings::load_from(p).0,
        None => Settings::load(),
    };
    let parser = settings.output_parser()?;

    let input = match file {
        Some(f) => std::fs::read_to_string(f)?,
        None => std::io::read_to_string(std::io::stdin())?,
    };

    let Some(color) = parser.parse(&input) else {
        return Err(HexpickError::Parse(format!(
            "no \"{} #RRGGBB\" line in input",
            parser.label()
        )));
    };

    if json {
        match serde_json::to_string_pretty(&ColorJson::from(&color)) {
            Ok(s) => println!("{s}"),
            Err(e) => log::error!("serializing color: {e}"),
        }
    } else {
        println!("{color}");
    }
    Ok(())
}
