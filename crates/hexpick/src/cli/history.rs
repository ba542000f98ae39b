//! `history` subcommand — show the color history as a grid.

use std::path::Path;

use super::{ColorJson, HistoryOutput, Result, grid, open_session};

pub(super) fn cmd_history(json: bool, config_path: Option<&Path>) -> Result<()> {
    let session = open_session(config_path)?;
    let settings = session.settings();
    let history = session.history();

    if json {
        let out = HistoryOutput {
            count: history.len(),
            capacity: settings.history_capacity,
            columns: settings.grid_columns,
            colors: history.iter().map(ColorJson::from).collect(),
        };
        match serde_json::to_string_pretty(&out) {
            Ok(s) => println!("{s}"),
            Err(e) => log::error!("serializing history: {e}"),
        }
        return Ok(());
    }

    if history.is_empty() {
        println!("(no colors picked yet)");
        return Ok(());
    }

    let index_width = history.len().to_string().len();
    for (r, row) in grid::rows(history, settings.grid_columns).iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(c, color)| {
                let index = r * settings.grid_columns.max(1) + c + 1;
                format!("{index:>index_width$} {color}")
            })
            .collect();
        println!("{}", cells.join("  "));
    }
    println!();
    println!("{} of {} slots used", history.len(), settings.history_capacity);
    Ok(())
}
