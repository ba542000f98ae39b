//! CLI subcommands — pick, parse, history management, settings.

mod add;
mod clear;
mod config_cmd;
mod history;
mod parse;
mod pick;
mod select;

use std::path::{Path, PathBuf};

use clap::Subcommand;
use serde::Serialize;

pub(super) use hexpick_lib::HexColor;
pub(super) use hexpick_lib::HexpickError;
pub(super) use hexpick_lib::command;
pub(super) use hexpick_lib::error::Result;
pub(super) use hexpick_lib::grid;
pub(super) use hexpick_lib::history::ColorHistory;
pub(super) use hexpick_lib::lock;
pub(super) use hexpick_lib::session::{self, Session};
pub(super) use hexpick_lib::settings::Settings;

const PADDING: usize = 2;

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

/// Open the session for `custom_path`, or the platform default.
pub(super) fn open_session(custom_path: Option<&Path>) -> Result<Session> {
    match custom_path {
        Some(p) => Session::open(p),
        None => Session::open_default(),
    }
}

/// Settings file for `custom_path`, or the platform default.
pub(super) fn settings_path(custom_path: Option<&Path>) -> Result<PathBuf> {
    match custom_path {
        Some(p) => Ok(p.to_path_buf()),
        None => session::default_path(),
    }
}

/// Open the session for writing. Waits for other writers to finish first.
pub(super) fn open_locked_session(custom_path: Option<&Path>) -> Result<Session> {
    Session::open_locked(&settings_path(custom_path)?, lock::LOCK_TIMEOUT)
}

/// Resolve a history entry given as a hex color or a 1-based grid index.
pub(super) fn resolve_entry(history: &ColorHistory, entry: &str) -> Result<HexColor> {
    let entry = entry.trim();
    if let Ok(index) = entry.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| history.get(i))
            .cloned()
            .ok_or_else(|| {
                HexpickError::Color(format!(
                    "no history entry {index} (history has {} entr{})",
                    history.len(),
                    if history.len() == 1 { "y" } else { "ies" }
                ))
            });
    }
    HexColor::parse(entry)
}

/// Copy to the clipboard if enabled. A failed copy is reported but not fatal.
pub(super) fn maybe_copy(settings: &Settings, color: &HexColor, no_copy: bool) -> bool {
    if no_copy || !settings.copy_to_clipboard {
        return false;
    }
    match command::copy_to_clipboard(
        &settings.clipboard_command,
        color,
        command::CLIPBOARD_TIMEOUT,
    ) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("could not copy {color} to clipboard: {e}");
            false
        }
    }
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct ColorJson {
    pub hex: String,
    pub rgb: [u8; 3],
}

impl From<&HexColor> for ColorJson {
    fn from(c: &HexColor) -> Self {
        let (r, g, b) = c.rgb();
        ColorJson {
            hex: c.to_string(),
            rgb: [r, g, b],
        }
    }
}

#[derive(Serialize)]
pub(super) struct PickOutput {
    pub color: ColorJson,
    pub copied: bool,
    pub history_len: usize,
}

#[derive(Serialize)]
pub(super) struct HistoryOutput {
    pub count: usize,
    pub capacity: usize,
    pub columns: usize,
    pub colors: Vec<ColorJson>,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub settings_file: Option<String>,
    pub settings_file_exists: bool,
    pub settings: Settings,
    pub problems: Vec<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the pick tool, record the color and copy it to the clipboard
    Pick {
        /// Don't copy the picked color to the clipboard
        #[arg(long)]
        no_copy: bool,
    },

    /// Extract the color from pick tool output (reads stdin if no file is given)
    Parse {
        /// File holding the pick tool output
        file: Option<String>,
    },

    /// Record a color as the most recent entry
    Add {
        /// Color as #RRGGBB
        color: String,
    },

    /// Re-select a history entry, moving it to the front
    Select {
        /// Color as #RRGGBB, or a 1-based grid index
        entry: String,
        /// Don't copy the selected color to the clipboard
        #[arg(long)]
        no_copy: bool,
    },

    /// Show the color history grid
    History,

    /// Remove every history entry
    Clear,

    /// Show current settings and file path
    Config,
}

/// Warn if `--json` was passed to a command that doesn't support it.
fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

pub fn run(cmd: Command, json: bool, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        Command::Pick { no_copy } => pick::cmd_pick(json, no_copy, config_path),
        Command::Parse { file } => parse::cmd_parse(file.as_deref(), json, config_path),
        Command::Add { color } => {
            if json {
                warn_json_unsupported("add");
            }
            add::cmd_add(&color, config_path)
        }
        Command::Select { entry, no_copy } => {
            if json {
                warn_json_unsupported("select");
            }
            select::cmd_select(&entry, no_copy, config_path)
        }
        Command::History => history::cmd_history(json, config_path),
        Command::Clear => {
            if json {
                warn_json_unsupported("clear");
            }
            clear::cmd_clear(config_path)
        }
        Command::Config => config_cmd::cmd_config(json, config_path),
    }
}

#[cfg(test)]
mod format_tests {
    use super::*;

    #[test]
    fn kv_width_top_only() {
        let w = kv_width(&["Short:", "Longer key:"], &[]);
        // "Longer key:" = 11 + PADDING = 13
        assert_eq!(w, 13);
    }

    #[test]
    fn kv_width_indent_drives_width() {
        let w = kv_width(&["A:"], &["history_capacity:"]);
        // "history_capacity:" = 17 + PADDING + 2 = 21
        assert_eq!(w, 21);
    }

    #[test]
    fn values_align_across_levels() {
        let w = kv_width(&["Top:"], &["Indent:"]);
        let top = format_kv("Top:", "V", w);
        let indent = format!("  {:<width$}{}", "Indent:", "V", width = w - 2);
        assert_eq!(top.find('V'), indent.find('V'));
    }

    #[test]
    fn format_kv_basic() {
        assert_eq!(format_kv("Key:", "value", 10), "Key:      value");
    }

    #[test]
    fn kv_width_empty_both() {
        assert_eq!(kv_width(&[], &[]), 0);
    }
}
