//! Persisted settings — TOML-based, platform-aware paths.
//!
//! The color history lives here alongside the knobs that control how it is
//! produced (pick tool, output label) and consumed (capacity, grid, clipboard).

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::grid::DEFAULT_COLUMNS;
use crate::history::{ColorHistory, DEFAULT_CAPACITY};
use crate::parser::{DEFAULT_LABEL, OutputParser};

/// Header comment prepended to saved settings files.
const SETTINGS_HEADER: &str =
    "# hexpick settings — the color history is rewritten after every pick.\n\n";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Most recent first.
    #[serde(default)]
    pub color_history: ColorHistory,

    /// Maximum history length after a pick. Default: 36.
    #[serde(default = "default_capacity")]
    pub history_capacity: usize,

    /// Columns in the history grid. Default: 6.
    #[serde(default = "default_columns")]
    pub grid_columns: usize,

    /// Label preceding the hex value in the pick tool's output. Default: "Hex:".
    #[serde(default = "default_label")]
    pub output_label: String,

    /// Pick tool invocation. Default: `niri msg pick-color`.
    #[serde(default = "default_pick_command")]
    pub pick_command: Vec<String>,

    /// Clipboard tool invocation; the color is appended as the last argument.
    #[serde(default = "default_clipboard_command")]
    pub clipboard_command: Vec<String>,

    /// Copy picked and selected colors to the clipboard.
    #[serde(default = "default_true")]
    pub copy_to_clipboard: bool,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}
fn default_columns() -> usize {
    DEFAULT_COLUMNS
}
fn default_label() -> String {
    DEFAULT_LABEL.into()
}
fn default_pick_command() -> Vec<String> {
    vec!["niri".into(), "msg".into(), "pick-color".into()]
}
fn default_clipboard_command() -> Vec<String> {
    vec!["wl-copy".into()]
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            color_history: ColorHistory::default(),
            history_capacity: default_capacity(),
            grid_columns: default_columns(),
            output_label: default_label(),
            pick_command: default_pick_command(),
            clipboard_command: default_clipboard_command(),
            copy_to_clipboard: true,
        }
    }
}

/// Validation errors that [`Settings::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// `history_capacity` is zero, so every pick would be discarded.
    ZeroCapacity,
    /// `grid_columns` is zero.
    ZeroColumns,
    /// `output_label` is empty or whitespace-only.
    EmptyLabel,
    /// A command list is empty (`field` is `"pick_command"` or `"clipboard_command"`).
    EmptyCommand { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::ZeroCapacity => write!(f, "history_capacity must be at least 1"),
            ValidationError::ZeroColumns => write!(f, "grid_columns must be at least 1"),
            ValidationError::EmptyLabel => write!(f, "output_label cannot be empty"),
            ValidationError::EmptyCommand { field } => write!(f, "{field} cannot be empty"),
        }
    }
}

impl Settings {
    /// Platform-specific settings directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hexpick"))
    }

    /// Full path to the settings file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found.
    pub fn load() -> Self {
        let (settings, warnings) = Self::load_with_warnings();
        for w in &warnings {
            log::warn!("{w}");
        }
        settings
    }

    /// Save settings to an arbitrary path atomically (write to temp file, then rename).
    ///
    /// A header comment is prepended to warn that manual edits may be overwritten.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let contents = format!("{SETTINGS_HEADER}{serialized}");
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &contents)?;
        match std::fs::rename(&tmp, path) {
            Ok(()) => Ok(()),
            Err(_) => {
                // Rename can fail across filesystems; fall back to direct write + cleanup
                let result = std::fs::write(path, &contents);
                let _ = std::fs::remove_file(&tmp);
                result
            }
        }
    }

    /// Load settings from an arbitrary path, returning the settings and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(settings) => (settings, vec![]),
                Err(e) => {
                    let warning = format!(
                        "settings parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Load settings from the default path, returning the settings and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Parser for the configured output label.
    pub fn output_parser(&self) -> crate::error::Result<OutputParser> {
        OutputParser::new(&self.output_label)
    }

    /// Validate the settings, collecting all errors.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.history_capacity == 0 {
            errors.push(ValidationError::ZeroCapacity);
        }
        if self.grid_columns == 0 {
            errors.push(ValidationError::ZeroColumns);
        }
        if self.output_label.trim().is_empty() {
            errors.push(ValidationError::EmptyLabel);
        }
        if is_empty_command(&self.pick_command) {
            errors.push(ValidationError::EmptyCommand {
                field: "pick_command",
            });
        }
        if is_empty_command(&self.clipboard_command) {
            errors.push(ValidationError::EmptyCommand {
                field: "clipboard_command",
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn is_empty_command(argv: &[String]) -> bool {
    argv.first().is_none_or(|program| program.trim().is_empty())
}
