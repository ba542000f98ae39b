//! Pick tool output parsing — extract a `#RRGGBB` token from free-form text.
//!
//! The pick tool prints something like:
//!
//! ```text
//! Picked color: rgb(40, 40, 40)
//! Hex: #282828
//! ```
//!
//! Only the labelled hex line is used; everything else is ignored.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::color::HexColor;

/// Label emitted by `niri msg pick-color` in front of the hex value.
pub const DEFAULT_LABEL: &str = "Hex:";

static DEFAULT_PARSER: LazyLock<OutputParser> =
    LazyLock::new(|| OutputParser::new(DEFAULT_LABEL).expect("default label is valid"));

/// Extract the color from pick tool output using [`DEFAULT_LABEL`].
///
/// Returns `None` when no labelled color is present.
pub fn parse_pick_output(output: &str) -> Option<HexColor> {
    DEFAULT_PARSER.parse(output)
}

/// Parser for a labelled hex color in external tool output.
///
/// The label is matched case-insensitively and may be followed by any amount
/// of whitespace before the `#`. Exactly six hex digits must follow; a seventh
/// digit disqualifies the match.
#[derive(Debug, Clone)]
pub struct OutputParser {
    label: String,
    pattern: Regex,
}

impl OutputParser {
    /// Build a parser for `label`. The label is matched literally.
    pub fn new(label: &str) -> crate::error::Result<Self> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(crate::HexpickError::Config(
                "output label cannot be empty".into(),
            ));
        }
        let pattern = RegexBuilder::new(&format!(
            r"{}\s*(#[0-9a-f]{{6}})(?:[^0-9a-f]|$)",
            regex::escape(trimmed)
        ))
        .case_insensitive(true)
        .build()
        .map_err(|e| crate::HexpickError::Config(format!("output label {label:?}: {e}")))?;
        Ok(OutputParser {
            label: trimmed.to_string(),
            pattern,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Return the first labelled color in `output`, uppercased.
    ///
    /// Never fails: a miss (or anything unexpected in the matched token) is `None`.
    pub fn parse(&self, output: &str) -> Option<HexColor> {
        let token = self.pattern.captures(output)?.get(1)?.as_str();
        match HexColor::parse(token) {
            Ok(color) => Some(color),
            Err(e) => {
                log::debug!("discarding matched token {token:?}: {e}");
                None
            }
        }
    }
}

impl Default for OutputParser {
    fn default() -> Self {
        DEFAULT_PARSER.clone()
    }
}
