//! Hex color token — `#RRGGBB`, hex digits normalized to uppercase.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A validated `#RRGGBB` color. Always 7 bytes, uppercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parse a `#RRGGBB` string (digits in any case).
    ///
    /// Unlike a pick tool's output, no surrounding text or whitespace is accepted;
    /// the leading `#` is required.
    pub fn parse(s: &str) -> crate::error::Result<Self> {
        let Some(digits) = s.strip_prefix('#') else {
            return Err(crate::HexpickError::Color(format!(
                "Invalid color: {s} (expected #RRGGBB)"
            )));
        };
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(crate::HexpickError::Color(format!(
                "Invalid color: {s} (expected #RRGGBB)"
            )));
        }
        Ok(HexColor(format!("#{}", digits.to_ascii_uppercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue channels.
    pub fn rgb(&self) -> (u8, u8, u8) {
        // Invariant: bytes 1..7 are ASCII hex digits.
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        (channel(1), channel(3), channel(5))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HexColor {
    type Err = crate::HexpickError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HexColor::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = crate::HexpickError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        HexColor::parse(&s)
    }
}

impl From<HexColor> for String {
    fn from(c: HexColor) -> Self {
        c.0
    }
}

impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
