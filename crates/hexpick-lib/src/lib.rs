//! hexpick — recency-ordered color history for desktop color pickers.

pub mod color;
pub mod command;
pub mod error;
pub mod grid;
pub mod history;
pub mod lock;
pub mod parser;
pub mod session;
pub mod settings;

pub use color::HexColor;
pub use error::HexpickError;
pub use history::{ColorHistory, DEFAULT_CAPACITY};
pub use parser::{OutputParser, parse_pick_output};
