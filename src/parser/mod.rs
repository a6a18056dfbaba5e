//! JSON file discovery, resolution and parsing

pub mod filter;
pub mod reader;
pub mod resolver;
pub mod walker;

pub use reader::{read_all, read_all_with_progress, FileReadResult};
pub use resolver::resolve;
pub use walker::{walk, walk_matching};

use crate::error::ParseError;
use serde_json::Value;

/// Parse the text of a JSON file.
///
/// A leading byte-order mark is ignored, matching how browsers decode text files.
pub fn parse_json_text(content: &str) -> Result<Value, ParseError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    serde_json::from_str(content).map_err(|e| ParseError::from_serde(&e))
}
