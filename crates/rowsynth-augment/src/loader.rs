use std::fs;
use std::path::Path;

use crate::errors::AugmentError;

/// Load a delimited text file as an ordered sequence of lines.
///
/// The whole file is read and decoded as UTF-8, then split on newline
/// boundaries with trailing whitespace stripped per line. A missing or
/// unreadable file and invalid UTF-8 content are both fatal.
pub fn load_lines(path: &Path) -> Result<Vec<String>, AugmentError> {
    let text = String::from_utf8(fs::read(path)?)?;
    Ok(text.lines().map(|line| line.trim_end().to_string()).collect())
}
