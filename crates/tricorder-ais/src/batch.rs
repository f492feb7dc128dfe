//! Seed lists for batch runs.

use std::path::Path;

use crate::error::{Error, Result};

/// Parse seeds: one per line, trimmed, blank lines skipped.
pub fn parse_seeds(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read seeds from a file. An empty list is an error.
pub fn read_seeds(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)?;
    let seeds = parse_seeds(&text);
    if seeds.is_empty() {
        return Err(Error::EmptyBatch);
    }
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn blank_lines_are_skipped() {
        let seeds = parse_seeds("debug latency\n\n   \n  poetic rhymes  \r\n");
        assert_eq!(seeds, vec!["debug latency", "poetic rhymes"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_seeds("/definitely/not/here/seeds.txt").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn whitespace_only_file_is_empty_batch() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "   ").unwrap();
        assert!(matches!(read_seeds(file.path()), Err(Error::EmptyBatch)));
    }

    #[test]
    fn reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "one two").unwrap();
        writeln!(file, "three").unwrap();
        assert_eq!(read_seeds(file.path()).unwrap(), vec!["one two", "three"]);
    }
}
