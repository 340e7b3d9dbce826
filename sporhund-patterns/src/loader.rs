//! ## sporhund-patterns::loader
//! **Line-oriented pattern file parsing**
//!
//! One pattern per line. Lines whose first non-whitespace character is `#`
//! are comments; blank lines are skipped; leading and trailing spaces and
//! tabs are trimmed. Patterns keep file order, which fixes their ids.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

/// Errors raised while acquiring a pattern list.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Failed to read pattern file: {0}")]
    Io(#[from] io::Error),
    #[error("Pattern source is empty after filtering comments and blank lines")]
    Empty,
}

/// Demonstration pattern set used when no file is given: common phrases from
/// legal boilerplate, handy for scanning contract-like text.
const BUILTIN: &[&str] = &[
    "pursuant to",
    "notwithstanding",
    "force majeure",
    "indemnification",
    "herein",
    "hereinafter",
    "breach of contract",
    "governing law",
    "intellectual property",
    "limitation of liability",
    "the parties agree",
    "without prejudice",
];

/// The built-in demonstration pattern list.
pub fn builtin() -> Vec<Vec<u8>> {
    BUILTIN.iter().map(|p| p.as_bytes().to_vec()).collect()
}

/// Parses pattern lines out of an in-memory source.
pub fn parse(input: &str) -> Vec<Vec<u8>> {
    input
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim_matches(|c| c == ' ' || c == '\t');
            if trimmed.is_empty() || trimmed.starts_with('#') {
                None
            } else {
                Some(trimmed.as_bytes().to_vec())
            }
        })
        .collect()
}

/// Loads and parses a UTF-8 pattern file, one pattern per line.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<u8>>, PatternError> {
    let raw = fs::read_to_string(path)?;
    let patterns = parse(&raw);
    if patterns.is_empty() {
        return Err(PatternError::Empty);
    }
    Ok(patterns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_comments_and_blank_lines() {
        let patterns = parse("# header\n\nfirst\n   \n# another\nsecond\n");
        assert_eq!(patterns, vec![b"first".to_vec(), b"second".to_vec()]);
    }

    #[test]
    fn comment_marker_after_leading_whitespace_still_comments() {
        let patterns = parse("  \t# indented comment\nreal pattern\n");
        assert_eq!(patterns, vec![b"real pattern".to_vec()]);
    }

    #[test]
    fn trims_spaces_and_tabs_but_keeps_interior_whitespace() {
        let patterns = parse("\t  force majeure  \t\n");
        assert_eq!(patterns, vec![b"force majeure".to_vec()]);
    }

    #[test]
    fn strips_carriage_returns() {
        let patterns = parse("alpha\r\nbeta\r\n");
        assert_eq!(patterns, vec![b"alpha".to_vec(), b"beta".to_vec()]);
    }

    #[test]
    fn preserves_file_order_for_id_assignment() {
        let patterns = parse("zulu\nalpha\nmike\n");
        assert_eq!(
            patterns,
            vec![b"zulu".to_vec(), b"alpha".to_vec(), b"mike".to_vec()]
        );
    }

    #[test]
    fn comment_only_source_parses_to_nothing() {
        assert!(parse("# one\n# two\n\n").is_empty());
    }

    #[test]
    fn missing_file_reports_io_error() {
        let result = load_file("definitely/not/a/real/path.txt");
        assert!(matches!(result, Err(PatternError::Io(_))));
    }

    #[test]
    fn builtin_set_is_non_empty_and_lowercase() {
        let patterns = builtin();
        assert!(!patterns.is_empty());
        assert!(patterns
            .iter()
            .all(|p| p.iter().all(|b| !b.is_ascii_uppercase())));
    }
}
