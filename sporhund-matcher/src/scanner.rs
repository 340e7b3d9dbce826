//! ## sporhund-matcher::scanner
//! **Single-pass match enumeration against a compiled automaton**
//!
//! The scan is total over byte inputs: there is no error path, only an empty
//! match list. Per-byte work is amortized O(1); the only allocation is the
//! output buffer.

use std::time::{Duration, Instant};

use crate::automaton::{Automaton, PatternId, ROOT};

/// Reported confidence for every match. The value is fixed; it exists for
/// interface compatibility and carries no scoring semantics.
pub const CONFIDENCE: u8 = 95;

/// One occurrence of a pattern in the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Byte position where the pattern begins.
    pub offset: usize,
    /// Byte length of the pattern.
    pub length: usize,
    /// Position of the pattern in the input list.
    pub pattern_id: PatternId,
    pub confidence: u8,
}

/// Enumerates every occurrence of every pattern in `text`.
///
/// Matches come out in non-decreasing order of end position; at a shared end
/// position they follow the terminal state's propagated output list, which
/// puts suffix patterns ahead of the state's own terminals. Returns the
/// measured scan duration alongside the matches.
pub fn scan(automaton: &Automaton, text: &[u8]) -> (Vec<Match>, Duration) {
    let started = Instant::now();
    let mut matches = Vec::new();
    let mut state = ROOT;

    for (end, &byte) in text.iter().enumerate() {
        state = automaton.next_state(state, byte);
        for &pattern_id in automaton.outputs(state) {
            let length = automaton.pattern_length(pattern_id);
            matches.push(Match {
                offset: end + 1 - length,
                length,
                pattern_id,
                confidence: CONFIDENCE,
            });
        }
    }

    (matches, started.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::AutomatonBuilder;

    fn matches_for(patterns: &[&str], text: &str) -> Vec<(usize, usize, PatternId)> {
        let automaton = AutomatonBuilder::new().build(patterns.iter().copied()).unwrap();
        let (found, _) = scan(&automaton, text.as_bytes());
        found
            .iter()
            .map(|m| (m.offset, m.length, m.pattern_id))
            .collect()
    }

    #[test]
    fn empty_text_yields_no_matches() {
        assert!(matches_for(&["abc"], "").is_empty());
    }

    #[test]
    fn text_shorter_than_any_pattern_yields_no_matches() {
        assert!(matches_for(&["abcdef"], "abc").is_empty());
    }

    #[test]
    fn pattern_equal_to_text_matches_once_at_zero() {
        assert_eq!(matches_for(&["abc"], "abc"), vec![(0, 3, 0)]);
    }

    #[test]
    fn case_folds_both_pattern_and_text() {
        assert_eq!(matches_for(&["HE SAID"], "He Said"), vec![(0, 7, 0)]);
    }

    #[test]
    fn bytes_above_ascii_match_by_raw_value() {
        let automaton = AutomatonBuilder::new()
            .build([&[0xC3u8, 0xA9][..]])
            .unwrap();
        let text = [b'x', 0xC3, 0xA9, b'x'];
        let (found, _) = scan(&automaton, &text);
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].offset, found[0].length), (1, 2));
    }

    #[test]
    fn repeated_single_byte_pattern_matches_every_position() {
        assert_eq!(
            matches_for(&["a"], "aaaa"),
            vec![(0, 1, 0), (1, 1, 0), (2, 1, 0), (3, 1, 0)]
        );
    }

    #[test]
    fn overlapping_patterns_all_fire() {
        assert_eq!(
            matches_for(&["ab", "bc", "abc"], "xabcx"),
            vec![(1, 2, 0), (2, 2, 1), (1, 3, 2)]
        );
    }

    #[test]
    fn self_overlapping_occurrences_all_fire() {
        assert_eq!(
            matches_for(&["ab", "aba", "baba"], "ababa"),
            vec![(0, 2, 0), (0, 3, 1), (2, 2, 0), (2, 3, 1), (1, 4, 2)]
        );
    }

    #[test]
    fn embedded_suffix_occurrence_is_reported() {
        // "she said" ends with a full occurrence of "he said"; both complete
        // at the same position and the shorter one reports first.
        assert_eq!(
            matches_for(&["he said", "she said"], "he said she said"),
            vec![(0, 7, 0), (9, 7, 0), (8, 8, 1)]
        );
    }

    #[test]
    fn shared_end_position_reports_suffix_pattern_first() {
        assert_eq!(
            matches_for(&["according to", "to"], "According To The Jury"),
            vec![(10, 2, 1), (0, 12, 0)]
        );
    }

    #[test]
    fn duplicate_patterns_each_report() {
        assert_eq!(
            matches_for(&["ab", "ab"], "xabx"),
            vec![(1, 2, 0), (1, 2, 1)]
        );
    }

    #[test]
    fn match_end_positions_never_decrease() {
        let found = matches_for(&["a", "ab", "abc", "b", "bc", "c"], "abcabc");
        let ends: Vec<usize> = found.iter().map(|(o, l, _)| o + l).collect();
        assert!(ends.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn scan_is_repeatable() {
        let automaton = AutomatonBuilder::new()
            .build(["he said", "she said"])
            .unwrap();
        let (first, _) = scan(&automaton, b"he said she said");
        let (second, _) = scan(&automaton, b"he said she said");
        assert_eq!(first, second);
    }

    #[test]
    fn confidence_is_constant() {
        let automaton = AutomatonBuilder::new().build(["x"]).unwrap();
        let (found, _) = scan(&automaton, b"xx");
        assert!(found.iter().all(|m| m.confidence == CONFIDENCE));
    }
}
