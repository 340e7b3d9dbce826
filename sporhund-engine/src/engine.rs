//! ## sporhund-engine::engine
//! **Cache-aware multi-pattern search**
//!
//! The engine owns one compiled automaton and one result cache. Scans run on
//! the caller's thread; the automaton is shared read-only, so any number of
//! threads may search concurrently. The cache is consulted first and a miss
//! falls through to a fresh scan whose result is stored for the next caller.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use sporhund_cache::{CacheStats, ResultCache};
use sporhund_config::SporhundConfig;
use sporhund_matcher::{scan, Automaton, AutomatonBuilder, BuildError, Match, PatternId};
use sporhund_patterns::PatternError;

/// Engine construction failures. Scanning itself never fails.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Patterns(#[from] PatternError),
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// A match as reported to frontends: the core record plus the exact slice of
/// the query text it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    pub offset: usize,
    pub length: usize,
    pub pattern_id: PatternId,
    pub confidence: u8,
    pub text: String,
}

/// Result of one `search` call.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub matches: Vec<SearchMatch>,
    /// Measured scan duration; for a cached result, the duration of the
    /// original scan that produced it.
    pub duration: Duration,
    pub cached: bool,
}

/// Size figures of the compiled automaton, for the stats display.
#[derive(Debug, Clone, Copy)]
pub struct AutomatonStats {
    pub state_count: usize,
    pub pattern_count: usize,
    pub heap_bytes: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct EngineStats {
    pub cache: CacheStats,
    pub automaton: AutomatonStats,
}

/// Search facade over one pattern set.
pub struct SearchEngine {
    automaton: Arc<Automaton>,
    cache: ResultCache,
}

impl SearchEngine {
    /// Compiles `patterns` and attaches an empty cache. Identifiers follow
    /// list order, skipping empty patterns.
    pub fn new(patterns: &[Vec<u8>], config: &SporhundConfig) -> Result<Self, EngineError> {
        let automaton = AutomatonBuilder::new()
            .max_states(config.matcher.max_states)
            .build(patterns.iter().map(|p| p.as_slice()))?;
        info!(
            states = automaton.state_count(),
            patterns = automaton.pattern_count(),
            "Automaton compiled"
        );
        Ok(Self {
            automaton: Arc::new(automaton),
            cache: ResultCache::with_capacity(config.cache.capacity),
        })
    }

    /// Builds an engine from the configured pattern source: the configured
    /// file when set, otherwise the built-in demonstration list.
    pub fn from_config(config: &SporhundConfig) -> Result<Self, EngineError> {
        let patterns = match &config.patterns.file {
            Some(path) => sporhund_patterns::load_file(path)?,
            None => sporhund_patterns::builtin(),
        };
        Self::new(&patterns, config)
    }

    /// Cache-aware scan of `text`. Never fails; an empty match list is a
    /// valid outcome.
    pub fn search(&self, text: &str) -> SearchOutcome {
        let bytes = text.as_bytes();

        if let Some((matches, duration)) = self.cache.get(bytes) {
            debug!(matches = matches.len(), "Serving scan result from cache");
            return SearchOutcome {
                matches: attach_slices(bytes, &matches),
                duration,
                cached: true,
            };
        }

        let (matches, duration) = scan(&self.automaton, bytes);
        self.cache.put(bytes, matches.clone(), duration);
        SearchOutcome {
            matches: attach_slices(bytes, &matches),
            duration,
            cached: false,
        }
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            cache: self.cache.stats(),
            automaton: AutomatonStats {
                state_count: self.automaton.state_count(),
                pattern_count: self.automaton.pattern_count(),
                heap_bytes: self.automaton.heap_bytes(),
            },
        }
    }

    pub fn hit_ratio(&self) -> f64 {
        self.cache.hit_ratio()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
        info!("Result cache cleared");
    }

    /// Shared handle to the compiled automaton, for callers running their
    /// own scan loops.
    pub fn automaton(&self) -> Arc<Automaton> {
        Arc::clone(&self.automaton)
    }
}

fn attach_slices(text: &[u8], matches: &[Match]) -> Vec<SearchMatch> {
    matches
        .iter()
        .map(|m| SearchMatch {
            offset: m.offset,
            length: m.length,
            pattern_id: m.pattern_id,
            confidence: m.confidence,
            text: String::from_utf8_lossy(&text[m.offset..m.offset + m.length]).into_owned(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(patterns: &[&str], capacity: usize) -> SearchEngine {
        let mut config = SporhundConfig::default();
        config.cache.capacity = capacity;
        let patterns: Vec<Vec<u8>> = patterns.iter().map(|p| p.as_bytes().to_vec()).collect();
        SearchEngine::new(&patterns, &config).unwrap()
    }

    #[test]
    fn reports_matched_text_slice_with_original_casing() {
        let engine = engine_with(&["according to", "to"], 16);
        let outcome = engine.search("According To The Jury");

        assert_eq!(outcome.matches.len(), 2);
        assert_eq!(outcome.matches[0].text, "To");
        assert_eq!(outcome.matches[0].pattern_id, 1);
        assert_eq!(outcome.matches[1].text, "According To");
        assert_eq!(outcome.matches[1].pattern_id, 0);
    }

    #[test]
    fn repeated_search_is_idempotent_and_hits_cache() {
        let engine = engine_with(&["foo"], 16);
        let first = engine.search("a foo b");
        let second = engine.search("a foo b");

        assert_eq!(first.matches, second.matches);
        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(second.duration, first.duration);

        let stats = engine.stats();
        assert_eq!((stats.cache.hits, stats.cache.misses), (1, 1));
    }

    #[test]
    fn cache_counts_follow_query_sequence() {
        let engine = engine_with(&["x"], 16);
        engine.search("foo");
        engine.search("bar");
        engine.search("foo");

        let stats = engine.stats();
        assert_eq!(stats.cache.hits, 1);
        assert_eq!(stats.cache.misses, 2);
        assert_eq!(stats.cache.total_entries, 2);
    }

    #[test]
    fn hit_ratio_matches_query_mix() {
        let engine = engine_with(&["x"], 16);
        for text in ["one", "two", "three"] {
            engine.search(text);
        }
        engine.search("one");
        engine.search("one");
        assert!((engine.hit_ratio() - 2.0 / 5.0).abs() < 1e-9);
    }

    #[test]
    fn clear_cache_forces_rescan() {
        let engine = engine_with(&["foo"], 16);
        engine.search("foo");
        engine.clear_cache();
        let outcome = engine.search("foo");
        assert!(!outcome.cached);
        assert_eq!(engine.stats().cache.misses, 1);
    }

    #[test]
    fn empty_text_searches_cleanly() {
        let engine = engine_with(&["foo"], 16);
        let outcome = engine.search("");
        assert!(outcome.matches.is_empty());
    }

    #[test]
    fn non_ascii_text_passes_through() {
        let engine = engine_with(&["héllo"], 16);
        let outcome = engine.search("saying héllo twice: héllo");
        assert_eq!(outcome.matches.len(), 2);
        assert!(outcome.matches.iter().all(|m| m.text == "héllo"));
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        use std::sync::Arc;

        let engine = Arc::new(engine_with(&["needle"], 64));
        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || {
                    for round in 0..50 {
                        let text = format!("w{worker} r{round} needle");
                        assert_eq!(engine.search(&text).matches.len(), 1);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn surfaces_build_errors() {
        let mut config = SporhundConfig::default();
        config.cache.capacity = 16;
        let patterns: Vec<Vec<u8>> = Vec::new();
        assert!(matches!(
            SearchEngine::new(&patterns, &config),
            Err(EngineError::Build(BuildError::EmptyPatternSet))
        ));
    }
}
