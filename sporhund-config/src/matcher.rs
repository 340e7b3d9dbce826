//! Matcher configuration parameters.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Automaton construction limits.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct MatcherConfig {
    /// Ceiling on the number of automaton states. Construction fails rather
    /// than exceed it.
    #[serde(default = "default_max_states")]
    #[validate(range(min = 1024, max = 16777216))]
    pub max_states: usize,
}

fn default_max_states() -> usize {
    1_048_576
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_states: default_max_states(),
        }
    }
}
