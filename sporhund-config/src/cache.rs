//! Result cache configuration parameters.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Sizing of the bounded result cache.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached scan results.
    #[serde(default = "default_capacity")]
    #[validate(range(min = 1, max = 1048576))]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    1024
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}
