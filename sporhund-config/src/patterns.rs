//! Pattern source configuration parameters.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Where the engine gets its pattern list. The CLI `--patterns` flag takes
/// precedence over this section; with neither set, the built-in
/// demonstration list is used.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, Default)]
pub struct PatternsConfig {
    /// Optional pattern file loaded at startup.
    #[serde(default)]
    pub file: Option<PathBuf>,
}
