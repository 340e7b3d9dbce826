//! # Sporhund Configuration System
//!
//! Hierarchical configuration for the scanning engine.
//!
//! ## Features
//! - **Unified Configuration**: single source of truth across all components
//! - **Validation**: runtime validation of critical parameters
//! - **Environment Awareness**: `SPORHUND_*` variables override file values

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod cache;
mod error;
mod matcher;
mod patterns;

pub use cache::CacheConfig;
pub use error::ConfigError;
pub use matcher::MatcherConfig;
pub use patterns::PatternsConfig;

/// Top-level configuration container for all Sporhund components.
#[derive(Clone, Debug, Serialize, Deserialize, Validate, Default)]
pub struct SporhundConfig {
    /// Automaton construction limits.
    #[validate(nested)]
    pub matcher: MatcherConfig,

    /// Result cache sizing.
    #[validate(nested)]
    pub cache: CacheConfig,

    /// Pattern source selection.
    #[validate(nested)]
    pub patterns: PatternsConfig,
}

impl SporhundConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/sporhund.yaml` - base settings. If missing, defaults are used.
    /// 3. `SPORHUND_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let figment = Figment::from(Serialized::defaults(SporhundConfig::default()));

        let figment = if Path::new("config/sporhund.yaml").exists() {
            figment.merge(Yaml::file("config/sporhund.yaml"))
        } else {
            figment
        };

        figment
            .merge(Env::prefixed("SPORHUND_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Load configuration from a specific path for testing/validation.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(
                path.to_string_lossy().to_string(),
            )));
        }

        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("SPORHUND_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config_validation() {
        let config = SporhundConfig::default();
        config.validate().expect("Default config should validate");
    }

    #[test]
    fn out_of_range_capacity_fails_validation() {
        let mut config = SporhundConfig::default();
        config.cache.capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_state_budget_fails_validation() {
        let mut config = SporhundConfig::default();
        config.matcher.max_states = 16;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_explicit_path_is_reported() {
        assert!(matches!(
            SporhundConfig::load_from_path("config/nope.yaml"),
            Err(ConfigError::FileNotFound(_))
        ));
    }

    #[test]
    fn environment_override() {
        std::env::set_var("SPORHUND_CACHE__CAPACITY", "8192");
        let config = SporhundConfig::load().unwrap();
        assert_eq!(config.cache.capacity, 8192);
        std::env::remove_var("SPORHUND_CACHE__CAPACITY");
    }
}
