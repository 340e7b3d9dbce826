//! # Sporhund Engine
//!
//! Crate composing the matcher and the result cache into the search facade
//! consumed by frontends.

pub mod engine;

pub use engine::{
    AutomatonStats, EngineError, EngineStats, SearchEngine, SearchMatch, SearchOutcome,
};
