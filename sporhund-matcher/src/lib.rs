//! # Sporhund Matcher
//!
//! Crate for multi-pattern matching: automaton construction and the scan loop.

pub mod automaton;
pub mod scanner;

pub use automaton::{Automaton, AutomatonBuilder, BuildError, PatternId, StateId};
pub use scanner::{scan, Match, CONFIDENCE};
