//! # Sporhund Pattern Input
//!
//! Crate for loading pattern lists from files and the built-in
//! demonstration set.

pub mod loader;

pub use loader::{builtin, load_file, parse, PatternError};
