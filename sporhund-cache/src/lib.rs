//! # Sporhund Result Cache
//!
//! Crate for memoizing scan results keyed by a fingerprint of the query text.

pub mod cache;

pub use cache::{CacheStats, ResultCache};
