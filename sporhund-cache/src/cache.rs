//! ## sporhund-cache::cache
//! **Bounded concurrent memoization of scan results**
//!
//! ### Expectations:
//! - Reads never serialize against other reads
//! - Counters readable without taking the write lock
//! - Oldest-by-insertion eviction when capacity is reached
//!
//! Entries are keyed by a 64-bit FNV-1a fingerprint of the query text. The
//! original text bytes are stored alongside and compared on a fingerprint
//! hit, so two texts colliding on the hash cannot read each other's results;
//! a collision reads as a miss and the colliding entry is replaced by the
//! following insert.

use std::collections::HashMap;
use std::hash::Hasher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use fnv::FnvHasher;
use parking_lot::RwLock;

use sporhund_matcher::Match;

/// Snapshot of the cache counters. Monotonic between `clear` calls; reads of
/// the counters may trail concurrent updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub total_entries: usize,
}

struct CacheEntry {
    text: Box<[u8]>,
    matches: Vec<Match>,
    scan_duration: Duration,
    inserted_at: Instant,
    hit_count: AtomicU64,
}

/// Bounded concurrent map from text fingerprint to previously scanned
/// matches. Eviction removes the entry with the oldest insertion instant;
/// lookups do not refresh it.
pub struct ResultCache {
    entries: RwLock<HashMap<u64, CacheEntry>>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl ResultCache {
    /// Creates a cache bounded to `capacity` entries. A capacity of zero
    /// disables storage; every lookup is then a miss.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::with_capacity(capacity.min(1024))),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the memoized matches and original scan duration for `text`,
    /// or `None` on a miss. Bumps the per-entry and global counters.
    pub fn get(&self, text: &[u8]) -> Option<(Vec<Match>, Duration)> {
        let key = fingerprint(text);
        let entries = self.entries.read();
        match entries.get(&key) {
            Some(entry) if *entry.text == *text => {
                entry.hit_count.fetch_add(1, Ordering::Relaxed);
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some((entry.matches.clone(), entry.scan_duration))
            }
            _ => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Stores a scan result, evicting the oldest entry first if the store
    /// would exceed capacity. Re-inserting an existing text replaces its
    /// entry in place without eviction.
    pub fn put(&self, text: &[u8], matches: Vec<Match>, scan_duration: Duration) {
        if self.capacity == 0 {
            return;
        }
        let key = fingerprint(text);
        let mut entries = self.entries.write();

        if !entries.contains_key(&key) && entries.len() >= self.capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.inserted_at)
                .map(|(&k, _)| k);
            if let Some(k) = oldest {
                entries.remove(&k);
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }

        entries.insert(
            key,
            CacheEntry {
                text: text.to_vec().into_boxed_slice(),
                matches,
                scan_duration,
                inserted_at: Instant::now(),
                hit_count: AtomicU64::new(0),
            },
        );
    }

    /// Removes all entries and resets every counter.
    pub fn clear(&self) {
        let mut entries = self.entries.write();
        entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            total_entries: self.entries.read().len(),
        }
    }

    /// Fraction of lookups served from the cache; zero before any lookup.
    pub fn hit_ratio(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        if total == 0 {
            return 0.0;
        }
        hits as f64 / total as f64
    }
}

fn fingerprint(text: &[u8]) -> u64 {
    let mut hasher = FnvHasher::default();
    hasher.write(text);
    hasher.finish()
}
