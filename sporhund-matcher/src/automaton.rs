//! ## sporhund-matcher::automaton
//! **Aho-Corasick automaton over the 256-byte alphabet**
//!
//! ### Expectations:
//! - Deterministic state layout for a given pattern list
//! - Dense per-state transition tables for predictable scan latency
//! - Immutable after build; shared freely across scanning threads
//!
//! States live in a contiguous array and reference each other by 32-bit
//! index, so the whole graph is a plain value with no interior pointers.
//! Output lists are pre-propagated along failure links at build time; the
//! scan loop never chases failure links to collect matches.

use std::collections::VecDeque;
use std::mem::size_of;

use smallvec::SmallVec;
use thiserror::Error;

/// Index of a state in the automaton's state array.
pub type StateId = u32;
/// Position of a pattern in the input list.
pub type PatternId = u32;

/// The root state. Goto entries of 0 mean "no edge"; the root is only ever
/// re-entered through failure links, so the two readings never collide.
pub const ROOT: StateId = 0;
const NO_EDGE: StateId = 0;

/// Default ceiling on the number of trie states.
pub const DEFAULT_MAX_STATES: usize = 1 << 20;

/// Construction error conditions. Partial automata are never exposed.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Pattern set is empty after filtering")]
    EmptyPatternSet,
    #[error("State budget exceeded: automaton needs more than {limit} states")]
    StateLimitExceeded { limit: usize },
}

/// Per-state output list. Inline capacity covers the common case; states
/// where many patterns end spill to the heap without truncation.
type OutputList = SmallVec<[PatternId; 8]>;

/// Dense goto row: one successor per input byte, 0 meaning "no edge".
type GotoTable = [StateId; 256];

/// A compiled, immutable multi-pattern matching machine.
///
/// Patterns are ASCII case-folded at insertion; bytes >= 128 participate by
/// raw value. Duplicate patterns keep distinct identifiers and report
/// independently. Empty patterns are skipped and consume no identifier.
pub struct Automaton {
    transitions: Vec<GotoTable>,
    failure: Vec<StateId>,
    outputs: Vec<OutputList>,
    pattern_lens: Vec<u32>,
}

impl Automaton {
    /// Number of states, including the root.
    pub fn state_count(&self) -> usize {
        self.transitions.len()
    }

    /// Number of patterns compiled in.
    pub fn pattern_count(&self) -> usize {
        self.pattern_lens.len()
    }

    /// Byte length of the pattern with the given identifier.
    #[inline]
    pub fn pattern_length(&self, id: PatternId) -> usize {
        self.pattern_lens[id as usize] as usize
    }

    /// Effective transition: from `state` on `byte`, following failure links
    /// until a goto edge exists or the root is reached.
    #[inline]
    pub fn next_state(&self, mut state: StateId, byte: u8) -> StateId {
        let b = byte.to_ascii_lowercase() as usize;
        loop {
            let next = self.transitions[state as usize][b];
            if next != NO_EDGE {
                return next;
            }
            if state == ROOT {
                return ROOT;
            }
            state = self.failure[state as usize];
        }
    }

    /// Propagated output list of `state`: every pattern ending here or at any
    /// state on the failure chain, suffix patterns first.
    #[inline]
    pub fn outputs(&self, state: StateId) -> &[PatternId] {
        &self.outputs[state as usize]
    }

    /// Approximate heap footprint, dominated by the dense transition tables.
    pub fn heap_bytes(&self) -> usize {
        let spilled: usize = self
            .outputs
            .iter()
            .filter(|list| list.spilled())
            .map(|list| list.capacity() * size_of::<PatternId>())
            .sum();
        self.transitions.len() * size_of::<GotoTable>()
            + self.failure.len() * size_of::<StateId>()
            + spilled
            + self.pattern_lens.len() * size_of::<u32>()
    }
}

/// Builder for [`Automaton`] with a configurable state budget.
pub struct AutomatonBuilder {
    max_states: usize,
}

impl AutomatonBuilder {
    pub fn new() -> Self {
        Self {
            max_states: DEFAULT_MAX_STATES,
        }
    }

    /// Caps the number of states; exceeding the cap fails the build.
    pub fn max_states(mut self, limit: usize) -> Self {
        self.max_states = limit;
        self
    }

    /// Compiles the pattern list into an immutable automaton.
    ///
    /// Identifiers are assigned in input order, skipping empty patterns.
    pub fn build<I, P>(self, patterns: I) -> Result<Automaton, BuildError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let mut transitions: Vec<GotoTable> = vec![[NO_EDGE; 256]];
        let mut outputs: Vec<OutputList> = vec![OutputList::new()];
        let mut pattern_lens: Vec<u32> = Vec::new();

        for pattern in patterns {
            let bytes = pattern.as_ref();
            if bytes.is_empty() {
                continue;
            }
            let id = pattern_lens.len() as PatternId;
            let mut state = ROOT;
            for &raw in bytes {
                let b = raw.to_ascii_lowercase() as usize;
                let next = transitions[state as usize][b];
                state = if next != NO_EDGE {
                    next
                } else {
                    if transitions.len() >= self.max_states {
                        return Err(BuildError::StateLimitExceeded {
                            limit: self.max_states,
                        });
                    }
                    let fresh = transitions.len() as StateId;
                    transitions.push([NO_EDGE; 256]);
                    outputs.push(OutputList::new());
                    transitions[state as usize][b] = fresh;
                    fresh
                };
            }
            outputs[state as usize].push(id);
            pattern_lens.push(bytes.len() as u32);
        }

        if pattern_lens.is_empty() {
            return Err(BuildError::EmptyPatternSet);
        }

        let failure = Self::link_failures(&transitions, &mut outputs);

        Ok(Automaton {
            transitions,
            failure,
            outputs,
            pattern_lens,
        })
    }

    /// Breadth-first failure-link computation with output propagation.
    ///
    /// For a state `u` reached from parent `r` on byte `b`, the failure link
    /// is found by walking `r`'s failure chain until some state has a goto on
    /// `b`; a missing root edge reads as 0, which is the root itself. Every
    /// ancestor on the chain is strictly shallower than `u`, so its own
    /// output list is final by the time `u` is processed.
    fn link_failures(
        transitions: &[GotoTable],
        outputs: &mut [OutputList],
    ) -> Vec<StateId> {
        let mut failure: Vec<StateId> = vec![ROOT; transitions.len()];
        let mut queue: VecDeque<StateId> = VecDeque::new();

        for b in 0..256 {
            let child = transitions[ROOT as usize][b];
            if child != NO_EDGE {
                failure[child as usize] = ROOT;
                queue.push_back(child);
            }
        }

        while let Some(state) = queue.pop_front() {
            for b in 0..256 {
                let child = transitions[state as usize][b];
                if child == NO_EDGE {
                    continue;
                }
                queue.push_back(child);

                let mut probe = failure[state as usize];
                while probe != ROOT && transitions[probe as usize][b] == NO_EDGE {
                    probe = failure[probe as usize];
                }
                let link = transitions[probe as usize][b];
                failure[child as usize] = link;

                // Suffix patterns go ahead of the state's own terminals, so a
                // shared end position reports the shorter match first.
                if !outputs[link as usize].is_empty() {
                    let mut merged = outputs[link as usize].clone();
                    for &id in outputs[child as usize].iter() {
                        if !merged.contains(&id) {
                            merged.push(id);
                        }
                    }
                    outputs[child as usize] = merged;
                }
            }
        }

        failure
    }
}

impl Default for AutomatonBuilder {
    fn default() -> Self {
        Self::new()
    }
}
