//! Finite automata and the subset construction.
//!
//! This module provides:
//! - An epsilon-NFA with epsilon closure computation
//! - A DFA whose states are canonical sets of NFA states
//! - Subset construction (NFA to DFA conversion), as a pure function and as
//!   a validating engine
//! - PyO3 bindings for Python interoperability (feature `python`)

mod dfa;
mod engine;
mod epsilon_nfa;
#[cfg(feature = "python")]
mod python_bindings;
mod state;
mod subset_construction;
mod symbol;

pub use dfa::{DFA, GraphEdge};
pub use engine::SubsetConstructionEngine;
pub use epsilon_nfa::EpsilonNFA;
#[cfg(feature = "python")]
pub use python_bindings::automaton;
pub use state::{StateId, StateSet};
pub use subset_construction::{Completion, ConversionOptions, subset_construction};
pub use symbol::{Alphabet, EPSILON_GLYPH, EPSILON_NAME, Label};
