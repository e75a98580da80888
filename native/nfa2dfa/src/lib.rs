//! Conversion of epsilon-NFAs into equivalent DFAs by subset construction.
//!
//! ```
//! use nfa2dfa::{Alphabet, EpsilonNFA, StateSet, SubsetConstructionEngine};
//!
//! // 0 -ε-> 1 -a-> 2
//! let mut nfa = EpsilonNFA::new();
//! nfa.add_epsilon_transition(0, 1);
//! nfa.add_transition(1, 'a', 2);
//!
//! let alphabet = Alphabet::try_from_iter(['a']).unwrap();
//! let mut engine = SubsetConstructionEngine::new(nfa, alphabet, 0, [2]).unwrap();
//! let dfa = engine.convert();
//!
//! assert_eq!(dfa.start_state(), Some(&StateSet::from([0, 1])));
//! assert!(dfa.accepts(&['a']));
//! ```

pub mod automaton;
pub mod error;

pub use automaton::{
    Alphabet, Completion, ConversionOptions, DFA, EpsilonNFA, Label, StateId, StateSet,
    SubsetConstructionEngine, subset_construction,
};
pub use error::ConstructionError;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn nfa2dfa(m: &Bound<'_, PyModule>) -> PyResult<()> {
    automaton::automaton(m)
}
