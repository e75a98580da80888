//! Conversion engine holding a validated NFA definition and its DFA.

use crate::automaton::dfa::DFA;
use crate::automaton::epsilon_nfa::EpsilonNFA;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::subset_construction::{ConversionOptions, subset_construction};
use crate::automaton::symbol::Alphabet;
use crate::error::ConstructionError;
use indexmap::{IndexMap, IndexSet};
use std::hash::Hash;

/// Subset construction over a fixed NFA, alphabet, start state and final
/// states.
///
/// The inputs are validated once and never change. [`convert`] rebuilds the
/// DFA from scratch on every call, so repeated runs give identical results.
///
/// [`convert`]: SubsetConstructionEngine::convert
#[derive(Debug, Clone)]
pub struct SubsetConstructionEngine<S: Hash + Eq> {
    nfa: EpsilonNFA<S>,
    alphabet: Alphabet<S>,
    start_state: StateId,
    final_states: StateSet,
    options: ConversionOptions,
    /// Epsilon closure of the start state
    dfa_start_state: StateSet,
    /// Output of the last conversion, empty before the first one
    dfa: DFA<S>,
}

impl<S: Clone + Hash + Eq> SubsetConstructionEngine<S> {
    /// Validate the conversion inputs.
    ///
    /// The start state and every final state must be known to the NFA, as a
    /// declared state or as a transition destination.
    pub fn new<F>(
        nfa: EpsilonNFA<S>,
        alphabet: Alphabet<S>,
        start_state: StateId,
        final_states: F,
    ) -> Result<Self, ConstructionError>
    where
        F: IntoIterator<Item = StateId>,
    {
        if alphabet.is_empty() {
            return Err(ConstructionError::EmptyAlphabet);
        }
        if !nfa.contains_state(start_state) {
            return Err(ConstructionError::UnknownStartState(start_state));
        }

        let mut finals = StateSet::new();
        for state in final_states {
            if !nfa.contains_state(state) {
                return Err(ConstructionError::UnknownFinalState(state));
            }
            finals.insert(state);
        }

        let dfa_start_state = nfa.epsilon_closure(&StateSet::singleton(start_state));

        Ok(Self {
            nfa,
            alphabet,
            start_state,
            final_states: finals,
            options: ConversionOptions::default(),
            dfa_start_state,
            dfa: DFA::new(),
        })
    }

    /// Use `options` for subsequent conversions.
    pub fn with_options(mut self, options: ConversionOptions) -> Self {
        self.options = options;
        self
    }

    /// Epsilon closure of `states` in the underlying NFA.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        self.nfa.epsilon_closure(states)
    }

    /// Run the subset construction, replacing any previous result.
    pub fn convert(&mut self) -> &DFA<S> {
        self.dfa = subset_construction(
            &self.nfa,
            &self.alphabet,
            self.start_state,
            &self.final_states,
            self.options,
        );
        &self.dfa
    }

    /// The DFA transition table and final states of the last conversion.
    ///
    /// Both are empty until [`convert`](Self::convert) has run.
    pub fn dfa(&self) -> (&IndexMap<StateSet, IndexMap<S, StateSet>>, &IndexSet<StateSet>) {
        (self.dfa.transitions(), self.dfa.final_states())
    }

    /// The DFA start state: the epsilon closure of the NFA start state.
    pub fn dfa_start_state(&self) -> &StateSet {
        &self.dfa_start_state
    }

    /// The full result of the last conversion.
    pub fn result(&self) -> &DFA<S> {
        &self.dfa
    }

    /// Check if a conversion has run.
    pub fn is_converted(&self) -> bool {
        self.dfa.start_state().is_some()
    }

    /// Consume the engine, keeping the result of the last conversion.
    pub fn into_dfa(self) -> DFA<S> {
        self.dfa
    }

    /// The NFA being converted.
    pub fn nfa(&self) -> &EpsilonNFA<S> {
        &self.nfa
    }

    /// The input alphabet.
    pub fn alphabet(&self) -> &Alphabet<S> {
        &self.alphabet
    }

    /// The NFA start state.
    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    /// The NFA final states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// Options used by [`convert`](Self::convert).
    pub fn options(&self) -> ConversionOptions {
        self.options
    }
}
