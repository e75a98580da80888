//! Subset construction algorithm for converting ε-NFA to DFA.

use crate::automaton::dfa::DFA;
use crate::automaton::epsilon_nfa::EpsilonNFA;
use crate::automaton::state::{StateBits, StateId, StateSet};
use crate::automaton::symbol::Alphabet;
use indexmap::IndexMap;
use log::{debug, trace};
use std::hash::Hash;

/// How missing transitions are represented in the resulting DFA.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Completion {
    /// Missing transitions lead to an implicit dead state.
    #[default]
    Partial,
    /// Missing transitions lead to an explicit dead state (the empty set).
    Total,
}

/// Settings for a single conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionOptions {
    /// Representation of missing transitions
    pub completion: Completion,
}

impl ConversionOptions {
    /// Default options: a partial DFA.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how missing transitions are represented.
    pub fn completion(mut self, completion: Completion) -> Self {
        self.completion = completion;
        self
    }
}

/// Convert an epsilon-NFA to a DFA using the powerset construction algorithm.
///
/// Only DFA states reachable from the epsilon closure of `start` are built.
/// Each DFA state is the epsilon closure of the NFA states it stands for, and
/// is final when it contains any of `final_states`.
pub fn subset_construction<S: Clone + Hash + Eq>(
    nfa: &EpsilonNFA<S>,
    alphabet: &Alphabet<S>,
    start: StateId,
    final_states: &StateSet,
    options: ConversionOptions,
) -> DFA<S> {
    let mut dfa = DFA::new();

    let Some(start_index) = nfa.index_of(start) else {
        // A state the NFA never mentions has no transitions at all
        let initial = StateSet::singleton(start);
        debug!("subset construction: start state {initial} has no transitions");
        dfa.set_start_state(initial.clone());
        if final_states.contains(start) {
            dfa.add_final_state(initial);
        }
        finish(&mut dfa, alphabet, options);
        return dfa;
    };

    let finals = nfa.to_bits(final_states);
    let mut initial = nfa.empty_bits();
    initial.insert(start_index);
    nfa.close(&mut initial);

    let initial_set = nfa.to_state_set(&initial);
    dfa.set_start_state(initial_set.clone());
    debug!("subset construction: start state {initial_set}");

    // Every set ever pushed, with its state ids; each is expanded exactly once
    let mut state_mapping: IndexMap<StateBits, StateSet> = IndexMap::new();
    state_mapping.insert(initial.clone(), initial_set);
    let mut worklist = vec![initial];

    while let Some(current) = worklist.pop() {
        let Some(current_set) = state_mapping.get(&current).cloned() else {
            continue;
        };
        trace!("expand {current_set}");

        for symbol in alphabet {
            let mut next = nfa.step_bits(&current, symbol);
            if next.is_empty() {
                // No transition on this symbol - implicit dead state
                continue;
            }
            nfa.close(&mut next);

            let next_set = match state_mapping.get(&next) {
                Some(existing) => existing.clone(),
                None => {
                    let created = nfa.to_state_set(&next);
                    state_mapping.insert(next.clone(), created.clone());
                    worklist.push(next);
                    created
                }
            };
            trace!("  {current_set} -> {next_set}");
            dfa.add_transition(&current_set, symbol.clone(), next_set);
        }

        if current.intersects(&finals) {
            dfa.add_final_state(current_set);
        }
    }

    finish(&mut dfa, alphabet, options);
    dfa
}

fn finish<S: Clone + Hash + Eq>(dfa: &mut DFA<S>, alphabet: &Alphabet<S>, options: ConversionOptions) {
    if options.completion == Completion::Total && dfa.complete(alphabet) {
        trace!("added dead state {}", StateSet::new());
    }

    debug!(
        "subset construction: {} states, {} final",
        dfa.num_states(),
        dfa.final_states().len()
    );
}
