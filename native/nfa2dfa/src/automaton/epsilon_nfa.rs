//! Epsilon Non-deterministic Finite Automaton (ε-NFA) implementation.

use crate::automaton::dfa::GraphEdge;
use crate::automaton::state::{StateBits, StateId, StateSet};
use crate::automaton::symbol::Label;
use fixedbitset::FixedBitSet;
use indexmap::{IndexMap, IndexSet};
use std::fmt;
use std::hash::Hash;

/// An Epsilon Non-deterministic Finite Automaton.
///
/// States are keys of a transition table mapping each label (a symbol or
/// epsilon) to the set of states reachable on it. A state that only ever
/// appears as a transition target is an implicit state with no outgoing
/// transitions.
///
/// State identifiers are opaque. Internally every state gets a dense index
/// in first-seen order, and all state sets used while computing closures and
/// moves are bit sets over those indices.
#[derive(Debug, Clone)]
pub struct EpsilonNFA<S: Hash + Eq> {
    /// Dense numbering: index -> state id
    ids: IndexSet<StateId>,
    /// Indices of states declared as table keys
    declared: FixedBitSet,
    /// Transitions per index: label -> destination indices
    rows: Vec<IndexMap<Label<S>, StateBits>>,
}

impl<S: Clone + Hash + Eq> EpsilonNFA<S> {
    /// Create a new empty epsilon-NFA.
    pub fn new() -> Self {
        Self {
            ids: IndexSet::new(),
            declared: FixedBitSet::new(),
            rows: Vec::new(),
        }
    }

    /// Build an NFA from a table of `state -> label -> destinations`.
    ///
    /// Every row declares its state, even when it has no transitions.
    pub fn from_table<T, R, D>(table: T) -> Self
    where
        T: IntoIterator<Item = (StateId, R)>,
        R: IntoIterator<Item = (Label<S>, D)>,
        D: IntoIterator<Item = StateId>,
    {
        let mut nfa = Self::new();
        for (source, row) in table {
            nfa.add_state(source);
            for (label, destinations) in row {
                for destination in destinations {
                    nfa.add_labeled_transition(source, label.clone(), destination);
                }
            }
        }
        nfa
    }

    /// Dense index of `state`, assigning the next one if it is new.
    fn intern(&mut self, state: StateId) -> usize {
        let (index, added) = self.ids.insert_full(state);
        if added {
            self.rows.push(IndexMap::new());
            self.declared.grow(self.ids.len());
        }
        index
    }

    /// Declare a state, with no transitions if it is new.
    pub fn add_state(&mut self, state: StateId) {
        let index = self.intern(state);
        self.declared.insert(index);
    }

    /// Add a transition from source to destination on the given label.
    pub fn add_labeled_transition(&mut self, source: StateId, label: Label<S>, destination: StateId) {
        let src = self.intern(source);
        self.declared.insert(src);
        let dst = self.intern(destination);
        self.rows[src].entry(label).or_default().insert(dst);
    }

    /// Add a transition from source to destination consuming `symbol`.
    pub fn add_transition(&mut self, source: StateId, symbol: S, destination: StateId) {
        self.add_labeled_transition(source, Label::Symbol(symbol), destination);
    }

    /// Add an epsilon transition from source to destination.
    pub fn add_epsilon_transition(&mut self, source: StateId, destination: StateId) {
        self.add_labeled_transition(source, Label::Epsilon, destination);
    }

    /// Check if the state is declared as a key of the transition table.
    pub fn is_declared(&self, state: StateId) -> bool {
        self.ids
            .get_index_of(&state)
            .is_some_and(|index| self.declared.contains(index))
    }

    /// Check if the state is known to the NFA, either declared or referenced
    /// as a transition destination.
    pub fn contains_state(&self, state: StateId) -> bool {
        self.ids.contains(&state)
    }

    /// All states known to the NFA.
    pub fn states(&self) -> StateSet {
        self.ids.iter().copied().collect()
    }

    /// Get the number of states.
    pub fn num_states(&self) -> usize {
        self.ids.len()
    }

    /// Destinations of `state` on `label`; empty when there are none.
    pub fn targets(&self, state: StateId, label: &Label<S>) -> StateSet {
        self.ids
            .get_index_of(&state)
            .and_then(|index| self.rows[index].get(label))
            .map(|bits| self.to_state_set(bits))
            .unwrap_or_default()
    }

    /// Every consuming symbol that labels at least one transition.
    pub fn symbols(&self) -> IndexSet<&S> {
        self.rows
            .iter()
            .flat_map(|row| row.keys().filter_map(Label::symbol))
            .collect()
    }

    /// Compute the epsilon closure of a set of states.
    ///
    /// States unknown to the NFA have no transitions: they appear in the
    /// closure themselves and contribute nothing else.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut bits = self.to_bits(states);
        self.close(&mut bits);

        let mut closure = self.to_state_set(&bits);
        closure.extend(states.iter().filter(|state| !self.contains_state(*state)));
        closure
    }

    /// Union of the destinations of every state in `states` on `symbol`.
    /// Epsilon moves are not followed.
    pub fn step(&self, states: &StateSet, symbol: &S) -> StateSet {
        self.to_state_set(&self.step_bits(&self.to_bits(states), symbol))
    }

    /// Check whether the NFA accepts `input` from `start`, following every
    /// path including epsilon moves.
    pub fn accepts<'a, I>(&self, start: StateId, final_states: &StateSet, input: I) -> bool
    where
        I: IntoIterator<Item = &'a S>,
        S: 'a,
    {
        let Some(start) = self.ids.get_index_of(&start) else {
            // An unknown start state has no transitions at all.
            return input.into_iter().next().is_none() && final_states.contains(start);
        };

        let finals = self.to_bits(final_states);
        let mut current = self.empty_bits();
        current.insert(start);
        self.close(&mut current);

        for symbol in input {
            if current.is_empty() {
                return false;
            }
            current = self.step_bits(&current, symbol);
            self.close(&mut current);
        }
        current.intersects(&finals)
    }

    /// Get all transitions as an iterator of `(source, label, destination)`.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, &Label<S>, StateId)> + '_ {
        self.rows.iter().enumerate().flat_map(move |(index, row)| {
            let src = self.ids[index];
            row.iter().flat_map(move |(label, dests)| {
                dests.iter().map(move |dst| (src, label, self.ids[dst]))
            })
        })
    }

    /// Dense index of a state, if known.
    pub(crate) fn index_of(&self, state: StateId) -> Option<usize> {
        self.ids.get_index_of(&state)
    }

    /// An empty set sized for this NFA.
    pub(crate) fn empty_bits(&self) -> StateBits {
        StateBits::with_capacity(self.ids.len())
    }

    /// Dense form of `states`, dropping states unknown to the NFA.
    pub(crate) fn to_bits(&self, states: &StateSet) -> StateBits {
        let mut bits = self.empty_bits();
        for index in states.iter().filter_map(|state| self.index_of(state)) {
            bits.insert(index);
        }
        bits
    }

    /// State ids of a dense set.
    pub(crate) fn to_state_set(&self, bits: &StateBits) -> StateSet {
        bits.iter().map(|index| self.ids[index]).collect()
    }

    /// Extend `bits` in place with every state reachable by epsilon moves.
    pub(crate) fn close(&self, bits: &mut StateBits) {
        let mut stack: Vec<usize> = bits.iter().collect();

        while let Some(index) = stack.pop() {
            let Some(destinations) = self.rows[index].get(&Label::Epsilon) else {
                continue;
            };
            for next in destinations.iter() {
                if bits.insert(next) {
                    stack.push(next);
                }
            }
        }
    }

    /// Dense form of [`step`](Self::step).
    pub(crate) fn step_bits(&self, bits: &StateBits, symbol: &S) -> StateBits {
        let label = Label::Symbol(symbol.clone());
        let mut reached = self.empty_bits();

        for index in bits.iter() {
            if let Some(destinations) = self.rows[index].get(&label) {
                reached.union_with(destinations);
            }
        }

        reached
    }
}

impl<S: Clone + Hash + Eq + fmt::Display> EpsilonNFA<S> {
    /// Convert to labeled graph edges, with epsilon drawn as `ε`.
    pub fn edges(&self) -> Vec<GraphEdge<StateId>> {
        self.transitions()
            .map(|(src, label, dst)| (src, dst, label.to_string()))
            .collect()
    }
}

impl<S: Clone + Hash + Eq> Default for EpsilonNFA<S> {
    fn default() -> Self {
        Self::new()
    }
}
