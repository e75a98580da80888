//! Deterministic Finite Automaton (DFA) produced by subset construction.

use crate::automaton::state::StateSet;
use crate::automaton::symbol::Alphabet;
use indexmap::{IndexMap, IndexSet};
use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

/// A labeled edge in the graph representation: (source, destination, label).
pub type GraphEdge<N> = (N, N, String);

/// A Deterministic Finite Automaton whose states are sets of NFA states.
///
/// The transition function may be partial: a missing `(state, symbol)` entry
/// leads to an implicit, non-accepting dead state. When completed (see
/// [`DFA::complete`]) the dead state is materialized as the empty set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DFA<S: Hash + Eq> {
    /// Start state (None until a conversion has run)
    start_state: Option<StateSet>,
    /// Transitions: source -> symbol -> destination, in discovery order
    transitions: IndexMap<StateSet, IndexMap<S, StateSet>>,
    /// Final (accepting) states, in discovery order
    final_states: IndexSet<StateSet>,
}

impl<S: Clone + Hash + Eq> DFA<S> {
    /// Create a new empty DFA.
    pub fn new() -> Self {
        Self {
            start_state: None,
            transitions: IndexMap::new(),
            final_states: IndexSet::new(),
        }
    }

    /// Add a state with no transitions. Returns `true` if it was new.
    pub fn add_state(&mut self, state: StateSet) -> bool {
        if self.transitions.contains_key(&state) {
            return false;
        }
        self.transitions.insert(state, IndexMap::new());
        true
    }

    /// Set the start state, adding it if needed.
    pub fn set_start_state(&mut self, state: StateSet) {
        self.add_state(state.clone());
        self.start_state = Some(state);
    }

    /// Add a final (accepting) state.
    pub fn add_final_state(&mut self, state: StateSet) {
        self.add_state(state.clone());
        self.final_states.insert(state);
    }

    /// Add a transition, replacing any previous one for `(source, symbol)`.
    pub fn add_transition(&mut self, source: &StateSet, symbol: S, destination: StateSet) {
        if !self.transitions.contains_key(source) {
            self.transitions.insert(source.clone(), IndexMap::new());
        }
        self.add_state(destination.clone());
        if let Some(row) = self.transitions.get_mut(source) {
            row.insert(symbol, destination);
        }
    }

    /// Get the start state.
    pub fn start_state(&self) -> Option<&StateSet> {
        self.start_state.as_ref()
    }

    /// Get the whole transition table.
    pub fn transitions(&self) -> &IndexMap<StateSet, IndexMap<S, StateSet>> {
        &self.transitions
    }

    /// Get the transition from a state on a symbol.
    pub fn transition(&self, source: &StateSet, symbol: &S) -> Option<&StateSet> {
        self.transitions.get(source)?.get(symbol)
    }

    /// Iterate over the states in discovery order.
    pub fn states(&self) -> impl Iterator<Item = &StateSet> + '_ {
        self.transitions.keys()
    }

    /// Get the number of states.
    pub fn num_states(&self) -> usize {
        self.transitions.len()
    }

    /// Get the final states.
    pub fn final_states(&self) -> &IndexSet<StateSet> {
        &self.final_states
    }

    /// Check if a state is final.
    pub fn is_final(&self, state: &StateSet) -> bool {
        self.final_states.contains(state)
    }

    /// Run the DFA over `input` from the start state.
    ///
    /// Returns `None` when the run falls into the implicit dead state or no
    /// start state has been set.
    pub fn run<'a, I>(&self, input: I) -> Option<&StateSet>
    where
        I: IntoIterator<Item = &'a S>,
        S: 'a,
    {
        let mut current = self.start_state.as_ref()?;
        for symbol in input {
            current = self.transition(current, symbol)?;
        }
        Some(current)
    }

    /// Check if the DFA accepts `input`.
    pub fn accepts<'a, I>(&self, input: I) -> bool
    where
        I: IntoIterator<Item = &'a S>,
        S: 'a,
    {
        self.run(input).is_some_and(|state| self.is_final(state))
    }

    /// Check if every state has a transition on every symbol of `alphabet`.
    pub fn is_total(&self, alphabet: &Alphabet<S>) -> bool {
        self.transitions
            .values()
            .all(|row| alphabet.iter().all(|symbol| row.contains_key(symbol)))
    }

    /// Make the transition function total over `alphabet`.
    ///
    /// Missing transitions are routed to the empty state set, which loops to
    /// itself on every symbol and never accepts. Returns `true` if the dead
    /// state had to be added.
    pub fn complete(&mut self, alphabet: &Alphabet<S>) -> bool {
        if self.start_state.is_none() || self.is_total(alphabet) {
            return false;
        }

        let dead = StateSet::new();
        self.add_state(dead.clone());
        for row in self.transitions.values_mut() {
            for symbol in alphabet {
                if !row.contains_key(symbol) {
                    row.insert(symbol.clone(), dead.clone());
                }
            }
        }
        true
    }

    /// Check if the DFA is empty (accepts no strings).
    pub fn is_empty(&self) -> bool {
        let Some(start) = &self.start_state else {
            return true;
        };

        if self.final_states.is_empty() {
            return true;
        }

        // BFS to find if any final state is reachable
        let mut visited: IndexSet<&StateSet> = IndexSet::new();
        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(state) = queue.pop_front() {
            if !visited.insert(state) {
                continue;
            }

            if self.final_states.contains(state) {
                return false;
            }

            if let Some(row) = self.transitions.get(state) {
                queue.extend(row.values().filter(|next| !visited.contains(next)));
            }
        }

        true
    }
}

impl<S: Clone + Hash + Eq + fmt::Display> DFA<S> {
    /// Convert to labeled graph edges.
    pub fn edges(&self) -> Vec<GraphEdge<StateSet>> {
        self.transitions
            .iter()
            .flat_map(|(src, row)| {
                row.iter()
                    .map(move |(symbol, dst)| (src.clone(), dst.clone(), symbol.to_string()))
            })
            .collect()
    }
}

impl<S: Clone + Hash + Eq> Default for DFA<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// The transition table report: one line per state, one indented line per
/// transition, then the final states.
impl<S: Hash + Eq + fmt::Display> fmt::Display for DFA<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DFA transition table:")?;
        for (state, row) in &self.transitions {
            writeln!(f, "State: {state}")?;
            for (symbol, next) in row {
                writeln!(f, "  {symbol} -> {next}")?;
            }
        }

        writeln!(f)?;
        write!(f, "DFA final states: [")?;
        for (i, state) in self.final_states.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{state}")?;
        }
        writeln!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set<const N: usize>(states: [u32; N]) -> StateSet {
        StateSet::from(states)
    }

    fn two_state_dfa() -> DFA<char> {
        // {0} -a-> {1}(final) -b-> {0}
        let mut dfa = DFA::new();
        dfa.set_start_state(set([0]));
        dfa.add_transition(&set([0]), 'a', set([1]));
        dfa.add_transition(&set([1]), 'b', set([0]));
        dfa.add_final_state(set([1]));
        dfa
    }

    #[test]
    fn test_dfa_basic() {
        let dfa = two_state_dfa();

        assert_eq!(dfa.num_states(), 2);
        assert_eq!(dfa.start_state(), Some(&set([0])));
        assert_eq!(dfa.transition(&set([0]), &'a'), Some(&set([1])));
        assert_eq!(dfa.transition(&set([0]), &'b'), None);
        assert!(dfa.is_final(&set([1])));
        assert!(!dfa.is_empty());
    }

    #[test]
    fn test_run_and_accepts() {
        let dfa = two_state_dfa();
        let accepts = |input: &str| dfa.accepts(input.chars().collect::<Vec<_>>().iter());

        assert!(accepts("a"));
        assert!(accepts("aba"));
        assert!(!accepts(""));
        assert!(!accepts("ab"));
        assert!(!accepts("aa"));
        assert_eq!(dfa.run(&['a', 'a']), None);
    }

    #[test]
    fn test_complete_adds_dead_state() {
        let alphabet = Alphabet::try_from_iter(['a', 'b']).unwrap();
        let mut dfa = two_state_dfa();
        assert!(!dfa.is_total(&alphabet));

        assert!(dfa.complete(&alphabet));
        assert!(dfa.is_total(&alphabet));
        assert_eq!(dfa.num_states(), 3);

        let dead = StateSet::new();
        assert_eq!(dfa.transition(&set([0]), &'b'), Some(&dead));
        assert_eq!(dfa.transition(&dead, &'a'), Some(&dead));
        assert!(!dfa.is_final(&dead));
        assert!(!dfa.accepts(&['a', 'a', 'b']));

        // Already total: nothing to add.
        assert!(!dfa.complete(&alphabet));
        assert_eq!(dfa.num_states(), 3);
    }

    #[test]
    fn test_empty_dfa() {
        let dfa: DFA<char> = DFA::new();
        assert!(dfa.is_empty());
        assert_eq!(dfa.run(std::iter::empty()), None);

        let mut dfa2: DFA<char> = DFA::new();
        dfa2.set_start_state(set([0]));
        // No final states - should be empty
        assert!(dfa2.is_empty());

        // Unreachable final state
        dfa2.add_final_state(set([3]));
        assert!(dfa2.is_empty());
    }

    #[test]
    fn test_report() {
        let dfa = two_state_dfa();
        let expected = "DFA transition table:\n\
                        State: (0,)\n  a -> (1,)\n\
                        State: (1,)\n  b -> (0,)\n\
                        \n\
                        DFA final states: [(1,)]\n";
        assert_eq!(dfa.to_string(), expected);
    }

    #[test]
    fn test_edges() {
        let dfa = two_state_dfa();
        assert_eq!(
            dfa.edges(),
            vec![
                (set([0]), set([1]), "a".to_string()),
                (set([1]), set([0]), "b".to_string()),
            ]
        );
    }
}
