//! State types for automata.

use fixedbitset::FixedBitSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A state identifier represented as a u32.
///
/// Identifiers are opaque: they need not be dense or start at zero.
pub type StateId = u32;

/// A set of NFA states in canonical form: sorted and duplicate-free.
///
/// Set-equal values compare, hash and order alike, so a `StateSet` is used
/// directly as the key of a DFA state ("superstate"). Ordering is
/// lexicographic over the ascending members.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateSet {
    states: Vec<StateId>,
}

impl StateSet {
    /// Create a new empty state set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state set containing a single state.
    pub fn singleton(state: StateId) -> Self {
        Self {
            states: vec![state],
        }
    }

    /// Insert a state into the set. Returns `true` if it was not present.
    pub fn insert(&mut self, state: StateId) -> bool {
        match self.states.binary_search(&state) {
            Ok(_) => false,
            Err(pos) => {
                self.states.insert(pos, state);
                true
            }
        }
    }

    /// Check if the set contains a state.
    pub fn contains(&self, state: StateId) -> bool {
        self.states.binary_search(&state).is_ok()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Get the number of states in the set.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Iterate over all states in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.iter().copied()
    }

    /// Union this set with another, modifying self in place.
    pub fn union_with(&mut self, other: &StateSet) {
        self.states.extend_from_slice(&other.states);
        self.states.sort_unstable();
        self.states.dedup();
    }

    /// Check if this set intersects with another.
    pub fn intersects(&self, other: &StateSet) -> bool {
        self.iter().any(|state| other.contains(state))
    }

    /// Check if every state of this set is also in `other`.
    pub fn is_subset(&self, other: &StateSet) -> bool {
        self.iter().all(|state| other.contains(state))
    }

    /// The sorted members.
    pub fn as_slice(&self) -> &[StateId] {
        &self.states
    }

    /// Sorted member list, the canonical tuple form of the set.
    pub fn to_vec(&self) -> Vec<StateId> {
        self.states.clone()
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Renders the set like a Python tuple: `()`, `(5,)`, `(0, 1, 2)`.
impl fmt::Display for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.states.as_slice() {
            [] => f.write_str("()"),
            [only] => write!(f, "({only},)"),
            [first, rest @ ..] => {
                write!(f, "({first}")?;
                for state in rest {
                    write!(f, ", {state}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut states: Vec<StateId> = iter.into_iter().collect();
        states.sort_unstable();
        states.dedup();
        Self { states }
    }
}

impl Extend<StateId> for StateSet {
    fn extend<I: IntoIterator<Item = StateId>>(&mut self, iter: I) {
        self.states.extend(iter);
        self.states.sort_unstable();
        self.states.dedup();
    }
}

impl<const N: usize> From<[StateId; N]> for StateSet {
    fn from(states: [StateId; N]) -> Self {
        states.into_iter().collect()
    }
}

/// A set of dense state indices backed by a fixed-size bit set.
///
/// Indices come from an NFA's own numbering (`0..num_states`), never from
/// raw [`StateId`]s, so the bit set stays as small as the automaton.
/// Equality and hashing look at the members only.
#[derive(Clone, Default)]
pub(crate) struct StateBits {
    bits: FixedBitSet,
}

impl StateBits {
    /// Create a new empty set with room for indices `0..capacity`.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Insert an index. Returns `true` if it was not present.
    pub(crate) fn insert(&mut self, index: usize) -> bool {
        if index >= self.bits.len() {
            self.bits.grow(index + 1);
        }
        !self.bits.put(index)
    }

    pub(crate) fn contains(&self, index: usize) -> bool {
        index < self.bits.len() && self.bits.contains(index)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Iterate over the indices in ascending order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.ones()
    }

    /// Union this set with another, modifying self in place.
    pub(crate) fn union_with(&mut self, other: &StateBits) {
        if other.bits.len() > self.bits.len() {
            self.bits.grow(other.bits.len());
        }
        self.bits.union_with(&other.bits);
    }

    /// Check if this set intersects with another.
    pub(crate) fn intersects(&self, other: &StateBits) -> bool {
        self.bits.intersection(&other.bits).next().is_some()
    }
}

impl PartialEq for StateBits {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for StateBits {}

impl Hash for StateBits {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for index in self.iter() {
            index.hash(state);
        }
    }
}

impl fmt::Debug for StateBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_state_set_basic() {
        let mut set = StateSet::new();
        assert!(set.is_empty());

        assert!(set.insert(7));
        assert!(set.insert(3));
        assert!(!set.insert(7));
        assert!(!set.is_empty());
        assert_eq!(set.len(), 2);
        assert!(set.contains(3));
        assert!(set.contains(7));
        assert!(!set.contains(5));
        assert_eq!(set.as_slice(), &[3, 7]);
    }

    #[test]
    fn test_state_set_union() {
        let mut set1 = StateSet::from([1, 3]);
        let set2 = StateSet::from([2, 3, 12]);

        set1.union_with(&set2);
        assert_eq!(set1.to_vec(), vec![1, 2, 3, 12]);
        assert!(set2.is_subset(&set1));
        assert!(!set1.is_subset(&set2));
        assert!(set1.intersects(&set2));
        assert!(!set2.intersects(&StateSet::from([0, 4])));
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let mut built = StateSet::new();
        built.insert(4);
        built.insert(1);
        built.insert(4);
        let collected: StateSet = [4, 1, 1].into_iter().collect();

        assert_eq!(built, collected);

        let mut keys = HashSet::new();
        keys.insert(built);
        assert!(!keys.insert(collected));
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let a = StateSet::from([0, 1]);
        let b = StateSet::from([0, 2]);
        let c = StateSet::from([0, 1, 2]);

        assert!(a < b);
        assert!(a < c);
        assert!(c < b);
        assert!(StateSet::new() < a);
    }

    #[test]
    fn test_large_state_ids_stay_small() {
        let set = StateSet::from([4_000_000_000, 7]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.as_slice(), &[7, 4_000_000_000]);
        assert_eq!(set.to_string(), "(7, 4000000000)");
    }

    #[test]
    fn test_state_set_display() {
        let set = StateSet::singleton(5);
        assert_eq!(set.len(), 1);
        assert!(set.contains(5));
        assert_eq!(set.to_string(), "(5,)");
        assert_eq!(StateSet::from([2, 0, 1]).to_string(), "(0, 1, 2)");
        assert_eq!(format!("{:?}", StateSet::from([3, 1])), "{1, 3}");
        assert_eq!(StateSet::new().to_string(), "()");
    }

    #[test]
    fn test_state_bits_compare_by_members() {
        let mut wide = StateBits::with_capacity(64);
        wide.insert(4);
        wide.insert(1);
        let mut narrow = StateBits::with_capacity(2);
        assert!(narrow.insert(1));
        assert!(narrow.insert(4));
        assert!(!narrow.insert(4));

        assert_eq!(wide, narrow);
        let mut keys = HashSet::new();
        keys.insert(wide.clone());
        assert!(keys.contains(&narrow));

        let mut other = StateBits::with_capacity(8);
        other.insert(4);
        assert!(wide.intersects(&other));
        other.union_with(&wide);
        assert_eq!(other.iter().collect::<Vec<_>>(), vec![1, 4]);
        assert!(!other.contains(2));
        assert!(StateBits::default().is_empty());
    }
}
