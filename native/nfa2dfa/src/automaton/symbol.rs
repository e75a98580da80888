//! Transition labels and alphabets.

use crate::error::ConstructionError;
use indexmap::IndexSet;
use std::fmt;
use std::hash::Hash;

/// Name the epsilon pseudo-symbol goes by in table-shaped NFA definitions.
pub const EPSILON_NAME: &str = "epsilon";

/// Edge label used for epsilon transitions when drawing graphs.
pub const EPSILON_GLYPH: &str = "ε";

/// The label of an NFA transition: either a consuming symbol or epsilon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label<S> {
    /// Non-consuming transition.
    Epsilon,
    /// Transition consuming one alphabet symbol.
    Symbol(S),
}

impl<S> Label<S> {
    /// Check if this is an epsilon transition.
    #[inline]
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Label::Epsilon)
    }

    /// The consumed symbol, if any.
    pub fn symbol(&self) -> Option<&S> {
        match self {
            Label::Epsilon => None,
            Label::Symbol(symbol) => Some(symbol),
        }
    }
}

impl<S> From<S> for Label<S> {
    fn from(symbol: S) -> Self {
        Label::Symbol(symbol)
    }
}

impl<S: fmt::Display> fmt::Display for Label<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Epsilon => f.write_str(EPSILON_GLYPH),
            Label::Symbol(symbol) => symbol.fmt(f),
        }
    }
}

/// An ordered sequence of distinct input symbols.
///
/// Iteration follows declaration order. Epsilon cannot be a member since
/// members are plain symbols, never [`Label`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet<S: Hash + Eq> {
    symbols: IndexSet<S>,
}

impl<S: Hash + Eq + fmt::Debug> Alphabet<S> {
    /// Build an alphabet, rejecting repeated symbols.
    pub fn try_from_iter<I: IntoIterator<Item = S>>(symbols: I) -> Result<Self, ConstructionError> {
        let mut set = IndexSet::new();
        for symbol in symbols {
            if set.contains(&symbol) {
                return Err(ConstructionError::DuplicateSymbol(format!("{symbol:?}")));
            }
            set.insert(symbol);
        }
        Ok(Self { symbols: set })
    }
}

impl<S: Hash + Eq> Alphabet<S> {
    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if the alphabet has no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Check if `symbol` is a member.
    pub fn contains(&self, symbol: &S) -> bool {
        self.symbols.contains(symbol)
    }

    /// Iterate over the symbols in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &S> + '_ {
        self.symbols.iter()
    }
}

impl<'a, S: Hash + Eq> IntoIterator for &'a Alphabet<S> {
    type Item = &'a S;
    type IntoIter = indexmap::set::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}
