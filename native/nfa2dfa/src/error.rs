//! Errors raised while validating conversion inputs.

use crate::automaton::StateId;
use thiserror::Error;

/// Rejection of an NFA definition before any conversion runs.
///
/// Conversion itself never fails; every check happens up front.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("alphabet is empty")]
    EmptyAlphabet,

    #[error("symbol {0} appears more than once in the alphabet")]
    DuplicateSymbol(String),

    #[error("start state {0} is not a state of the NFA")]
    UnknownStartState(StateId),

    #[error("final state {0} is not a state of the NFA")]
    UnknownFinalState(StateId),
}
