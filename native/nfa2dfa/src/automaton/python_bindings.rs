//! PyO3 bindings for the automaton module.
//!
//! Accepts NFA definitions in table form, `{state: {symbol: [states]}}`, with
//! the key `"epsilon"` marking epsilon transitions. DFA states are returned as
//! sorted tuples of NFA states.

use crate::automaton::engine::SubsetConstructionEngine;
use crate::automaton::epsilon_nfa::EpsilonNFA;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{Alphabet, EPSILON_NAME, Label};
use crate::error::ConstructionError;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList, PyTuple};
use std::collections::BTreeSet;

impl From<ConstructionError> for PyErr {
    fn from(err: ConstructionError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

fn state_tuple<'py>(py: Python<'py>, states: &StateSet) -> PyResult<Bound<'py, PyTuple>> {
    PyTuple::new(py, states.to_vec())
}

fn extract_states(states: &Bound<'_, PyAny>) -> PyResult<StateSet> {
    let mut set = StateSet::new();
    for state in states.try_iter()? {
        set.insert(state?.extract::<StateId>()?);
    }
    Ok(set)
}

fn extract_nfa(table: &Bound<'_, PyDict>) -> PyResult<EpsilonNFA<String>> {
    let mut nfa = EpsilonNFA::new();
    for (state, row) in table.iter() {
        let source = state.extract::<StateId>()?;
        nfa.add_state(source);
        for (key, destinations) in row.downcast::<PyDict>()?.iter() {
            let name = key.extract::<String>()?;
            let label = if name == EPSILON_NAME {
                Label::Epsilon
            } else {
                Label::Symbol(name)
            };
            for destination in extract_states(&destinations)?.iter() {
                nfa.add_labeled_transition(source, label.clone(), destination);
            }
        }
    }
    Ok(nfa)
}

/// Subset construction over an NFA given in table form.
#[pyclass(name = "NFAtoDFA", module = "nfa2dfa")]
pub struct PyNFAtoDFA {
    engine: SubsetConstructionEngine<String>,
}

#[pymethods]
impl PyNFAtoDFA {
    #[new]
    #[pyo3(signature = (nfa, alphabet, start_state, final_states))]
    fn new(
        nfa: &Bound<'_, PyDict>,
        alphabet: &Bound<'_, PyAny>,
        start_state: StateId,
        final_states: &Bound<'_, PyAny>,
    ) -> PyResult<Self> {
        let mut symbols = Vec::new();
        for symbol in alphabet.try_iter()? {
            let symbol = symbol?.extract::<String>()?;
            if symbol == EPSILON_NAME {
                return Err(PyValueError::new_err(
                    "epsilon cannot be a member of the alphabet",
                ));
            }
            symbols.push(symbol);
        }

        let engine = SubsetConstructionEngine::new(
            extract_nfa(nfa)?,
            Alphabet::try_from_iter(symbols)?,
            start_state,
            extract_states(final_states)?.iter(),
        )?;
        Ok(Self { engine })
    }

    /// Epsilon closure of a collection of states.
    fn epsilon_closure(&self, states: &Bound<'_, PyAny>) -> PyResult<BTreeSet<StateId>> {
        let closure = self.engine.epsilon_closure(&extract_states(states)?);
        Ok(closure.iter().collect())
    }

    /// Run the conversion, replacing any previous result.
    fn convert(&mut self) {
        self.engine.convert();
    }

    /// Get the DFA transition table and the list of final states.
    fn get_dfa<'py>(&self, py: Python<'py>) -> PyResult<(Bound<'py, PyDict>, Bound<'py, PyList>)> {
        let (table, finals) = self.engine.dfa();

        let dfa = PyDict::new(py);
        for (state, row) in table {
            let transitions = PyDict::new(py);
            for (symbol, next) in row {
                transitions.set_item(symbol, state_tuple(py, next)?)?;
            }
            dfa.set_item(state_tuple(py, state)?, transitions)?;
        }

        let final_states = PyList::empty(py);
        for state in finals {
            final_states.append(state_tuple(py, state)?)?;
        }

        Ok((dfa, final_states))
    }

    #[getter]
    fn dfa_start_state<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyTuple>> {
        state_tuple(py, self.engine.dfa_start_state())
    }

    /// Print the DFA transition table and final states.
    fn print_dfa(&self, py: Python<'_>) -> PyResult<()> {
        let kwargs = PyDict::new(py);
        kwargs.set_item("end", "")?;
        py.import("builtins")?
            .getattr("print")?
            .call((self.engine.result().to_string(),), Some(&kwargs))?;
        Ok(())
    }

    fn __str__(&self) -> String {
        self.engine.result().to_string()
    }

    /// Convert the NFA to a NetworkX DiGraph, epsilon edges labeled "ε".
    fn nfa_to_networkx<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
        let nx = py.import("networkx")?;
        let graph = nx.call_method0("DiGraph")?;

        for state in self.engine.nfa().states().iter() {
            graph.call_method1("add_node", (state,))?;
        }
        for (src, dst, label) in self.engine.nfa().edges() {
            let kwargs = PyDict::new(py);
            kwargs.set_item("label", label)?;
            graph.call_method("add_edge", (src, dst), Some(&kwargs))?;
        }

        Ok(graph)
    }

    /// Convert the last DFA to a NetworkX DiGraph with tuple-named nodes.
    fn dfa_to_networkx<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
        let nx = py.import("networkx")?;
        let graph = nx.call_method0("DiGraph")?;
        let dfa = self.engine.result();

        for state in dfa.states() {
            let kwargs = PyDict::new(py);
            kwargs.set_item("final", dfa.is_final(state))?;
            graph.call_method("add_node", (state_tuple(py, state)?,), Some(&kwargs))?;
        }
        for (src, dst, label) in dfa.edges() {
            let kwargs = PyDict::new(py);
            kwargs.set_item("label", label)?;
            graph.call_method(
                "add_edge",
                (state_tuple(py, &src)?, state_tuple(py, &dst)?),
                Some(&kwargs),
            )?;
        }

        Ok(graph)
    }
}

/// Register the automaton classes.
pub fn automaton(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyNFAtoDFA>()?;
    Ok(())
}
