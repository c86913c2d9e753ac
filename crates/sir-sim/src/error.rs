use sir_core::{AgentId, SirError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] SirError),

    #[error("{what} length {got} does not match population size {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("agent at index {index} carries id {id}")]
    AgentIdMismatch {
        index: usize,
        id:    AgentId,
    },
}

pub type SimResult<T> = Result<T, SimError>;
