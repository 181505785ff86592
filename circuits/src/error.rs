use thiserror::Error;

use crate::field::FieldError;

/// The single error kind raised anywhere in the gate library: the current
/// witness does not satisfy a constraint the gate is asserting, a division
/// was by zero, or a construction-time bound (e.g. a comparison's bit width)
/// was violated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct CircuitError(pub String);

impl CircuitError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        CircuitError(msg.into())
    }
}

impl From<FieldError> for CircuitError {
    fn from(e: FieldError) -> Self {
        CircuitError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CircuitError>;
