use thiserror::Error;

/// The single error kind raised by field arithmetic: a witness does not
/// satisfy a constraint the caller asked to be enforced (division by zero,
/// inversion of zero, mismatched moduli).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct FieldError(pub String);

impl FieldError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        FieldError(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, FieldError>;
