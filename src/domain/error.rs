//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid input to the pure tree algorithms.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid ignore pattern '{pattern}': {message}")]
    InvalidIgnorePattern { pattern: String, message: String },
}
