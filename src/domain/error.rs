//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent contract violations of the branch input.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid argument: {name} must not be missing")]
    InvalidArgument { name: &'static str },

    #[error(
        "cannot uniquely identify parent branch because more than one branch had the path \"{parent_path}\""
    )]
    ParentAmbiguity { parent_path: String },

    #[error("unknown orphan policy {value:?} (expected drop or promote)")]
    UnknownOrphanPolicy { value: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
