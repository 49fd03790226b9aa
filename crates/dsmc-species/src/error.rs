use thiserror::Error;

use dsmc_core::SpeciesId;

/// Species configuration errors.  All of these are fatal at startup — a run
/// cannot proceed with an incomplete or malformed species table.
#[derive(Debug, Error)]
pub enum SpeciesError {
    #[error("species table is empty")]
    EmptyTable,

    #[error("duplicate species name {0:?}")]
    DuplicateName(String),

    #[error("unknown species {0}")]
    Unknown(SpeciesId),

    #[error("unknown species name {0:?}")]
    UnknownName(String),

    #[error("species {name:?}: {what} must be positive, got {got}")]
    NonPositive {
        name: String,
        what: &'static str,
        got:  f64,
    },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SpeciesResult<T> = Result<T, SpeciesError>;
