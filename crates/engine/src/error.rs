//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when an item is not found on read.
//! - [`EntityNotFound`] thrown when an update targets a missing item.
//! - [`IdExists`], [`IdNull`] and [`IdMismatch`] thrown when the id carried
//!   by a request body is not acceptable for the operation.
//! - [`ScopeNotFound`] thrown when no customer owns the caller's login.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`EntityNotFound`]: EngineError::EntityNotFound
//!  [`IdExists`]: EngineError::IdExists
//!  [`IdNull`]: EngineError::IdNull
//!  [`IdMismatch`]: EngineError::IdMismatch
//!  [`ScopeNotFound`]: EngineError::ScopeNotFound
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Entity not found: {0}")]
    EntityNotFound(String),
    #[error("A new {0} cannot already have an ID")]
    IdExists(String),
    #[error("Invalid id: {0} id is missing")]
    IdNull(String),
    #[error("Invalid ID: {0} id does not match the path")]
    IdMismatch(String),
    #[error("no customer with legal entity \"{0}\"")]
    ScopeNotFound(String),
    #[error("Invalid field: {0}")]
    InvalidField(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Machine readable code of id validation failures.
    #[must_use]
    pub fn key(&self) -> Option<&'static str> {
        match self {
            Self::IdExists(_) => Some("idexists"),
            Self::IdNull(_) => Some("idnull"),
            Self::IdMismatch(_) => Some("idinvalid"),
            Self::EntityNotFound(_) => Some("idnotfound"),
            _ => None,
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::EntityNotFound(a), Self::EntityNotFound(b)) => a == b,
            (Self::IdExists(a), Self::IdExists(b)) => a == b,
            (Self::IdNull(a), Self::IdNull(b)) => a == b,
            (Self::IdMismatch(a), Self::IdMismatch(b)) => a == b,
            (Self::ScopeNotFound(a), Self::ScopeNotFound(b)) => a == b,
            (Self::InvalidField(a), Self::InvalidField(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidId(a), Self::InvalidId(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
