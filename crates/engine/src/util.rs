//! Internal helpers for model validation and conversion.
//!
//! The request id checks are public because the server runs them before
//! handing a body to the engine.

use std::str::FromStr;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Reject a create request whose body already carries an id.
pub fn ensure_new(body_id: Option<Uuid>, entity: &str) -> ResultEngine<()> {
    if body_id.is_some() {
        return Err(EngineError::IdExists(entity.to_string()));
    }
    Ok(())
}

/// Check the id of an update body against the id in the path.
pub fn ensure_same_id(path_id: Uuid, body_id: Option<Uuid>, entity: &str) -> ResultEngine<Uuid> {
    let Some(body_id) = body_id else {
        return Err(EngineError::IdNull(entity.to_string()));
    };
    if body_id != path_id {
        return Err(EngineError::IdMismatch(entity.to_string()));
    }
    Ok(path_id)
}

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::InvalidId(format!("invalid {label} id")))
}

/// Parse a decimal amount stored as text.
pub(crate) fn parse_decimal(value: &str, label: &str) -> ResultEngine<Decimal> {
    Decimal::from_str(value.trim())
        .map_err(|_| EngineError::InvalidAmount(format!("invalid {label}: {value}")))
}

/// Reject blank text. The value is returned exactly as given.
pub(crate) fn require_text(value: &str, label: &str) -> ResultEngine<String> {
    if value.trim().is_empty() {
        return Err(EngineError::InvalidField(format!("{label} must not be empty")));
    }
    Ok(value.to_string())
}
