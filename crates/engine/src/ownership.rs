//! Maps a caller to the legal entity that scopes which wallet entries they
//! may see.
//!
//! The lookup key and the scope are the same field: a customer whose
//! `legal_entity` equals the caller's login owns that scope. When several
//! customers share the value the one with the lowest id wins, so repeated
//! calls always agree.

use crate::{Customer, EngineError, ResultEngine};

/// Picks the customer owning `caller`'s login among `candidates`.
///
/// Candidates whose legal entity differs from `caller` are ignored, so the
/// whole customer list can be passed in.
pub fn select_owner<'a>(caller: &str, candidates: &'a [Customer]) -> Option<&'a Customer> {
    candidates
        .iter()
        .filter(|customer| customer.legal_entity.as_deref() == Some(caller))
        .min_by_key(|customer| customer.id)
}

/// Resolves the balance scope of `caller`.
///
/// Fails with [`EngineError::ScopeNotFound`] when no candidate matches;
/// callers aggregating balances treat that as an empty scope.
pub fn resolve_scope(caller: &str, candidates: &[Customer]) -> ResultEngine<String> {
    select_owner(caller, candidates)
        .and_then(|customer| customer.legal_entity.clone())
        .ok_or_else(|| EngineError::ScopeNotFound(caller.to_string()))
}
