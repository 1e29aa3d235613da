//! Wallet API endpoints
//!
//! Wallet entries are write-only from the client's point of view: reads
//! always answer with a balance sheet, never with the raw entries.

use api_types::wallet::{Balance, WalletNew};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use engine::{BalanceSheet, ensure_new, users};
use uuid::Uuid;

use crate::{
    ServerError,
    headers::{Alert, entity_alert, with_location},
    server::ServerState,
};

const ENTITY: &str = "wallet";

fn sheet_view(sheet: BalanceSheet) -> Vec<Balance> {
    sheet
        .into_balances()
        .into_iter()
        .map(|balance| Balance {
            currency_code: balance.currency_code,
            amount: balance.amount,
        })
        .collect()
}

/// Handle requests for storing a wallet entry
///
/// Answers with the caller's own balance sheet after the insert.
pub async fn create(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<WalletNew>,
) -> Result<(StatusCode, HeaderMap, Json<Vec<Balance>>), ServerError> {
    tracing::debug!("REST request to save Wallet");
    ensure_new(payload.id, ENTITY)?;

    let entry = state
        .engine
        .new_wallet_entry(
            &payload.currency_code,
            payload.amount,
            payload.customer_id,
            &user.username,
        )
        .await?;
    let sheet = state.engine.balances_for_caller(&user.username).await?;

    let id = entry.id.to_string();
    let headers = with_location(
        entity_alert(&state.app_name, ENTITY, Alert::Created, &id),
        &format!("/api/wallets/{id}"),
    );
    Ok((StatusCode::CREATED, headers, Json(sheet_view(sheet))))
}

/// Handle requests for the caller's own balances
pub async fn own_balances(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<Balance>>, ServerError> {
    tracing::debug!("REST request to get Wallets of {}", user.username);
    let sheet = state.engine.balances_for_caller(&user.username).await?;
    Ok(Json(sheet_view(sheet)))
}

/// Handle requests for the balances of a named legal entity
pub async fn entity_balances(
    State(state): State<ServerState>,
    Path(legal_entity): Path<String>,
) -> Result<Json<Vec<Balance>>, ServerError> {
    tracing::debug!("REST request to get Wallets of legal entity {legal_entity}");
    let sheet = state.engine.balances_for_legal_entity(&legal_entity).await?;
    Ok(Json(sheet_view(sheet)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, HeaderMap), ServerError> {
    tracing::debug!("REST request to delete Wallet : {id}");
    state.engine.delete_wallet_entry(id).await?;
    let headers = entity_alert(&state.app_name, ENTITY, Alert::Deleted, &id.to_string());
    Ok((StatusCode::NO_CONTENT, headers))
}
