//! Currency API endpoints

use api_types::currency::{Currency, CurrencyPayload};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use engine::{CurrencyFields, ensure_new, ensure_same_id};
use uuid::Uuid;

use crate::{
    ServerError,
    headers::{Alert, entity_alert, with_location},
    server::ServerState,
};

const ENTITY: &str = "currency";

fn fields(payload: CurrencyPayload) -> CurrencyFields {
    CurrencyFields {
        name: payload.currency_name,
        code: payload.currency_code,
    }
}

fn view(currency: engine::Currency) -> Currency {
    Currency {
        id: currency.id,
        currency_name: currency.name,
        currency_code: currency.code,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CurrencyPayload>,
) -> Result<(StatusCode, HeaderMap, Json<Currency>), ServerError> {
    tracing::debug!("REST request to save Currency");
    ensure_new(payload.id, ENTITY)?;

    let currency = state.engine.new_currency(fields(payload)).await?;
    let id = currency.id.to_string();
    let headers = with_location(
        entity_alert(&state.app_name, ENTITY, Alert::Created, &id),
        &format!("/api/currencies/{id}"),
    );
    Ok((StatusCode::CREATED, headers, Json(view(currency))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CurrencyPayload>,
) -> Result<(HeaderMap, Json<Currency>), ServerError> {
    tracing::debug!("REST request to update Currency : {id}");
    let id = ensure_same_id(id, payload.id, ENTITY)?;

    let currency = state.engine.update_currency(id, fields(payload)).await?;
    let headers = entity_alert(&state.app_name, ENTITY, Alert::Updated, &id.to_string());
    Ok((headers, Json(view(currency))))
}

pub async fn patch(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CurrencyPayload>,
) -> Result<(HeaderMap, Json<Currency>), ServerError> {
    tracing::debug!("REST request to partial update Currency : {id}");
    let id = ensure_same_id(id, payload.id, ENTITY)?;

    let currency = state.engine.patch_currency(id, fields(payload)).await?;
    let headers = entity_alert(&state.app_name, ENTITY, Alert::Updated, &id.to_string());
    Ok((headers, Json(view(currency))))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Currency>>, ServerError> {
    tracing::debug!("REST request to get all Currencies");
    let currencies = state.engine.currencies().await?;
    Ok(Json(currencies.into_iter().map(view).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Currency>, ServerError> {
    tracing::debug!("REST request to get Currency : {id}");
    Ok(Json(view(state.engine.currency(id).await?)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, HeaderMap), ServerError> {
    tracing::debug!("REST request to delete Currency : {id}");
    state.engine.delete_currency(id).await?;
    let headers = entity_alert(&state.app_name, ENTITY, Alert::Deleted, &id.to_string());
    Ok((StatusCode::NO_CONTENT, headers))
}
