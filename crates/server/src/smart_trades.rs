//! Smart trade API endpoints

use api_types::smart_trade::{SmartTrade, SmartTradePayload};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use engine::{SmartTradeFields, ensure_new, ensure_same_id};
use uuid::Uuid;

use crate::{
    ServerError,
    headers::{Alert, entity_alert, with_location},
    server::ServerState,
};

const ENTITY: &str = "smartTrade";

fn fields(payload: SmartTradePayload) -> SmartTradeFields {
    SmartTradeFields {
        counter_party: payload.counter_party,
        trading_party: payload.trading_party,
        currency_buy: payload.currency_buy,
        currency_sell: payload.currency_sell,
        rate: payload.rate,
        amount: payload.amount,
        contra_amount: payload.contra_amount,
        value_date: payload.value_date,
        transaction_id: payload.transaction_id,
        direction: payload.direction,
        trade_date: payload.trade_date,
        status: payload.status,
        failure_reason: payload.failure_reason,
        customer_id: payload.customer_id,
    }
}

fn view(trade: engine::SmartTrade) -> SmartTrade {
    let engine::SmartTrade { id, fields } = trade;
    SmartTrade {
        id,
        counter_party: fields.counter_party,
        trading_party: fields.trading_party,
        currency_buy: fields.currency_buy,
        currency_sell: fields.currency_sell,
        rate: fields.rate,
        amount: fields.amount,
        contra_amount: fields.contra_amount,
        value_date: fields.value_date,
        transaction_id: fields.transaction_id,
        direction: fields.direction,
        trade_date: fields.trade_date,
        status: fields.status,
        failure_reason: fields.failure_reason,
        customer_id: fields.customer_id,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SmartTradePayload>,
) -> Result<(StatusCode, HeaderMap, Json<SmartTrade>), ServerError> {
    tracing::debug!("REST request to save SmartTrade");
    ensure_new(payload.id, ENTITY)?;

    let trade = state.engine.new_smart_trade(fields(payload)).await?;
    let id = trade.id.to_string();
    let headers = with_location(
        entity_alert(&state.app_name, ENTITY, Alert::Created, &id),
        &format!("/api/smart-trades/{id}"),
    );
    Ok((StatusCode::CREATED, headers, Json(view(trade))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SmartTradePayload>,
) -> Result<(HeaderMap, Json<SmartTrade>), ServerError> {
    tracing::debug!("REST request to update SmartTrade : {id}");
    let id = ensure_same_id(id, payload.id, ENTITY)?;

    let trade = state.engine.update_smart_trade(id, fields(payload)).await?;
    let headers = entity_alert(&state.app_name, ENTITY, Alert::Updated, &id.to_string());
    Ok((headers, Json(view(trade))))
}

pub async fn patch(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SmartTradePayload>,
) -> Result<(HeaderMap, Json<SmartTrade>), ServerError> {
    tracing::debug!("REST request to partial update SmartTrade : {id}");
    let id = ensure_same_id(id, payload.id, ENTITY)?;

    let trade = state.engine.patch_smart_trade(id, fields(payload)).await?;
    let headers = entity_alert(&state.app_name, ENTITY, Alert::Updated, &id.to_string());
    Ok((headers, Json(view(trade))))
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<SmartTrade>>, ServerError> {
    tracing::debug!("REST request to get all SmartTrades");
    let trades = state.engine.smart_trades().await?;
    Ok(Json(trades.into_iter().map(view).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SmartTrade>, ServerError> {
    tracing::debug!("REST request to get SmartTrade : {id}");
    Ok(Json(view(state.engine.smart_trade(id).await?)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, HeaderMap), ServerError> {
    tracing::debug!("REST request to delete SmartTrade : {id}");
    state.engine.delete_smart_trade(id).await?;
    let headers = entity_alert(&state.app_name, ENTITY, Alert::Deleted, &id.to_string());
    Ok((StatusCode::NO_CONTENT, headers))
}
