//! Customer API endpoints

use api_types::customer::{Customer, CustomerPayload};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use engine::{CustomerFields, ensure_new, ensure_same_id};
use uuid::Uuid;

use crate::{
    ServerError,
    headers::{Alert, entity_alert, with_location},
    server::ServerState,
};

const ENTITY: &str = "customer";

fn fields(payload: CustomerPayload) -> CustomerFields {
    CustomerFields {
        name: payload.customer_name,
        legal_entity: payload.customer_legal_entity,
        password: payload.customer_password,
        hash_code: payload.customer_hash_code,
    }
}

fn view(customer: engine::Customer) -> Customer {
    Customer {
        id: customer.id,
        customer_name: customer.name,
        customer_legal_entity: customer.legal_entity,
        customer_hash_code: customer.hash_code,
    }
}

/// Handle requests for creating a new customer
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CustomerPayload>,
) -> Result<(StatusCode, HeaderMap, Json<Customer>), ServerError> {
    tracing::debug!("REST request to save Customer");
    ensure_new(payload.id, ENTITY)?;

    let customer = state.engine.new_customer(fields(payload)).await?;
    let id = customer.id.to_string();
    let headers = with_location(
        entity_alert(&state.app_name, ENTITY, Alert::Created, &id),
        &format!("/api/customers/{id}"),
    );
    Ok((StatusCode::CREATED, headers, Json(view(customer))))
}

/// Handle requests replacing every field of a customer
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CustomerPayload>,
) -> Result<(HeaderMap, Json<Customer>), ServerError> {
    tracing::debug!("REST request to update Customer : {id}");
    let id = ensure_same_id(id, payload.id, ENTITY)?;

    let customer = state.engine.update_customer(id, fields(payload)).await?;
    let headers = entity_alert(&state.app_name, ENTITY, Alert::Updated, &id.to_string());
    Ok((headers, Json(view(customer))))
}

/// Handle requests updating the fields present in the body
pub async fn patch(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CustomerPayload>,
) -> Result<(HeaderMap, Json<Customer>), ServerError> {
    tracing::debug!("REST request to partial update Customer : {id}");
    let id = ensure_same_id(id, payload.id, ENTITY)?;

    let customer = state.engine.patch_customer(id, fields(payload)).await?;
    let headers = entity_alert(&state.app_name, ENTITY, Alert::Updated, &id.to_string());
    Ok((headers, Json(view(customer))))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Customer>>, ServerError> {
    tracing::debug!("REST request to get all Customers");
    let customers = state.engine.customers().await?;
    Ok(Json(customers.into_iter().map(view).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, ServerError> {
    tracing::debug!("REST request to get Customer : {id}");
    Ok(Json(view(state.engine.customer(id).await?)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, HeaderMap), ServerError> {
    tracing::debug!("REST request to delete Customer : {id}");
    state.engine.delete_customer(id).await?;
    let headers = entity_alert(&state.app_name, ENTITY, Alert::Deleted, &id.to_string());
    Ok((StatusCode::NO_CONTENT, headers))
}
