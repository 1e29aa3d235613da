use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use engine::{Engine, users};
use sea_orm::{DatabaseConnection, EntityTrait};

use std::sync::Arc;

use crate::{currencies, customers, smart_trades, wallets};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub db: DatabaseConnection,
    /// Application name used in the `X-<app>-alert` headers.
    pub app_name: Arc<str>,
}

impl ServerState {
    pub fn new(engine: Engine, db: DatabaseConnection, app_name: &str) -> Self {
        Self {
            engine: Arc::new(engine),
            db,
            app_name: Arc::from(app_name),
        }
    }
}

async fn auth(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(TypedHeader(auth_header)) = auth_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user = users::Entity::find_by_id(auth_header.username().to_string())
        .one(&state.db)
        .await
        .map_err(|err| {
            tracing::error!("failed to load user: {err}");
            StatusCode::UNAUTHORIZED
        })?;

    let Some(user) = user.filter(|user| user.password == auth_header.password()) else {
        tracing::debug!(username = auth_header.username(), "rejected credentials");
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// The REST API, mounted under `/api` and guarded by Basic auth.
pub fn router(state: ServerState) -> Router {
    let api = Router::new()
        .route("/customers", get(customers::list).post(customers::create))
        .route(
            "/customers/{id}",
            get(customers::get)
                .put(customers::update)
                .patch(customers::patch)
                .delete(customers::delete),
        )
        .route(
            "/currencies",
            get(currencies::list).post(currencies::create),
        )
        .route(
            "/currencies/{id}",
            get(currencies::get)
                .put(currencies::update)
                .patch(currencies::patch)
                .delete(currencies::delete),
        )
        .route(
            "/smart-trades",
            get(smart_trades::list).post(smart_trades::create),
        )
        .route(
            "/smart-trades/{id}",
            get(smart_trades::get)
                .put(smart_trades::update)
                .patch(smart_trades::patch)
                .delete(smart_trades::delete),
        )
        .route("/wallets", get(wallets::own_balances).post(wallets::create))
        // Reads take a legal entity, deletes take an entry id.
        .route(
            "/wallets/{key}",
            get(wallets::entity_balances).delete(wallets::delete),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state);

    Router::new().nest("/api", api)
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}
