use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run_with_listener};

mod currencies;
mod customers;
mod headers;
mod server;
mod smart_trades;
mod wallets;

pub mod types {
    pub mod customer {
        pub use api_types::customer::{Customer, CustomerPayload};
    }

    pub mod currency {
        pub use api_types::currency::{Currency, CurrencyPayload};
    }

    pub mod smart_trade {
        pub use api_types::smart_trade::{SmartTrade, SmartTradePayload};
    }

    pub mod wallet {
        pub use api_types::wallet::{Balance, WalletNew};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<&'static str>,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) | EngineError::ScopeNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::EntityNotFound(_)
        | EngineError::IdExists(_)
        | EngineError::IdNull(_)
        | EngineError::IdMismatch(_)
        | EngineError::InvalidField(_) => StatusCode::BAD_REQUEST,
        EngineError::InvalidAmount(_) | EngineError::InvalidId(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ServerError::Engine(err) => {
                let status = status_for_engine_error(&err);
                let key = err.key();
                let error = message_for_engine_error(err);
                (status, Error { error, key })
            }
            ServerError::Generic(error) => (StatusCode::BAD_REQUEST, Error { error, key: None }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
