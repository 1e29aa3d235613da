//! Request and response bodies of the REST API.
//!
//! Field names are serialized in camelCase so the JSON matches the
//! `customerLegalEntity` / `currencyCode` shape clients already send.
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod customer {
    use super::*;

    /// Body of create, update and partial update requests.
    ///
    /// `id` must be absent on create and must match the path on update.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CustomerPayload {
        pub id: Option<Uuid>,
        pub customer_name: Option<String>,
        pub customer_legal_entity: Option<String>,
        pub customer_password: Option<String>,
        pub customer_hash_code: Option<String>,
    }

    /// A customer as returned by the API. The password is never echoed back.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Customer {
        pub id: Uuid,
        pub customer_name: Option<String>,
        pub customer_legal_entity: Option<String>,
        pub customer_hash_code: Option<String>,
    }
}

pub mod currency {
    use super::*;

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CurrencyPayload {
        pub id: Option<Uuid>,
        pub currency_name: Option<String>,
        pub currency_code: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Currency {
        pub id: Uuid,
        pub currency_name: Option<String>,
        pub currency_code: Option<String>,
    }
}

pub mod smart_trade {
    use super::*;

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SmartTradePayload {
        pub id: Option<Uuid>,
        pub counter_party: Option<String>,
        pub trading_party: Option<String>,
        pub currency_buy: Option<String>,
        pub currency_sell: Option<String>,
        pub rate: Option<f64>,
        pub amount: Option<Decimal>,
        pub contra_amount: Option<Decimal>,
        /// ISO date (`YYYY-MM-DD`).
        pub value_date: Option<NaiveDate>,
        pub transaction_id: Option<String>,
        pub direction: Option<String>,
        /// ISO date (`YYYY-MM-DD`).
        pub trade_date: Option<NaiveDate>,
        pub status: Option<String>,
        pub failure_reason: Option<String>,
        pub customer_id: Option<Uuid>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SmartTrade {
        pub id: Uuid,
        pub counter_party: Option<String>,
        pub trading_party: Option<String>,
        pub currency_buy: Option<String>,
        pub currency_sell: Option<String>,
        pub rate: Option<f64>,
        pub amount: Option<Decimal>,
        pub contra_amount: Option<Decimal>,
        pub value_date: Option<NaiveDate>,
        pub transaction_id: Option<String>,
        pub direction: Option<String>,
        pub trade_date: Option<NaiveDate>,
        pub status: Option<String>,
        pub failure_reason: Option<String>,
        pub customer_id: Option<Uuid>,
    }
}

pub mod wallet {
    use super::*;

    /// Body of `POST /api/wallets`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct WalletNew {
        /// Must be absent: ids are assigned by the server.
        pub id: Option<Uuid>,
        pub currency_code: String,
        /// Signed amount. Accepts a JSON number or a decimal string.
        pub amount: Decimal,
        /// Owning customer. When absent the caller's own customer is used.
        pub customer_id: Option<Uuid>,
    }

    /// One line of a balance sheet: the net amount held in a currency.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Balance {
        pub currency_code: String,
        pub amount: Decimal,
    }
}
