//! FX trades booked between a trading party and a counterparty.
//!
//! Monetary amounts are stored as decimal text so no precision is lost in
//! the store; `rate` is a plain float as quoted by the desk.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError,
    util::{parse_decimal, parse_uuid},
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SmartTradeFields {
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

#[derive(Clone, Debug, PartialEq)]
pub struct SmartTrade {
    pub id: Uuid,
    pub fields: SmartTradeFields,
}

impl SmartTrade {
    pub fn new(fields: SmartTradeFields) -> Self {
        Self::with_id(Uuid::new_v4(), fields)
    }

    pub fn with_id(id: Uuid, fields: SmartTradeFields) -> Self {
        Self { id, fields }
    }

    pub fn replace(&mut self, fields: SmartTradeFields) {
        self.fields = fields;
    }

    pub fn merge(&mut self, patch: SmartTradeFields) {
        let current = &mut self.fields;
        current.counter_party = patch.counter_party.or(current.counter_party.take());
        current.trading_party = patch.trading_party.or(current.trading_party.take());
        current.currency_buy = patch.currency_buy.or(current.currency_buy.take());
        current.currency_sell = patch.currency_sell.or(current.currency_sell.take());
        current.rate = patch.rate.or(current.rate);
        current.amount = patch.amount.or(current.amount);
        current.contra_amount = patch.contra_amount.or(current.contra_amount);
        current.value_date = patch.value_date.or(current.value_date);
        current.transaction_id = patch.transaction_id.or(current.transaction_id.take());
        current.direction = patch.direction.or(current.direction.take());
        current.trade_date = patch.trade_date.or(current.trade_date);
        current.status = patch.status.or(current.status.take());
        current.failure_reason = patch.failure_reason.or(current.failure_reason.take());
        current.customer_id = patch.customer_id.or(current.customer_id);
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "smart_trades")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub counter_party: Option<String>,
    pub trading_party: Option<String>,
    pub currency_buy: Option<String>,
    pub currency_sell: Option<String>,
    pub rate: Option<f64>,
    pub amount: Option<String>,
    pub contra_amount: Option<String>,
    pub value_date: Option<Date>,
    pub transaction_id: Option<String>,
    pub direction: Option<String>,
    pub trade_date: Option<Date>,
    pub status: Option<String>,
    pub failure_reason: Option<String>,
    pub customer_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Customers,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&SmartTrade> for ActiveModel {
    fn from(value: &SmartTrade) -> Self {
        let fields = &value.fields;
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            counter_party: ActiveValue::Set(fields.counter_party.clone()),
            trading_party: ActiveValue::Set(fields.trading_party.clone()),
            currency_buy: ActiveValue::Set(fields.currency_buy.clone()),
            currency_sell: ActiveValue::Set(fields.currency_sell.clone()),
            rate: ActiveValue::Set(fields.rate),
            amount: ActiveValue::Set(fields.amount.map(|d| d.to_string())),
            contra_amount: ActiveValue::Set(fields.contra_amount.map(|d| d.to_string())),
            value_date: ActiveValue::Set(fields.value_date),
            transaction_id: ActiveValue::Set(fields.transaction_id.clone()),
            direction: ActiveValue::Set(fields.direction.clone()),
            trade_date: ActiveValue::Set(fields.trade_date),
            status: ActiveValue::Set(fields.status.clone()),
            failure_reason: ActiveValue::Set(fields.failure_reason.clone()),
            customer_id: ActiveValue::Set(fields.customer_id.map(|id| id.to_string())),
        }
    }
}

impl TryFrom<Model> for SmartTrade {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "smart trade")?,
            fields: SmartTradeFields {
                counter_party: model.counter_party,
                trading_party: model.trading_party,
                currency_buy: model.currency_buy,
                currency_sell: model.currency_sell,
                rate: model.rate,
                amount: model
                    .amount
                    .as_deref()
                    .map(|v| parse_decimal(v, "amount"))
                    .transpose()?,
                contra_amount: model
                    .contra_amount
                    .as_deref()
                    .map(|v| parse_decimal(v, "contra amount"))
                    .transpose()?,
                value_date: model.value_date,
                transaction_id: model.transaction_id,
                direction: model.direction,
                trade_date: model.trade_date,
                status: model.status,
                failure_reason: model.failure_reason,
                customer_id: model
                    .customer_id
                    .as_deref()
                    .map(|v| parse_uuid(v, "customer"))
                    .transpose()?,
            },
        })
    }
}
