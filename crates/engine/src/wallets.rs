//! The module contains `WalletEntry`, one currency movement owned by a
//! customer.
//!
//! Entries are never updated: they are created, read back for aggregation,
//! and deleted.

use rust_decimal::Decimal;
use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{
    Customer, EngineError, customers,
    util::{parse_decimal, parse_uuid},
};

/// The customer an entry belongs to, resolved when the entry is loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Owner {
    pub customer_id: Uuid,
    pub legal_entity: Option<String>,
}

/// A wallet ledger row.
///
/// `owner` is `None` when the entry was stored without a customer or when the
/// referenced customer no longer exists. Entries without an owner, or whose
/// owner has no legal entity, are invisible to every balance sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletEntry {
    pub id: Uuid,
    pub currency_code: String,
    pub amount: Decimal,
    pub owner: Option<Owner>,
}

impl WalletEntry {
    pub fn new(currency_code: String, amount: Decimal, owner: Option<Owner>) -> Self {
        Self {
            id: Uuid::new_v4(),
            currency_code,
            amount,
            owner,
        }
    }

    /// Legal entity of the owner, if the owner could be resolved.
    pub fn owner_legal_entity(&self) -> Option<&str> {
        self.owner
            .as_ref()
            .and_then(|owner| owner.legal_entity.as_deref())
    }
}

impl Owner {
    /// Builds the owner from a loaded customer row.
    ///
    /// Returns `None` if the row carries a malformed id.
    pub(crate) fn from_model(model: &customers::Model) -> Option<Self> {
        let customer_id = Uuid::parse_str(&model.id).ok()?;
        Some(Self {
            customer_id,
            legal_entity: model.legal_entity.clone(),
        })
    }
}

impl From<&Customer> for Owner {
    fn from(customer: &Customer) -> Self {
        Self {
            customer_id: customer.id,
            legal_entity: customer.legal_entity.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "wallets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub currency_code: String,
    /// Decimal rendered as text.
    pub amount: String,
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

impl From<&WalletEntry> for ActiveModel {
    fn from(value: &WalletEntry) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            currency_code: ActiveValue::Set(value.currency_code.clone()),
            amount: ActiveValue::Set(value.amount.to_string()),
            customer_id: ActiveValue::Set(
                value.owner.as_ref().map(|owner| owner.customer_id.to_string()),
            ),
        }
    }
}

/// Converts a wallet row joined with its (possibly missing) customer row.
impl TryFrom<(Model, Option<customers::Model>)> for WalletEntry {
    type Error = EngineError;

    fn try_from((model, customer): (Model, Option<customers::Model>)) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "wallet")?,
            amount: parse_decimal(&model.amount, "wallet amount")?,
            currency_code: model.currency_code,
            owner: customer.as_ref().and_then(Owner::from_model),
        })
    }
}
