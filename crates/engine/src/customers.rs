//! Customers: the legal counterparties that own wallet entries and trades.
//!
//! `legal_entity` doubles as the authorization scope of wallet balances and,
//! for self-scoped lookups, is matched against the caller's login.

use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

/// Mutable fields of a customer, as carried by create and update requests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomerFields {
    pub name: Option<String>,
    pub legal_entity: Option<String>,
    pub password: Option<String>,
    pub hash_code: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Customer {
    pub id: Uuid,
    pub name: Option<String>,
    pub legal_entity: Option<String>,
    pub password: Option<String>,
    pub hash_code: Option<String>,
}

impl Customer {
    pub fn new(fields: CustomerFields) -> Self {
        Self::with_id(Uuid::new_v4(), fields)
    }

    pub fn with_id(id: Uuid, fields: CustomerFields) -> Self {
        Self {
            id,
            name: fields.name,
            legal_entity: fields.legal_entity,
            password: fields.password,
            hash_code: fields.hash_code,
        }
    }

    /// Overwrite every field, absent ones included.
    pub fn replace(&mut self, fields: CustomerFields) {
        *self = Self::with_id(self.id, fields);
    }

    /// Overwrite only the fields present in `fields`.
    pub fn merge(&mut self, fields: CustomerFields) {
        self.name = fields.name.or(self.name.take());
        self.legal_entity = fields.legal_entity.or(self.legal_entity.take());
        self.password = fields.password.or(self.password.take());
        self.hash_code = fields.hash_code.or(self.hash_code.take());
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: Option<String>,
    pub legal_entity: Option<String>,
    pub password: Option<String>,
    pub hash_code: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::wallets::Entity")]
    Wallets,
    #[sea_orm(has_many = "super::smart_trades::Entity")]
    SmartTrades,
}

impl Related<super::wallets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wallets.def()
    }
}

impl Related<super::smart_trades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SmartTrades.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Customer> for ActiveModel {
    fn from(value: &Customer) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            name: ActiveValue::Set(value.name.clone()),
            legal_entity: ActiveValue::Set(value.legal_entity.clone()),
            password: ActiveValue::Set(value.password.clone()),
            hash_code: ActiveValue::Set(value.hash_code.clone()),
        }
    }
}

impl TryFrom<Model> for Customer {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "customer")?,
            name: model.name,
            legal_entity: model.legal_entity,
            password: model.password,
            hash_code: model.hash_code,
        })
    }
}
