//! Reference list of currencies known to the desk.

use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CurrencyFields {
    pub name: Option<String>,
    pub code: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Currency {
    pub id: Uuid,
    pub name: Option<String>,
    pub code: Option<String>,
}

impl Currency {
    pub fn new(fields: CurrencyFields) -> Self {
        Self::with_id(Uuid::new_v4(), fields)
    }

    pub fn with_id(id: Uuid, fields: CurrencyFields) -> Self {
        Self {
            id,
            name: fields.name,
            code: fields.code,
        }
    }

    pub fn replace(&mut self, fields: CurrencyFields) {
        *self = Self::with_id(self.id, fields);
    }

    pub fn merge(&mut self, fields: CurrencyFields) {
        self.name = fields.name.or(self.name.take());
        self.code = fields.code.or(self.code.take());
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "currencies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: Option<String>,
    pub code: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Currency> for ActiveModel {
    fn from(value: &Currency) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            name: ActiveValue::Set(value.name.clone()),
            code: ActiveValue::Set(value.code.clone()),
        }
    }
}

impl TryFrom<Model> for Currency {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "currency")?,
            name: model.name,
            code: model.code,
        })
    }
}
