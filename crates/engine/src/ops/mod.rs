use sea_orm::{DatabaseConnection, DatabaseTransaction, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, customers};

mod balances;
mod records;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Entry point for every persistent operation.
///
/// `Engine` holds no state besides the connection pool: balance sheets are
/// recomputed from the store on every call.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub(crate) async fn require_customer(
        &self,
        db: &DatabaseTransaction,
        customer_id: Uuid,
    ) -> ResultEngine<customers::Model> {
        customers::Entity::find_by_id(customer_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("customer {customer_id}")))
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
