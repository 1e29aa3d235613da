//! Create/read/update/delete of customers, currencies and smart trades.

use sea_orm::{DatabaseTransaction, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Currency, CurrencyFields, Customer, CustomerFields, EngineError, ResultEngine, SmartTrade,
    SmartTradeFields, currencies, customers, smart_trades,
};

use super::{Engine, with_tx};

/// Records that may point at a customer.
trait CustomerRef {
    fn customer_ref(&self) -> Option<Uuid> {
        None
    }
}

impl CustomerRef for Customer {}

impl CustomerRef for Currency {}

impl CustomerRef for SmartTrade {
    fn customer_ref(&self) -> Option<Uuid> {
        self.fields.customer_id
    }
}

/// Generates the six CRUD methods for a record stored in `$module`.
///
/// - create: assigns a fresh id;
/// - get: `KeyNotFound` when missing;
/// - update: replaces every field, `EntityNotFound` when missing;
/// - patch: merges present fields, `EntityNotFound` when missing;
/// - delete: idempotent.
macro_rules! impl_crud {
    (
        $module:ident, $record:ident, $fields:ident, $label:literal,
        create: $create:ident,
        get: $get:ident,
        list: $list:ident,
        update: $update:ident,
        patch: $patch:ident,
        delete: $delete:ident $(,)?
    ) => {
        pub async fn $create(&self, fields: $fields) -> ResultEngine<$record> {
            let record = $record::new(fields);
            with_tx!(self, |db_tx| {
                self.require_customer_ref(&db_tx, &record).await?;
                $module::ActiveModel::from(&record).insert(&db_tx).await?;
                Ok(record)
            })
        }

        pub async fn $get(&self, id: Uuid) -> ResultEngine<$record> {
            let model = $module::Entity::find_by_id(id.to_string())
                .one(&self.database)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound(format!("{} {id}", $label)))?;
            $record::try_from(model)
        }

        pub async fn $list(&self) -> ResultEngine<Vec<$record>> {
            $module::Entity::find()
                .order_by_asc($module::Column::Id)
                .all(&self.database)
                .await?
                .into_iter()
                .map($record::try_from)
                .collect()
        }

        pub async fn $update(&self, id: Uuid, fields: $fields) -> ResultEngine<$record> {
            with_tx!(self, |db_tx| {
                let mut record = $module::Entity::find_by_id(id.to_string())
                    .one(&db_tx)
                    .await?
                    .ok_or_else(|| EngineError::EntityNotFound(format!("{} {id}", $label)))
                    .and_then($record::try_from)?;
                record.replace(fields);
                self.require_customer_ref(&db_tx, &record).await?;
                $module::ActiveModel::from(&record).update(&db_tx).await?;
                Ok(record)
            })
        }

        pub async fn $patch(&self, id: Uuid, fields: $fields) -> ResultEngine<$record> {
            with_tx!(self, |db_tx| {
                let mut record = $module::Entity::find_by_id(id.to_string())
                    .one(&db_tx)
                    .await?
                    .ok_or_else(|| EngineError::EntityNotFound(format!("{} {id}", $label)))
                    .and_then($record::try_from)?;
                record.merge(fields);
                self.require_customer_ref(&db_tx, &record).await?;
                $module::ActiveModel::from(&record).update(&db_tx).await?;
                Ok(record)
            })
        }

        pub async fn $delete(&self, id: Uuid) -> ResultEngine<()> {
            $module::Entity::delete_by_id(id.to_string())
                .exec(&self.database)
                .await?;
            Ok(())
        }
    };
}

impl Engine {
    impl_crud!(
        customers, Customer, CustomerFields, "customer",
        create: new_customer,
        get: customer,
        list: customers,
        update: update_customer,
        patch: patch_customer,
        delete: delete_customer,
    );

    impl_crud!(
        currencies, Currency, CurrencyFields, "currency",
        create: new_currency,
        get: currency,
        list: currencies,
        update: update_currency,
        patch: patch_currency,
        delete: delete_currency,
    );

    impl_crud!(
        smart_trades, SmartTrade, SmartTradeFields, "smart trade",
        create: new_smart_trade,
        get: smart_trade,
        list: smart_trades,
        update: update_smart_trade,
        patch: patch_smart_trade,
        delete: delete_smart_trade,
    );

    async fn require_customer_ref(
        &self,
        db: &DatabaseTransaction,
        record: &impl CustomerRef,
    ) -> ResultEngine<()> {
        if let Some(customer_id) = record.customer_ref() {
            self.require_customer(db, customer_id).await?;
        }
        Ok(())
    }
}
