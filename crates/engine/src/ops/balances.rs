use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    BalanceSheet, Customer, EngineError, Owner, ResultEngine, WalletEntry, balances, customers,
    ownership, util::require_text, wallets,
};

use super::{Engine, with_tx};

impl Engine {
    /// Snapshot of every wallet entry with its owner resolved.
    ///
    /// Rows that cannot be decoded are skipped with a warning so a single
    /// corrupt row never hides a whole balance sheet.
    pub async fn wallet_entries(&self) -> ResultEngine<Vec<WalletEntry>> {
        let rows = wallets::Entity::find()
            .find_also_related(customers::Entity)
            .order_by_asc(wallets::Column::Id)
            .all(&self.database)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| match WalletEntry::try_from(row) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!("skipping unreadable wallet entry: {err}");
                    None
                }
            })
            .collect())
    }

    /// Customers whose legal entity equals `legal_entity`, lowest id first.
    pub async fn customers_by_legal_entity(
        &self,
        legal_entity: &str,
    ) -> ResultEngine<Vec<Customer>> {
        find_customers_by_legal_entity(&self.database, legal_entity).await
    }

    /// Resolves the legal entity `caller` is allowed to see.
    ///
    /// Fails with [`EngineError::ScopeNotFound`] when no customer carries the
    /// caller's login as legal entity.
    pub async fn resolve_scope(&self, caller: &str) -> ResultEngine<String> {
        let candidates = self.customers_by_legal_entity(caller).await?;
        ownership::resolve_scope(caller, &candidates)
    }

    /// The customer owning the caller's login, if any.
    pub async fn current_customer(&self, caller: &str) -> ResultEngine<Option<Customer>> {
        let candidates = self.customers_by_legal_entity(caller).await?;
        Ok(ownership::select_owner(caller, &candidates).cloned())
    }

    /// Balance sheet of the caller's own legal entity.
    ///
    /// A caller no customer maps to owns nothing and gets an empty sheet.
    pub async fn balances_for_caller(&self, caller: &str) -> ResultEngine<BalanceSheet> {
        let scope = match self.resolve_scope(caller).await {
            Ok(scope) => scope,
            Err(EngineError::ScopeNotFound(_)) => {
                tracing::debug!(caller, "no customer for caller, empty balance sheet");
                return Ok(BalanceSheet::empty());
            }
            Err(err) => return Err(err),
        };
        self.balances_for_legal_entity(&scope).await
    }

    /// Balance sheet of an explicitly named legal entity.
    pub async fn balances_for_legal_entity(&self, legal_entity: &str) -> ResultEngine<BalanceSheet> {
        let entries = self.wallet_entries().await?;
        Ok(balances::aggregate(&entries, legal_entity))
    }

    /// Stores a new wallet entry.
    ///
    /// Without `customer_id` the entry is owned by the caller's customer (same
    /// resolution as [`Engine::resolve_scope`]); if the caller has none the
    /// entry is stored unowned and will not show in any balance sheet.
    pub async fn new_wallet_entry(
        &self,
        currency_code: &str,
        amount: Decimal,
        customer_id: Option<Uuid>,
        caller: &str,
    ) -> ResultEngine<WalletEntry> {
        let currency_code = require_text(currency_code, "currencyCode")?;
        with_tx!(self, |db_tx| {
            let owner = match customer_id {
                Some(customer_id) => {
                    let model = self.require_customer(&db_tx, customer_id).await?;
                    Some(Owner::from(&Customer::try_from(model)?))
                }
                None => {
                    let candidates = find_customers_by_legal_entity(&db_tx, caller).await?;
                    ownership::select_owner(caller, &candidates).map(Owner::from)
                }
            };
            if owner.is_none() {
                tracing::debug!(caller, "storing wallet entry without owner");
            }

            let entry = WalletEntry::new(currency_code, amount, owner);
            wallets::ActiveModel::from(&entry).insert(&db_tx).await?;
            Ok(entry)
        })
    }

    /// Removes one wallet entry. Missing ids are ignored.
    pub async fn delete_wallet_entry(&self, id: Uuid) -> ResultEngine<()> {
        wallets::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        Ok(())
    }
}

/// Unreadable customer rows are skipped, like unreadable wallet rows.
async fn find_customers_by_legal_entity<C: ConnectionTrait>(
    db: &C,
    legal_entity: &str,
) -> ResultEngine<Vec<Customer>> {
    Ok(customers::Entity::find()
        .filter(customers::Column::LegalEntity.eq(legal_entity))
        .order_by_asc(customers::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .filter_map(|model| match Customer::try_from(model) {
            Ok(customer) => Some(customer),
            Err(err) => {
                tracing::warn!("skipping unreadable customer: {err}");
                None
            }
        })
        .collect())
}
