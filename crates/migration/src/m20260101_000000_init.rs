//! Initial schema migration - creates all tables from scratch.
//!
//! - `users`: authentication
//! - `customers`: legal counterparties; `legal_entity` scopes wallet balances
//! - `currencies`: reference list of currencies
//! - `wallets`: one row per currency movement, optionally owned by a customer
//! - `smart_trades`: FX trades
//!
//! Amounts are stored as decimal text to keep their full precision.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Username,
    Password,
}

#[derive(Iden)]
enum Customers {
    Table,
    Id,
    Name,
    LegalEntity,
    Password,
    HashCode,
}

#[derive(Iden)]
enum Currencies {
    Table,
    Id,
    Name,
    Code,
}

#[derive(Iden)]
enum Wallets {
    Table,
    Id,
    CurrencyCode,
    Amount,
    CustomerId,
}

#[derive(Iden)]
enum SmartTrades {
    Table,
    Id,
    CounterParty,
    TradingParty,
    CurrencyBuy,
    CurrencySell,
    Rate,
    Amount,
    ContraAmount,
    ValueDate,
    TransactionId,
    Direction,
    TradeDate,
    Status,
    FailureReason,
    CustomerId,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Customers
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Customers::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Customers::Name).string())
                    .col(ColumnDef::new(Customers::LegalEntity).string())
                    .col(ColumnDef::new(Customers::Password).string())
                    .col(ColumnDef::new(Customers::HashCode).string())
                    .to_owned(),
            )
            .await?;

        // Ownership lookups filter on legal_entity for every balance sheet.
        manager
            .create_index(
                Index::create()
                    .name("idx-customers-legal_entity")
                    .table(Customers::Table)
                    .col(Customers::LegalEntity)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Currencies
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Currencies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Currencies::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Currencies::Name).string())
                    .col(ColumnDef::new(Currencies::Code).string())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Wallets
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Wallets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Wallets::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Wallets::CurrencyCode).string().not_null())
                    .col(ColumnDef::new(Wallets::Amount).string().not_null())
                    .col(ColumnDef::new(Wallets::CustomerId).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-wallets-customer_id")
                            .from(Wallets::Table, Wallets::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Smart trades
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(SmartTrades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SmartTrades::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SmartTrades::CounterParty).string())
                    .col(ColumnDef::new(SmartTrades::TradingParty).string())
                    .col(ColumnDef::new(SmartTrades::CurrencyBuy).string())
                    .col(ColumnDef::new(SmartTrades::CurrencySell).string())
                    .col(ColumnDef::new(SmartTrades::Rate).double())
                    .col(ColumnDef::new(SmartTrades::Amount).string())
                    .col(ColumnDef::new(SmartTrades::ContraAmount).string())
                    .col(ColumnDef::new(SmartTrades::ValueDate).date())
                    .col(ColumnDef::new(SmartTrades::TransactionId).string())
                    .col(ColumnDef::new(SmartTrades::Direction).string())
                    .col(ColumnDef::new(SmartTrades::TradeDate).date())
                    .col(ColumnDef::new(SmartTrades::Status).string())
                    .col(ColumnDef::new(SmartTrades::FailureReason).string())
                    .col(ColumnDef::new(SmartTrades::CustomerId).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-smart_trades-customer_id")
                            .from(SmartTrades::Table, SmartTrades::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(SmartTrades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Wallets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Currencies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
