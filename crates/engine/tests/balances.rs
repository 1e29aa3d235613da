use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use uuid::Uuid;

use engine::{CustomerFields, Engine, EngineError};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn customer(engine: &Engine, legal_entity: &str) -> Uuid {
    engine
        .new_customer(CustomerFields {
            name: Some(format!("{legal_entity} ltd")),
            legal_entity: Some(legal_entity.to_string()),
            ..Default::default()
        })
        .await
        .unwrap()
        .id
}

async fn deposit(engine: &Engine, caller: &str, currency_code: &str, amount: Decimal) -> Uuid {
    engine
        .new_wallet_entry(currency_code, amount, None, caller)
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn caller_sees_only_own_balances() {
    let (engine, _db) = engine_with_db().await;
    customer(&engine, "acme").await;
    customer(&engine, "globex").await;

    deposit(&engine, "acme", "USD", dec!(10)).await;
    deposit(&engine, "acme", "EUR", dec!(5)).await;
    deposit(&engine, "acme", "USD", dec!(-3)).await;
    deposit(&engine, "globex", "USD", dec!(1000)).await;

    let sheet = engine.balances_for_caller("acme").await.unwrap();
    assert_eq!(sheet.len(), 2);
    assert_eq!(sheet.amount_of("USD"), Some(dec!(7)));
    assert_eq!(sheet.amount_of("EUR"), Some(dec!(5)));

    let sheet = engine.balances_for_caller("globex").await.unwrap();
    assert_eq!(sheet.len(), 1);
    assert_eq!(sheet.amount_of("USD"), Some(dec!(1000)));
}

#[tokio::test]
async fn stored_fractions_are_truncated_per_entry() {
    let (engine, _db) = engine_with_db().await;
    customer(&engine, "acme").await;

    deposit(&engine, "acme", "USD", dec!(1.9)).await;
    deposit(&engine, "acme", "USD", dec!(2.9)).await;

    let sheet = engine.balances_for_caller("acme").await.unwrap();
    assert_eq!(sheet.amount_of("USD"), Some(dec!(3)));

    // The ledger itself keeps the full precision.
    let amounts: Vec<Decimal> = engine
        .wallet_entries()
        .await
        .unwrap()
        .into_iter()
        .map(|entry| entry.amount)
        .collect();
    assert!(amounts.contains(&dec!(1.9)));
    assert!(amounts.contains(&dec!(2.9)));
}

#[tokio::test]
async fn unknown_caller_gets_empty_sheet() {
    let (engine, _db) = engine_with_db().await;
    customer(&engine, "acme").await;
    deposit(&engine, "acme", "USD", dec!(10)).await;

    assert_eq!(
        engine.resolve_scope("mallory").await,
        Err(EngineError::ScopeNotFound("mallory".to_string()))
    );
    assert!(engine.balances_for_caller("mallory").await.unwrap().is_empty());
}

#[tokio::test]
async fn explicit_scope_bypasses_the_resolver() {
    let (engine, _db) = engine_with_db().await;
    customer(&engine, "acme").await;
    customer(&engine, "globex").await;
    deposit(&engine, "globex", "JPY", dec!(12000.75)).await;

    let sheet = engine.balances_for_legal_entity("globex").await.unwrap();
    assert_eq!(sheet.amount_of("JPY"), Some(dec!(12000)));
    assert!(engine.balances_for_legal_entity("initech").await.unwrap().is_empty());
}

#[tokio::test]
async fn entry_without_owner_is_stored_but_never_aggregated() {
    let (engine, _db) = engine_with_db().await;

    let entry = engine
        .new_wallet_entry("USD", dec!(50), None, "nobody")
        .await
        .unwrap();
    assert_eq!(entry.owner, None);

    let entries = engine.wallet_entries().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].owner, None);

    // A customer created later does not adopt the orphan entry.
    customer(&engine, "nobody").await;
    assert!(engine.balances_for_caller("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn explicit_owner_wins_over_caller() {
    let (engine, _db) = engine_with_db().await;
    customer(&engine, "acme").await;
    let globex = customer(&engine, "globex").await;

    let entry = engine
        .new_wallet_entry("GBP", dec!(20), Some(globex), "acme")
        .await
        .unwrap();
    assert_eq!(entry.owner.map(|owner| owner.customer_id), Some(globex));

    assert!(engine.balances_for_caller("acme").await.unwrap().is_empty());
    assert_eq!(
        engine
            .balances_for_legal_entity("globex")
            .await
            .unwrap()
            .amount_of("GBP"),
        Some(dec!(20))
    );
}

#[tokio::test]
async fn unknown_explicit_owner_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let missing = Uuid::new_v4();

    let err = engine
        .new_wallet_entry("USD", dec!(1), Some(missing), "acme")
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound(format!("customer {missing}")));
    assert!(engine.wallet_entries().await.unwrap().is_empty());
}

#[tokio::test]
async fn blank_currency_code_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let err = engine
        .new_wallet_entry("  ", dec!(1), None, "acme")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidField(_)));
}

#[tokio::test]
async fn duplicate_legal_entities_resolve_to_lowest_id() {
    let (engine, db) = engine_with_db().await;
    let backend = db.get_database_backend();
    let low = Uuid::from_u128(1);
    let high = Uuid::from_u128(2);
    // Insert the higher id first so insertion order cannot explain the pick.
    for id in [high, low] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO customers (id, name, legal_entity) VALUES (?, ?, ?)",
            vec![id.to_string().into(), "dup".into(), "dup".into()],
        ))
        .await
        .unwrap();
    }

    for _ in 0..3 {
        let current = engine.current_customer("dup").await.unwrap().unwrap();
        assert_eq!(current.id, low);
    }
    assert_eq!(engine.resolve_scope("dup").await.unwrap(), "dup");

    let entry = engine
        .new_wallet_entry("USD", dec!(1), None, "dup")
        .await
        .unwrap();
    assert_eq!(entry.owner.map(|owner| owner.customer_id), Some(low));
}

#[tokio::test]
async fn deleting_owner_orphans_its_entries() {
    let (engine, _db) = engine_with_db().await;
    let acme = customer(&engine, "acme").await;
    deposit(&engine, "acme", "USD", dec!(10)).await;

    engine.delete_customer(acme).await.unwrap();

    let entries = engine.wallet_entries().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].owner, None);
    assert!(engine.balances_for_legal_entity("acme").await.unwrap().is_empty());
}

#[tokio::test]
async fn corrupt_rows_are_skipped() {
    let (engine, db) = engine_with_db().await;
    customer(&engine, "acme").await;
    deposit(&engine, "acme", "USD", dec!(4)).await;

    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO wallets (id, currency_code, amount) VALUES (?, ?, ?)",
        vec![Uuid::new_v4().to_string().into(), "USD".into(), "four".into()],
    ))
    .await
    .unwrap();

    let sheet = engine.balances_for_caller("acme").await.unwrap();
    assert_eq!(sheet.amount_of("USD"), Some(dec!(4)));
}

#[tokio::test]
async fn delete_wallet_entry_updates_the_sheet() {
    let (engine, _db) = engine_with_db().await;
    customer(&engine, "acme").await;
    let keep = deposit(&engine, "acme", "USD", dec!(4)).await;
    let drop = deposit(&engine, "acme", "USD", dec!(6)).await;

    engine.delete_wallet_entry(drop).await.unwrap();
    engine.delete_wallet_entry(drop).await.unwrap();

    let entries = engine.wallet_entries().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, keep);
    assert_eq!(
        engine.balances_for_caller("acme").await.unwrap().amount_of("USD"),
        Some(dec!(4))
    );
}

#[tokio::test]
async fn currency_codes_are_stored_as_sent() {
    let (engine, _db) = engine_with_db().await;
    customer(&engine, "acme").await;

    let entry = engine
        .new_wallet_entry(" USD", dec!(1), None, "acme")
        .await
        .unwrap();
    assert_eq!(entry.currency_code, " USD");
    deposit(&engine, "acme", "USD", dec!(2)).await;

    let sheet = engine.balances_for_caller("acme").await.unwrap();
    assert_eq!(sheet.len(), 2);
    assert_eq!(sheet.amount_of(" USD"), Some(dec!(1)));
    assert_eq!(sheet.amount_of("USD"), Some(dec!(2)));
}

#[tokio::test]
async fn unreadable_customer_does_not_hide_the_scope() {
    let (engine, db) = engine_with_db().await;
    let acme = customer(&engine, "acme").await;

    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO customers (id, name, legal_entity) VALUES (?, ?, ?)",
        vec!["not-a-uuid".into(), "broken".into(), "acme".into()],
    ))
    .await
    .unwrap();

    let entry = engine
        .new_wallet_entry("USD", dec!(5), None, "acme")
        .await
        .unwrap();
    assert_eq!(entry.owner.map(|owner| owner.customer_id), Some(acme));

    assert_eq!(engine.resolve_scope("acme").await.unwrap(), "acme");
    let sheet = engine.balances_for_caller("acme").await.unwrap();
    assert_eq!(sheet.amount_of("USD"), Some(dec!(5)));
}
