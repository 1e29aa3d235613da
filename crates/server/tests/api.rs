use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use base64::{Engine as _, prelude::BASE64_STANDARD};
use http_body_util::BodyExt;
use sea_orm::{ConnectionTrait, Database, Statement};
use serde_json::{Value, json};
use tower::ServiceExt;

use migration::MigratorTrait;
use server::{ServerState, router};

const ACME: (&str, &str) = ("acme", "secret");
const MALLORY: (&str, &str) = ("mallory", "hunter2");

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    for (username, password) in [ACME, MALLORY] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO users (username, password) VALUES (?, ?)",
            vec![username.into(), password.into()],
        ))
        .await
        .unwrap();
    }
    let engine = engine::Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    router(ServerState::new(engine, db, "fxwalletApp"))
}

async fn send_with(
    app: &Router,
    method: Method,
    uri: &str,
    credentials: Option<(&str, &str)>,
    content_type: &str,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some((username, password)) = credentials {
        let secret = BASE64_STANDARD.encode(format!("{username}:{password}"));
        request = request.header(header::AUTHORIZATION, format!("Basic {secret}"));
    }
    let body = match body {
        Some(body) => {
            request = request.header(header::CONTENT_TYPE, content_type);
            Body::from(body.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, value)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    credentials: (&str, &str),
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    send_with(app, method, uri, Some(credentials), "application/json", body).await
}

async fn new_customer(app: &Router, legal_entity: &str) -> String {
    let (status, _, body) = send(
        app,
        Method::POST,
        "/api/customers",
        ACME,
        Some(json!({ "customerName": legal_entity, "customerLegalEntity": legal_entity })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn requests_without_valid_credentials_are_rejected() {
    let app = app().await;

    let (status, _, _) =
        send_with(&app, Method::GET, "/api/wallets", None, "application/json", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = send(&app, Method::GET, "/api/wallets", ("acme", "wrong"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = send(&app, Method::GET, "/api/wallets", ("nobody", "x"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn customer_crud_round() {
    let app = app().await;

    let (status, headers, created) = send(
        &app,
        Method::POST,
        "/api/customers",
        ACME,
        Some(json!({
            "customerName": "Acme",
            "customerLegalEntity": "acme",
            "customerPassword": "p4ss",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(headers[header::LOCATION], format!("/api/customers/{id}").as_str());
    assert_eq!(headers["x-fxwalletapp-alert"], "fxwalletApp.customer.created");
    assert_eq!(headers["x-fxwalletapp-params"], id.as_str());
    assert!(created.get("customerPassword").is_none());

    let (status, _, patched) = send_with(
        &app,
        Method::PATCH,
        &format!("/api/customers/{id}"),
        Some(ACME),
        "application/merge-patch+json",
        Some(json!({ "id": id, "customerHashCode": "abc" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["customerName"], "Acme");
    assert_eq!(patched["customerHashCode"], "abc");

    let (status, headers, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/customers/{id}"),
        ACME,
        Some(json!({ "id": id, "customerLegalEntity": "acme" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["x-fxwalletapp-alert"], "fxwalletApp.customer.updated");
    assert_eq!(updated["customerName"], Value::Null);

    let (status, _, listed) = send(&app, Method::GET, "/api/customers", ACME, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([updated]));

    let (status, _, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/customers/{id}"),
        ACME,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, _) = send(&app, Method::GET, &format!("/api/customers/{id}"), ACME, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn request_ids_are_validated() {
    let app = app().await;
    let id = new_customer(&app, "acme").await;
    let other = "00000000-0000-0000-0000-000000000001";

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/currencies",
        ACME,
        Some(json!({ "id": other, "currencyCode": "USD" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["key"], "idexists");

    let (status, _, body) = send(
        &app,
        Method::PUT,
        &format!("/api/customers/{id}"),
        ACME,
        Some(json!({ "customerName": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["key"], "idnull");

    let (status, _, body) = send(
        &app,
        Method::PUT,
        &format!("/api/customers/{id}"),
        ACME,
        Some(json!({ "id": other })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["key"], "idinvalid");

    let (status, _, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/smart-trades/{other}"),
        ACME,
        Some(json!({ "id": other, "status": "SETTLED" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["key"], "idnotfound");
}

#[tokio::test]
async fn smart_trade_round() {
    let app = app().await;
    let customer_id = new_customer(&app, "acme").await;

    let (status, _, trade) = send(
        &app,
        Method::POST,
        "/api/smart-trades",
        ACME,
        Some(json!({
            "counterParty": "globex",
            "tradingParty": "acme",
            "currencyBuy": "EUR",
            "currencySell": "USD",
            "rate": 1.5,
            "amount": "1000.25",
            "valueDate": "2026-03-02",
            "customerId": customer_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(trade["amount"], "1000.25");
    assert_eq!(trade["valueDate"], "2026-03-02");
    assert_eq!(trade["customerId"], customer_id.as_str());

    let id = trade["id"].as_str().unwrap();
    let (status, _, loaded) =
        send(&app, Method::GET, &format!("/api/smart-trades/{id}"), ACME, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(loaded, trade);

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/api/smart-trades",
        ACME,
        Some(json!({ "customerId": "00000000-0000-0000-0000-000000000009" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wallet_entries_fold_into_the_callers_sheet() {
    let app = app().await;
    new_customer(&app, "acme").await;

    let (status, headers, sheet) = send(
        &app,
        Method::POST,
        "/api/wallets",
        ACME,
        Some(json!({ "currencyCode": "USD", "amount": "10" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(
        headers[header::LOCATION]
            .to_str()
            .unwrap()
            .starts_with("/api/wallets/")
    );
    assert_eq!(sheet, json!([{ "currencyCode": "USD", "amount": "10" }]));

    for (code, amount) in [("EUR", "5"), ("USD", "-3")] {
        let (status, _, _) = send(
            &app,
            Method::POST,
            "/api/wallets",
            ACME,
            Some(json!({ "currencyCode": code, "amount": amount })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let expected = json!([
        { "currencyCode": "EUR", "amount": "5" },
        { "currencyCode": "USD", "amount": "7" },
    ]);
    let (status, _, sheet) = send(&app, Method::GET, "/api/wallets", ACME, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sheet, expected);

    // Explicit scope is readable by any authenticated caller.
    let (status, _, sheet) = send(&app, Method::GET, "/api/wallets/acme", MALLORY, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sheet, expected);

    // A caller without a customer owns nothing.
    let (status, _, sheet) = send(&app, Method::GET, "/api/wallets", MALLORY, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sheet, json!([]));
}

#[tokio::test]
async fn fractions_are_truncated_before_summing() {
    let app = app().await;
    new_customer(&app, "acme").await;

    for amount in ["1.9", "2.9"] {
        send(
            &app,
            Method::POST,
            "/api/wallets",
            ACME,
            Some(json!({ "currencyCode": "USD", "amount": amount })),
        )
        .await;
    }

    let (_, _, sheet) = send(&app, Method::GET, "/api/wallets", ACME, None).await;
    assert_eq!(sheet, json!([{ "currencyCode": "USD", "amount": "3" }]));
}

#[tokio::test]
async fn wallet_requests_are_validated() {
    let app = app().await;

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/wallets",
        ACME,
        Some(json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "currencyCode": "USD",
            "amount": "1",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["key"], "idexists");

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/api/wallets",
        ACME,
        Some(json!({ "currencyCode": " ", "amount": "1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/api/wallets",
        ACME,
        Some(json!({
            "currencyCode": "USD",
            "amount": "1",
            "customerId": "00000000-0000-0000-0000-000000000001",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleted_wallet_entry_leaves_the_sheet() {
    let app = app().await;
    new_customer(&app, "acme").await;

    let (_, headers, _) = send(
        &app,
        Method::POST,
        "/api/wallets",
        ACME,
        Some(json!({ "currencyCode": "USD", "amount": "10" })),
    )
    .await;
    let location = headers[header::LOCATION].to_str().unwrap().to_string();

    let (status, _, _) = send(&app, Method::DELETE, &location, ACME, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, _, sheet) = send(&app, Method::GET, "/api/wallets", ACME, None).await;
    assert_eq!(sheet, json!([]));
}

#[tokio::test]
async fn negative_fraction_renders_as_zero() {
    let app = app().await;
    new_customer(&app, "acme").await;

    let (status, _, sheet) = send(
        &app,
        Method::POST,
        "/api/wallets",
        ACME,
        Some(json!({ "currencyCode": "USD", "amount": "-0.4" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sheet, json!([{ "currencyCode": "USD", "amount": "0" }]));
}
