//! End-to-end scenarios against a mock backend: success parsing, error
//! envelope normalization, callback reporting, multipart upload, session
//! lifecycle and the role-counts aggregation.

use std::sync::atomic::{AtomicUsize, Ordering};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use httpmock::prelude::*;
use serde_json::json;

use client::services::stats::aggregate_role_counts;
use client::{ApiClient, MarketApi, RequestError, RequestOptions, Session, TransactionQuery};
use shared::{ApiError, Product, Transaction};

fn api_client(server: &MockServer) -> ApiClient {
    init_tracing();
    ApiClient::new(server.base_url(), Session::new()).unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn fake_token(id: i64, email: &str) -> String {
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"id":{id},"email":"{email}"}}"#));
    format!("eyJhbGciOiJIUzI1NiJ9.{payload}.c2ln")
}

fn tx_json(id: i64, seller_id: i64, buyer_id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "sellerId": seller_id,
        "buyerId": buyer_id,
        "productId": id * 10,
        "productPrice": 12.5,
        "startDate": 1_700_000_000_000i64
    })
}

#[tokio::test]
async fn fetch_returns_parsed_product_list() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/products").query_param("sellerId", "5");
            then.status(200).json_body(json!([
                {"id": 1, "title": "Lamp", "price": 10.0, "sellerId": 5},
                {"id": 2, "title": "Desk", "price": 45.0, "sellerId": 5}
            ]));
        })
        .await;

    let client = api_client(&server);
    let products: Vec<Product> = client
        .fetch(
            "/products",
            &[("sellerId", Some(5.into()))],
            RequestOptions::default(),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, 1);
    assert_eq!(products[1].title, "Desk");
}

#[tokio::test]
async fn server_rejection_yields_errors_and_invokes_callback_once() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/products");
            then.status(403)
                .json_body(json!({"errors": [{"msg": "Forbidden"}]}));
        })
        .await;

    let calls = AtomicUsize::new(0);
    let handler = |errors: &[ApiError]| {
        calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].msg, "Forbidden");
    };

    let client = api_client(&server);
    let result: client::Result<Vec<Product>> = client
        .fetch(
            "/products",
            &[],
            RequestOptions::default().with_error_handler(&handler),
        )
        .await;

    let err = result.unwrap_err();
    match &err {
        RequestError::Server(errors) => assert_eq!(errors[0].msg, "Forbidden"),
        other => panic!("expected a server error, got {other:?}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unparseable_error_body_normalizes_to_unknown() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/products/1");
            then.status(500).body("gateway exploded");
        })
        .await;

    let client = api_client(&server);
    let err = client
        .fetch::<Product>("/products/1", &[], RequestOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, RequestError::UnknownResponse));
    assert_eq!(err.errors()[0].msg, "Unknown error");
}

#[tokio::test]
async fn unreachable_backend_yields_a_network_error() {
    // Port 9 (discard) is reserved and nothing listens on it in CI.
    let client = ApiClient::new("http://127.0.0.1:9", Session::new()).unwrap();
    let err = client
        .fetch::<Vec<Product>>("/products", &[], RequestOptions::default())
        .await
        .unwrap_err();

    assert!(err.is_network());
    assert!(err.errors()[0].msg.starts_with("Network error"));
}

#[tokio::test]
async fn login_stores_token_and_authenticates_later_calls() {
    let server = MockServer::start_async().await;
    let token = fake_token(7, "ana@example.com");

    let login_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/users/login")
                .json_body(json!({"email": "ana@example.com", "password": "secret"}));
            then.status(200)
                .json_body(json!({"apiKey": token.clone(), "email": "ana@example.com"}));
        })
        .await;
    let own_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/transactions/own")
                .header("apikey", token.clone());
            then.status(200).json_body(json!([]));
        })
        .await;

    let client = api_client(&server);
    let response = client.login("ana@example.com", "secret").await.unwrap();
    assert_eq!(response.email, "ana@example.com");
    assert_eq!(client.session().user_id(), Some(7));

    let own: Vec<Transaction> = client.own_transactions().await.unwrap();
    assert!(own.is_empty());

    login_mock.assert_async().await;
    own_mock.assert_async().await;
}

#[tokio::test]
async fn inactive_session_check_clears_the_token() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/isActiveApiKey");
            then.status(200).json_body(json!({"activeApiKey": false}));
        })
        .await;

    let session = Session::with_token(fake_token(7, "ana@example.com"));
    let client = ApiClient::new(server.base_url(), session).unwrap();

    let active = client.check_session().await.unwrap();
    assert!(!active);
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn logout_clears_the_token_even_when_the_backend_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/disconnect");
            then.status(500).body("not json");
        })
        .await;

    let session = Session::with_token(fake_token(7, "ana@example.com"));
    let client = ApiClient::new(server.base_url(), session).unwrap();

    client.logout().await.unwrap();
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn multipart_upload_succeeds_against_the_image_endpoint() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/products/7/image");
            then.status(200).json_body(json!({"status": "ok"}));
        })
        .await;

    let client = api_client(&server);
    let response = client
        .upload_product_image(7, vec![0x89, 0x50, 0x4e, 0x47], "lamp.png".to_string())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response["status"], "ok");
}

#[tokio::test]
async fn aggregate_counts_dedup_the_overlapping_union() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/transactions/public")
                .query_param("sellerId", "5");
            then.status(200)
                .json_body(json!([tx_json(1, 5, 7), tx_json(2, 5, 8)]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/transactions/public")
                .query_param("buyerId", "5");
            then.status(200)
                .json_body(json!([tx_json(2, 5, 8), tx_json(3, 9, 5)]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/products").query_param("sellerId", "5");
            then.status(200).json_body(json!([]));
        })
        .await;

    let client = api_client(&server);
    let counts = aggregate_role_counts(&client, 5).await;

    assert_eq!(counts.sales_count, 2);
    assert_eq!(counts.purchases_count, 2);
    assert_eq!(counts.unique_transaction_count, 3);
    assert_eq!(counts.product_count, 0);
    assert!(counts.unique_transaction_count <= counts.sales_count + counts.purchases_count);
}

#[tokio::test]
async fn aggregate_isolates_a_failing_branch() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/transactions/public")
                .query_param("sellerId", "6");
            then.status(500)
                .json_body(json!({"errors": [{"msg": "boom"}]}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/transactions/public")
                .query_param("buyerId", "6");
            then.status(200)
                .json_body(json!([tx_json(4, 9, 6), tx_json(5, 9, 6), tx_json(6, 9, 6)]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/products").query_param("sellerId", "6");
            then.status(200)
                .json_body(json!([{"id": 1, "title": "Lamp", "price": 5.0, "sellerId": 6},
                                  {"id": 2, "title": "Desk", "price": 9.0, "sellerId": 6}]));
        })
        .await;

    let client = api_client(&server);
    let counts = aggregate_role_counts(&client, 6).await;

    assert_eq!(counts.sales_count, 0);
    assert_eq!(counts.purchases_count, 3);
    assert_eq!(counts.unique_transaction_count, 3);
    assert_eq!(counts.product_count, 2);
}

#[tokio::test]
async fn the_trait_object_surface_is_usable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/transactions/public")
                .query_param("sellerId", "5");
            then.status(200).json_body(json!([tx_json(1, 5, 7)]));
        })
        .await;

    let client = api_client(&server);
    let api: &dyn MarketApi = &client;
    let sales = api
        .public_transactions(TransactionQuery::for_seller(5))
        .await
        .unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].seller_id, Some(5));
}
