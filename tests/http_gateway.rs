use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde_json::Value;
use tokio::net::TcpListener;

use dispatch_console::cart::Cart;
use dispatch_console::domain::CartProduct;
use dispatch_console::error::GatewayError;
use dispatch_console::gateway::{HttpOrderGateway, OrderGateway};

/// A request as the fake order API saw it.
#[derive(Debug, Clone)]
struct Captured {
    authorization: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct FakeOrderApi {
    status: StatusCode,
    captured: Arc<Mutex<Vec<Captured>>>,
}

async fn create_order(
    State(api): State<FakeOrderApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    api.captured.lock().unwrap().push(Captured { authorization, body });
    api.status
}

/// Starts the fake order API answering every create with `status`.
async fn start_order_api(status: StatusCode) -> (String, Arc<Mutex<Vec<Captured>>>) {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/orders/create", post(create_order))
        .with_state(FakeOrderApi {
            status,
            captured: captured.clone(),
        });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), captured)
}

fn sample_cart() -> Cart {
    let mut cart = Cart::new();
    cart.add(CartProduct::new(7, "Coffee", Decimal::new(899, 2), 2));
    cart.add(CartProduct::new(3, "Sugar", Decimal::new(150, 2), 1));
    cart.add(CartProduct::new(7, "Coffee", Decimal::new(899, 2), 2));
    cart
}

#[tokio::test]
async fn test_posts_checkout_body_to_create_endpoint() {
    let (base_url, captured) = start_order_api(StatusCode::CREATED).await;
    let gateway = HttpOrderGateway::new(&format!("{base_url}/"), Duration::from_secs(5))
        .unwrap()
        .with_bearer_token("tok-123");

    let request = sample_cart().build_checkout_request("customer-1", "Main St 5");
    gateway.create_order(&request).await.unwrap();

    let captured = captured.lock().unwrap().clone();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].authorization.as_deref(), Some("Bearer tok-123"));
    assert_eq!(
        captured[0].body,
        serde_json::json!({
            "customerId": "customer-1",
            "address": "Main St 5",
            "subOrders": [
                { "storeId": 1, "orderItems": [ { "productId": 3, "quantity": 1, "unitPrice": 1.5 } ] },
                { "storeId": 2, "orderItems": [ { "productId": 7, "quantity": 2, "unitPrice": 8.99 } ] }
            ]
        })
    );
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let (base_url, captured) = start_order_api(StatusCode::OK).await;
    let gateway = HttpOrderGateway::new(&base_url, Duration::from_secs(5)).unwrap();

    let request = sample_cart().build_checkout_request("customer-1", "Main St 5");
    gateway.create_order(&request).await.unwrap();

    assert_eq!(captured.lock().unwrap()[0].authorization, None);
}

#[tokio::test]
async fn test_non_success_status_is_failure() {
    let (base_url, captured) = start_order_api(StatusCode::INTERNAL_SERVER_ERROR).await;
    let gateway = HttpOrderGateway::new(&base_url, Duration::from_secs(5)).unwrap();

    let request = sample_cart().build_checkout_request("customer-1", "Main St 5");
    let result = gateway.create_order(&request).await;

    assert!(matches!(result, Err(GatewayError::Status(500))));
    assert_eq!(captured.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let gateway = HttpOrderGateway::new(&base_url, Duration::from_secs(2)).unwrap();
    let request = sample_cart().build_checkout_request("customer-1", "Main St 5");

    let result = gateway.create_order(&request).await;
    assert!(matches!(result, Err(GatewayError::Transport(_))));
}
