//! Order submission and cancellation against a mocked trading API.

use rust_decimal::Decimal;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use alpaca_gateway::{
    AlpacaClient, AlpacaConfig, AlpacaEnvironment, AlpacaError, OrderRequest, OrderValidationError,
};

fn client_for(server: &MockServer) -> AlpacaClient {
    let config = AlpacaConfig::new("test-key", "test-secret", AlpacaEnvironment::Paper)
        .unwrap()
        .with_trading_url(server.uri());
    AlpacaClient::new(config).unwrap()
}

fn order_body(id: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "client_order_id": "auto",
        "symbol": "AAPL",
        "side": "buy",
        "type": "limit",
        "time_in_force": "day",
        "status": status,
        "qty": "1",
        "filled_qty": "0",
        "limit_price": "100",
        "created_at": "2024-03-01T14:30:00.000000Z",
        "submitted_at": "2024-03-01T14:30:00.000000Z",
        "updated_at": "2024-03-01T14:30:00.000000Z"
    })
}

#[tokio::test]
async fn submit_order_forwards_validated_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/orders"))
        .and(header("APCA-API-KEY-ID", "test-key"))
        .and(header("APCA-API-SECRET-KEY", "test-secret"))
        .and(body_partial_json(serde_json::json!({
            "type": "limit",
            "symbol": "AAPL",
            "side": "buy",
            "time_in_force": "day",
            "qty": "1",
            "limit_price": "100"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_body("ord-1", "accepted")))
        .expect(1)
        .mount(&server)
        .await;

    let order = OrderRequest::limit("AAPL", "buy", "day", Decimal::new(100, 0))
        .with_qty(Decimal::ONE);
    let placed = client_for(&server).submit_order(&order).await.unwrap();

    assert_eq!(placed.id, "ord-1");
    assert_eq!(placed.status, "accepted");
    assert_eq!(placed.limit_price, Some(Decimal::new(100, 0)));
}

#[tokio::test]
async fn invalid_order_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_body("ord-2", "accepted")))
        .expect(0)
        .mount(&server)
        .await;

    // Limit order without a limit price.
    let mut order = OrderRequest::market("AAPL", "buy", "day").with_qty(Decimal::ONE);
    order.order_type = Some("limit".to_string());

    let err = client_for(&server).submit_order(&order).await.unwrap_err();
    assert!(matches!(
        err,
        AlpacaError::Validation(OrderValidationError::MissingLimitPrice)
    ));
}

#[tokio::test]
async fn notional_gtc_order_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_body("ord-3", "accepted")))
        .expect(0)
        .mount(&server)
        .await;

    let order = OrderRequest::market("AAPL", "buy", "gtc").with_notional(Decimal::new(100, 0));
    let err = client_for(&server).submit_order(&order).await.unwrap_err();
    assert!(matches!(
        err,
        AlpacaError::Validation(OrderValidationError::NotionalRequiresDayOrder)
    ));
}

#[tokio::test]
async fn notional_day_order_submits() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/orders"))
        .and(body_partial_json(serde_json::json!({
            "type": "market",
            "notional": "100",
            "time_in_force": "day"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_body("ord-4", "accepted")))
        .expect(1)
        .mount(&server)
        .await;

    let order = OrderRequest::market("AAPL", "buy", "day").with_notional(Decimal::new(100, 0));
    let placed = client_for(&server).submit_order(&order).await.unwrap();
    assert_eq!(placed.id, "ord-4");
}

#[tokio::test]
async fn rejected_order_maps_to_order_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/orders"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "code": 42210000,
            "message": "insufficient buying power"
        })))
        .mount(&server)
        .await;

    let order = OrderRequest::market("AAPL", "buy", "day").with_qty(Decimal::new(1_000_000, 0));
    let err = client_for(&server).submit_order(&order).await.unwrap_err();
    match err {
        AlpacaError::OrderRejected(message) => {
            assert!(message.contains("insufficient buying power"));
        }
        other => panic!("expected OrderRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn bad_credentials_map_to_authentication_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/positions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "access key verification failed"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).get_positions().await.unwrap_err();
    assert!(matches!(err, AlpacaError::AuthenticationFailed));
}

#[tokio::test]
async fn cancel_order_deletes_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/orders/ord-9"))
        .and(header("APCA-API-KEY-ID", "test-key"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).cancel_order("ord-9").await.unwrap();
}

#[tokio::test]
async fn cancel_unknown_order_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/orders/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "code": 40410000,
            "message": "order not found"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).cancel_order("missing").await.unwrap_err();
    match err {
        AlpacaError::NotFound(message) => assert!(message.contains("order not found")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn cancel_requires_an_order_id() {
    let server = MockServer::start().await;
    let err = client_for(&server).cancel_order("").await.unwrap_err();
    assert!(matches!(err, AlpacaError::InvalidRequest(_)));
}

#[tokio::test]
async fn get_orders_forwards_status_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/orders"))
        .and(query_param("status", "open"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([order_body("ord-1", "new")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let orders = client_for(&server).get_orders(Some("open")).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].status, "new");
}

#[tokio::test]
async fn get_positions_parses_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/positions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "symbol": "AAPL",
                "qty": "10",
                "side": "long",
                "avg_entry_price": "180.25",
                "market_value": "1850.00",
                "current_price": "185.00",
                "unrealized_pl": "47.50"
            }
        ])))
        .mount(&server)
        .await;

    let positions = client_for(&server).get_positions().await.unwrap();
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].symbol, "AAPL");
    assert_eq!(positions[0].qty, Decimal::new(10, 0));
    assert_eq!(positions[0].avg_entry_price, Decimal::new(18025, 2));
}
