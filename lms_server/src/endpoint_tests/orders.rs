use actix_web::{http::StatusCode, web, web::ServiceConfig};
use gateway_clients::{CardGatewayApi, CardGatewayConfig, WalletGatewayApi, WalletGatewayConfig};
use lms_common::Cents;
use lms_engine::{
    db_types::OrderOid,
    events::EventProducers,
    CouponApplication,
    CouponOutcome,
    NewOrderRequest,
    OrderFlowApi,
    OrderFlowError,
};

use super::{
    helpers::{get_request, post_request, sample_order},
    mocks::MockBackend,
};
use crate::{
    data_objects::PaymentConfirmRequest,
    routes::{CouponApplyRoute, OrderCreateRoute, OrderDetailRoute, PaymentConfirmRoute},
};

fn configure_orders(mock: MockBackend) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = OrderFlowApi::new(mock, EventProducers::default());
        let card = CardGatewayApi::new(CardGatewayConfig::default()).unwrap();
        let wallet = WalletGatewayApi::new(WalletGatewayConfig::default()).unwrap();
        cfg.service(OrderCreateRoute::<MockBackend>::new())
            .service(CouponApplyRoute::<MockBackend>::new())
            .service(OrderDetailRoute::<MockBackend>::new())
            .service(PaymentConfirmRoute::<MockBackend>::new())
            .app_data(web::Data::new(api))
            .app_data(web::Data::new(card))
            .app_data(web::Data::new(wallet));
    }
}

fn new_order_request(cart_id: &str) -> NewOrderRequest {
    NewOrderRequest {
        full_name: "Alice Adams".to_string(),
        email: "alice@example.com".to_string(),
        country: "United States".to_string(),
        cart_id: cart_id.to_string(),
        user_id: 100,
    }
}

#[actix_web::test]
async fn an_order_is_created_from_a_cart() {
    let mut mock = MockBackend::new();
    mock.expect_create_order_from_cart()
        .withf(|req| req.cart_id == "cart-1")
        .returning(|_| Ok(sample_order(1, "AbCdEf123456", Cents::from_dollars(150))));
    let (status, body) = post_request("/orders", &new_order_request("cart-1"), configure_orders(mock)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.contains(r#""oid":"AbCdEf123456""#));
    assert!(body.contains(r#""total":15000"#));
}

#[actix_web::test]
async fn an_empty_cart_cannot_be_checked_out() {
    let mut mock = MockBackend::new();
    mock.expect_create_order_from_cart()
        .returning(|req| Err(OrderFlowError::CartEmpty(req.cart_id)));
    let (status, body) = post_request("/orders", &new_order_request("empty-cart"), configure_orders(mock)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Cart 'empty-cart' has no items"));
}

#[actix_web::test]
async fn fetching_an_unknown_order_is_a_404() {
    let mut mock = MockBackend::new();
    mock.expect_fetch_order_by_oid().returning(|_| Ok(None));
    let (status, body) = get_request("/orders/NoSuchOrder1", configure_orders(mock)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Order #NoSuchOrder1 does not exist"));
}

#[actix_web::test]
async fn an_applied_coupon_reports_the_discount() {
    let mut mock = MockBackend::new();
    mock.expect_apply_coupon_to_order().withf(|oid, code| oid == &OrderOid("AbCdEf123456".into()) && code == "TEACH10").returning(
        |_, _| {
            Ok(CouponOutcome::Applied {
                order: sample_order(1, "AbCdEf123456", Cents::from_dollars(135)),
                discount: Cents::from_dollars(15),
            })
        },
    );
    let application =
        CouponApplication { order_oid: "AbCdEf123456".to_string(), coupon_code: " TEACH10 ".to_string() };
    let (status, body) = post_request("/orders/coupon", &application, configure_orders(mock)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("You saved $15.00"));
    assert!(body.contains(r#""icon":"success""#));
}

#[actix_web::test]
async fn a_repeated_coupon_is_a_warning_not_an_error() {
    let mut mock = MockBackend::new();
    mock.expect_apply_coupon_to_order().returning(|_, _| {
        Ok(CouponOutcome::AlreadyApplied { order: sample_order(1, "AbCdEf123456", Cents::from_dollars(135)) })
    });
    let application = CouponApplication { order_oid: "AbCdEf123456".to_string(), coupon_code: "TEACH10".to_string() };
    let (status, body) = post_request("/orders/coupon", &application, configure_orders(mock)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""icon":"warning""#));
}

#[actix_web::test]
async fn payment_confirmation_needs_exactly_one_provider_reference() {
    let both = PaymentConfirmRequest {
        order_oid: "AbCdEf123456".to_string(),
        session_id: Some("cs_123".to_string()),
        wallet_order_id: Some("5OH12345".to_string()),
    };
    let (status, body) = post_request("/payments/confirm", &both, configure_orders(MockBackend::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("exactly one of session_id or wallet_order_id"));

    let neither = PaymentConfirmRequest { order_oid: "AbCdEf123456".to_string(), session_id: None, wallet_order_id: None };
    let (status, _) = post_request("/payments/confirm", &neither, configure_orders(MockBackend::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
