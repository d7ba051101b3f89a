use actix_web::{http::StatusCode, web, web::ServiceConfig};
use lms_common::Cents;
use lms_engine::{CartApi, CartUpsert, TaxPolicy};

use super::{
    helpers::{delete_request, get_request, post_request, sample_cart_item, sample_course},
    mocks::MockBackend,
};
use crate::routes::{CartAddRoute, CartItemsRoute, CartRemoveRoute, CartStatsRoute};

fn configure_cart(mock: MockBackend) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = CartApi::new(mock, TaxPolicy::Reject);
        cfg.service(CartAddRoute::<MockBackend>::new())
            .service(CartStatsRoute::<MockBackend>::new())
            .service(CartItemsRoute::<MockBackend>::new())
            .service(CartRemoveRoute::<MockBackend>::new())
            .app_data(web::Data::new(api));
    }
}

fn upsert(course_id: i64, country: &str) -> CartUpsert {
    CartUpsert {
        cart_id: "cart-1".to_string(),
        course_id,
        user_id: None,
        price: Cents::from_dollars(100),
        country: country.to_string(),
    }
}

#[actix_web::test]
async fn adding_a_course_computes_the_tax_line() {
    let mut mock = MockBackend::new();
    mock.expect_fetch_course_by_id().returning(|id| Ok(Some(sample_course(id, "Rust 101", Cents::from_dollars(100)))));
    mock.expect_fetch_country_by_name().returning(|name| {
        Ok(Some(lms_engine::db_types::Country { id: 1, name: name.to_string(), tax_rate: 15.0, active: true }))
    });
    mock.expect_upsert_cart_item().returning(|item| {
        let stored = sample_cart_item(1, &item.cart_id, item.course_id, item.price, item.tax_fee);
        Ok((stored, true))
    });
    let (status, body) = post_request("/cart", &upsert(42, "South Africa"), configure_cart(mock)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.contains(r#""tax_fee":1500"#));
    assert!(body.contains(r#""total":11500"#));
}

#[actix_web::test]
async fn unknown_course_cannot_be_added() {
    let mut mock = MockBackend::new();
    mock.expect_fetch_course_by_id().returning(|_| Ok(None));
    let (status, body) = post_request("/cart", &upsert(999, "United States"), configure_cart(mock)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Course 999 does not exist"));
}

#[actix_web::test]
async fn unknown_country_is_rejected_under_the_reject_policy() {
    let mut mock = MockBackend::new();
    mock.expect_fetch_course_by_id().returning(|id| Ok(Some(sample_course(id, "Rust 101", Cents::from_dollars(100)))));
    mock.expect_fetch_country_by_name().returning(|_| Ok(None));
    let (status, body) = post_request("/cart", &upsert(42, "Atlantis"), configure_cart(mock)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Country 'Atlantis' is not in the tax directory"));
}

#[actix_web::test]
async fn cart_stats_sum_the_lines() {
    let mut mock = MockBackend::new();
    mock.expect_fetch_cart_items().returning(|cart_id| {
        Ok(vec![
            sample_cart_item(1, cart_id, 10, Cents::from_dollars(100), Cents::from_dollars(10)),
            sample_cart_item(2, cart_id, 11, Cents::from_dollars(50), Cents::from_dollars(5)),
        ])
    });
    let (status, body) = get_request("/cart/cart-1/stats", configure_cart(mock)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""price":15000"#));
    assert!(body.contains(r#""tax":1500"#));
    assert!(body.contains(r#""total":16500"#));
    assert!(body.contains(r#""items_count":2"#));
}

#[actix_web::test]
async fn removing_a_missing_line_is_a_404() {
    let mut mock = MockBackend::new();
    mock.expect_delete_cart_item().returning(|_, _| Ok(false));
    let (status, body) = delete_request("/cart/cart-1/55", configure_cart(mock)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Item #55 is not in cart cart-1"));
}
