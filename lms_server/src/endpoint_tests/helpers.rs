use actix_web::{
    http::StatusCode,
    test,
    test::TestRequest,
    web::ServiceConfig,
    App,
};
use chrono::Utc;
use lms_common::Cents;
use lms_engine::db_types::{CartItem, Category, Course, Order, OrderOid, PaymentStatus, PublishStatus};
use serde::Serialize;

pub async fn send_request(
    req: TestRequest,
    configure: impl FnOnce(&mut ServiceConfig),
) -> (StatusCode, String) {
    let _ = env_logger::try_init().ok();
    let app = App::new().configure(configure);
    let service = test::init_service(app).await;
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let body = String::from_utf8_lossy(&test::read_body(res).await).into_owned();
    (status, body)
}

pub async fn get_request(path: &str, configure: impl FnOnce(&mut ServiceConfig)) -> (StatusCode, String) {
    send_request(TestRequest::get().uri(path), configure).await
}

pub async fn post_request<T: Serialize>(
    path: &str,
    body: &T,
    configure: impl FnOnce(&mut ServiceConfig),
) -> (StatusCode, String) {
    send_request(TestRequest::post().uri(path).set_json(body), configure).await
}

pub async fn delete_request(path: &str, configure: impl FnOnce(&mut ServiceConfig)) -> (StatusCode, String) {
    send_request(TestRequest::delete().uri(path), configure).await
}

pub fn sample_category(id: i64, title: &str) -> Category {
    Category { id, title: title.to_string(), slug: title.to_lowercase().replace(' ', "-"), active: true }
}

pub fn sample_course(id: i64, title: &str, price: Cents) -> Course {
    Course {
        id,
        category_id: Some(1),
        teacher_id: 7,
        title: title.to_string(),
        slug: title.to_lowercase().replace(' ', "-"),
        description: "A course".to_string(),
        price,
        platform_status: PublishStatus::Published,
        teacher_course_status: PublishStatus::Published,
        created_at: Utc::now(),
    }
}

pub fn sample_cart_item(id: i64, cart_id: &str, course_id: i64, price: Cents, tax_fee: Cents) -> CartItem {
    CartItem {
        id,
        cart_id: cart_id.to_string(),
        course_id,
        user_id: None,
        price,
        tax_fee,
        total: price + tax_fee,
        country: "United States".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn sample_order(id: i64, oid: &str, total: Cents) -> Order {
    Order {
        id,
        oid: OrderOid(oid.to_string()),
        user_id: Some(100),
        full_name: "Alice Adams".to_string(),
        email: "alice@example.com".to_string(),
        country: "United States".to_string(),
        sub_total: total,
        tax_fee: Cents::default(),
        total,
        initial_total: total,
        saved: Cents::default(),
        payment_status: PaymentStatus::Processing,
        card_session_id: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
