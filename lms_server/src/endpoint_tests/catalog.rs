use actix_web::{http::StatusCode, web, web::ServiceConfig};
use lms_common::Cents;
use lms_engine::CatalogApi;

use super::{
    helpers::{get_request, sample_category, sample_course},
    mocks::MockBackend,
};
use crate::routes::{CategoryListRoute, CourseDetailRoute, CourseSearchRoute};

fn configure_catalog(mock: MockBackend) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = CatalogApi::new(mock);
        cfg.service(CategoryListRoute::<MockBackend>::new())
            .service(CourseSearchRoute::<MockBackend>::new())
            .service(CourseDetailRoute::<MockBackend>::new())
            .app_data(web::Data::new(api));
    }
}

#[actix_web::test]
async fn category_list_returns_active_categories() {
    let mut mock = MockBackend::new();
    mock.expect_fetch_categories()
        .returning(|| Ok(vec![sample_category(1, "Design"), sample_category(2, "Programming")]));
    let (status, body) = get_request("/courses/categories", configure_catalog(mock)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""title":"Design""#));
    assert!(body.contains(r#""title":"Programming""#));
}

#[actix_web::test]
async fn unknown_slug_is_a_404() {
    let mut mock = MockBackend::new();
    mock.expect_fetch_course_by_slug().returning(|_| Ok(None));
    let (status, body) = get_request("/courses/no-such-course", configure_catalog(mock)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("No published course matches 'no-such-course'"));
}

#[actix_web::test]
async fn search_matches_course_titles() {
    let mut mock = MockBackend::new();
    mock.expect_search_courses()
        .withf(|q| q == "rust")
        .returning(|_| Ok(vec![sample_course(5, "Rust for rubyists", Cents::from_dollars(49))]));
    let (status, body) = get_request("/courses/search?query=rust", configure_catalog(mock)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Rust for rubyists"));
}

#[actix_web::test]
async fn blank_search_query_returns_no_results_without_touching_the_catalog() {
    let mock = MockBackend::new();
    let (status, body) = get_request("/courses/search?query=%20%20", configure_catalog(mock)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}
