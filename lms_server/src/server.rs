use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use futures::FutureExt;
use gateway_clients::{CardGatewayApi, WalletGatewayApi};
use lms_engine::{
    events::{EventHandlers, EventHooks, EventProducers},
    CartApi,
    CatalogApi,
    OrderFlowApi,
    SqliteDatabase,
    StudentApi,
};
use log::*;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    routes::{
        health,
        CardCheckoutRoute,
        CartAddRoute,
        CartItemsRoute,
        CartRemoveRoute,
        CartStatsRoute,
        CategoryListRoute,
        CouponApplyRoute,
        CourseDetailRoute,
        CourseListRoute,
        CourseSearchRoute,
        LessonToggleRoute,
        NoteCreateRoute,
        NoteDeleteRoute,
        NoteDetailRoute,
        NoteListRoute,
        NoteUpdateRoute,
        OrderCreateRoute,
        OrderDetailRoute,
        PaymentConfirmRoute,
        QaAskRoute,
        QaListRoute,
        QaReplyRoute,
        ReviewCreateRoute,
        ReviewDetailRoute,
        ReviewUpdateRoute,
        StudentCourseRoute,
        StudentCoursesRoute,
        StudentSummaryRoute,
        WishlistRoute,
        WishlistToggleRoute,
    },
};

const EVENT_BUFFER_SIZE: usize = 25;

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let mut hooks = EventHooks::default();
    hooks.on_new_order(|ev| {
        async move {
            info!("📬️ New order {} from {} for {}", ev.order.oid, ev.order.email, ev.order.total);
        }
        .boxed()
    });
    hooks.on_order_paid(|ev| {
        async move {
            info!("📬️ Order {} was paid by {}. {} enrollments created", ev.order.oid, ev.order.email, ev.enrollments.len());
        }
        .boxed()
    });
    let handlers = EventHandlers::new(EVENT_BUFFER_SIZE, hooks);
    let producers = handlers.producers();
    handlers.start_handlers().await;
    let srv = create_server_instance(config, db, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let card_api = web::Data::new(
        CardGatewayApi::new(config.card_gateway.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?,
    );
    let wallet_api = web::Data::new(
        WalletGatewayApi::new(config.wallet_gateway.clone())
            .map_err(|e| ServerError::InitializeError(e.to_string()))?,
    );
    let srv = HttpServer::new(move || {
        let catalog_api = CatalogApi::new(db.clone());
        let cart_api = CartApi::new(db.clone(), config.tax_policy.clone());
        let order_api = OrderFlowApi::new(db.clone(), producers.clone());
        let student_api = StudentApi::new(db.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("lms::access_log"))
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(cart_api))
            .app_data(web::Data::new(order_api))
            .app_data(web::Data::new(student_api))
            .app_data(card_api.clone())
            .app_data(wallet_api.clone())
            .service(health)
            // Literal segments before `{slug}` so "categories" and "search" are never read as slugs
            .service(CategoryListRoute::<SqliteDatabase>::new())
            .service(CourseSearchRoute::<SqliteDatabase>::new())
            .service(CourseListRoute::<SqliteDatabase>::new())
            .service(QaListRoute::<SqliteDatabase>::new())
            .service(QaAskRoute::<SqliteDatabase>::new())
            .service(CourseDetailRoute::<SqliteDatabase>::new())
            .service(CartAddRoute::<SqliteDatabase>::new())
            .service(CartStatsRoute::<SqliteDatabase>::new())
            .service(CartItemsRoute::<SqliteDatabase>::new())
            .service(CartRemoveRoute::<SqliteDatabase>::new())
            .service(OrderCreateRoute::<SqliteDatabase>::new())
            .service(CouponApplyRoute::<SqliteDatabase>::new())
            .service(OrderDetailRoute::<SqliteDatabase>::new())
            .service(CardCheckoutRoute::<SqliteDatabase>::new())
            .service(PaymentConfirmRoute::<SqliteDatabase>::new())
            .service(StudentSummaryRoute::<SqliteDatabase>::new())
            .service(StudentCoursesRoute::<SqliteDatabase>::new())
            .service(StudentCourseRoute::<SqliteDatabase>::new())
            .service(LessonToggleRoute::<SqliteDatabase>::new())
            .service(WishlistToggleRoute::<SqliteDatabase>::new())
            .service(WishlistRoute::<SqliteDatabase>::new())
            .service(ReviewCreateRoute::<SqliteDatabase>::new())
            .service(ReviewDetailRoute::<SqliteDatabase>::new())
            .service(ReviewUpdateRoute::<SqliteDatabase>::new())
            .service(NoteListRoute::<SqliteDatabase>::new())
            .service(NoteCreateRoute::<SqliteDatabase>::new())
            .service(NoteDetailRoute::<SqliteDatabase>::new())
            .service(NoteUpdateRoute::<SqliteDatabase>::new())
            .service(NoteDeleteRoute::<SqliteDatabase>::new())
            .service(QaReplyRoute::<SqliteDatabase>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
