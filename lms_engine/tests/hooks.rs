use std::sync::{
    atomic::{AtomicI32, Ordering},
    Arc,
};

use futures_util::FutureExt;
use lms_common::Cents;
use lms_engine::{
    events::{EventHandlers, EventHooks},
    test_utils::{
        prepare_env::{prepare_test_env, random_db_path},
        seed::{seed_country, seed_course},
    },
    CartApi,
    CartUpsert,
    NewOrderRequest,
    OrderFlowApi,
    SqliteDatabase,
    TaxPolicy,
};
use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};
use tokio::time::{sleep, Duration};

#[derive(Default, Clone)]
struct HookCalled {
    orders_created: Arc<AtomicI32>,
    called: Arc<AtomicI32>,
    enrollments: Arc<AtomicI32>,
}

impl HookCalled {
    pub fn order_created(&self) {
        let _ = self.orders_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn called(&self, enrollments: i32) {
        let _ = self.called.fetch_add(1, Ordering::Relaxed);
        let _ = self.enrollments.fetch_add(enrollments, Ordering::Relaxed);
    }

    pub fn orders_created_count(&self) -> i32 {
        self.orders_created.load(Ordering::Relaxed)
    }

    pub fn count(&self) -> i32 {
        self.called.load(Ordering::Relaxed)
    }

    pub fn enrollment_count(&self) -> i32 {
        self.enrollments.load(Ordering::Relaxed)
    }
}

#[tokio::test]
async fn order_paid_hook_fires_once_per_confirmation() {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    let event = HookCalled::default();
    let event_copy = event.clone();

    let mut hooks = EventHooks::default();
    let order_event = event.clone();
    hooks.on_new_order(move |ev| {
        info!("🪝️ New order {} for {}", ev.order.oid, ev.order.total);
        order_event.order_created();
        async {}.boxed()
    });
    hooks.on_order_paid(move |ev| {
        info!("🪝️ {} paid with {} enrollments", ev.order.oid, ev.enrollments.len());
        #[allow(clippy::cast_possible_truncation)]
        event_copy.called(ev.enrollments.len() as i32);
        async {}.boxed()
    });
    let handlers = EventHandlers::new(10, hooks);
    let producers = handlers.producers();
    handlers.start_handlers().await;

    let url = random_db_path();
    prepare_test_env(&url).await;
    let db = SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database");
    let carts = CartApi::new(db.clone(), TaxPolicy::default());
    let orders = OrderFlowApi::new(db, producers);

    seed_country(orders.db(), "South Africa", 0.0).await;
    let c1 = seed_course(orders.db(), 7, "Course One", "course-one", Cents::from_dollars(100)).await;
    let c2 = seed_course(orders.db(), 8, "Course Two", "course-two", Cents::from_dollars(50)).await;
    for (course_id, price) in [(c1, Cents::from_dollars(100)), (c2, Cents::from_dollars(50))] {
        let upsert = CartUpsert {
            cart_id: "cart-1".to_string(),
            course_id,
            user_id: Some(100),
            price,
            country: "South Africa".to_string(),
        };
        carts.upsert(upsert).await.expect("Error filling cart");
    }
    let request = NewOrderRequest {
        full_name: "Alice Example".to_string(),
        email: "alice@example.com".to_string(),
        country: "South Africa".to_string(),
        cart_id: "cart-1".to_string(),
        user_id: 100,
    };
    let order = orders.create_order(request).await.expect("Error creating order");

    let _ = orders.confirm_payment(&order.oid).await.expect("Error confirming payment");
    // The second confirmation is a no-op and must not fire the hook again.
    let _ = orders.confirm_payment(&order.oid).await.expect("Error re-confirming payment");

    sleep(Duration::from_millis(100)).await;
    assert_eq!(event.orders_created_count(), 1);
    assert_eq!(event.count(), 1);
    assert_eq!(event.enrollment_count(), 2);

    if let Err(e) = Sqlite::drop_database(&url).await {
        error!("🚀️ Failed to drop database: {e}");
    }
    info!("🪝️ test complete");
}
