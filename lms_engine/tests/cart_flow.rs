use lms_common::Cents;
use lms_engine::{
    test_utils::{
        prepare_env::{prepare_test_env, random_db_path},
        seed::{seed_country, seed_course},
    },
    CartApi,
    CartApiError,
    CartUpsert,
    SqliteDatabase,
    TaxPolicy,
};
use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};

async fn setup(policy: TaxPolicy) -> CartApi<SqliteDatabase> {
    let url = random_db_path();
    prepare_test_env(&url).await;
    let db = SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database");
    CartApi::new(db, policy)
}

async fn tear_down(api: CartApi<SqliteDatabase>) {
    let url = api.db().url().to_string();
    if let Err(e) = Sqlite::drop_database(&url).await {
        error!("🚀️ Failed to drop database: {e}");
    }
}

fn upsert_for(cart_id: &str, course_id: i64, price: Cents, country: &str) -> CartUpsert {
    CartUpsert {
        cart_id: cart_id.to_string(),
        course_id,
        user_id: Some(100),
        price,
        country: country.to_string(),
    }
}

#[tokio::test]
async fn upsert_computes_tax_and_total() {
    let api = setup(TaxPolicy::default()).await;
    seed_country(api.db(), "South Africa", 15.0).await;
    let course = seed_course(api.db(), 7, "Rust for Rustaceans", "rust-for-rustaceans", Cents::from_dollars(100)).await;

    let (item, created) = api
        .upsert(upsert_for("cart-1", course, Cents::from_dollars(100), "South Africa"))
        .await
        .expect("Error upserting cart item");
    assert!(created);
    assert_eq!(item.price, Cents::from_dollars(100));
    assert_eq!(item.tax_fee, Cents::from_dollars(15));
    assert_eq!(item.total, Cents::from_dollars(115));
    tear_down(api).await;
}

#[tokio::test]
async fn concurrent_upserts_of_one_course_leave_a_single_row() {
    let api = setup(TaxPolicy::default()).await;
    seed_country(api.db(), "South Africa", 15.0).await;
    let course = seed_course(api.db(), 7, "Rust for Rustaceans", "rust-for-rustaceans", Cents::from_dollars(100)).await;

    // Neither add may fail on the UNIQUE(cart_id, course_id) constraint.
    let (a, b) = tokio::join!(
        api.upsert(upsert_for("cart-1", course, Cents::from_dollars(100), "South Africa")),
        api.upsert(upsert_for("cart-1", course, Cents::from_dollars(80), "South Africa")),
    );
    let (a, _) = a.expect("Error upserting cart item");
    let (b, _) = b.expect("Error upserting cart item");
    assert_eq!(a.id, b.id);

    let items = api.items("cart-1").await.expect("Error fetching cart");
    assert_eq!(items.len(), 1);
    tear_down(api).await;
}

#[tokio::test]
async fn second_upsert_updates_the_same_row() {
    let api = setup(TaxPolicy::default()).await;
    seed_country(api.db(), "South Africa", 15.0).await;
    let course = seed_course(api.db(), 7, "Rust for Rustaceans", "rust-for-rustaceans", Cents::from_dollars(100)).await;

    let (first, created) = api
        .upsert(upsert_for("cart-1", course, Cents::from_dollars(100), "South Africa"))
        .await
        .expect("Error upserting cart item");
    assert!(created);
    let (second, created) = api
        .upsert(upsert_for("cart-1", course, Cents::from_dollars(80), "South Africa"))
        .await
        .expect("Error upserting cart item");
    assert!(!created);
    assert_eq!(second.id, first.id);
    assert_eq!(second.price, Cents::from_dollars(80));
    assert_eq!(second.total, Cents::from_dollars(92));

    let items = api.items("cart-1").await.expect("Error fetching cart");
    assert_eq!(items.len(), 1);
    tear_down(api).await;
}

#[tokio::test]
async fn unknown_country_falls_back_to_default_policy() {
    let api = setup(TaxPolicy::default()).await;
    let course = seed_course(api.db(), 7, "Intro to SQL", "intro-to-sql", Cents::from_dollars(100)).await;

    // "Atlantis" is not in the tax directory; the default policy is United States at 0%.
    let (item, _) = api
        .upsert(upsert_for("cart-1", course, Cents::from_dollars(100), "Atlantis"))
        .await
        .expect("Error upserting cart item");
    assert_eq!(item.country, "United States");
    assert_eq!(item.tax_fee, Cents::from(0));
    assert_eq!(item.total, Cents::from_dollars(100));
    tear_down(api).await;
}

#[tokio::test]
async fn reject_policy_turns_unknown_country_into_an_error() {
    let api = setup(TaxPolicy::Reject).await;
    let course = seed_course(api.db(), 7, "Intro to SQL", "intro-to-sql", Cents::from_dollars(100)).await;

    let err = api
        .upsert(upsert_for("cart-1", course, Cents::from_dollars(100), "Atlantis"))
        .await
        .expect_err("Expected an unknown country error");
    assert!(matches!(err, CartApiError::UnknownCountry(c) if c == "Atlantis"));
    tear_down(api).await;
}

#[tokio::test]
async fn missing_course_is_an_explicit_error() {
    let api = setup(TaxPolicy::default()).await;
    let err = api
        .upsert(upsert_for("cart-1", 9999, Cents::from_dollars(10), "United States"))
        .await
        .expect_err("Expected a missing course error");
    assert!(matches!(err, CartApiError::CourseNotFound(9999)));
    tear_down(api).await;
}

#[tokio::test]
async fn stats_sum_over_all_lines() {
    let api = setup(TaxPolicy::default()).await;
    seed_country(api.db(), "South Africa", 15.0).await;
    let c1 = seed_course(api.db(), 7, "Course One", "course-one", Cents::from_dollars(100)).await;
    let c2 = seed_course(api.db(), 8, "Course Two", "course-two", Cents::from_dollars(50)).await;

    api.upsert(upsert_for("cart-1", c1, Cents::from_dollars(100), "South Africa")).await.unwrap();
    api.upsert(upsert_for("cart-1", c2, Cents::from_dollars(50), "South Africa")).await.unwrap();

    let stats = api.stats("cart-1").await.expect("Error fetching stats");
    assert_eq!(stats.items_count, 2);
    assert_eq!(stats.price, Cents::from_dollars(150));
    assert_eq!(stats.tax, Cents::from(2250));
    assert_eq!(stats.total, Cents::from(17_250));
    tear_down(api).await;
}

#[tokio::test]
async fn remove_deletes_a_single_line() {
    let api = setup(TaxPolicy::default()).await;
    seed_country(api.db(), "South Africa", 15.0).await;
    let c1 = seed_course(api.db(), 7, "Course One", "course-one", Cents::from_dollars(100)).await;
    let (item, _) = api.upsert(upsert_for("cart-1", c1, Cents::from_dollars(100), "South Africa")).await.unwrap();

    assert!(api.remove("cart-1", item.id).await.unwrap());
    assert!(!api.remove("cart-1", item.id).await.unwrap());
    assert!(api.items("cart-1").await.unwrap().is_empty());
    tear_down(api).await;
}
