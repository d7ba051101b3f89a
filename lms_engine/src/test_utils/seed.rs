//! Seed data for integration tests. Inserts rows directly so tests do not depend on the very
//! code paths they are exercising.
use lms_common::Cents;

use crate::SqliteDatabase;

pub async fn seed_country(db: &SqliteDatabase, name: &str, tax_rate: f64) -> i64 {
    sqlx::query_scalar("INSERT INTO countries (name, tax_rate, active) VALUES ($1, $2, 1) RETURNING id")
        .bind(name)
        .bind(tax_rate)
        .fetch_one(db.pool())
        .await
        .expect("Error seeding country")
}

pub async fn seed_category(db: &SqliteDatabase, title: &str, slug: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO categories (title, slug, active) VALUES ($1, $2, 1) RETURNING id")
        .bind(title)
        .bind(slug)
        .fetch_one(db.pool())
        .await
        .expect("Error seeding category")
}

pub async fn seed_course(db: &SqliteDatabase, teacher_id: i64, title: &str, slug: &str, price: Cents) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO courses (teacher_id, title, slug, description, price, platform_status, teacher_course_status)
        VALUES ($1, $2, $3, '', $4, 'Published', 'Published')
        RETURNING id
        "#,
    )
    .bind(teacher_id)
    .bind(title)
    .bind(slug)
    .bind(price)
    .fetch_one(db.pool())
    .await
    .expect("Error seeding course")
}

pub async fn seed_draft_course(db: &SqliteDatabase, teacher_id: i64, title: &str, slug: &str) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO courses (teacher_id, title, slug, description, price, platform_status, teacher_course_status)
        VALUES ($1, $2, $3, '', 0, 'Draft', 'Published')
        RETURNING id
        "#,
    )
    .bind(teacher_id)
    .bind(title)
    .bind(slug)
    .fetch_one(db.pool())
    .await
    .expect("Error seeding course")
}

pub async fn seed_lesson(db: &SqliteDatabase, course_id: i64, title: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO lessons (course_id, title, duration_secs) VALUES ($1, $2, 300) RETURNING id")
        .bind(course_id)
        .bind(title)
        .fetch_one(db.pool())
        .await
        .expect("Error seeding lesson")
}

pub async fn seed_coupon(db: &SqliteDatabase, teacher_id: i64, code: &str, discount_percent: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO coupons (teacher_id, code, discount_percent, active) VALUES ($1, $2, $3, 1) RETURNING id",
    )
    .bind(teacher_id)
    .bind(code)
    .bind(discount_percent)
    .fetch_one(db.pool())
    .await
    .expect("Error seeding coupon")
}
