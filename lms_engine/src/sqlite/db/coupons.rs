use lms_common::Cents;
use log::debug;
use sqlx::SqliteConnection;

use crate::db_types::{Coupon, OrderItem};

pub async fn fetch_coupon_by_code(code: &str, conn: &mut SqliteConnection) -> Result<Option<Coupon>, sqlx::Error> {
    let coupon = sqlx::query_as("SELECT * FROM coupons WHERE code = $1 AND active = 1")
        .bind(code)
        .fetch_optional(conn)
        .await?;
    Ok(coupon)
}

/// The order's line items belonging to the coupon's teacher. These are the only lines a
/// coupon can ever discount.
pub async fn fetch_items_for_teacher(
    order_id: i64,
    teacher_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<OrderItem>, sqlx::Error> {
    let items = sqlx::query_as("SELECT * FROM order_items WHERE order_id = $1 AND teacher_id = $2 ORDER BY id ASC")
        .bind(order_id)
        .bind(teacher_id)
        .fetch_all(conn)
        .await?;
    Ok(items)
}

pub async fn item_has_coupon(
    order_item_id: i64,
    coupon_id: i64,
    conn: &mut SqliteConnection,
) -> Result<bool, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM order_item_coupons WHERE order_item_id = $1 AND coupon_id = $2")
            .bind(order_item_id)
            .bind(coupon_id)
            .fetch_one(conn)
            .await?;
    Ok(count > 0)
}

/// Applies `discount` to a single line item and records the coupon membership so that the
/// same coupon can never hit the same line twice.
pub async fn apply_coupon_to_item(
    order_item_id: i64,
    coupon_id: i64,
    discount: Cents,
    conn: &mut SqliteConnection,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE order_items
        SET price = price - $1, total = total - $1, saved = saved + $1, applied_coupon = 1
        WHERE id = $2
        "#,
    )
    .bind(discount)
    .bind(order_item_id)
    .execute(&mut *conn)
    .await?;
    sqlx::query("INSERT INTO order_item_coupons (order_item_id, coupon_id) VALUES ($1, $2)")
        .bind(order_item_id)
        .bind(coupon_id)
        .execute(conn)
        .await?;
    debug!("🗃️🏷️ Coupon #{coupon_id} took {discount} off order item #{order_item_id}");
    Ok(())
}

pub async fn record_coupon_user(coupon_id: i64, user_id: i64, conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT OR IGNORE INTO coupon_users (coupon_id, user_id) VALUES ($1, $2)")
        .bind(coupon_id)
        .bind(user_id)
        .execute(conn)
        .await?;
    Ok(())
}
