use lms_common::Cents;
use log::debug;
use sqlx::SqliteConnection;

use crate::db_types::{Enrollment, NotificationKind, Order, OrderItem, OrderOid};

/// Inserts the order header with zeroed totals. Line items and totals are filled in by the
/// caller as part of the same transaction.
pub async fn insert_order(
    oid: &OrderOid,
    user_id: Option<i64>,
    full_name: &str,
    email: &str,
    country: &str,
    conn: &mut SqliteConnection,
) -> Result<Order, sqlx::Error> {
    let order: Order = sqlx::query_as(
        r#"
        INSERT INTO orders (oid, user_id, full_name, email, country, sub_total, tax_fee, total, initial_total, saved)
        VALUES ($1, $2, $3, $4, $5, 0, 0, 0, 0, 0)
        RETURNING *
        "#,
    )
    .bind(oid)
    .bind(user_id)
    .bind(full_name)
    .bind(email)
    .bind(country)
    .fetch_one(conn)
    .await?;
    debug!("🗃️📦️ Order {} inserted with id {}", order.oid, order.id);
    Ok(order)
}

pub async fn fetch_order_by_oid(oid: &OrderOid, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE oid = $1").bind(oid).fetch_optional(conn).await?;
    Ok(order)
}

pub async fn fetch_order_items(order_id: i64, conn: &mut SqliteConnection) -> Result<Vec<OrderItem>, sqlx::Error> {
    let items = sqlx::query_as("SELECT * FROM order_items WHERE order_id = $1 ORDER BY id ASC")
        .bind(order_id)
        .fetch_all(conn)
        .await?;
    Ok(items)
}

pub async fn order_has_course(order_id: i64, course_id: i64, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items WHERE order_id = $1 AND course_id = $2")
        .bind(order_id)
        .bind(course_id)
        .fetch_one(conn)
        .await?;
    Ok(count > 0)
}

pub async fn insert_order_item(
    order_id: i64,
    course_id: i64,
    teacher_id: i64,
    price: Cents,
    tax_fee: Cents,
    total: Cents,
    conn: &mut SqliteConnection,
) -> Result<OrderItem, sqlx::Error> {
    let item = sqlx::query_as(
        r#"
        INSERT INTO order_items (order_id, course_id, teacher_id, price, tax_fee, total, initial_total, saved, applied_coupon)
        VALUES ($1, $2, $3, $4, $5, $6, $6, 0, 0)
        RETURNING *
        "#,
    )
    .bind(order_id)
    .bind(course_id)
    .bind(teacher_id)
    .bind(price)
    .bind(tax_fee)
    .bind(total)
    .fetch_one(conn)
    .await?;
    Ok(item)
}

/// Writes the accumulated totals onto the order header. `initial_total` records the total
/// before any coupons.
pub async fn set_order_totals(
    order_id: i64,
    sub_total: Cents,
    tax_fee: Cents,
    total: Cents,
    conn: &mut SqliteConnection,
) -> Result<Order, sqlx::Error> {
    let order = sqlx::query_as(
        r#"
        UPDATE orders
        SET sub_total = $1, tax_fee = $2, total = $3, initial_total = $3, updated_at = CURRENT_TIMESTAMP
        WHERE id = $4
        RETURNING *
        "#,
    )
    .bind(sub_total)
    .bind(tax_fee)
    .bind(total)
    .bind(order_id)
    .fetch_one(conn)
    .await?;
    Ok(order)
}

/// Subtracts a coupon discount from the order totals and adds it to the running savings.
pub async fn apply_discount_to_order(
    order_id: i64,
    discount: Cents,
    conn: &mut SqliteConnection,
) -> Result<Order, sqlx::Error> {
    let order = sqlx::query_as(
        r#"
        UPDATE orders
        SET sub_total = sub_total - $1, total = total - $1, saved = saved + $1, updated_at = CURRENT_TIMESTAMP
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(discount)
    .bind(order_id)
    .fetch_one(conn)
    .await?;
    Ok(order)
}

pub async fn set_card_session_id(
    oid: &OrderOid,
    session_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as(
        "UPDATE orders SET card_session_id = $1, updated_at = CURRENT_TIMESTAMP WHERE oid = $2 RETURNING *",
    )
    .bind(session_id)
    .bind(oid)
    .fetch_optional(conn)
    .await?;
    Ok(order)
}

pub async fn mark_order_paid(order_id: i64, conn: &mut SqliteConnection) -> Result<Order, sqlx::Error> {
    let order = sqlx::query_as(
        "UPDATE orders SET payment_status = 'Paid', updated_at = CURRENT_TIMESTAMP WHERE id = $1 RETURNING *",
    )
    .bind(order_id)
    .fetch_one(conn)
    .await?;
    Ok(order)
}

pub async fn insert_enrollment(
    enrollment_id: &str,
    user_id: i64,
    course_id: i64,
    teacher_id: i64,
    order_item_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Enrollment, sqlx::Error> {
    let enrollment: Enrollment = sqlx::query_as(
        r#"
        INSERT INTO enrollments (enrollment_id, user_id, course_id, teacher_id, order_item_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(enrollment_id)
    .bind(user_id)
    .bind(course_id)
    .bind(teacher_id)
    .bind(order_item_id)
    .fetch_one(conn)
    .await?;
    debug!("🗃️🎓️ Enrollment [{}] created for user #{user_id} on course #{course_id}", enrollment.enrollment_id);
    Ok(enrollment)
}

pub async fn insert_notification(
    kind: NotificationKind,
    user_id: Option<i64>,
    teacher_id: Option<i64>,
    order_id: i64,
    order_item_id: Option<i64>,
    conn: &mut SqliteConnection,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO notifications (user_id, teacher_id, order_id, order_item_id, kind) VALUES ($1, $2, $3, $4, $5)")
        .bind(user_id)
        .bind(teacher_id)
        .bind(order_id)
        .bind(order_item_id)
        .bind(kind)
        .execute(conn)
        .await?;
    Ok(())
}
