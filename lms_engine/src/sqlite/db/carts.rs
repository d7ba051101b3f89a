use log::debug;
use sqlx::SqliteConnection;

use crate::db_types::{CartItem, NewCartItem};

/// Update-or-create the line for (cart_id, course_id). The second element of the result is
/// `true` when a new row was created.
///
/// The write is a single statement, so two concurrent adds of the same course land on the
/// conflict clause instead of tripping the UNIQUE constraint.
pub async fn upsert_cart_item(
    item: NewCartItem,
    conn: &mut SqliteConnection,
) -> Result<(CartItem, bool), sqlx::Error> {
    let created = fetch_cart_item_for_course(&item.cart_id, item.course_id, &mut *conn).await?.is_none();
    let line: CartItem = sqlx::query_as(
        r#"
        INSERT INTO cart_items (cart_id, course_id, user_id, price, tax_fee, total, country)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (cart_id, course_id) DO UPDATE
        SET user_id = excluded.user_id, price = excluded.price, tax_fee = excluded.tax_fee,
            total = excluded.total, country = excluded.country, updated_at = CURRENT_TIMESTAMP
        RETURNING *
        "#,
    )
    .bind(item.cart_id)
    .bind(item.course_id)
    .bind(item.user_id)
    .bind(item.price)
    .bind(item.tax_fee)
    .bind(item.total)
    .bind(item.country)
    .fetch_one(conn)
    .await?;
    if created {
        debug!("🗃️🛒️ New cart line inserted with id {}", line.id);
    }
    Ok((line, created))
}

pub async fn fetch_cart_item_for_course(
    cart_id: &str,
    course_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<CartItem>, sqlx::Error> {
    let item = sqlx::query_as("SELECT * FROM cart_items WHERE cart_id = $1 AND course_id = $2")
        .bind(cart_id)
        .bind(course_id)
        .fetch_optional(conn)
        .await?;
    Ok(item)
}

pub async fn fetch_cart_items(cart_id: &str, conn: &mut SqliteConnection) -> Result<Vec<CartItem>, sqlx::Error> {
    let items = sqlx::query_as("SELECT * FROM cart_items WHERE cart_id = $1 ORDER BY created_at ASC, id ASC")
        .bind(cart_id)
        .fetch_all(conn)
        .await?;
    Ok(items)
}

/// Returns `true` if a row was deleted.
pub async fn delete_cart_item(cart_id: &str, item_id: i64, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND id = $2")
        .bind(cart_id)
        .bind(item_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}
