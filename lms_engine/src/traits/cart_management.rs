use thiserror::Error;

use crate::{
    db_types::{CartItem, NewCartItem},
    traits::CatalogApiError,
};

/// Per-session shopping cart lines.
///
/// A cart is identified by a client-generated `cart_id` string. Lines are keyed by
/// (cart_id, course_id): upserting the same course into the same cart twice must update the
/// existing row, never create a second one.
#[allow(async_fn_in_trait)]
pub trait CartManagement: Clone {
    /// Update-or-create the cart line for (cart_id, course_id). Returns the stored line and
    /// `true` if a new row was created, `false` if an existing one was updated.
    async fn upsert_cart_item(&self, item: NewCartItem) -> Result<(CartItem, bool), CartApiError>;

    /// All lines for the cart, oldest first.
    async fn fetch_cart_items(&self, cart_id: &str) -> Result<Vec<CartItem>, CartApiError>;

    /// Deletes one line from the cart. Returns `false` if no such line existed.
    async fn delete_cart_item(&self, cart_id: &str, item_id: i64) -> Result<bool, CartApiError>;
}

#[derive(Debug, Clone, Error)]
pub enum CartApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Course {0} does not exist")]
    CourseNotFound(i64),
    #[error("Country '{0}' is not in the tax directory")]
    UnknownCountry(String),
    #[error("The cart item was not found")]
    ItemNotFound,
}

impl From<sqlx::Error> for CartApiError {
    fn from(e: sqlx::Error) -> Self {
        CartApiError::DatabaseError(e.to_string())
    }
}

impl From<CatalogApiError> for CartApiError {
    fn from(e: CatalogApiError) -> Self {
        match e {
            CatalogApiError::DatabaseError(msg) => CartApiError::DatabaseError(msg),
        }
    }
}
