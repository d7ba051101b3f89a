use log::*;

use crate::{
    api::cart_objects::{CartStats, CartUpsert, TaxPolicy},
    db_types::{CartItem, NewCartItem},
    traits::{CartApiError, CartManagement, CatalogManagement},
};

/// `CartApi` manages anonymous shopping carts. Carts are keyed by a client-generated
/// `cart_id` string, so the flow works identically for guests and signed-in students.
#[derive(Debug, Clone)]
pub struct CartApi<B> {
    db: B,
    tax_policy: TaxPolicy,
}

impl<B> CartApi<B> {
    pub fn new(db: B, tax_policy: TaxPolicy) -> Self {
        Self { db, tax_policy }
    }
}

impl<B> CartApi<B>
where B: CartManagement + CatalogManagement
{
    /// Adds a course to a cart, or refreshes the existing line if the course is already
    /// in the cart. Returns the stored line along with a flag indicating whether it was
    /// newly created.
    ///
    /// The tax fee is derived from the country's tax rate; countries missing from the tax
    /// directory are resolved according to the configured [`TaxPolicy`].
    pub async fn upsert(&self, upsert: CartUpsert) -> Result<(CartItem, bool), CartApiError> {
        let course = self
            .db
            .fetch_course_by_id(upsert.course_id)
            .await?
            .ok_or(CartApiError::CourseNotFound(upsert.course_id))?;
        let (country, rate) = self.resolve_tax_rate(&upsert.country).await?;
        let tax_fee = upsert.price.percent(rate);
        let item = NewCartItem {
            cart_id: upsert.cart_id,
            course_id: course.id,
            user_id: upsert.user_id,
            price: upsert.price,
            tax_fee,
            total: upsert.price + tax_fee,
            country,
        };
        let (item, created) = self.db.upsert_cart_item(item).await?;
        let verb = if created { "added to" } else { "updated in" };
        debug!("🛒️ Course #{} {verb} cart {}. Line total is {}", course.id, item.cart_id, item.total);
        Ok((item, created))
    }

    pub async fn items(&self, cart_id: &str) -> Result<Vec<CartItem>, CartApiError> {
        self.db.fetch_cart_items(cart_id).await
    }

    /// Removes a single line from the cart. Returns false if no such line existed.
    pub async fn remove(&self, cart_id: &str, item_id: i64) -> Result<bool, CartApiError> {
        let deleted = self.db.delete_cart_item(cart_id, item_id).await?;
        if deleted {
            debug!("🛒️ Item #{item_id} removed from cart {cart_id}");
        }
        Ok(deleted)
    }

    /// Price, tax and total sums over the cart, plus the item count.
    pub async fn stats(&self, cart_id: &str) -> Result<CartStats, CartApiError> {
        let items = self.db.fetch_cart_items(cart_id).await?;
        let stats = CartStats {
            price: items.iter().map(|i| i.price).sum(),
            tax: items.iter().map(|i| i.tax_fee).sum(),
            total: items.iter().map(|i| i.total).sum(),
            items_count: items.len(),
        };
        Ok(stats)
    }

    async fn resolve_tax_rate(&self, country: &str) -> Result<(String, f64), CartApiError> {
        if let Some(c) = self.db.fetch_country_by_name(country).await? {
            return Ok((c.name, c.tax_rate));
        }
        match &self.tax_policy {
            TaxPolicy::DefaultRate { country: fallback, rate } => {
                debug!("🛒️ Country '{country}' is not in the tax directory. Using {fallback} at {rate}%");
                Ok((fallback.clone(), *rate))
            },
            TaxPolicy::Reject => Err(CartApiError::UnknownCountry(country.to_string())),
        }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
