use lms_common::Cents;
use serde::{Deserialize, Serialize};

/// What to do when the shopper's country is not in the tax directory.
///
/// The original platform silently fell back to "United States" at 0% tax; that is now an
/// explicit configuration choice rather than hard-wired behaviour.
#[derive(Debug, Clone, PartialEq)]
pub enum TaxPolicy {
    /// Unknown countries resolve to the named country at the given percentage rate.
    DefaultRate { country: String, rate: f64 },
    /// Unknown countries are rejected as a validation error.
    Reject,
}

impl Default for TaxPolicy {
    fn default() -> Self {
        TaxPolicy::DefaultRate { country: "United States".to_string(), rate: 0.0 }
    }
}

/// Request payload for the cart upsert operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartUpsert {
    pub cart_id: String,
    pub course_id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Price in integer cents.
    pub price: Cents,
    pub country: String,
}

/// Aggregate view over one cart, used by the checkout page header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartStats {
    pub price: Cents,
    pub tax: Cents,
    pub total: Cents,
    pub items_count: usize,
}
