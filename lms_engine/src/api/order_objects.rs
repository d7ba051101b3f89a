use lms_common::Cents;
use serde::{Deserialize, Serialize};

use crate::db_types::{Enrollment, Order, OrderItem};

/// Everything the server collects on the checkout page before an order is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderRequest {
    pub full_name: String,
    pub email: String,
    pub country: String,
    pub cart_id: String,
    /// Zero for guest checkouts.
    #[serde(default)]
    pub user_id: i64,
}

impl NewOrderRequest {
    pub fn is_guest(&self) -> bool {
        self.user_id == 0
    }
}

/// An order together with its line items, as displayed on the checkout page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutView {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Request payload for applying a coupon code to an open order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponApplication {
    pub order_oid: String,
    pub coupon_code: String,
}

/// Result of a coupon application attempt against an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CouponOutcome {
    /// The coupon was applied to at least one line item. The order totals reflect the discount.
    Applied { order: Order, discount: Cents },
    /// Every eligible line item already carried this coupon, so nothing changed.
    AlreadyApplied { order: Order },
}

impl CouponOutcome {
    pub fn order(&self) -> &Order {
        match self {
            CouponOutcome::Applied { order, .. } => order,
            CouponOutcome::AlreadyApplied { order } => order,
        }
    }
}

/// Result of confirming payment for an order.
///
/// `newly_paid` is false when the order had already been marked paid by an earlier
/// confirmation call, in which case `enrollments` is empty and no notifications were raised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub order: Order,
    pub newly_paid: bool,
    pub enrollments: Vec<Enrollment>,
}
