use thiserror::Error;

use crate::{
    api::order_objects::{CouponOutcome, NewOrderRequest, PaymentConfirmation},
    db_types::{Coupon, Order, OrderItem, OrderOid},
};

/// The order/coupon/payment-confirmation flow.
///
/// This is the only part of the system that carries real invariants:
/// * Order totals are derived from the persisted line items, with at most one line item per
///   course per order (duplicate cart lines are collapsed).
/// * A coupon is applied to a given line item at most once, tracked through the line's coupon
///   membership set.
/// * Confirming payment on an order that is already `Paid` is a no-op: no enrollment or
///   notification records may ever be duplicated.
///
/// Each method that performs multiple writes must do so in a single atomic transaction.
#[allow(async_fn_in_trait)]
pub trait CheckoutDatabase: Clone {
    /// Converts the cart into a persisted order. Cart lines referencing a course that is already
    /// present among the order's line items are skipped. Totals (sub_total, tax_fee, total,
    /// initial_total) are accumulated from the line items actually persisted.
    ///
    /// Fails with [`OrderFlowError::CartEmpty`] when the cart has no lines.
    async fn create_order_from_cart(&self, req: NewOrderRequest) -> Result<Order, OrderFlowError>;

    async fn fetch_order_by_oid(&self, oid: &OrderOid) -> Result<Option<Order>, OrderFlowError>;

    async fn fetch_order_items(&self, order_id: i64) -> Result<Vec<OrderItem>, OrderFlowError>;

    async fn fetch_coupon_by_code(&self, code: &str) -> Result<Option<Coupon>, OrderFlowError>;

    /// Applies the coupon to every line item belonging to the coupon's teacher that does not
    /// already carry it, propagating the discount into the order totals and recording the
    /// student as a user of the coupon.
    ///
    /// Returns [`CouponOutcome::AlreadyApplied`] when the teacher's lines all carry the coupon
    /// already; nothing is mutated in that case.
    async fn apply_coupon_to_order(&self, oid: &OrderOid, code: &str) -> Result<CouponOutcome, OrderFlowError>;

    /// Records the card provider's checkout session id against the order.
    async fn set_card_session_id(&self, oid: &OrderOid, session_id: &str) -> Result<Order, OrderFlowError>;

    /// Transitions the order to `Paid`, creating the enrollment-completed notification for the
    /// student and, per line item, a new-order notification for the teacher and an enrollment
    /// record. If the order is already `Paid` this returns with `newly_paid == false` and
    /// performs no writes.
    async fn confirm_order_paid(&self, oid: &OrderOid) -> Result<PaymentConfirmation, OrderFlowError>;
}

#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Cart '{0}' has no items")]
    CartEmpty(String),
    #[error("Order {0} does not exist")]
    OrderNotFound(OrderOid),
    #[error("Coupon '{0}' does not exist")]
    CouponNotFound(String),
    #[error("Coupon '{0}' does not apply to any item in this order")]
    CouponNotApplicable(String),
    #[error("Order {0} has no student associated with it")]
    GuestOrder(OrderOid),
}

impl From<sqlx::Error> for OrderFlowError {
    fn from(e: sqlx::Error) -> Self {
        OrderFlowError::DatabaseError(e.to_string())
    }
}
