use std::fmt::Debug;

use log::*;

use crate::{
    api::order_objects::{CheckoutView, CouponApplication, CouponOutcome, NewOrderRequest, PaymentConfirmation},
    db_types::{Order, OrderOid},
    events::{EventProducers, NewOrderEvent, OrderPaidEvent},
    traits::{CheckoutDatabase, OrderFlowError},
};

/// `OrderFlowApi` is the primary API for the purchase flow: building an order from a cart,
/// applying coupons, and confirming payment with idempotent enrollment fan-out.
pub struct OrderFlowApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }
}

impl<B> OrderFlowApi<B>
where B: CheckoutDatabase
{
    /// Builds a new order from the given cart.
    ///
    /// Cart lines are copied into order items with a course appearing at most once per
    /// order; totals are accumulated from the persisted items. The cart itself is left
    /// untouched so the shopper can retry checkout if payment fails.
    pub async fn create_order(&self, request: NewOrderRequest) -> Result<Order, OrderFlowError> {
        let cart_id = request.cart_id.clone();
        let order = self.db.create_order_from_cart(request).await?;
        debug!("🔄️📦️ Order {} created from cart {cart_id}. Total is {}", order.oid, order.total);
        self.call_new_order_hook(&order).await;
        Ok(order)
    }

    /// Fetches an order and its line items for the checkout page.
    pub async fn checkout_view(&self, oid: &OrderOid) -> Result<CheckoutView, OrderFlowError> {
        let order = self.db.fetch_order_by_oid(oid).await?.ok_or_else(|| OrderFlowError::OrderNotFound(oid.clone()))?;
        let items = self.db.fetch_order_items(order.id).await?;
        Ok(CheckoutView { order, items })
    }

    /// Applies a coupon code to every eligible line item of an open order.
    ///
    /// The coupon must exist and must belong to a teacher with at least one item in the
    /// order. Lines that already carry the coupon are skipped; if every eligible line
    /// already carries it, nothing is mutated and [`CouponOutcome::AlreadyApplied`] is
    /// returned.
    pub async fn apply_coupon(&self, application: CouponApplication) -> Result<CouponOutcome, OrderFlowError> {
        let oid = OrderOid(application.order_oid);
        let code = application.coupon_code.trim().to_string();
        let outcome = self.db.apply_coupon_to_order(&oid, &code).await?;
        match &outcome {
            CouponOutcome::Applied { order, discount } => {
                debug!("🔄️🏷️ Coupon '{code}' took {discount} off order {}. New total is {}", oid, order.total);
            },
            CouponOutcome::AlreadyApplied { .. } => {
                debug!("🔄️🏷️ Coupon '{code}' was already applied to order {oid}. Nothing to do");
            },
        }
        Ok(outcome)
    }

    /// Records the hosted checkout session id issued by the card provider against the order.
    pub async fn attach_card_session(&self, oid: &OrderOid, session_id: &str) -> Result<Order, OrderFlowError> {
        let order = self.db.set_card_session_id(oid, session_id).await?;
        trace!("🔄️💳️ Card session attached to order {oid}");
        Ok(order)
    }

    pub async fn fetch_order(&self, oid: &OrderOid) -> Result<Option<Order>, OrderFlowError> {
        self.db.fetch_order_by_oid(oid).await
    }

    /// Marks an order as paid and fans out enrollments and notifications.
    ///
    /// The caller is responsible for having verified payment with the provider first. The
    /// operation is idempotent: confirming an already-paid order reports `newly_paid =
    /// false`, creates nothing, and fires no events.
    pub async fn confirm_payment(&self, oid: &OrderOid) -> Result<PaymentConfirmation, OrderFlowError> {
        let confirmation = self.db.confirm_order_paid(oid).await?;
        if confirmation.newly_paid {
            debug!(
                "🔄️✅️ Order {oid} marked as paid. {} enrollments created",
                confirmation.enrollments.len()
            );
            self.call_order_paid_hook(&confirmation).await;
        } else {
            debug!("🔄️✅️ Order {oid} was already paid. Skipping fulfilment");
        }
        Ok(confirmation)
    }

    async fn call_new_order_hook(&self, order: &Order) {
        for emitter in &self.producers.new_order_producer {
            debug!("🔄️📦️ Notifying new order hook subscribers");
            emitter.publish_event(NewOrderEvent::new(order.clone())).await;
        }
    }

    async fn call_order_paid_hook(&self, confirmation: &PaymentConfirmation) {
        for emitter in &self.producers.order_paid_producer {
            debug!("🔄️📦️ Notifying order paid hook subscribers");
            let event = OrderPaidEvent {
                order: confirmation.order.clone(),
                enrollments: confirmation.enrollments.clone(),
            };
            emitter.publish_event(event).await;
        }
    }

    pub fn db(&self) -> &B {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut B {
        &mut self.db
    }
}
