use serde::{Deserialize, Serialize};

use crate::db_types::{Enrollment, Order};

/// Emitted once when an order transitions from `Processing` to `Paid`. Re-confirming an already
/// paid order does not emit this event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPaidEvent {
    pub order: Order,
    pub enrollments: Vec<Enrollment>,
}

impl OrderPaidEvent {
    pub fn new(order: Order, enrollments: Vec<Enrollment>) -> Self {
        Self { order, enrollments }
    }
}

/// Emitted when a new order has been built from a cart and is waiting for payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderEvent {
    pub order: Order,
}

impl NewOrderEvent {
    pub fn new(order: Order) -> Self {
        Self { order }
    }
}
