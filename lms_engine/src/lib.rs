//! LMS Engine
//!
//! The engine hosts the core logic of the course marketplace backend: the shopping cart,
//! checkout, coupon and payment-confirmation flows, plus the student learning records (lesson
//! completion, notes, reviews and course Q&A). It is HTTP-framework agnostic.
//!
//! The library is divided into two main sections:
//! 1. Database management and control ([`mod@sqlite`]). SQLite is the supported backend. You
//!    should never need to access the database directly. Instead, use the public API provided by
//!    the engine. The exception is the data types used in the database. These are defined in the
//!    `db_types` module and are public.
//! 2. The engine public API ([`mod@api`]). This provides the public-facing functionality: the
//!    catalog reader, cart manager, order/coupon/payment flow, and student records. Specific
//!    backends need to implement the traits in the [`mod@traits`] module in order to act as a
//!    backend for the marketplace server.
//!
//! The engine also provides a set of events that can be subscribed to. When an order transitions
//! to `Paid`, an [`events::OrderPaidEvent`] is emitted. A simple actor framework is used so that
//! you can easily hook into these events and perform custom actions (email receipts, analytics).
pub mod api;
pub mod db_types;
pub mod events;
pub mod helpers;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;

pub use api::{
    cart_objects::{CartStats, CartUpsert, TaxPolicy},
    catalog_api::CatalogApi,
    cart_api::CartApi,
    errors::{CartApiError, CatalogApiError, OrderFlowError, StudentApiError},
    order_flow_api::OrderFlowApi,
    order_objects::{CheckoutView, CouponApplication, CouponOutcome, NewOrderRequest, PaymentConfirmation},
    student_api::StudentApi,
};
