//! # Database management and control.
//!
//! This module provides the interfaces that define the contracts of the marketplace database
//! *backends*.
//!
//! ## Traits
//! * [`CatalogManagement`] — read-only access to the published course catalog, categories and the
//!   country/tax directory.
//! * [`CartManagement`] — per-session cart lines keyed by (cart_id, course).
//! * [`CheckoutDatabase`] — the order/coupon/payment-confirmation flow. This is the highest level
//!   of behaviour backends need to expose, and the only part of the system with non-trivial
//!   invariants (monetary totals, idempotent payment confirmation, single coupon application per
//!   line).
//! * [`StudentRecords`] — learning records: enrollments, lesson completion, notes, reviews,
//!   wishlists and course Q&A threads, all keyed by user + course.
mod cart_management;
mod catalog_management;
mod checkout_database;
mod data_objects;
mod student_records;

pub use cart_management::{CartApiError, CartManagement};
pub use catalog_management::{CatalogApiError, CatalogManagement};
pub use checkout_database::{CheckoutDatabase, OrderFlowError};
pub use data_objects::{StudentSummary, ToggleOutcome};
pub use student_records::{StudentApiError, StudentRecords};
