//! # Course marketplace server
//!
//! This module hosts the REST server for the course marketplace. It is responsible for:
//! * serving the public course catalog (categories, listings, search),
//! * managing anonymous shopping carts and building orders from them,
//! * applying coupons and confirming payments with the card and wallet providers,
//! * and exposing the student learning records (progress, notes, reviews, wishlist, Q&A).
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more
//! information.

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
