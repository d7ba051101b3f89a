//! The error types of the engine API surface, one enum per API concern.
pub use crate::traits::{CartApiError, CatalogApiError, OrderFlowError, StudentApiError};
