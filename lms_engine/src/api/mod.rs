//! The engine's public API layer.
//!
//! One thin API struct per concern, each generic over the backend trait it needs. The HTTP
//! server holds these in actix `web::Data` and never touches the database directly.
pub mod cart_api;
pub mod cart_objects;
pub mod catalog_api;
pub mod errors;
pub mod order_flow_api;
pub mod order_objects;
pub mod student_api;
