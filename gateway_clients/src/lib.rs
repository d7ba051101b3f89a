//! HTTP clients for the two payment providers the marketplace integrates with.
//!
//! * The **card** provider offers a hosted checkout page: we create a session for the order
//!   total and later retrieve it to confirm that the shopper actually paid.
//! * The **wallet** provider uses an OAuth2 client-credentials flow: we exchange our client id
//!   and secret for a bearer token, then query the provider-side order status.
//!
//! Neither client holds any global state; credentials live in explicit config structs.
mod card;
mod config;
mod data_objects;
mod error;
mod wallet;

pub use card::CardGatewayApi;
pub use config::{CardGatewayConfig, WalletGatewayConfig};
pub use data_objects::{CheckoutSession, NewCheckoutSession, WalletOrder};
pub use error::GatewayError;
pub use wallet::WalletGatewayApi;
