use lms_common::Cents;
use serde::{Deserialize, Serialize};

/// Request body for creating a hosted checkout session with the card provider.
#[derive(Debug, Clone, Serialize)]
pub struct NewCheckoutSession {
    /// Our public order id, echoed back by the provider.
    pub reference: String,
    pub customer_email: String,
    /// Amount in the currency's minor unit.
    pub amount: i64,
    pub currency: String,
    pub success_url: String,
    pub cancel_url: String,
}

impl NewCheckoutSession {
    pub fn for_order(oid: &str, email: &str, total: Cents, currency: &str, success_url: &str, cancel_url: &str) -> Self {
        Self {
            reference: oid.to_string(),
            customer_email: email.to_string(),
            amount: total.value(),
            currency: currency.to_string(),
            success_url: success_url.to_string(),
            cancel_url: cancel_url.to_string(),
        }
    }
}

/// A hosted checkout session as returned by the card provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    /// Where to redirect the shopper to complete payment.
    pub url: String,
    pub payment_status: String,
}

impl CheckoutSession {
    pub fn is_paid(&self) -> bool {
        self.payment_status == "paid"
    }
}

/// A provider-side order as returned by the wallet provider's order query endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletOrder {
    pub id: String,
    pub status: String,
}

impl WalletOrder {
    pub fn is_completed(&self) -> bool {
        self.status == "COMPLETED"
    }
}

/// Response body of the wallet provider's client-credentials token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AccessToken {
    pub access_token: String,
}
