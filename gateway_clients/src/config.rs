use lms_common::Secret;
use log::*;

#[derive(Debug, Clone, Default)]
pub struct CardGatewayConfig {
    pub api_base: String,
    pub secret_key: Secret<String>,
    pub success_url: String,
    pub cancel_url: String,
}

impl CardGatewayConfig {
    pub fn new_from_env_or_default() -> Self {
        let api_base = std::env::var("LMS_CARD_API_BASE").unwrap_or_else(|_| {
            warn!("LMS_CARD_API_BASE not set, using (probably useless) default");
            "https://api.cardprovider.example.com".to_string()
        });
        let secret_key = Secret::new(std::env::var("LMS_CARD_SECRET_KEY").unwrap_or_else(|_| {
            warn!("LMS_CARD_SECRET_KEY not set, using (probably useless) default");
            "sk_test_00000000000000".to_string()
        }));
        let success_url = std::env::var("LMS_CARD_SUCCESS_URL").unwrap_or_else(|_| {
            warn!("LMS_CARD_SUCCESS_URL not set, using default");
            "http://localhost:3000/payment-success".to_string()
        });
        let cancel_url = std::env::var("LMS_CARD_CANCEL_URL").unwrap_or_else(|_| {
            warn!("LMS_CARD_CANCEL_URL not set, using default");
            "http://localhost:3000/payment-failed".to_string()
        });
        Self { api_base, secret_key, success_url, cancel_url }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WalletGatewayConfig {
    pub api_base: String,
    pub client_id: String,
    pub client_secret: Secret<String>,
}

impl WalletGatewayConfig {
    pub fn new_from_env_or_default() -> Self {
        let api_base = std::env::var("LMS_WALLET_API_BASE").unwrap_or_else(|_| {
            warn!("LMS_WALLET_API_BASE not set, using the provider sandbox");
            "https://api.sandbox.walletprovider.example.com".to_string()
        });
        let client_id = std::env::var("LMS_WALLET_CLIENT_ID").unwrap_or_else(|_| {
            warn!("LMS_WALLET_CLIENT_ID not set, using (probably useless) default");
            "client-id".to_string()
        });
        let client_secret = Secret::new(std::env::var("LMS_WALLET_CLIENT_SECRET").unwrap_or_else(|_| {
            warn!("LMS_WALLET_CLIENT_SECRET not set, using (probably useless) default");
            "client-secret".to_string()
        }));
        Self { api_base, client_id, client_secret }
    }
}
