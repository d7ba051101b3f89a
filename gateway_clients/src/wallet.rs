use std::sync::Arc;

use log::*;
use reqwest::Client;

use crate::{config::WalletGatewayConfig, data_objects::AccessToken, GatewayError, WalletOrder};

/// Client for the wallet provider's order API.
///
/// Every call first exchanges the client credentials for a short-lived bearer token. Tokens
/// are not cached between calls.
#[derive(Clone)]
pub struct WalletGatewayApi {
    config: WalletGatewayConfig,
    client: Arc<Client>,
}

impl WalletGatewayApi {
    pub fn new(config: WalletGatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder().build().map_err(|e| GatewayError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    /// Queries the status of a provider-side order. `COMPLETED` means the shopper paid.
    pub async fn fetch_order(&self, wallet_order_id: &str) -> Result<WalletOrder, GatewayError> {
        let token = self.fetch_access_token().await?;
        let url = format!("{}/v2/checkout/orders/{wallet_order_id}", self.config.api_base);
        debug!("Fetching wallet order [{wallet_order_id}]");
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| GatewayError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            let order = response.json::<WalletOrder>().await.map_err(|e| GatewayError::JsonError(e.to_string()))?;
            info!("Wallet order [{wallet_order_id}] has status {}", order.status);
            Ok(order)
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| GatewayError::RestResponseError(e.to_string()))?;
            Err(GatewayError::QueryError { status, message })
        }
    }

    /// OAuth2 client-credentials exchange.
    async fn fetch_access_token(&self) -> Result<String, GatewayError> {
        let url = format!("{}/v1/oauth2/token", self.config.api_base);
        trace!("Exchanging client credentials for an access token");
        let response = self
            .client
            .post(url)
            .basic_auth(&self.config.client_id, Some(self.config.client_secret.reveal()))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| GatewayError::TokenExchange(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::TokenExchange(format!("Error {status}. {message}")));
        }
        let token = response.json::<AccessToken>().await.map_err(|e| GatewayError::JsonError(e.to_string()))?;
        Ok(token.access_token)
    }
}
