use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::CardGatewayConfig,
    data_objects::{CheckoutSession, NewCheckoutSession},
    GatewayError,
};

/// Client for the card provider's hosted checkout API.
#[derive(Clone)]
pub struct CardGatewayApi {
    config: CardGatewayConfig,
    client: Arc<Client>,
}

impl CardGatewayApi {
    pub fn new(config: CardGatewayConfig) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::with_capacity(2);
        let val = HeaderValue::from_str(&format!("Bearer {}", config.secret_key.reveal()))
            .map_err(|e| GatewayError::Initialization(e.to_string()))?;
        headers.insert("Authorization", val);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GatewayError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn success_url(&self) -> &str {
        &self.config.success_url
    }

    pub fn cancel_url(&self) -> &str {
        &self.config.cancel_url
    }

    /// Creates a hosted checkout session. The caller stores the returned session id against the
    /// order and redirects the shopper to the session url.
    pub async fn create_session(&self, session: NewCheckoutSession) -> Result<CheckoutSession, GatewayError> {
        debug!("Creating checkout session for order {}", session.reference);
        let result: CheckoutSession =
            self.rest_query(Method::POST, "/v1/checkout/sessions", Some(session)).await?;
        info!("Checkout session [{}] created", result.id);
        Ok(result)
    }

    /// Retrieves a previously created session so its `payment_status` can be inspected.
    pub async fn fetch_session(&self, session_id: &str) -> Result<CheckoutSession, GatewayError> {
        let path = format!("/v1/checkout/sessions/{session_id}");
        debug!("Fetching checkout session [{session_id}]");
        self.rest_query::<CheckoutSession, ()>(Method::GET, &path, None).await
    }

    async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> Result<T, GatewayError> {
        let url = format!("{}{path}", self.config.api_base);
        trace!("Sending REST query: {url}");
        let mut req = self.client.request(method, url);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| GatewayError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| GatewayError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| GatewayError::RestResponseError(e.to_string()))?;
            Err(GatewayError::QueryError { status, message })
        }
    }
}
