//! Order-creation endpoint.
//!
//! One request per checkout. There is no retry here: a failed submission is
//! reported back and the user decides whether to try again.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info, instrument};

use crate::config::DashboardConfig;
use crate::domain::CheckoutRequest;
use crate::error::GatewayError;

pub const CREATE_ORDER_PATH: &str = "/orders/create";

/// Seam between the checkout pipeline and the backend order API.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Submits the order. `Ok` means the backend answered with a 2xx status.
    async fn create_order(&self, request: &CheckoutRequest) -> Result<(), GatewayError>;
}

/// [`OrderGateway`] backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpOrderGateway {
    client: Client,
    endpoint: String,
    bearer_token: Option<String>,
}

impl HttpOrderGateway {
    pub fn new(api_base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: create_order_url(api_base_url),
            bearer_token: None,
        })
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, GatewayError> {
        let gateway = Self::new(&config.api_base_url, config.http_timeout)?;
        Ok(match &config.api_token {
            Some(token) => gateway.with_bearer_token(token.clone()),
            None => gateway,
        })
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
    #[instrument(
        fields(customer_id = %request.customer_id, sub_orders = request.sub_orders.len()),
        skip(self, request)
    )]
    async fn create_order(&self, request: &CheckoutRequest) -> Result<(), GatewayError> {
        debug!(endpoint = %self.endpoint, "Submitting order");

        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            error!(error = %e, "Order request failed");
            GatewayError::Transport(e)
        })?;

        let status = response.status();
        if status.is_success() {
            info!(status = status.as_u16(), "Order accepted");
            Ok(())
        } else {
            error!(status = status.as_u16(), "Order rejected");
            Err(GatewayError::Status(status.as_u16()))
        }
    }
}

fn create_order_url(api_base_url: &str) -> String {
    format!("{}{}", api_base_url.trim_end_matches('/'), CREATE_ORDER_PATH)
}
