use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::access::AccessDecisionEngine;
use crate::clients::{CartClient, CheckoutClient};
use crate::config::DashboardConfig;
use crate::error::GatewayError;
use crate::gateway::{HttpOrderGateway, OrderGateway};
use crate::services::CartService;

/// Starts the dashboard's services and hands out their clients.
pub struct DashboardSystem {
    pub cart_client: CartClient,
    pub checkout_client: CheckoutClient,
    pub access: AccessDecisionEngine,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl DashboardSystem {
    /// Must be called from within a tokio runtime.
    #[instrument(name = "dashboard_system", skip(gateway))]
    pub fn new(cart_buffer: usize, gateway: Arc<dyn OrderGateway>) -> Self {
        let mut handles = Vec::new();

        info!("Starting dashboard system");

        let (cart_service, cart_client) = CartService::new(cart_buffer);
        handles.push(tokio::spawn(cart_service.run()));

        let checkout_client = CheckoutClient::new(cart_client.clone(), gateway);

        info!("Dashboard system started successfully");

        Self {
            cart_client,
            checkout_client,
            access: AccessDecisionEngine,
            handles,
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, GatewayError> {
        let gateway = HttpOrderGateway::from_config(config)?;
        Ok(Self::new(config.cart_buffer, Arc::new(gateway)))
    }

    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down dashboard system");

        if let Err(e) = self.cart_client.shutdown().await {
            error!(error = %e, "Failed to send shutdown to CartService");
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
                return Err(format!("Service task failed: {e}"));
            }
        }

        info!("Dashboard system shutdown complete");
        Ok(())
    }
}
