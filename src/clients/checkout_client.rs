use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{error, info, instrument, warn};

use crate::clients::CartClient;
use crate::error::CheckoutError;
use crate::gateway::OrderGateway;

/// Outcome of a confirmed checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReceipt {
    pub sub_orders: usize,
    pub items: usize,
    pub total: Decimal,
}

impl CheckoutReceipt {
    pub fn message(&self) -> &'static str {
        "Ordered successfully"
    }
}

/// Aborts the in-flight checkout unless disarmed, so a dropped `checkout`
/// future never leaves the cart locked.
struct PendingCheckout<'a> {
    cart_client: &'a CartClient,
    armed: bool,
}

impl Drop for PendingCheckout<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("Checkout dropped before settling");
            self.cart_client.abort_checkout();
        }
    }
}

/// Runs a checkout across the cart and the order API.
///
/// 1. Snapshot the cart and mark a submission in progress
/// 2. Submit the request once
/// 3. Remove the submitted lines on success, keep them on failure
#[derive(Clone)]
pub struct CheckoutClient {
    cart_client: CartClient,
    gateway: Arc<dyn OrderGateway>,
}

impl CheckoutClient {
    pub fn new(cart_client: CartClient, gateway: Arc<dyn OrderGateway>) -> Self {
        Self { cart_client, gateway }
    }

    /// Whether a submission is pending. Callers disable the checkout control
    /// while this is `true`.
    pub async fn is_submitting(&self) -> Result<bool, CheckoutError> {
        Ok(self.cart_client.is_submitting().await?)
    }

    #[instrument(skip(self, address))]
    pub async fn checkout(
        &self,
        customer_id: String,
        address: String,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        info!("Processing checkout request (Client Side)");

        // Step 1: Snapshot
        let request = match self.cart_client.begin_checkout(customer_id, address).await {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Checkout could not start");
                return Err(e.into());
            }
        };

        let mut pending = PendingCheckout {
            cart_client: &self.cart_client,
            armed: true,
        };

        let receipt = CheckoutReceipt {
            sub_orders: request.sub_orders.len(),
            items: request.item_count(),
            total: request.total(),
        };

        // Step 2: Submit
        let submitted = self.gateway.create_order(&request).await;

        // Step 3: Settle the cart
        let succeeded = submitted.is_ok();
        let settled = self.cart_client.finish_checkout(succeeded).await;
        pending.armed = false;
        if let Err(e) = settled {
            error!(error = %e, succeeded, "Failed to settle cart after submission");
            return Err(e.into());
        }

        match submitted {
            Ok(()) => {
                info!(sub_orders = receipt.sub_orders, total = %receipt.total, "Order created successfully");
                Ok(receipt)
            }
            Err(e) => {
                error!(error = %e, "Order creation failed");
                Err(CheckoutError::Rejected(e))
            }
        }
    }
}
