//! # Mock Framework
//!
//! Test doubles for the cart mailbox and the order API.
//!
//! Use [`create_mock_cart_client`] to get a client whose requests land on a
//! receiver the test drives with the `expect_*` helpers, and
//! [`MockOrderGateway`] to script the backend's answers.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{mpsc, Notify};

use crate::clients::CartClient;
use crate::domain::CheckoutRequest;
use crate::error::{CartError, GatewayError};
use crate::gateway::OrderGateway;
use crate::messages::{CartRequest, ServiceResponse};

pub fn create_mock_cart_client(buffer_size: usize) -> (CartClient, mpsc::Receiver<CartRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CartClient::new(sender), receiver)
}

pub async fn expect_begin_checkout(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(String, String, ServiceResponse<CheckoutRequest, CartError>)> {
    match receiver.recv().await {
        Some(CartRequest::BeginCheckout {
            customer_id,
            address,
            respond_to,
        }) => Some((customer_id, address, respond_to)),
        _ => None,
    }
}

pub async fn expect_finish_checkout(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(bool, ServiceResponse<(), CartError>)> {
    match receiver.recv().await {
        Some(CartRequest::FinishCheckout { succeeded, respond_to }) => Some((succeeded, respond_to)),
        _ => None,
    }
}

/// Scripted order API. Each call pops the next status: `None` answers with
/// success, `Some(code)` with that status. An exhausted script succeeds.
#[derive(Default)]
pub struct MockOrderGateway {
    script: Mutex<VecDeque<Option<u16>>>,
    received: Mutex<Vec<CheckoutRequest>>,
    gate: Option<Arc<Notify>>,
}

impl MockOrderGateway {
    pub fn accepting() -> Self {
        Self::default()
    }

    pub fn with_script(script: impl IntoIterator<Item = Option<u16>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            ..Default::default()
        }
    }

    /// Every call waits until the returned [`Notify`] is signalled.
    pub fn gated() -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let gateway = Self {
            gate: Some(gate.clone()),
            ..Default::default()
        };
        (gateway, gate)
    }

    pub fn received(&self) -> Vec<CheckoutRequest> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderGateway for MockOrderGateway {
    async fn create_order(&self, request: &CheckoutRequest) -> Result<(), GatewayError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.received.lock().unwrap().push(request.clone());
        match self.script.lock().unwrap().pop_front().flatten() {
            None => Ok(()),
            Some(status) => Err(GatewayError::Status(status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SubOrder;

    #[tokio::test]
    async fn test_mock_cart_client() {
        let (client, mut receiver) = create_mock_cart_client(4);

        let task = tokio::spawn(async move {
            client
                .begin_checkout("c-9".to_string(), "Dock 4".to_string())
                .await
        });

        let (customer_id, address, responder) = expect_begin_checkout(&mut receiver)
            .await
            .expect("Expected BeginCheckout request");
        assert_eq!(customer_id, "c-9");
        assert_eq!(address, "Dock 4");
        let request = CheckoutRequest {
            customer_id,
            address,
            sub_orders: vec![SubOrder { store_id: 1, order_items: vec![] }],
        };
        responder.send(Ok(request.clone())).unwrap();

        assert_eq!(task.await.unwrap(), Ok(request));
    }

    #[tokio::test]
    async fn test_mock_gateway_follows_script() {
        let gateway = MockOrderGateway::with_script([Some(500), None]);
        let request = crate::cart::Cart::new().build_checkout_request("c", "a");

        assert!(matches!(
            gateway.create_order(&request).await,
            Err(GatewayError::Status(500))
        ));
        assert!(gateway.create_order(&request).await.is_ok());
        assert!(gateway.create_order(&request).await.is_ok());
        assert_eq!(gateway.received().len(), 3);
    }
}
