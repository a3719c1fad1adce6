use rust_decimal::Decimal;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, error, instrument};

use crate::domain::{CartLineItem, CartLinePatch, CartProduct, CheckoutRequest, SubOrder};
use crate::error::CartError;
use crate::messages::CartRequest;

/// Handle to a running [`CartService`](crate::services::CartService).
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CartError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|e| CartError::ActorCommunicationError(e.to_string()))
    }

    /// Releases an in-flight checkout without settling it. Callable from
    /// `Drop`, so it never waits on the mailbox.
    #[instrument(skip(self))]
    pub fn abort_checkout(&self) {
        match self.sender.try_send(CartRequest::AbortCheckout) {
            Ok(()) => debug!("Abort request queued"),
            Err(TrySendError::Full(request)) => match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    let sender = self.sender.clone();
                    handle.spawn(async move {
                        let _ = sender.send(request).await;
                    });
                }
                Err(_) => error!("Cart mailbox full outside a runtime, abort request lost"),
            },
            Err(TrySendError::Closed(_)) => debug!("Cart service already stopped"),
        }
    }
}

client_method!(CartClient => fn add_product(product: CartProduct) -> () as CartRequest::AddProduct, Error = CartError);
client_method!(CartClient => fn increase_quantity(product_id: i64) -> () as CartRequest::IncreaseQuantity, Error = CartError);
client_method!(CartClient => fn decrease_quantity(product_id: i64) -> () as CartRequest::DecreaseQuantity, Error = CartError);
client_method!(CartClient => fn remove_product(product_id: i64) -> () as CartRequest::RemoveProduct, Error = CartError);
client_method!(CartClient => fn update_product(product_id: i64, patch: CartLinePatch) -> () as CartRequest::UpdateProduct, Error = CartError);
client_method!(CartClient => fn set_products(lines: Vec<CartLineItem>) -> () as CartRequest::SetProducts, Error = CartError);
client_method!(CartClient => fn clear_products() -> () as CartRequest::ClearProducts, Error = CartError);
client_method!(CartClient => fn list_products() -> Vec<CartLineItem> as CartRequest::ListProducts, Error = CartError);
client_method!(CartClient => fn total_price() -> Decimal as CartRequest::TotalPrice, Error = CartError);
client_method!(CartClient => fn sub_orders() -> Vec<SubOrder> as CartRequest::SubOrders, Error = CartError);
client_method!(CartClient => fn begin_checkout(customer_id: String, address: String) -> CheckoutRequest as CartRequest::BeginCheckout, Error = CartError);
client_method!(CartClient => fn finish_checkout(succeeded: bool) -> () as CartRequest::FinishCheckout, Error = CartError);
client_method!(CartClient => fn is_submitting() -> bool as CartRequest::IsSubmitting, Error = CartError);
