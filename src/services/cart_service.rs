use rust_decimal::Decimal;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::cart::Cart;
use crate::clients::CartClient;
use crate::domain::{CartLineItem, CartLinePatch, CartProduct, CheckoutRequest, SubOrder};
use crate::error::CartError;
use crate::messages::{CartRequest, ServiceResponse};

/// Owns the cart and applies every mutation in mailbox order, so a reader
/// never sees a half-applied update.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    cart: Cart,
    /// Sub-orders of the submission in flight, if any.
    in_flight: Option<Vec<SubOrder>>,
}

impl CartService {
    pub fn new(buffer_size: usize) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            cart: Cart::new(),
            in_flight: None,
        };
        let client = CartClient::new(sender);
        (service, client)
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!("CartService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddProduct { product, respond_to } => {
                    self.handle_add_product(product, respond_to);
                }
                CartRequest::IncreaseQuantity { product_id, respond_to } => {
                    self.handle_increase_quantity(product_id, respond_to);
                }
                CartRequest::DecreaseQuantity { product_id, respond_to } => {
                    self.handle_decrease_quantity(product_id, respond_to);
                }
                CartRequest::RemoveProduct { product_id, respond_to } => {
                    self.handle_remove_product(product_id, respond_to);
                }
                CartRequest::UpdateProduct {
                    product_id,
                    patch,
                    respond_to,
                } => {
                    self.handle_update_product(product_id, patch, respond_to);
                }
                CartRequest::SetProducts { lines, respond_to } => {
                    self.handle_set_products(lines, respond_to);
                }
                CartRequest::ClearProducts { respond_to } => {
                    self.cart.clear();
                    info!("Cart cleared");
                    let _ = respond_to.send(Ok(()));
                }
                CartRequest::ListProducts { respond_to } => {
                    let _ = respond_to.send(Ok(self.cart.lines().to_vec()));
                }
                CartRequest::TotalPrice { respond_to } => {
                    self.handle_total_price(respond_to);
                }
                CartRequest::SubOrders { respond_to } => {
                    let _ = respond_to.send(Ok(self.cart.to_sub_orders()));
                }
                CartRequest::BeginCheckout {
                    customer_id,
                    address,
                    respond_to,
                } => {
                    self.handle_begin_checkout(customer_id, address, respond_to);
                }
                CartRequest::FinishCheckout { succeeded, respond_to } => {
                    self.handle_finish_checkout(succeeded, respond_to);
                }
                CartRequest::AbortCheckout => {
                    self.handle_abort_checkout();
                }
                CartRequest::IsSubmitting { respond_to } => {
                    let _ = respond_to.send(Ok(self.in_flight.is_some()));
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }

        info!("CartService stopped");
    }

    #[instrument(
        fields(product_id = product.product_id, store_id = product.store_id),
        skip(self, product, respond_to)
    )]
    fn handle_add_product(&mut self, product: CartProduct, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing add_product request");

        let product_id = product.product_id;
        self.cart.add(product);

        if let Some(line) = self.cart.get(product_id) {
            info!(quantity = line.quantity, line_count = self.cart.len(), "Product added to cart");
        }
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_increase_quantity(&mut self, product_id: i64, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing increase_quantity request");

        if self.cart.get(product_id).is_none() {
            debug!("Product not in cart");
        }
        self.cart.increase(product_id);

        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_decrease_quantity(&mut self, product_id: i64, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing decrease_quantity request");

        let had_line = self.cart.get(product_id).is_some();
        self.cart.decrease(product_id);

        match self.cart.get(product_id) {
            Some(line) => debug!(quantity = line.quantity, "Quantity decreased"),
            None if had_line => info!("Line removed at zero quantity"),
            None => debug!("Product not in cart"),
        }

        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_remove_product(&mut self, product_id: i64, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing remove_product request");

        self.cart.remove(product_id);
        info!(line_count = self.cart.len(), "Product removed from cart");

        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, patch, respond_to))]
    fn handle_update_product(
        &mut self,
        product_id: i64,
        patch: CartLinePatch,
        respond_to: ServiceResponse<(), CartError>,
    ) {
        debug!("Processing update_product request");

        self.cart.update(product_id, patch);

        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(incoming = lines.len()), skip(self, lines, respond_to))]
    fn handle_set_products(&mut self, lines: Vec<CartLineItem>, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing set_products request");

        self.cart.replace(lines);
        info!(line_count = self.cart.len(), "Cart replaced");

        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_total_price(&self, respond_to: ServiceResponse<Decimal, CartError>) {
        let total = self.cart.total_price();
        debug!(total = %total, "Computed cart total");
        let _ = respond_to.send(Ok(total));
    }

    /// Snapshots the cart into a checkout request and marks a submission in
    /// progress. The cart itself is left untouched until
    /// [`handle_finish_checkout`](Self::handle_finish_checkout).
    #[instrument(fields(customer_id = %customer_id), skip(self, address, respond_to))]
    fn handle_begin_checkout(
        &mut self,
        customer_id: String,
        address: String,
        respond_to: ServiceResponse<CheckoutRequest, CartError>,
    ) {
        debug!("Processing begin_checkout request");

        if self.in_flight.is_some() {
            warn!("Checkout already in progress");
            send_error!(respond_to, CartError::CheckoutInProgress);
        }
        if self.cart.is_empty() {
            warn!("Checkout requested on an empty cart");
            send_error!(respond_to, CartError::EmptyCart);
        }

        let request = self.cart.build_checkout_request(customer_id, address);
        self.in_flight = Some(request.sub_orders.clone());
        info!(sub_orders = request.sub_orders.len(), total = %request.total(), "Checkout started");

        let _ = respond_to.send(Ok(request));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_finish_checkout(&mut self, succeeded: bool, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing finish_checkout request");

        let Some(submitted) = self.in_flight.take() else {
            warn!("No checkout in progress");
            let _ = respond_to.send(Ok(()));
            return;
        };

        if succeeded {
            self.cart.deduct(&submitted);
            info!(line_count = self.cart.len(), "Checkout confirmed, submitted lines removed");
        } else {
            info!(line_count = self.cart.len(), "Checkout failed, cart kept for retry");
        }

        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self))]
    fn handle_abort_checkout(&mut self) {
        if self.in_flight.take().is_some() {
            warn!(line_count = self.cart.len(), "Checkout abandoned before settling, cart kept");
        } else {
            debug!("Abort received with no checkout in progress");
        }
    }
}
