use rust_decimal::Decimal;
use tokio::sync::oneshot;

use crate::domain::{CartLineItem, CartLinePatch, CartProduct, CheckoutRequest, SubOrder};
use crate::error::CartError;

pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Messages accepted by [`CartService`](crate::services::CartService).
#[derive(Debug)]
pub enum CartRequest {
    AddProduct {
        product: CartProduct,
        respond_to: ServiceResponse<(), CartError>,
    },
    IncreaseQuantity {
        product_id: i64,
        respond_to: ServiceResponse<(), CartError>,
    },
    DecreaseQuantity {
        product_id: i64,
        respond_to: ServiceResponse<(), CartError>,
    },
    RemoveProduct {
        product_id: i64,
        respond_to: ServiceResponse<(), CartError>,
    },
    UpdateProduct {
        product_id: i64,
        patch: CartLinePatch,
        respond_to: ServiceResponse<(), CartError>,
    },
    SetProducts {
        lines: Vec<CartLineItem>,
        respond_to: ServiceResponse<(), CartError>,
    },
    ClearProducts {
        respond_to: ServiceResponse<(), CartError>,
    },
    ListProducts {
        respond_to: ServiceResponse<Vec<CartLineItem>, CartError>,
    },
    TotalPrice {
        respond_to: ServiceResponse<Decimal, CartError>,
    },
    SubOrders {
        respond_to: ServiceResponse<Vec<SubOrder>, CartError>,
    },
    BeginCheckout {
        customer_id: String,
        address: String,
        respond_to: ServiceResponse<CheckoutRequest, CartError>,
    },
    FinishCheckout {
        succeeded: bool,
        respond_to: ServiceResponse<(), CartError>,
    },
    /// Sent when a checkout is dropped before it settles. Keeps the cart.
    AbortCheckout,
    IsSubmitting {
        respond_to: ServiceResponse<bool, CartError>,
    },
    Shutdown,
}
