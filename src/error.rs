use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Cart is empty")]
    EmptyCart,
    #[error("A checkout submission is already in progress")]
    CheckoutInProgress,
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Errors from the order-creation endpoint.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Order API responded with status {0}")]
    Status(u16),
    #[error("Order API transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Errors surfaced to the caller of a checkout.
///
/// The display text of every variant is safe to show to the user.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Your order couldn't be created.")]
    Rejected(#[source] GatewayError),
    #[error("Your cart is empty.")]
    EmptyCart,
    #[error("Your order is already being submitted.")]
    InProgress,
    #[error("Cart unavailable: {0}")]
    Cart(String),
}

impl From<CartError> for CheckoutError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::EmptyCart => CheckoutError::EmptyCart,
            CartError::CheckoutInProgress => CheckoutError::InProgress,
            CartError::ActorCommunicationError(msg) => CheckoutError::Cart(msg),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum IdentityError {
    #[error("Malformed token: {0}")]
    MalformedToken(&'static str),
    #[error("Token payload is not valid base64: {0}")]
    Encoding(String),
    #[error("Token claims are not valid JSON: {0}")]
    Claims(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}
