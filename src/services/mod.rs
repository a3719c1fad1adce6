//! Actors owning dashboard state.

/// Sends an error on the response channel and returns from the handler.
macro_rules! send_error {
    ($respond_to:expr, $error:expr) => {{
        let _ = $respond_to.send(Err($error));
        return;
    }};
}

pub mod cart_service;

pub use cart_service::*;
