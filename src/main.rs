use rust_decimal::Decimal;
use tracing::{error, info, warn, Instrument};

use dispatch_console::access::{actions, resources};
use dispatch_console::app_system::{setup_tracing, DashboardSystem};
use dispatch_console::config::DashboardConfig;
use dispatch_console::domain::CartProduct;
use dispatch_console::identity::{Identity, RoleClaim};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = DashboardConfig::from_env().map_err(|e| e.to_string())?;
    info!(api_base_url = %config.api_base_url, "Starting dispatch console");

    let system = DashboardSystem::from_config(&config).map_err(|e| e.to_string())?;

    let identity = match std::env::var("DASHBOARD_TOKEN") {
        Ok(token) => Identity::decode_token(&token).map_err(|e| e.to_string())?,
        Err(_) => {
            warn!("DASHBOARD_TOKEN not set, using a sample customer identity");
            Identity {
                id: Some("1".to_string()),
                name: "Sample Customer".to_string(),
                role: Some(RoleClaim { name: "CLIENTE".to_string() }),
                ..Default::default()
            }
        }
    };

    for resource in [resources::DASHBOARD, resources::ORDERS, resources::COURIERS] {
        let decision = system.access.check(Some(&identity), resource, actions::LIST, None);
        info!(resource, allowed = decision.allowed, reason = decision.reason, "Access decision");
    }

    let span = tracing::info_span!("cart_filling");
    async {
        info!("Adding sample products to the cart");
        let cart = &system.cart_client;
        cart.add_product(CartProduct::new(101, "Water 6-pack", Decimal::new(499, 2), 1)).await?;
        cart.add_product(CartProduct::new(101, "Water 6-pack", Decimal::new(499, 2), 1)).await?;
        cart.add_product(CartProduct::new(205, "Rice 5kg", Decimal::new(1250, 2), 2)).await?;
        let total = cart.total_price().await?;
        info!(total = %total, "Cart ready");
        Ok::<_, dispatch_console::error::CartError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let customer_id = identity.id.clone().unwrap_or_default();
    let span = tracing::info_span!("checkout");
    let result = async {
        info!("Submitting checkout");
        system
            .checkout_client
            .checkout(customer_id, "Av. Principal 100".to_string())
            .await
    }
    .instrument(span)
    .await;

    match result {
        Ok(receipt) => info!(sub_orders = receipt.sub_orders, "{}", receipt.message()),
        Err(e) => error!(error = %e, "Checkout failed, cart kept for retry"),
    }

    system.shutdown().await?;

    info!("Dispatch console finished");
    Ok(())
}
