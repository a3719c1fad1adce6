//! # Dispatch Console
//!
//! Business logic behind the logistics administration dashboard: who may see
//! what, and how a shopping cart becomes a multi-store order.
//!
//! ## Ingredients
//!
//! - **Access decisions** - pure role/resource/action predicate → [`access::evaluate`], [`access::AccessDecisionEngine`]
//! - **Identity** - decoded token claims passed in explicitly → [`identity::Identity`]
//! - **Cart aggregate** - line bookkeeping, totals, grouping by store → [`cart::Cart`]
//! - **Cart actor** - serializes cart mutations behind one mailbox → [`services::CartService`], [`clients::CartClient`]
//! - **Checkout** - snapshot, single submission, settle → [`clients::CheckoutClient`], [`gateway::OrderGateway`]
//! - **System coordinator** - startup, wiring, shutdown → [`app_system::DashboardSystem`]
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! let config = DashboardConfig::from_env()?;
//! let system = DashboardSystem::from_config(&config)?;
//!
//! system.cart_client.add_product(product).await?;
//! let receipt = system.checkout_client.checkout(customer_id, address).await?;
//!
//! system.shutdown().await?;
//! ```

pub mod access;
pub mod app_system;
pub mod cart;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod identity;
pub mod messages;
pub mod services;

#[cfg(test)]
mod mock_framework;
