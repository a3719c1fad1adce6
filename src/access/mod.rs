//! Role-based access decisions for dashboard resources.
//!
//! [`evaluate`] is a pure function of the request: no I/O, no allocation.
//! It gates what the dashboard shows, and the backend still has to enforce
//! per-user filtering on its side.

mod role;

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::identity::Identity;

pub use role::Role;

/// Resource names the dashboard routes on.
pub mod resources {
    pub const LOGIN: &str = "login";
    pub const DASHBOARD: &str = "dashboard";
    pub const USERS: &str = "users";
    pub const COURIERS: &str = "couriers";
    pub const ORDERS: &str = "orders";
    pub const PRODUCTS: &str = "products";
    pub const CATEGORIES: &str = "categories";
    pub const STORES: &str = "stores";
}

pub mod actions {
    pub const LIST: &str = "list";
    pub const SHOW: &str = "show";
    pub const CREATE: &str = "create";
    pub const EDIT: &str = "edit";
    pub const DELETE: &str = "delete";
}

pub const NO_PERMISSION: &str = "No permission";

pub type Params = HashMap<String, Value>;

#[derive(Debug, Clone, Copy, Default)]
pub struct AccessRequest<'a> {
    pub role: Option<Role>,
    pub resource: Option<&'a str>,
    pub action: &'a str,
    pub params: Option<&'a Params>,
}

impl<'a> AccessRequest<'a> {
    pub fn new(action: &'a str) -> Self {
        Self { action, ..Default::default() }
    }

    pub fn role(mut self, role: Option<Role>) -> Self {
        self.role = role;
        self
    }

    pub fn resource(mut self, resource: &'a str) -> Self {
        self.resource = Some(resource);
        self
    }

    pub fn params(mut self, params: &'a Params) -> Self {
        self.params = Some(params);
        self
    }

    /// `params.id` is set to something truthy: not null, `false`, `0` or `""`.
    fn has_id_param(&self) -> bool {
        match self.params.and_then(|p| p.get("id")) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessDecision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl AccessDecision {
    pub const fn allow() -> Self {
        Self { allowed: true, reason: None }
    }

    pub const fn deny() -> Self {
        Self { allowed: false, reason: None }
    }

    pub const fn deny_with(reason: &'static str) -> Self {
        Self { allowed: false, reason: Some(reason) }
    }
}

impl From<bool> for AccessDecision {
    fn from(allowed: bool) -> Self {
        if allowed { Self::allow() } else { Self::deny() }
    }
}

pub fn evaluate(request: &AccessRequest<'_>) -> AccessDecision {
    let resource = request.resource;
    if resource == Some(resources::LOGIN) {
        return AccessDecision::allow();
    }

    let Some(role) = request.role else {
        return AccessDecision::deny();
    };

    let is = |name: &str| resource == Some(name);

    let decision = match role {
        Role::Administrator => AccessDecision::allow(),
        Role::Manager => (!is(resources::USERS) && !is(resources::COURIERS)).into(),
        Role::Dispatcher => (is(resources::ORDERS)
            || is(resources::PRODUCTS)
            || is(resources::CATEGORIES)
            || is(resources::DASHBOARD))
        .into(),
        Role::Courier => ((is(resources::COURIERS) && request.action == actions::LIST)
            || is(resources::DASHBOARD))
        .into(),
        Role::Customer => ((is(resources::ORDERS)
            && request.action == actions::LIST
            && request.has_id_param())
            || is(resources::DASHBOARD))
        .into(),
        Role::Unrecognized => AccessDecision::deny_with(NO_PERMISSION),
    };

    if !decision.allowed {
        debug!(
            role = %role,
            resource = resource.unwrap_or_default(),
            action = request.action,
            "Access denied"
        );
    }
    decision
}

/// Stateless access-control provider for route and action guards.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessDecisionEngine;

impl AccessDecisionEngine {
    pub fn evaluate(&self, request: &AccessRequest<'_>) -> AccessDecision {
        evaluate(request)
    }

    /// Resolves the role from a decoded identity and evaluates. A missing
    /// identity is treated as unauthenticated.
    pub fn check(
        &self,
        identity: Option<&Identity>,
        resource: &str,
        action: &str,
        params: Option<&Params>,
    ) -> AccessDecision {
        let request = AccessRequest {
            role: identity.and_then(Identity::role),
            resource: Some(resource),
            action,
            params,
        };
        evaluate(&request)
    }
}
