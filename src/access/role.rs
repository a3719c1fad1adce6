use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Permission tier carried by an authenticated identity.
///
/// The backend issues the Spanish tier names; upper-case English names are
/// accepted as aliases. Matching is exact. Anything else parses to
/// [`Role::Unrecognized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMINISTRADOR", alias = "ADMINISTRATOR")]
    Administrator,
    #[serde(rename = "GERENTE", alias = "MANAGER")]
    Manager,
    #[serde(rename = "DESPACHADOR", alias = "DISPATCHER")]
    Dispatcher,
    #[serde(rename = "REPARTIDOR", alias = "COURIER")]
    Courier,
    #[serde(rename = "CLIENTE", alias = "CUSTOMER")]
    Customer,
    #[serde(other)]
    Unrecognized,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Administrator => "ADMINISTRADOR",
            Role::Manager => "GERENTE",
            Role::Dispatcher => "DESPACHADOR",
            Role::Courier => "REPARTIDOR",
            Role::Customer => "CLIENTE",
            Role::Unrecognized => "UNRECOGNIZED",
        }
    }

    /// Parses a role name exactly as issued, backend or English upper-case
    /// name. Returns `None` for an empty name, which means the identity
    /// carries no role at all.
    pub fn from_name(name: &str) -> Option<Self> {
        let role = match name {
            "" => return None,
            "ADMINISTRADOR" | "ADMINISTRATOR" => Role::Administrator,
            "GERENTE" | "MANAGER" => Role::Manager,
            "DESPACHADOR" | "DISPATCHER" => Role::Dispatcher,
            "REPARTIDOR" | "COURIER" => Role::Courier,
            "CLIENTE" | "CUSTOMER" => Role::Customer,
            _ => Role::Unrecognized,
        };
        Some(role)
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    /// Never fails; an empty name maps to [`Role::Unrecognized`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Role::from_name(s).unwrap_or(Role::Unrecognized))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_backend_and_english_names() {
        assert_eq!(Role::from_name("ADMINISTRADOR"), Some(Role::Administrator));
        assert_eq!(Role::from_name("MANAGER"), Some(Role::Manager));
        assert_eq!(Role::from_name("DESPACHADOR"), Some(Role::Dispatcher));
        assert_eq!(Role::from_name("COURIER"), Some(Role::Courier));
        assert_eq!(Role::from_name("CLIENTE"), Some(Role::Customer));
    }

    #[test]
    fn test_from_name_is_exact() {
        assert_eq!(Role::from_name("administrador"), Some(Role::Unrecognized));
        assert_eq!(Role::from_name(" GERENTE "), Some(Role::Unrecognized));
        assert_eq!(Role::from_name("Cliente"), Some(Role::Unrecognized));
        assert_eq!(Role::from_name("manager"), Some(Role::Unrecognized));

        for name in ["administrador", " GERENTE ", "Cliente", "ADMINISTRADOR", "MANAGER"] {
            let parsed: Role = serde_json::from_value(serde_json::Value::from(name)).unwrap();
            assert_eq!(Role::from_name(name), Some(parsed), "{name}");
        }
    }

    #[test]
    fn test_from_name_blank_and_unknown() {
        assert_eq!(Role::from_name(""), None);
        assert_eq!(Role::from_name("   "), Some(Role::Unrecognized));
        assert_eq!(Role::from_name("AUDITOR"), Some(Role::Unrecognized));
        assert_eq!("AUDITOR".parse::<Role>(), Ok(Role::Unrecognized));
    }

    #[test]
    fn test_serde_names() {
        let role: Role = serde_json::from_str("\"REPARTIDOR\"").unwrap();
        assert_eq!(role, Role::Courier);
        let role: Role = serde_json::from_str("\"SUPERVISOR\"").unwrap();
        assert_eq!(role, Role::Unrecognized);
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"GERENTE\"");
    }
}
