//! Decoded identity claims.
//!
//! The access engine never reads ambient token storage; callers decode the
//! token they hold and pass the resulting [`Identity`] in explicitly.
//! Signature verification is the backend's job, this module only reads the
//! payload segment.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

use crate::access::Role;
use crate::error::IdentityError;

pub const DEFAULT_AVATAR: &str = "https://img.freepik.com/premium-vector/person-with-blue-shirt-that-says-name-person_1029948-7040.jpg";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoleClaim {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Identity {
    #[serde(default, alias = "userId")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub role: Option<RoleClaim>,
}

impl Identity {
    /// Reads the claims out of a `header.payload.signature` token.
    pub fn decode_token(token: &str) -> Result<Self, IdentityError> {
        let mut segments = token.trim().split('.');
        let payload = match (segments.next(), segments.next()) {
            (Some(_), Some(payload)) if !payload.is_empty() => payload,
            _ => return Err(IdentityError::MalformedToken("expected header.payload.signature")),
        };
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| IdentityError::Encoding(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| IdentityError::Claims(e.to_string()))
    }

    /// The role to authorize with, or `None` if the identity carries none.
    pub fn role(&self) -> Option<Role> {
        self.role.as_ref().and_then(|claim| Role::from_name(&claim.name))
    }

    pub fn avatar_url(&self) -> &str {
        match self.avatar.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => DEFAULT_AVATAR,
        }
    }
}
