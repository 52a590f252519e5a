use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::IpAddr;

/// Header carrying the caller's public key.
pub const PUBKEY_HEADER: &str = "x-pubkey";

/// Request information for authentication. Header names are lower-case.
#[derive(Debug, Clone)]
pub struct AuthRequest {
    pub headers: HashMap<String, String>,
    pub source_ip: IpAddr,
}

impl AuthRequest {
    /// Non-empty pubkey announced by the caller, if any.
    pub fn pubkey(&self) -> Option<&str> {
        self.headers
            .get(PUBKEY_HEADER)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }
}

/// Authenticated identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Identity {
    pub pubkey: String,
    pub method: String,
    #[serde(default)]
    pub claims: HashMap<String, serde_json::Value>,
}

impl Identity {
    pub fn anonymous() -> Self {
        Self {
            pubkey: "anonymous".to_string(),
            method: "none".to_string(),
            claims: HashMap::new(),
        }
    }
}
