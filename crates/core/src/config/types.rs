use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::connection_code::DispenseOrder;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub auth: AuthConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub builder: BuilderConfig,
    #[serde(default)]
    pub connection_codes: ConnectionCodeConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub method: AuthMethod,
    /// Required when `method = "api_key"`.
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    None,
    ApiKey,
}

impl AuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::None => "none",
            AuthMethod::ApiKey => "api_key",
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("bountydesk.db")
}

/// External builder service configuration.
///
/// `api_key` and `callback_host` have no defaults. Dispatch refuses to run
/// without them, but the rest of the server starts fine.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuilderConfig {
    #[serde(default = "default_builder_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Public base URL of this server, e.g. "https://desk.example.com".
    #[serde(default)]
    pub callback_host: Option<String>,
    #[serde(default = "default_workflow_id")]
    pub workflow_id: u64,
    #[serde(default = "default_workflow_name")]
    pub workflow_name: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            api_url: default_builder_url(),
            api_key: None,
            callback_host: None,
            workflow_id: default_workflow_id(),
            workflow_name: default_workflow_name(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_builder_url() -> String {
    "https://api.stakwork.com/api/v1/projects".to_string()
}

fn default_workflow_id() -> u64 {
    37324
}

fn default_workflow_name() -> String {
    "Hive Ticket Builder".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Connection code dispensing configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConnectionCodeConfig {
    #[serde(default)]
    pub dispense_order: DispenseOrder,
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub auth: SanitizedAuthConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub builder: SanitizedBuilderConfig,
    pub connection_codes: ConnectionCodeConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedAuthConfig {
    pub method: String,
}

/// Builder config with the API key replaced by a flag.
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedBuilderConfig {
    pub api_url: String,
    pub api_key_configured: bool,
    pub callback_host: Option<String>,
    pub workflow_id: u64,
    pub workflow_name: String,
    pub timeout_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        let builder = &config.builder;
        Self {
            auth: SanitizedAuthConfig {
                method: config.auth.method.as_str().to_string(),
            },
            server: config.server.clone(),
            database: config.database.clone(),
            builder: SanitizedBuilderConfig {
                api_url: builder.api_url.clone(),
                api_key_configured: builder.api_key.as_deref().is_some_and(|k| !k.is_empty()),
                callback_host: builder.callback_host.clone(),
                workflow_id: builder.workflow_id,
                workflow_name: builder.workflow_name.clone(),
                timeout_secs: builder.timeout_secs,
            },
            connection_codes: config.connection_codes.clone(),
        }
    }
}
