//! Server and CORS configuration.

use serde::{Deserialize, Serialize};

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_body_limit")]
    pub max_body_bytes: usize,
    /// Graceful shutdown timeout in seconds.
    #[serde(default = "default_shutdown_grace")]
    pub shutdown_grace_seconds: u64,
    /// CORS configuration.
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_body_limit(),
            shutdown_grace_seconds: default_shutdown_grace(),
            cors: CorsConfig::default(),
        }
    }
}

/// CORS (Cross-Origin Resource Sharing) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins (use `["*"]` for development only).
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    /// Allowed HTTP methods.
    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: Vec<String>,
    /// Max age for preflight cache in seconds.
    #[serde(default = "default_max_age")]
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            allowed_methods: default_allowed_methods(),
            max_age_seconds: default_max_age(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_body_limit() -> usize {
    1024 * 1024
}

fn default_shutdown_grace() -> u64 {
    30
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_allowed_methods() -> Vec<String> {
    vec![
        "GET".to_string(),
        "POST".to_string(),
        "OPTIONS".to_string(),
    ]
}

fn default_max_age() -> u64 {
    3600
}
