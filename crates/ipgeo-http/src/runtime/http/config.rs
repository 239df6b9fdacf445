//! HTTP runtime configuration

use std::net::SocketAddr;

/// HTTP runtime configuration
#[derive(Debug, Clone)]
pub struct HttpRuntimeConfig {
    /// Address the listener binds to
    pub bind_addr: SocketAddr,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
    /// Enable CORS for cross-origin requests
    pub enable_cors: bool,
}

impl Default for HttpRuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            request_timeout_secs: 10,
            max_body_size: 64 * 1024, // 64KB, envelopes are small
            enable_cors: false,
        }
    }
}
