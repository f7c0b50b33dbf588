//! Configuration for nkv-client
//!
//! Centralized configuration with sensible defaults.

use std::time::Duration;

/// Configuration for a [`Client`](crate::client::Client) instance
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Server address (host:port)
    pub server_addr: String,

    /// Optional dial timeout; `None` uses the OS default
    pub connect_timeout: Option<Duration>,

    // -------------------------------------------------------------------------
    // Subscription Configuration
    // -------------------------------------------------------------------------
    /// Delay between reconnect attempts for a subscription connection
    pub reconnect_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:6379".to_string(),
            connect_timeout: None,
            reconnect_interval: Duration::from_secs(1),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for ClientConfig
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the server address (host:port)
    pub fn server_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.server_addr = addr.into();
        self
    }

    /// Set the dial timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Set the delay between subscription reconnect attempts
    pub fn reconnect_interval(mut self, interval: Duration) -> Self {
        self.config.reconnect_interval = interval;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
