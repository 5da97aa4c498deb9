//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, configuration files, or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default backend base location.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000/";

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Order-management backend configuration.
    pub backend: BackendConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the order-management backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL every backend path is resolved against.
    pub base_url: String,

    /// Per-request timeout in seconds. `None` waits for the backend
    /// indefinitely.
    pub timeout_secs: Option<u64>,

    /// Reject order detail payloads that do not match the order schema
    /// instead of only logging the mismatch.
    pub validate_responses: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            timeout_secs: None,
            validate_responses: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "order-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            backend: BackendConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_BACKEND_URL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env();

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config.backend = BackendConfig::from_env();

        config
    }
}

impl LoggingConfig {
    /// Load logging settings on their own, so the subscriber can be
    /// installed before the rest of the configuration logs anything.
    pub fn from_env() -> Self {
        let mut logging = Config::default().logging;
        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            logging.level = level;
        }
        logging
    }
}

impl BackendConfig {
    /// Load backend configuration from `MCP_BACKEND_*` variables.
    pub fn from_env() -> Self {
        let mut backend = Self::default();

        if let Ok(url) = std::env::var("MCP_BACKEND_URL") {
            info!("Backend URL loaded from environment: {}", url);
            backend.base_url = url;
        } else {
            warn!(
                "MCP_BACKEND_URL not set - using default backend at {}",
                DEFAULT_BACKEND_URL
            );
        }

        if let Ok(secs) = std::env::var("MCP_BACKEND_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) if secs > 0 => backend.timeout_secs = Some(secs),
                _ => warn!("Ignoring invalid MCP_BACKEND_TIMEOUT_SECS: {}", secs),
            }
        }

        if let Ok(validate) = std::env::var("MCP_VALIDATE_RESPONSES") {
            backend.validate_responses = validate.parse().unwrap_or(false);
            info!("Strict response validation: {}", backend.validate_responses);
        }

        backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn clear_backend_env() {
        unsafe {
            std::env::remove_var("MCP_BACKEND_URL");
            std::env::remove_var("MCP_BACKEND_TIMEOUT_SECS");
            std::env::remove_var("MCP_VALIDATE_RESPONSES");
        }
    }

    #[test]
    fn test_backend_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_BACKEND_URL", "https://orders.internal.example/");
            std::env::set_var("MCP_BACKEND_TIMEOUT_SECS", "15");
            std::env::set_var("MCP_VALIDATE_RESPONSES", "true");
        }
        let backend = BackendConfig::from_env();
        clear_backend_env();

        assert_eq!(backend.base_url, "https://orders.internal.example/");
        assert_eq!(backend.timeout_secs, Some(15));
        assert!(backend.validate_responses);
    }

    #[test]
    fn test_backend_default_fallback() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_backend_env();

        let backend = BackendConfig::from_env();
        assert_eq!(backend, BackendConfig::default());
        assert_eq!(backend.base_url, DEFAULT_BACKEND_URL);
        assert_eq!(backend.timeout_secs, None);
    }

    #[test]
    fn test_invalid_timeout_ignored() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_backend_env();
        unsafe {
            std::env::set_var("MCP_BACKEND_TIMEOUT_SECS", "soon");
        }
        let backend = BackendConfig::from_env();
        clear_backend_env();

        assert_eq!(backend.timeout_secs, None);
    }

    /// Log sink shared with a test subscriber.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[test]
    fn test_backend_warnings_reach_the_subscriber() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_backend_env();
        unsafe {
            std::env::set_var("MCP_BACKEND_TIMEOUT_SECS", "soon");
        }

        let captured = Captured::default();
        let sink = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, BackendConfig::from_env);
        clear_backend_env();

        let logs = captured.text();
        assert!(logs.contains("MCP_BACKEND_URL not set"), "{}", logs);
        assert!(logs.contains("Ignoring invalid MCP_BACKEND_TIMEOUT_SECS: soon"), "{}", logs);
    }

    #[test]
    fn test_logging_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_LOG_LEVEL", "debug");
        }
        let logging = LoggingConfig::from_env();
        unsafe {
            std::env::remove_var("MCP_LOG_LEVEL");
        }

        assert_eq!(logging.level, "debug");
        assert!(logging.with_timestamps);
        assert_eq!(LoggingConfig::from_env().level, "info");
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server.name, "order-mcp-server");
        assert!(!config.backend.validate_responses);
    }
}
