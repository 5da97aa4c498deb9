//! Transport selection and listener settings.
//!
//! Which variants exist depends on the enabled features. `MCP_TRANSPORT`
//! picks one at startup; an unknown or disabled name falls back to the first
//! compiled-in transport (stdio, then tcp, then http).

use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(not(any(feature = "stdio", feature = "tcp", feature = "http")))]
compile_error!("enable at least one transport feature: stdio, tcp or http");

/// Where the server accepts MCP traffic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// One client over stdin/stdout.
    #[cfg(feature = "stdio")]
    Stdio,

    /// Line-delimited JSON-RPC, one MCP session per TCP connection.
    #[cfg(feature = "tcp")]
    Tcp(TcpConfig),

    /// Stateless JSON-RPC over HTTP POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

#[cfg(feature = "tcp")]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TcpConfig {
    #[serde(default = "loopback")]
    pub host: String,
    pub port: u16,
}

#[cfg(feature = "http")]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "loopback")]
    pub host: String,
    pub port: u16,

    /// Path that accepts JSON-RPC POSTs.
    #[serde(default = "rpc_path")]
    pub rpc_path: String,

    /// Attach a permissive CORS layer for browser clients.
    #[serde(default = "enabled")]
    pub enable_cors: bool,
}

#[cfg(any(feature = "tcp", feature = "http"))]
fn loopback() -> String {
    "127.0.0.1".to_string()
}

#[cfg(feature = "http")]
fn rpc_path() -> String {
    "/mcp".to_string()
}

#[cfg(feature = "http")]
fn enabled() -> bool {
    true
}

#[cfg(feature = "tcp")]
impl TcpConfig {
    pub const DEFAULT_PORT: u16 = 3000;

    fn from_lookup(var: &impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: var("MCP_TCP_HOST").unwrap_or_else(loopback),
            port: port_from(var, "MCP_TCP_PORT", Self::DEFAULT_PORT),
        }
    }
}

#[cfg(feature = "tcp")]
impl Default for TcpConfig {
    fn default() -> Self {
        Self::from_lookup(&|_: &str| None)
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    pub const DEFAULT_PORT: u16 = 8080;

    fn from_lookup(var: &impl Fn(&str) -> Option<String>) -> Self {
        let enable_cors = match var("MCP_HTTP_CORS") {
            Some(v) => !(v.eq_ignore_ascii_case("false") || v == "0"),
            None => enabled(),
        };

        Self {
            host: var("MCP_HTTP_HOST").unwrap_or_else(loopback),
            port: port_from(var, "MCP_HTTP_PORT", Self::DEFAULT_PORT),
            rpc_path: var("MCP_HTTP_PATH").unwrap_or_else(rpc_path),
            enable_cors,
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self::from_lookup(&|_: &str| None)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::from_lookup(|_: &str| None)
    }
}

impl TransportConfig {
    /// Load transport config from `MCP_TRANSPORT` and the matching
    /// `MCP_TCP_*` / `MCP_HTTP_*` variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let requested = var("MCP_TRANSPORT").unwrap_or_default().to_lowercase();

        match requested.as_str() {
            #[cfg(feature = "tcp")]
            "tcp" => return Self::Tcp(TcpConfig::from_lookup(&var)),
            #[cfg(feature = "http")]
            "http" => return Self::Http(HttpConfig::from_lookup(&var)),
            #[cfg(feature = "stdio")]
            "stdio" => return Self::Stdio,
            "" => {}
            other => tracing::warn!("Transport '{}' is not available, using default", other),
        }

        #[cfg(feature = "stdio")]
        return Self::Stdio;

        #[cfg(all(not(feature = "stdio"), feature = "tcp"))]
        return Self::Tcp(TcpConfig::from_lookup(&var));

        #[cfg(all(not(feature = "stdio"), not(feature = "tcp"), feature = "http"))]
        return Self::Http(HttpConfig::from_lookup(&var));
    }

    /// Human-readable summary for startup logs.
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => write!(f, "STDIO (standard MCP mode)"),
            #[cfg(feature = "tcp")]
            Self::Tcp(cfg) => write!(f, "TCP on {}:{}", cfg.host, cfg.port),
            #[cfg(feature = "http")]
            Self::Http(cfg) => write!(f, "HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }
}

/// Parse a port variable, keeping `default` when it is absent or garbage.
#[cfg(any(feature = "tcp", feature = "http"))]
fn port_from(var: &impl Fn(&str) -> Option<String>, name: &str, default: u16) -> u16 {
    let Some(raw) = var(name) else {
        return default;
    };
    raw.parse().unwrap_or_else(|_| {
        tracing::warn!("Ignoring invalid {}: {}", name, raw);
        default
    })
}
