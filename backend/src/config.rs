use axum::http::HeaderValue;
use std::env;
use std::fmt;
use std::net::SocketAddr;

pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct WalletConfig {
    pub addr: SocketAddr,
    /// Browser origin allowed to call the wallet with credentials.
    pub allowed_origin: HeaderValue,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidAddr(String),
    InvalidOrigin(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAddr(value) => write!(f, "WALLET_ADDR is not a socket address: {}", value),
            Self::InvalidOrigin(value) => write!(f, "WALLET_ALLOWED_ORIGIN is not a valid origin: {}", value),
        }
    }
}

impl std::error::Error for ConfigError {}

impl WalletConfig {
    /// Reads `WALLET_ADDR` and `WALLET_ALLOWED_ORIGIN`, falling back to local defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("WALLET_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let origin = env::var("WALLET_ALLOWED_ORIGIN").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN.to_string());
        Self::parse(&addr, &origin)
    }

    pub fn parse(addr: &str, origin: &str) -> Result<Self, ConfigError> {
        let addr = addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidAddr(addr.to_string()))?;
        let allowed_origin = origin
            .parse::<HeaderValue>()
            .map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))?;
        Ok(Self { addr, allowed_origin })
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            allowed_origin: HeaderValue::from_static(DEFAULT_ALLOWED_ORIGIN),
        }
    }
}
