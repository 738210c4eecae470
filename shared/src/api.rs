use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

// === Wire Types ===

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RegisterRequest {
    pub player_id: String,
    pub password: String,
    pub name: String,
    pub balance: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RegisterResponse {
    pub player_id: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LoginRequest {
    pub player_id: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LoginResponse {
    #[serde(default)]
    pub player_id: Option<String>,
    pub balance: i64,
}

/// A claim of credit for one winning spin.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WinRequest {
    pub player_id: String,
    pub transaction_id: u64,
    pub amount: i64,
}

/// Debit request understood by the wallet. The browser never sends one.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PurchaseRequest {
    pub player_id: String,
    pub transaction_id: u64,
    pub amount: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TransactionResponse {
    pub player_id: String,
    pub balance: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

// === Transport ===

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The server answered with a non-success status.
    Rejected { status: u16, message: Option<String> },
    /// The request never produced a usable response.
    Transport(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { status, message: Some(message) } => {
                write!(f, "Server rejected request ({}): {}", status, message)
            }
            Self::Rejected { status, message: None } => {
                write!(f, "Server rejected request ({})", status)
            }
            Self::Transport(e) => write!(f, "Transport error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

/// The remote game server as seen by the session controller.
#[async_trait(?Send)]
pub trait GameApi {
    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError>;
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;
    async fn report_win(&self, request: &WinRequest) -> Result<(), ApiError>;
}
