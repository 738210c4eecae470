use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum WalletError {
    InvalidInput,
    InvalidAmount,
    UsernameTaken,
    InvalidCredentials,
    PlayerNotFound,
    DuplicateTransaction,
    InsufficientFunds,
    Internal(String),
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput => f.write_str("Invalid input"),
            Self::InvalidAmount => f.write_str("Invalid amount"),
            Self::UsernameTaken => f.write_str("Username already taken"),
            Self::InvalidCredentials => f.write_str("Invalid username or password"),
            Self::PlayerNotFound => f.write_str("Player not found"),
            Self::DuplicateTransaction => f.write_str("Duplicate transaction"),
            Self::InsufficientFunds => f.write_str("Insufficient funds"),
            Self::Internal(e) => write!(f, "Internal server error: {}", e),
        }
    }
}

impl std::error::Error for WalletError {}

impl WalletError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput | Self::InvalidAmount | Self::InsufficientFunds => StatusCode::BAD_REQUEST,
            Self::UsernameTaken | Self::DuplicateTransaction => StatusCode::CONFLICT,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::PlayerNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WalletError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Internal(e) => {
                tracing::error!("Internal wallet error: {}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (self.status(), Json(json!({ "error": message }))).into_response()
    }
}
