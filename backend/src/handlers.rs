use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use slots_shared::api::{
    LoginRequest, LoginResponse, PurchaseRequest, RegisterRequest, RegisterResponse,
    TransactionResponse, WinRequest,
};
use slots_shared::validation::validate_credentials;
use tracing::{info, warn};

use crate::error::WalletError;
use crate::store::{hash_password, verify_password, Player};
use crate::AppState;

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, WalletError> {
    payload.map(|Json(value)| value).map_err(|e| {
        warn!("Failed to bind request: {}", e);
        WalletError::InvalidInput
    })
}

async fn blocking<T, F>(work: F) -> Result<T, WalletError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| WalletError::Internal(e.to_string()))
}

pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, WalletError> {
    let input = body(payload)?;
    if validate_credentials(&input.player_id, &input.password).is_err() || input.name.is_empty() {
        return Err(WalletError::InvalidInput);
    }
    if state.store.lock().await.player_exists(&input.player_id) {
        return Err(WalletError::UsernameTaken);
    }

    let password = input.password.clone();
    let password_hash = blocking(move || hash_password(&password)).await??;

    state.store.lock().await.insert_player(Player {
        player_id: input.player_id.clone(),
        name: input.name,
        password_hash,
        balance: input.balance,
    })?;

    info!("Registered player {} with balance {}", input.player_id, input.balance);
    Ok(Json(RegisterResponse {
        player_id: input.player_id,
        message: "Registration successful".to_string(),
    }))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, WalletError> {
    let input = body(payload)?;
    info!("Login attempt: player_id={}", input.player_id);

    let player = state
        .store
        .lock()
        .await
        .player(&input.player_id)
        .cloned()
        .ok_or(WalletError::InvalidCredentials)?;

    let password = input.password;
    let password_hash = player.password_hash.clone();
    if !blocking(move || verify_password(&password, &password_hash)).await? {
        warn!("Login failed for {}", input.player_id);
        return Err(WalletError::InvalidCredentials);
    }

    Ok(Json(LoginResponse {
        player_id: Some(player.player_id),
        balance: player.balance,
    }))
}

pub async fn win(
    State(state): State<AppState>,
    payload: Result<Json<WinRequest>, JsonRejection>,
) -> Result<Json<TransactionResponse>, WalletError> {
    let input = body(payload)?;
    let balance = state
        .store
        .lock()
        .await
        .process_win(&input.player_id, input.transaction_id, input.amount)
        .map_err(|e| {
            warn!("Win {} for {} refused: {}", input.transaction_id, input.player_id, e);
            e
        })?;

    info!("Credited {} to {} (transaction {})", input.amount, input.player_id, input.transaction_id);
    Ok(Json(TransactionResponse {
        player_id: input.player_id,
        balance,
    }))
}

pub async fn purchase(
    State(state): State<AppState>,
    payload: Result<Json<PurchaseRequest>, JsonRejection>,
) -> Result<Json<TransactionResponse>, WalletError> {
    let input = body(payload)?;
    let balance = state
        .store
        .lock()
        .await
        .process_purchase(&input.player_id, input.transaction_id, input.amount)?;

    info!("Debited {} from {} (transaction {})", input.amount, input.player_id, input.transaction_id);
    Ok(Json(TransactionResponse {
        player_id: input.player_id,
        balance,
    }))
}
