use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;

use crate::api::{
    ApiError, ErrorResponse, GameApi, LoginRequest, LoginResponse, RegisterRequest, WinRequest,
};
use crate::constants::{LOGIN_ENDPOINT, REGISTER_ENDPOINT, WIN_ENDPOINT};

/// JSON-over-HTTP client for the game server.
#[derive(Debug, Clone)]
pub struct HttpGameApi {
    base_url: String,
    client: Client,
}

impl HttpGameApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let request = self.client.post(&url).json(body);

        // Browsers drop cookies on cross-origin fetches unless asked.
        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        let response = request.send().await.map_err(|e| {
            log::error!("Request to {} failed: {}", url, e);
            ApiError::Transport(e.to_string())
        })?;

        if response.status().is_success() {
            Ok(response)
        } else {
            log::warn!("{} answered {}", url, response.status());
            Err(rejection(response).await)
        }
    }
}

async fn rejection(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let message = response
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(|body| body.error);
    ApiError::Rejected { status, message }
}

#[async_trait(?Send)]
impl GameApi for HttpGameApi {
    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.post(REGISTER_ENDPOINT, request).await?;
        Ok(())
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response = self.post(LOGIN_ENDPOINT, request).await?;
        response
            .json::<LoginResponse>()
            .await
            .map_err(|e| ApiError::Transport(format!("Error parsing login response: {}", e)))
    }

    async fn report_win(&self, request: &WinRequest) -> Result<(), ApiError> {
        self.post(WIN_ENDPOINT, request).await?;
        Ok(())
    }
}
