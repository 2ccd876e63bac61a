//! HTTP client for the prediction backend.
//!
//! Every method issues exactly one request against the configured base URL,
//! attaching a freshly minted bearer token when a session exists. Nothing is
//! retried; failures map to [`ApiError`] and surface to the caller.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Deserialize;
use thiserror::Error;

use shared::{
    HistoryEntry, HistoryResponse, PredictionResponse, ProfileResponse, ProfileUser, StatsSnapshot,
};

use crate::auth::AuthClient;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error. Check your connection and try again.")]
    Network(String),
    /// 401/403 — the caller should treat the session as invalid.
    #[error("Your session has expired. Please sign in again.")]
    Auth(u16),
    /// Other 4xx, carrying the server-supplied message when present.
    #[error("{0}")]
    Validation(String),
    #[error("Server error: {0}")]
    Server(u16),
}

/// Error body the backend uses for every failure: `{ "error": "..." }`.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    auth: AuthClient,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, auth: AuthClient) -> Self {
        Self {
            base_url: base_url.into(),
            auth,
        }
    }

    pub async fn get_profile(&self) -> Result<ProfileUser, ApiError> {
        let req = self.authorize(Request::get(&self.url("/auth/profile"))).await;
        let resp = send(req).await?;
        Ok(read_json::<ProfileResponse>(resp).await?.user)
    }

    /// Multipart upload of the selected image; the single state-changing
    /// call in the system.
    pub async fn upload_image(
        &self,
        file: &gloo_file::File,
    ) -> Result<PredictionResponse, ApiError> {
        let form_data = web_sys::FormData::new()
            .map_err(|_| ApiError::Validation("Failed to prepare upload".to_string()))?;
        form_data
            .append_with_blob("image", file.as_ref())
            .map_err(|_| ApiError::Validation("Failed to prepare upload".to_string()))?;

        let req = self
            .authorize(Request::post(&self.url("/predict/upload")))
            .await;
        let resp = req
            .body(form_data)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(resp).await
    }

    pub async fn get_history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        let req = self
            .authorize(Request::get(&self.url("/predict/history")))
            .await;
        let resp = send(req).await?;
        // Order is whatever the backend sent; no client-side re-sort.
        Ok(read_json::<HistoryResponse>(resp).await?.history)
    }

    pub async fn get_stats(&self) -> Result<StatsSnapshot, ApiError> {
        let req = self
            .authorize(Request::get(&self.url("/predict/stats")))
            .await;
        let resp = send(req).await?;
        read_json(resp).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.auth.current_token().await {
            Ok(Some(token)) => req.header("Authorization", &format!("Bearer {token}")),
            Ok(None) => req,
            Err(e) => {
                log::warn!("Token refresh failed, sending request unauthenticated: {e}");
                req
            }
        }
    }
}

async fn send(req: RequestBuilder) -> Result<Response, ApiError> {
    req.send().await.map_err(|e| ApiError::Network(e.to_string()))
}

async fn read_json<T: for<'de> Deserialize<'de>>(resp: Response) -> Result<T, ApiError> {
    let status = resp.status();
    if resp.ok() {
        return resp
            .json::<T>()
            .await
            .map_err(|e| ApiError::Validation(format!("Failed to parse response: {e}")));
    }
    let body_error = resp.json::<ErrorBody>().await.ok().map(|b| b.error);
    Err(classify_failure(status, body_error))
}

/// Map an HTTP failure status plus the optional server message to the error
/// taxonomy. Pure so the mapping is testable without a transport.
fn classify_failure(status: u16, body_error: Option<String>) -> ApiError {
    match status {
        401 | 403 => ApiError::Auth(status),
        400..=499 => {
            let message = body_error
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Upload failed. Please try again.".to_string());
            ApiError::Validation(message)
        }
        _ => ApiError::Server(status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_statuses_map_to_auth() {
        assert_eq!(classify_failure(401, None), ApiError::Auth(401));
        assert_eq!(
            classify_failure(403, Some("forbidden".to_string())),
            ApiError::Auth(403)
        );
    }

    #[test]
    fn client_errors_carry_server_message() {
        assert_eq!(
            classify_failure(400, Some("No image uploaded".to_string())),
            ApiError::Validation("No image uploaded".to_string())
        );
    }

    #[test]
    fn client_errors_without_message_get_fallback() {
        let ApiError::Validation(message) = classify_failure(422, None) else {
            panic!("expected validation error");
        };
        assert!(!message.is_empty());

        let ApiError::Validation(message) = classify_failure(400, Some(String::new())) else {
            panic!("expected validation error");
        };
        assert!(!message.is_empty());
    }

    #[test]
    fn server_errors_keep_status() {
        assert_eq!(classify_failure(500, None), ApiError::Server(500));
        assert_eq!(
            classify_failure(503, Some("down".to_string())),
            ApiError::Server(503)
        );
    }
}
