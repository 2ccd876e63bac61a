//! REST surface of the identity provider.
//!
//! Email/password registration and sign-in go to the identity-toolkit
//! origin; token refresh goes to the secure-token origin. Provider failures
//! arrive as `{ "error": { "message": "<CODE>" } }` and are mapped through
//! [`ProviderError::from_code`] at this boundary.

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use super::error::ProviderError;

#[derive(Clone, Debug, PartialEq)]
pub struct IdentityConfig {
    pub api_key: String,
    pub identity_origin: String,
    pub token_origin: String,
    /// Page the federated sign-in popup is opened on. It runs the provider
    /// consent flow and posts the token payload back via `postMessage`.
    pub consent_url: String,
}

impl IdentityConfig {
    pub fn new(api_key: impl Into<String>, consent_url: String) -> Self {
        Self {
            api_key: api_key.into(),
            identity_origin: "https://identitytoolkit.googleapis.com".to_string(),
            token_origin: "https://securetoken.googleapis.com".to_string(),
            consent_url,
        }
    }
}

#[derive(Serialize)]
struct PasswordCredentials<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(rename = "returnSecureToken")]
    return_secure_token: bool,
}

#[derive(Serialize)]
struct ProfileUpdate<'a> {
    #[serde(rename = "idToken")]
    id_token: &'a str,
    #[serde(rename = "displayName")]
    display_name: &'a str,
    #[serde(rename = "returnSecureToken")]
    return_secure_token: bool,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    grant_type: &'a str,
    refresh_token: &'a str,
}

/// Token bundle returned by sign-up and password sign-in.
#[derive(Deserialize, Debug)]
pub struct TokenGrant {
    #[serde(rename = "localId")]
    pub local_id: String,
    #[serde(rename = "idToken")]
    pub id_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
    #[serde(rename = "expiresIn")]
    pub expires_in: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "displayName", default)]
    pub display_name: String,
}

/// The secure-token endpoint answers in snake_case.
#[derive(Deserialize, Debug)]
pub struct RefreshedTokens {
    pub id_token: String,
    pub refresh_token: String,
    pub expires_in: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

async fn post_json<B: Serialize, T: for<'de> Deserialize<'de>>(
    url: &str,
    body: &B,
) -> Result<T, ProviderError> {
    let resp = Request::post(url)
        .json(body)
        .map_err(|e| ProviderError::Unknown(format!("REQUEST_BUILD: {e}")))?
        .send()
        .await
        .map_err(|e| ProviderError::Unknown(format!("NETWORK: {e}")))?;

    if resp.ok() {
        resp.json::<T>()
            .await
            .map_err(|e| ProviderError::Unknown(format!("BAD_RESPONSE: {e}")))
    } else {
        let code = resp
            .json::<ErrorBody>()
            .await
            .map(|b| b.error.message)
            .unwrap_or_else(|_| format!("HTTP_{}", resp.status()));
        Err(ProviderError::from_code(&code))
    }
}

pub async fn sign_up(
    cfg: &IdentityConfig,
    email: &str,
    password: &str,
) -> Result<TokenGrant, ProviderError> {
    let url = format!(
        "{}/v1/accounts:signUp?key={}",
        cfg.identity_origin, cfg.api_key
    );
    post_json(
        &url,
        &PasswordCredentials {
            email,
            password,
            return_secure_token: true,
        },
    )
    .await
}

pub async fn sign_in_with_password(
    cfg: &IdentityConfig,
    email: &str,
    password: &str,
) -> Result<TokenGrant, ProviderError> {
    let url = format!(
        "{}/v1/accounts:signInWithPassword?key={}",
        cfg.identity_origin, cfg.api_key
    );
    post_json(
        &url,
        &PasswordCredentials {
            email,
            password,
            return_secure_token: true,
        },
    )
    .await
}

/// Attach a display name to a freshly created account.
pub async fn update_display_name(
    cfg: &IdentityConfig,
    id_token: &str,
    display_name: &str,
) -> Result<(), ProviderError> {
    let url = format!(
        "{}/v1/accounts:update?key={}",
        cfg.identity_origin, cfg.api_key
    );
    let _: serde_json::Value = post_json(
        &url,
        &ProfileUpdate {
            id_token,
            display_name,
            return_secure_token: false,
        },
    )
    .await?;
    Ok(())
}

pub async fn refresh_id_token(
    cfg: &IdentityConfig,
    refresh_token: &str,
) -> Result<RefreshedTokens, ProviderError> {
    let url = format!("{}/v1/token?key={}", cfg.token_origin, cfg.api_key);
    post_json(
        &url,
        &RefreshRequest {
            grant_type: "refresh_token",
            refresh_token,
        },
    )
    .await
}
