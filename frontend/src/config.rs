//! Deployment constants for the backend and the identity provider.

use crate::auth::provider::IdentityConfig;
use shared::workflow::DEFAULT_MAX_UPLOAD_BYTES;

/// Origin of the prediction backend; visualization/chart URLs are joined
/// against this.
pub const BACKEND_ORIGIN: &str = "http://localhost:5000";

/// All REST calls go under the `/api` prefix.
pub const API_BASE_URL: &str = "http://localhost:5000/api";

pub const MAX_UPLOAD_BYTES: u64 = DEFAULT_MAX_UPLOAD_BYTES;

pub fn identity_config() -> IdentityConfig {
    // Web API key from the identity provider console; safe to embed.
    IdentityConfig::new(
        "REPLACE_WITH_WEB_API_KEY",
        format!("{BACKEND_ORIGIN}/auth/federated/start"),
    )
}
