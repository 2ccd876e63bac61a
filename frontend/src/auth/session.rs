use serde::{Deserialize, Serialize};

/// Refresh this long before the token actually expires.
pub const REFRESH_MARGIN_MS: f64 = 5.0 * 60.0 * 1000.0;

/// Snapshot of the signed-in user handed to subscribers and mirrored into
/// local storage. Deliberately token-free.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserInfo {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
}

/// The live authenticated session. Owned exclusively by the auth client;
/// everything else sees [`UserInfo`] snapshots.
#[derive(Clone, Debug)]
pub struct Session {
    pub user: UserInfo,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at_ms: f64,
}

impl Session {
    pub fn new(user: UserInfo, id_token: String, refresh_token: String, expires_in_secs: f64, now_ms: f64) -> Self {
        Self {
            user,
            id_token,
            refresh_token,
            expires_at_ms: now_ms + expires_in_secs * 1000.0,
        }
    }

    /// True once the token is inside the refresh margin (or past expiry).
    pub fn needs_refresh(&self, now_ms: f64) -> bool {
        now_ms + REFRESH_MARGIN_MS >= self.expires_at_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(expires_in_secs: f64) -> Session {
        Session::new(
            UserInfo {
                uid: "u1".into(),
                email: "a@b.c".into(),
                display_name: "A".into(),
                photo_url: None,
            },
            "id-token".into(),
            "refresh-token".into(),
            expires_in_secs,
            0.0,
        )
    }

    #[test]
    fn fresh_token_does_not_need_refresh() {
        let s = session(3600.0);
        assert!(!s.needs_refresh(0.0));
    }

    #[test]
    fn token_inside_margin_needs_refresh() {
        let s = session(3600.0);
        // 4 minutes before expiry is inside the 5-minute margin.
        assert!(s.needs_refresh(3600.0 * 1000.0 - 4.0 * 60.0 * 1000.0));
    }

    #[test]
    fn expired_token_needs_refresh() {
        let s = session(3600.0);
        assert!(s.needs_refresh(3601.0 * 1000.0));
    }
}
