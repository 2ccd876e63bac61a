//! The identity client. One instance owns the session and its token
//! lifecycle; the rest of the app gets a cloneable handle plus a
//! subscription-based view of sign-in state.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use futures::channel::oneshot;
use gloo_events::EventListener;
use gloo_storage::{LocalStorage, Storage};
use gloo_timers::callback::Interval;
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::MessageEvent;
use yew::Callback;

use super::error::ProviderError;
use super::provider::{self, IdentityConfig, TokenGrant};
use super::session::{Session, UserInfo};

/// Storage key for the cached user descriptor. The descriptor is a fast-read
/// mirror, never the source of truth, and holds no tokens.
const USER_STORAGE_KEY: &str = "user";

struct Inner {
    session: Option<Session>,
    subscribers: HashMap<u64, Callback<Option<UserInfo>>>,
    next_subscriber: u64,
}

#[derive(Clone)]
pub struct AuthClient {
    config: Rc<IdentityConfig>,
    inner: Rc<RefCell<Inner>>,
}

impl PartialEq for AuthClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Handle returned by [`AuthClient::subscribe`]. Dropping it removes the
/// callback registration, so a component that holds one for its lifetime
/// cannot leak its subscription.
pub struct SessionSubscription {
    inner: Weak<RefCell<Inner>>,
    id: u64,
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().subscribers.remove(&self.id);
        }
    }
}

/// Payload posted back by the federated consent popup.
#[derive(Deserialize)]
struct FederatedPayload {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    uid: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    photo_url: Option<String>,
    #[serde(default)]
    id_token: String,
    #[serde(default)]
    refresh_token: String,
    #[serde(default)]
    expires_in: f64,
}

impl AuthClient {
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            config: Rc::new(config),
            inner: Rc::new(RefCell::new(Inner {
                session: None,
                subscribers: HashMap::new(),
                next_subscriber: 0,
            })),
        }
    }

    pub fn current_user(&self) -> Option<UserInfo> {
        self.inner.borrow().session.as_ref().map(|s| s.user.clone())
    }

    /// Register a session-change callback. It fires immediately with the
    /// current state and again on every subsequent sign-in/out. This is the
    /// only way the rest of the app learns session state.
    pub fn subscribe(&self, callback: Callback<Option<UserInfo>>) -> SessionSubscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_subscriber;
            inner.next_subscriber += 1;
            inner.subscribers.insert(id, callback.clone());
            id
        };
        callback.emit(self.current_user());
        SessionSubscription {
            inner: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<UserInfo, ProviderError> {
        let grant = provider::sign_up(&self.config, email, password).await?;
        provider::update_display_name(&self.config, &grant.id_token, display_name).await?;
        Ok(self.install_from_grant(grant, Some(display_name)))
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserInfo, ProviderError> {
        let grant = provider::sign_in_with_password(&self.config, email, password).await?;
        Ok(self.install_from_grant(grant, None))
    }

    /// Federated sign-in via a consent popup. The popup posts the token
    /// payload back as a `message` event; closing it without finishing is
    /// reported as [`ProviderError::PopupClosed`].
    pub async fn sign_in_with_federated_provider(&self) -> Result<UserInfo, ProviderError> {
        let window =
            web_sys::window().ok_or_else(|| ProviderError::Unknown("NO_WINDOW".to_string()))?;
        let popup = window
            .open_with_url_and_target_and_features(
                &self.config.consent_url,
                "_blank",
                "popup,width=500,height=650",
            )
            .map_err(|_| ProviderError::PopupBlocked)?
            .ok_or(ProviderError::PopupBlocked)?;

        let (tx, rx) = oneshot::channel::<Result<FederatedPayload, ProviderError>>();
        let tx = Rc::new(RefCell::new(Some(tx)));

        let listener = {
            let tx = Rc::clone(&tx);
            EventListener::new(&window, "message", move |event| {
                let Some(event) = event.dyn_ref::<MessageEvent>() else {
                    return;
                };
                let Some(data) = event.data().as_string() else {
                    return;
                };
                let Ok(payload) = serde_json::from_str::<FederatedPayload>(&data) else {
                    return;
                };
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(Ok(payload));
                }
            })
        };
        let poll = {
            let tx = Rc::clone(&tx);
            let popup = popup.clone();
            Interval::new(500, move || {
                if popup.closed().unwrap_or(true) {
                    if let Some(tx) = tx.borrow_mut().take() {
                        let _ = tx.send(Err(ProviderError::PopupClosed));
                    }
                }
            })
        };

        let outcome = rx.await.map_err(|_| ProviderError::PopupClosed)?;
        drop(listener);
        drop(poll);
        let _ = popup.close();

        let payload = outcome?;
        if let Some(code) = payload.error {
            return Err(ProviderError::from_code(&code));
        }
        if payload.id_token.is_empty() {
            return Err(ProviderError::Unknown("EMPTY_FEDERATED_PAYLOAD".to_string()));
        }

        let user = UserInfo {
            uid: payload.uid,
            email: payload.email.clone(),
            display_name: display_name_or_default(&payload.display_name, &payload.email),
            photo_url: payload.photo_url,
        };
        let session = Session::new(
            user.clone(),
            payload.id_token,
            payload.refresh_token,
            payload.expires_in,
            js_sys::Date::now(),
        );
        self.install(session);
        Ok(user)
    }

    /// Clear the session. Always succeeds locally; there is no remote call
    /// to fail.
    pub fn sign_out(&self) {
        LocalStorage::delete(USER_STORAGE_KEY);
        self.inner.borrow_mut().session = None;
        self.notify();
    }

    /// A valid bearer token for the current session, refreshed when inside
    /// the expiry margin. `Ok(None)` means no session.
    pub async fn current_token(&self) -> Result<Option<String>, ProviderError> {
        let (token, refresh_token, needs_refresh) = {
            let inner = self.inner.borrow();
            match &inner.session {
                None => return Ok(None),
                Some(s) => (
                    s.id_token.clone(),
                    s.refresh_token.clone(),
                    s.needs_refresh(js_sys::Date::now()),
                ),
            }
        };
        if !needs_refresh {
            return Ok(Some(token));
        }

        let refreshed = provider::refresh_id_token(&self.config, &refresh_token).await?;
        let expires_in = refreshed.expires_in.parse::<f64>().unwrap_or(3600.0);
        let mut inner = self.inner.borrow_mut();
        if let Some(session) = &mut inner.session {
            session.id_token = refreshed.id_token.clone();
            session.refresh_token = refreshed.refresh_token;
            session.expires_at_ms = js_sys::Date::now() + expires_in * 1000.0;
        }
        Ok(Some(refreshed.id_token))
    }

    fn install_from_grant(&self, grant: TokenGrant, display_name: Option<&str>) -> UserInfo {
        let display_name = match display_name {
            Some(name) => name.to_string(),
            None => display_name_or_default(&grant.display_name, &grant.email),
        };
        let user = UserInfo {
            uid: grant.local_id,
            email: grant.email,
            display_name,
            photo_url: None,
        };
        let expires_in = grant.expires_in.parse::<f64>().unwrap_or(3600.0);
        let session = Session::new(
            user.clone(),
            grant.id_token,
            grant.refresh_token,
            expires_in,
            js_sys::Date::now(),
        );
        self.install(session);
        user
    }

    fn install(&self, session: Session) {
        if let Err(e) = LocalStorage::set(USER_STORAGE_KEY, &session.user) {
            log::warn!("Failed to cache user descriptor: {e}");
        }
        self.inner.borrow_mut().session = Some(session);
        self.notify();
    }

    fn notify(&self) {
        // Emit outside the borrow; a subscriber may re-enter the client.
        let user = self.current_user();
        let callbacks: Vec<_> = self.inner.borrow().subscribers.values().cloned().collect();
        for callback in callbacks {
            callback.emit(user.clone());
        }
    }
}

fn display_name_or_default(name: &str, email: &str) -> String {
    if name.is_empty() {
        email.split('@').next().unwrap_or(email).to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use std::cell::Cell;

    fn client() -> AuthClient {
        AuthClient::new(config::identity_config())
    }

    #[test]
    fn subscribe_fires_immediately_with_absent_session() {
        let auth = client();
        let fired = Rc::new(Cell::new(0));
        let seen = Rc::new(Cell::new(true));

        let _sub = auth.subscribe(Callback::from({
            let fired = Rc::clone(&fired);
            let seen = Rc::clone(&seen);
            move |user: Option<UserInfo>| {
                fired.set(fired.get() + 1);
                seen.set(user.is_some());
            }
        }));

        assert_eq!(fired.get(), 1);
        assert!(!seen.get());
    }

    #[test]
    fn dropped_subscription_stops_receiving() {
        let auth = client();
        let fired = Rc::new(Cell::new(0));

        let sub = auth.subscribe(Callback::from({
            let fired = Rc::clone(&fired);
            move |_| fired.set(fired.get() + 1)
        }));
        assert_eq!(fired.get(), 1);

        drop(sub);
        auth.notify();
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn display_name_falls_back_to_email_prefix() {
        assert_eq!(display_name_or_default("", "jane@example.com"), "jane");
        assert_eq!(display_name_or_default("Jane D", "jane@example.com"), "Jane D");
    }
}
