//! Session/route guard for the authenticated area.
//!
//! Subscribes to session changes once on mount and holds the subscription
//! handle so unmounting drops the registration. Until the first callback
//! fires, nothing is decided: the guard shows a loading indicator and
//! renders neither the protected content nor the fallback.

use yew::prelude::*;

use crate::auth::{AuthClient, UserInfo};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Gate {
    Loading,
    SignedOut,
    SignedIn,
}

/// `None` means no determination has been made yet; `Some(None)` means the
/// provider reported no session.
fn gate(determination: &Option<Option<UserInfo>>) -> Gate {
    match determination {
        None => Gate::Loading,
        Some(None) => Gate::SignedOut,
        Some(Some(_)) => Gate::SignedIn,
    }
}

#[derive(Properties, PartialEq)]
pub struct AuthGateProps {
    pub auth: AuthClient,
    /// Rendered instead of the children while signed out.
    pub fallback: Html,
    pub children: Children,
}

#[function_component(AuthGate)]
pub fn auth_gate(props: &AuthGateProps) -> Html {
    let determination = use_state(|| None::<Option<UserInfo>>);

    {
        let determination = determination.clone();
        use_effect_with(props.auth.clone(), move |auth| {
            let subscription = auth.subscribe(Callback::from(move |user| {
                determination.set(Some(user));
            }));
            move || drop(subscription)
        });
    }

    match gate(&determination) {
        Gate::Loading => html! {
            <div class="auth-loading">
                <i class="fa-solid fa-spinner fa-spin fa-2x"></i>
            </div>
        },
        Gate::SignedOut => props.fallback.clone(),
        Gate::SignedIn => html! { <>{ props.children.clone() }</> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserInfo {
        UserInfo {
            uid: "u1".into(),
            email: "a@b.c".into(),
            display_name: "A".into(),
            photo_url: None,
        }
    }

    #[test]
    fn undetermined_state_shows_loading_not_a_redirect() {
        assert_eq!(gate(&None), Gate::Loading);
    }

    #[test]
    fn absent_session_falls_back_to_sign_in() {
        assert_eq!(gate(&Some(None)), Gate::SignedOut);
    }

    #[test]
    fn present_session_renders_protected_content() {
        assert_eq!(gate(&Some(Some(user()))), Gate::SignedIn);
    }
}
