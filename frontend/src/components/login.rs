//! Sign-in and sign-up pages, shown by the guard while no session exists.
//! Successful authentication is not handled here at all: the guard's
//! subscription observes the new session and swaps the view.

use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::utils::{render_error_banner, render_spinner};
use crate::auth::AuthClient;

/// Client-side checks run before the provider is contacted.
fn validate_signup(password: &str, confirm: &str) -> Option<&'static str> {
    if password != confirm {
        Some("Passwords do not match")
    } else if password.len() < 6 {
        Some("Password must be at least 6 characters")
    } else {
        None
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    SignIn,
    SignUp,
}

#[derive(Properties, PartialEq)]
pub struct AuthPagesProps {
    pub auth: AuthClient,
}

#[function_component(AuthPages)]
pub fn auth_pages(props: &AuthPagesProps) -> Html {
    let mode = use_state(|| Mode::SignIn);
    let busy = use_state(|| false);
    let error = use_state(|| None::<String>);

    let name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let confirm = use_state(String::new);

    let bind = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    let on_submit = {
        let mode = mode.clone();
        let busy = busy.clone();
        let error = error.clone();
        let name = name.clone();
        let email = email.clone();
        let password = password.clone();
        let confirm = confirm.clone();
        let auth = props.auth.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *busy {
                return;
            }
            if *mode == Mode::SignUp {
                if let Some(message) = validate_signup(&password, &confirm) {
                    error.set(Some(message.to_string()));
                    return;
                }
            }

            busy.set(true);
            error.set(None);

            let mode = *mode;
            let auth = auth.clone();
            let busy = busy.clone();
            let error = error.clone();
            let name = (*name).clone();
            let email = (*email).clone();
            let password = (*password).clone();
            spawn_local(async move {
                let outcome = match mode {
                    Mode::SignIn => auth.sign_in_with_password(&email, &password).await,
                    Mode::SignUp => auth.sign_up(&email, &password, &name).await,
                };
                if let Err(e) = outcome {
                    log::warn!("Authentication failed: {e:?}");
                    error.set(Some(e.to_string()));
                }
                busy.set(false);
            });
        })
    };

    let on_google = {
        let busy = busy.clone();
        let error = error.clone();
        let auth = props.auth.clone();
        Callback::from(move |_| {
            if *busy {
                return;
            }
            busy.set(true);
            error.set(None);

            let auth = auth.clone();
            let busy = busy.clone();
            let error = error.clone();
            spawn_local(async move {
                if let Err(e) = auth.sign_in_with_federated_provider().await {
                    log::warn!("Federated sign-in failed: {e:?}");
                    error.set(Some(e.to_string()));
                }
                busy.set(false);
            });
        })
    };

    let toggle_mode = {
        let mode = mode.clone();
        let error = error.clone();
        Callback::from(move |_| {
            mode.set(if *mode == Mode::SignIn {
                Mode::SignUp
            } else {
                Mode::SignIn
            });
            error.set(None);
        })
    };

    let (title, submit_label, toggle_label) = match *mode {
        Mode::SignIn => ("Welcome Back", "Sign In", "Need an account? Sign Up"),
        Mode::SignUp => ("Create Account", "Create Account", "Already have an account? Sign In"),
    };

    html! {
        <div class="auth-page">
            <div class="auth-card">
                <div class="brand">
                    <i class="fa-solid fa-notes-medical"></i>
                    <span class="brand-name">{"DermaScan"}</span>
                </div>
                <h2>{ title }</h2>
                { render_error_banner(error.as_deref()) }
                <form onsubmit={on_submit}>
                    {
                        if *mode == Mode::SignUp {
                            html! {
                                <input
                                    type="text"
                                    placeholder="Full name"
                                    value={(*name).clone()}
                                    oninput={bind(&name)}
                                    required=true
                                />
                            }
                        } else {
                            html! {}
                        }
                    }
                    <input
                        type="email"
                        placeholder="Email address"
                        value={(*email).clone()}
                        oninput={bind(&email)}
                        required=true
                    />
                    <input
                        type="password"
                        placeholder="At least 6 characters"
                        value={(*password).clone()}
                        oninput={bind(&password)}
                        required=true
                    />
                    {
                        if *mode == Mode::SignUp {
                            html! {
                                <input
                                    type="password"
                                    placeholder="Confirm your password"
                                    value={(*confirm).clone()}
                                    oninput={bind(&confirm)}
                                    required=true
                                />
                            }
                        } else {
                            html! {}
                        }
                    }
                    <button type="submit" class="auth-submit" disabled={*busy}>
                        {
                            if *busy {
                                render_spinner("Please wait...")
                            } else {
                                html! { { submit_label } }
                            }
                        }
                    </button>
                </form>
                <button class="google-button" disabled={*busy} onclick={on_google}>
                    <i class="fa-brands fa-google"></i>
                    {" Continue with Google"}
                </button>
                <button class="mode-toggle" onclick={toggle_mode}>
                    { toggle_label }
                </button>
            </div>
        </div>
    }
}
