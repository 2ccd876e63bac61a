mod api;
mod auth;
mod components;
mod config;
mod dashboard;

use yew::prelude::*;

use api::ApiClient;
use auth::AuthClient;
use components::guard::AuthGate;
use components::login::AuthPages;
use dashboard::Dashboard;

#[function_component(App)]
fn app() -> Html {
    // Single owner of the session; everything else gets cloned handles.
    let auth = use_memo((), |_| AuthClient::new(config::identity_config()));
    let auth = (*auth).clone();
    let api = ApiClient::new(config::API_BASE_URL, auth.clone());

    let fallback = html! { <AuthPages auth={auth.clone()} /> };

    html! {
        <AuthGate auth={auth.clone()} {fallback}>
            <Dashboard {api} {auth} />
        </AuthGate>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<App>::new().render();
}
