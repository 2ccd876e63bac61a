use yew::prelude::*;

use crate::dashboard::{Dashboard, Msg};

/// Dashboard header: branding, signed-in user, sign-out.
pub fn render_header(model: &Dashboard, ctx: &Context<Dashboard>) -> Html {
    let link = ctx.link();
    let (name, email) = model
        .profile
        .as_ref()
        .map_or(("User".to_string(), String::new()), |p| {
            (p.name.clone(), p.email.clone())
        });

    html! {
        <header class="app-header">
            <div class="brand">
                <i class="fa-solid fa-notes-medical"></i>
                <span class="brand-name">{"DermaScan"}</span>
            </div>
            <div class="user-info">
                <div class="user-details">
                    <span class="user-name">{ name }</span>
                    <span class="user-email">{ email }</span>
                </div>
                <button
                    class="logout-button"
                    onclick={link.callback(|_| Msg::SignOut)}
                    title="Sign out"
                >
                    <i class="fa-solid fa-sign-out-alt"></i>
                    {" Sign Out"}
                </button>
            </div>
        </header>
    }
}
