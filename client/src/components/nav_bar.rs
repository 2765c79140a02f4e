//! Top bar with the Login/Logout toggle.
//!
//! SYSTEM CONTEXT
//! ==============
//! The button re-checks the cookie on every click rather than trusting the
//! signal, so a token that expired while the page was open flips the button
//! straight to opening the login dialog.

use leptos::prelude::*;

use crate::app::AppSession;
use crate::components::login_dialog::LoginDialog;
use crate::state::auth::{AuthState, NavAction};

#[component]
pub fn NavBar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<AppSession>();

    let on_nav = move |_| match AuthState::new(session.is_logged_in()).nav_action() {
        NavAction::LogOut => {
            if let Err(e) = session.log_out() {
                log::warn!("logout could not clear token: {e}");
            }
            auth.update(AuthState::logged_out);
        }
        NavAction::OpenLogin => auth.update(|a| {
            a.logged_in = false;
            a.login_open = true;
        }),
    };

    view! {
        <header class="nav-bar">
            <span class="nav-bar__icon" aria-hidden="true">"🛡"</span>
            <h1 class="nav-bar__title">"Admin"</h1>
            <button class="btn nav-bar__login" on:click=on_nav>
                {move || auth.get().nav_label()}
            </button>
            <Show when=move || auth.get().login_open>
                <LoginDialog auth=auth/>
            </Show>
        </header>
    }
}
