//! Root component and shared context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds the session, the API config, and the auth signal once and
//! provides them through context; the nav bar, login dialog, and user table
//! all read from there.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use session::Session;

use crate::components::fetch_user_table::FetchUserTable;
use crate::components::footer::Copyright;
use crate::components::nav_bar::NavBar;
use crate::state::auth::AuthState;
use crate::util::config::api_config;
use crate::util::cookie::CookieTokenStore;

/// Session type used throughout the browser app.
pub type AppSession = Session<CookieTokenStore>;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = api_config();
    log::info!("admin backend at {}", config.base_url());
    let session = AppSession::new(CookieTokenStore);
    let auth = RwSignal::new(AuthState::new(session.is_logged_in()));

    provide_context(config);
    provide_context(session);
    provide_context(auth);

    view! {
        <Title text="Admin"/>
        <NavBar/>
        <main class="container">
            <FetchUserTable/>
        </main>
        <Copyright/>
    }
}
