//! User table that loads its rows from `/api/user/list`.
//!
//! SYSTEM CONTEXT
//! ==============
//! The fetch is keyed on the login state: it runs on mount, again after a
//! login or logout, and never twice for the same state. While a request is in
//! flight a progress indicator is shown over the table. Any failure empties
//! the table and raises the fixed error snackbar; there is no retry.

use leptos::prelude::*;
use session::api::decode_user_list;
use session::{ApiConfig, FetchError, FetchState, User};

use crate::app::AppSession;
use crate::components::add_user_dialog::AddUserDialog;
use crate::components::user_table::UserTable;
use crate::state::auth::AuthState;
use crate::state::users::UsersState;
use crate::util::use_fetch::use_fetch;

#[component]
pub fn FetchUserTable() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<ApiConfig>();
    let session = expect_context::<AppSession>();
    let state = RwSignal::new(UsersState::default());

    let on_data = Callback::new(move |users: Vec<User>| {
        log::debug!("loaded {} users", users.len());
        state.update(|s| s.apply_users(users));
    });
    let on_error = Callback::new(move |err: FetchError| {
        if let Some(serial) = state.try_update(|s| s.apply_error(err)) {
            schedule_error_auto_hide(state, serial);
        }
    });

    let fetch_state = use_fetch(
        move || auth.get().logged_in,
        move || {
            let config = config.clone();
            let session = session.clone();
            async move { crate::net::api::fetch_user_list(&config, &session).await }
        },
        decode_user_list,
        on_data,
        on_error,
    );

    let users = Signal::derive(move || state.get().users);
    let on_add_close = Callback::new(move |()| state.update(|s| s.add_dialog_open = false));

    view! {
        <section class="card">
            <div class="card__content">
                <Show when=move || fetch_state.with(FetchState::is_pending)>
                    <div class="progress" role="progressbar" aria-busy="true"></div>
                </Show>
                <UserTable users=users/>
            </div>
            <div class="card__actions">
                <button
                    class="btn btn--icon"
                    aria-label="add user"
                    on:click=move |_| state.update(|s| s.add_dialog_open = true)
                >
                    "+"
                </button>
            </div>
            <Show when=move || state.get().add_dialog_open>
                <AddUserDialog on_close=on_add_close/>
            </Show>
            <Show when=move || state.get().error_message().is_some()>
                <div class="snackbar" role="alert">
                    <span id="message-id">{move || state.get().error_message().unwrap_or_default()}</span>
                    <button
                        class="btn snackbar__close"
                        aria-label="close"
                        on:click=move |_| state.update(UsersState::dismiss_error)
                    >
                        "×"
                    </button>
                </div>
            </Show>
        </section>
    }
}

fn schedule_error_auto_hide(state: RwSignal<UsersState>, serial: u64) {
    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(async move {
            gloo_timers::future::sleep(crate::state::users::ERROR_AUTO_HIDE).await;
            state.try_update(|s| s.expire_error(serial));
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (state, serial);
    }
}
