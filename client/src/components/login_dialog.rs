//! Username/password dialog that exchanges credentials for a bearer token.

#[cfg(test)]
#[path = "login_dialog_test.rs"]
mod login_dialog_test;

use leptos::prelude::*;
use session::{ApiConfig, FetchError};

use crate::app::AppSession;
use crate::state::auth::AuthState;

/// Operator-facing text for a failed token exchange.
pub fn login_error_message(err: &FetchError) -> String {
    match err {
        FetchError::Status { status, body } => {
            let detail = session::api::error_message(body).unwrap_or_else(|| format!("HTTP {status}"));
            format!("Login failed: {detail}")
        }
        FetchError::Logical(message) => format!("Login failed: {message}"),
        FetchError::Network(_) | FetchError::Parse(_) => format!("Login failed: {err}"),
    }
}

/// Login form. On success the token is stored in the session and the parent
/// is told through `auth` (`token_received` closes the dialog).
#[component]
pub fn LoginDialog(auth: RwSignal<AuthState>) -> impl IntoView {
    let config = expect_context::<ApiConfig>();
    let session = expect_context::<AppSession>();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let username_value = username.get_untracked();
        let password_value = password.get_untracked();
        busy.set(true);
        info.set("Requesting token...".to_owned());

        #[cfg(feature = "csr")]
        {
            let config = config.clone();
            let session = session.clone();
            leptos::task::spawn_local(async move {
                let token = crate::net::api::fetch_token(&config, &username_value, &password_value)
                    .await
                    .and_then(session::api::decode_token);
                match token {
                    Ok(token) => match session.set_token(&token) {
                        Ok(()) => {
                            log::info!("operator {username_value} logged in");
                            password.set(String::new());
                            info.set(String::new());
                            auth.update(AuthState::token_received);
                        }
                        Err(e) => info.set(format!("Could not store token: {e}")),
                    },
                    Err(e) => info.set(login_error_message(&e)),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (username_value, password_value, &config, &session);
        }
    };

    let on_cancel = move |_| auth.update(|a| a.login_open = false);

    view! {
        <div class="dialog-backdrop">
            <form class="dialog dialog--login" aria-labelledby="login-dialog-title" on:submit=on_submit>
                <h2 id="login-dialog-title">"Login"</h2>
                <input
                    class="dialog__input"
                    type="text"
                    autocomplete="off"
                    autofocus=true
                    placeholder="username"
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
                <div class="dialog__password">
                    <input
                        class="dialog__input"
                        type=move || if show_password.get() { "text" } else { "password" }
                        autocomplete="off"
                        placeholder="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button
                        class="btn dialog__toggle"
                        type="button"
                        aria-label="toggle password visibility"
                        on:click=move |_| show_password.update(|shown| *shown = !*shown)
                    >
                        {move || if show_password.get() { "Hide" } else { "Show" }}
                    </button>
                </div>
                <Show when=move || !info.get().is_empty()>
                    <p class="dialog__message">{move || info.get()}</p>
                </Show>
                <div class="dialog__actions">
                    <button class="btn" type="button" on:click=on_cancel>"Cancel"</button>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        "Get Token"
                    </button>
                </div>
            </form>
        </div>
    }
}
