//! Read-only table of backend user records.

#[cfg(test)]
#[path = "user_table_test.rs"]
mod user_table_test;

use leptos::prelude::*;
use session::User;

const MISSING: &str = "—";

/// Render `2019-12-12T07:40:33.123Z` as `2019-12-12 07:40:33`; anything that
/// does not look like RFC 3339 is shown as-is.
pub fn format_created(raw: &str) -> String {
    let bytes = raw.as_bytes();
    if bytes.len() >= 19 && bytes[10] == b'T' && raw.is_char_boundary(19) {
        format!("{} {}", &raw[..10], &raw[11..19])
    } else {
        raw.to_owned()
    }
}

/// Display strings for the username, created, and status columns.
pub fn user_cells(user: &User) -> [String; 3] {
    [
        user.username.clone().unwrap_or_else(|| MISSING.to_owned()),
        user.created.as_deref().map_or_else(|| MISSING.to_owned(), format_created),
        user.status.map_or_else(|| MISSING.to_owned(), |status| status.to_string()),
    ]
}

/// Pure renderer: one row per user, no fetching of its own.
#[component]
pub fn UserTable(#[prop(into)] users: Signal<Vec<User>>) -> impl IntoView {
    view! {
        <table class="user-table" aria-label="user table">
            <thead>
                <tr>
                    <th>"Username"</th>
                    <th>"Created"</th>
                    <th>"Status"</th>
                    <th>"Enabled"</th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    users
                        .get()
                        .into_iter()
                        .map(|user| {
                            let [username, created, status] = user_cells(&user);
                            let enabled = user.enabled.unwrap_or(false);
                            view! {
                                <tr>
                                    <th scope="row">{username}</th>
                                    <td>{created}</td>
                                    <td>{status}</td>
                                    <td>
                                        <input
                                            type="checkbox"
                                            class="user-table__enabled"
                                            aria-label="enabled"
                                            prop:checked=enabled
                                            disabled=true
                                        />
                                    </td>
                                </tr>
                            }
                        })
                        .collect_view()
                }}
            </tbody>
        </table>
    }
}
