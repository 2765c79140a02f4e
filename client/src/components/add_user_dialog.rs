//! "Add User" dialog. Both actions only close it; nothing is sent.

use leptos::prelude::*;

#[component]
pub fn AddUserDialog(on_close: Callback<()>) -> impl IntoView {
    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div
                class="dialog dialog--add-user"
                aria-labelledby="add-user-dialog-title"
                on:click=move |ev| ev.stop_propagation()
            >
                <h2 id="add-user-dialog-title">"Add User"</h2>
                <p>"To add an user, please enter a username and password here."</p>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button class="btn btn--primary" on:click=move |_| on_close.run(())>"Add"</button>
                </div>
            </div>
        </div>
    }
}
