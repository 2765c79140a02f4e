//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the session, API config, and auth signal from Leptos
//! context; only `fetch_user_table` talks to the network.

pub mod add_user_dialog;
pub mod fetch_user_table;
pub mod footer;
pub mod login_dialog;
pub mod nav_bar;
pub mod user_table;
