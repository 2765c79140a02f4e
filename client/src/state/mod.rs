//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `users`) so components depend on small
//! focused models provided through Leptos context.

pub mod auth;
pub mod users;
