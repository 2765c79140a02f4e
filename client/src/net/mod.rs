//! Networking for the admin console.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` executes the requests described by `session::api` over `gloo-net`.

pub mod api;
