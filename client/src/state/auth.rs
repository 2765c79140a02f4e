//! Login state for the nav bar and data-loading components.
//!
//! SYSTEM CONTEXT
//! ==============
//! The cookie is the source of truth; this signal mirrors
//! `Session::is_logged_in` so the UI re-renders and dependent fetches re-run
//! when the operator logs in or out.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

/// What the nav bar button does when clicked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavAction {
    LogOut,
    OpenLogin,
}

/// Authentication state shared through context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub logged_in: bool,
    pub login_open: bool,
}

impl AuthState {
    pub fn new(logged_in: bool) -> Self {
        Self { logged_in, login_open: false }
    }

    pub fn nav_label(&self) -> &'static str {
        if self.logged_in { "Logout" } else { "Login" }
    }

    pub fn nav_action(&self) -> NavAction {
        if self.logged_in { NavAction::LogOut } else { NavAction::OpenLogin }
    }

    /// A token was stored: close the dialog and flip to logged in.
    pub fn token_received(&mut self) {
        self.logged_in = true;
        self.login_open = false;
    }

    pub fn logged_out(&mut self) {
        self.logged_in = false;
    }
}
