//! User-table state fed by the list fetch.
//!
//! DESIGN
//! ======
//! Rows, the error snackbar, and the add-user dialog are one model so the
//! success and failure handlers stay trivial: success replaces the rows and
//! hides the error, failure empties the table and shows the fixed message.
//! Each failure bumps `error_serial`; an auto-hide timer only dismisses the
//! failure it was started for.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use std::time::Duration;

use session::{FETCH_FAILED_MESSAGE, FetchError, User};

/// How long the failure snackbar stays up without interaction.
pub const ERROR_AUTO_HIDE: Duration = Duration::from_secs(6);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsersState {
    pub users: Vec<User>,
    pub last_error: Option<FetchError>,
    pub show_error: bool,
    pub add_dialog_open: bool,
    pub error_serial: u64,
}

impl UsersState {
    pub fn apply_users(&mut self, users: Vec<User>) {
        self.users = users;
        self.last_error = None;
        self.show_error = false;
    }

    /// Record a failure; returns its serial for [`Self::expire_error`].
    pub fn apply_error(&mut self, err: FetchError) -> u64 {
        self.users.clear();
        self.last_error = Some(err);
        self.show_error = true;
        self.error_serial += 1;
        self.error_serial
    }

    pub fn dismiss_error(&mut self) {
        self.show_error = false;
    }

    /// Auto-hide for the failure numbered `serial`. Ignored once a newer
    /// failure has replaced it.
    pub fn expire_error(&mut self, serial: u64) {
        if serial == self.error_serial {
            self.show_error = false;
        }
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.show_error.then_some(FETCH_FAILED_MESSAGE)
    }
}
