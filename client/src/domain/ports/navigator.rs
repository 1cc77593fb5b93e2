//! Driven port for the navigation collaborator.

/// Host navigation hook invoked when the session ends.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Send the user to the login view.
    fn go_to_login(&self);
}
