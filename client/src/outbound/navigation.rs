//! Navigator adapters.

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::domain::ports::Navigator;

/// Navigation request emitted to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationRequest {
    /// Show the login view.
    Login,
}

/// Navigator forwarding requests over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    sender: mpsc::UnboundedSender<NavigationRequest>,
}

impl ChannelNavigator {
    /// Navigator plus the receiver the host should drain.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<NavigationRequest>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Navigator for ChannelNavigator {
    fn go_to_login(&self) {
        if self.sender.send(NavigationRequest::Login).is_err() {
            warn!("navigation receiver dropped; login redirect lost");
        }
    }
}

/// Navigator for headless hosts: records the redirect in the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn go_to_login(&self) {
        info!(target: "catalogue::navigation", "login required");
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn channel_navigator_delivers_login_requests() {
        let (navigator, mut receiver) = ChannelNavigator::channel();
        navigator.go_to_login();
        navigator.go_to_login();

        assert_eq!(receiver.try_recv(), Ok(NavigationRequest::Login));
        assert_eq!(receiver.try_recv(), Ok(NavigationRequest::Login));
        assert!(receiver.try_recv().is_err());
    }

    #[rstest]
    fn closed_channel_does_not_panic() {
        let (navigator, receiver) = ChannelNavigator::channel();
        drop(receiver);
        navigator.go_to_login();
    }
}
