//! Dependency bundles and the lock-guarded bookkeeping behind the session.

use std::fmt;
use std::sync::Arc;

use chrono::TimeDelta;
use mockable::Clock;

use crate::domain::ports::{AuthGateway, CredentialStore, Navigator, TimerHandle, TimerSource};

/// Port bundle required by the session manager.
pub struct SessionPorts {
    /// Remote authentication collaborator.
    pub gateway: Arc<dyn AuthGateway>,
    /// Persisted credential slots.
    pub store: Arc<dyn CredentialStore>,
    /// Host navigation hook.
    pub navigator: Arc<dyn Navigator>,
}

impl SessionPorts {
    /// Build a strongly-typed session port bundle.
    pub fn new(
        gateway: Arc<dyn AuthGateway>,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            gateway,
            store,
            navigator,
        }
    }
}

/// Runtime helpers for time and scheduling.
pub struct SessionRuntime {
    /// Wall clock used for expiry comparisons.
    pub clock: Arc<dyn Clock>,
    /// Scheduler for the auto-expiry callback.
    pub timer: Arc<dyn TimerSource>,
}

/// Session lifetime policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Lifetime applied when the auth collaborator omits an expiry.
    pub default_ttl: TimeDelta,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            default_ttl: TimeDelta::hours(1),
        }
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    /// The user asked to log out.
    Requested,
    /// The stored expiry passed.
    Expired,
    /// The access guard found no valid token.
    Guard,
    /// A token was stored without a readable expiry.
    StaleCredential,
}

impl LogoutReason {
    /// Stable label used in structured logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Expired => "expired",
            Self::Guard => "guard",
            Self::StaleCredential => "stale_credential",
        }
    }
}

impl fmt::Display for LogoutReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable session bookkeeping guarded by one mutex.
///
/// `epoch` increases on every logout so an in-flight login can tell that it
/// was overtaken. `generation` increases whenever the expiry timer is armed
/// or disarmed so a superseded callback can recognise itself.
#[derive(Debug, Default)]
pub(super) struct SessionSlot {
    pub(super) epoch: u64,
    pub(super) generation: u64,
    pub(super) timer: Option<Box<dyn TimerHandle>>,
}

impl SessionSlot {
    /// Cancel the live timer, if any, and invalidate its generation.
    pub(super) fn disarm(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.cancel();
        }
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(LogoutReason::Requested, "requested")]
    #[case(LogoutReason::Expired, "expired")]
    #[case(LogoutReason::Guard, "guard")]
    #[case(LogoutReason::StaleCredential, "stale_credential")]
    fn logout_reasons_have_stable_labels(#[case] reason: LogoutReason, #[case] label: &str) {
        assert_eq!(reason.to_string(), label);
    }

    #[rstest]
    fn disarm_bumps_generation_without_a_timer() {
        let mut slot = SessionSlot::default();
        slot.disarm();
        slot.disarm();
        assert_eq!(slot.generation, 2);
        assert!(slot.timer.is_none());
    }
}
