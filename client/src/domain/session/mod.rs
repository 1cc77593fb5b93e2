//! Session lifecycle: login, logout, token validity, and auto-expiry.
//!
//! The manager owns the only writes to the credential store. Readers (the
//! access guard, the cached repository) go through [`SessionManager`]'s
//! accessors or the [`TokenProvider`] port and never observe a half-written
//! credential because the store persists both slots as one record.
//!
//! Session state is published through a `tokio::sync::watch` channel so
//! hosts can react to transitions without polling. Only transitions notify:
//! a second logout leaves subscribers undisturbed.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use mockable::Clock;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::domain::guard::SessionControl;
use crate::domain::ports::{
    AuthGateway, CredentialStore, Navigator, TimerSource, TokenProvider,
};
use crate::domain::{
    BearerToken, Credential, DomainError, LoginCredentials, StoredCredential,
};

mod state;

use state::SessionSlot;
pub use state::{LogoutReason, SessionPolicy, SessionPorts, SessionRuntime};

/// Domain-owned session manager.
///
/// Cloning is cheap and every clone drives the same session.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    gateway: Arc<dyn AuthGateway>,
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    clock: Arc<dyn Clock>,
    timer: Arc<dyn TimerSource>,
    policy: SessionPolicy,
    state: watch::Sender<bool>,
    slot: Mutex<SessionSlot>,
}

impl SessionManager {
    /// Build a manager, restore the persisted session state, and arm
    /// auto-expiry for any stored credential.
    ///
    /// A stored credential that is already expired ends the session
    /// immediately, which also notifies the navigator.
    pub fn new(ports: SessionPorts, runtime: SessionRuntime, policy: SessionPolicy) -> Self {
        let (state, _) = watch::channel(false);
        let manager = Self {
            inner: Arc::new(SessionInner {
                gateway: ports.gateway,
                store: ports.store,
                navigator: ports.navigator,
                clock: runtime.clock,
                timer: runtime.timer,
                policy,
                state,
                slot: Mutex::new(SessionSlot::default()),
            }),
        };
        manager.arm_auto_expiry();
        manager
    }

    /// Authenticate `username` / `password` and persist the issued
    /// credential.
    ///
    /// The collaborator's expiry is used when it reports one; otherwise the
    /// policy's default lifetime applies from now.
    ///
    /// # Errors
    ///
    /// - [`crate::domain::ErrorCode::InvalidRequest`] for a blank username or
    ///   empty password. The gateway is not called.
    /// - [`crate::domain::ErrorCode::AuthFailure`] when the gateway rejects
    ///   the credentials, cannot be reached, or issues an already-expired
    ///   token. Nothing is stored.
    /// - [`crate::domain::ErrorCode::SessionEnded`] when a logout happened
    ///   while the gateway call was in flight. Nothing is stored.
    /// - [`crate::domain::ErrorCode::StorageFailure`] when the credential
    ///   could not be persisted.
    pub async fn login(&self, username: &str, password: &str) -> Result<Credential, DomainError> {
        let credentials = LoginCredentials::try_from_parts(username, password)
            .map_err(|err| DomainError::invalid_request(err.to_string()))?;
        let epoch = self.lock_slot().epoch;

        let grant = match self.inner.gateway.authenticate(&credentials).await {
            Ok(grant) => grant,
            Err(err) => {
                warn!(username = credentials.username(), error = %err, "login rejected");
                return Err(DomainError::auth_failure("login failed"));
            }
        };

        let now = self.inner.clock.utc();
        let expires_at = grant
            .expires_at
            .unwrap_or_else(|| now + self.inner.policy.default_ttl);
        let credential = Credential::new(grant.token, expires_at);
        if !credential.is_valid_at(now) {
            warn!(
                username = credentials.username(),
                expires_at = %expires_at,
                "login issued an expired token"
            );
            return Err(DomainError::auth_failure("login failed"));
        }

        {
            let mut slot = self.lock_slot();
            if slot.epoch != epoch {
                info!(
                    username = credentials.username(),
                    "login completion discarded after logout"
                );
                return Err(DomainError::session_ended(
                    "session ended while login was in flight",
                ));
            }
            self.inner
                .store
                .save(&credential.to_slots())
                .map_err(|err| {
                    error!(error = %err, "failed to persist credential");
                    DomainError::storage_failure("failed to persist credential")
                })?;
            let delay = (expires_at - now).to_std().unwrap_or(Duration::ZERO);
            self.schedule_locked(&mut slot, delay);
            self.publish(true);
        }

        info!(
            username = credentials.username(),
            expires_at = %expires_at,
            "login succeeded"
        );
        Ok(credential)
    }

    /// End the session at the user's request.
    ///
    /// Clears both credential slots, cancels the expiry timer, publishes the
    /// unauthenticated state, and asks the navigator for the login view.
    /// Calling it again is harmless.
    pub fn logout(&self) {
        self.end_session(LogoutReason::Requested);
    }

    /// End the session, recording `reason` in the logs.
    pub fn end_session(&self, reason: LogoutReason) {
        {
            let mut slot = self.lock_slot();
            self.clear_locked(&mut slot);
        }
        self.finish_logout(reason);
    }

    /// Whether a complete credential is stored and its expiry is still in
    /// the future.
    #[must_use]
    pub fn has_valid_token(&self) -> bool {
        self.stored_credential()
            .is_valid_at(self.inner.clock.utc())
    }

    /// Stored token, whether or not it has expired.
    #[must_use]
    pub fn get_token(&self) -> Option<BearerToken> {
        self.stored_credential().token().cloned()
    }

    /// Re-read the stored expiry and schedule the session to end then.
    ///
    /// An expiry in the past ends the session immediately. At most one timer
    /// is live: arming replaces whatever was scheduled before.
    pub fn arm_auto_expiry(&self) {
        let now = self.inner.clock.utc();
        let mut slot = self.lock_slot();
        // Read under the lock so a concurrent logout cannot slip in between
        // the read and the arming.
        let reason = match self.stored_credential() {
            StoredCredential::Absent => {
                slot.disarm();
                self.publish(false);
                return;
            }
            StoredCredential::Unbounded(_) => LogoutReason::StaleCredential,
            StoredCredential::Present(credential) if !credential.is_valid_at(now) => {
                LogoutReason::Expired
            }
            StoredCredential::Present(credential) => {
                let delay = (credential.expires_at() - now)
                    .to_std()
                    .unwrap_or(Duration::ZERO);
                self.schedule_locked(&mut slot, delay);
                self.publish(true);
                return;
            }
        };
        self.clear_locked(&mut slot);
        drop(slot);
        self.finish_logout(reason);
    }

    /// Current authentication state.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        *self.inner.state.borrow()
    }

    /// Receiver notified on every authentication state transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.state.subscribe()
    }

    fn stored_credential(&self) -> StoredCredential {
        match self.inner.store.load() {
            Ok(slots) => slots.interpret(),
            Err(err) => {
                warn!(error = %err, "credential store unreadable; treating as signed out");
                StoredCredential::Absent
            }
        }
    }

    fn schedule_locked(&self, slot: &mut SessionSlot, delay: Duration) {
        slot.disarm();
        let generation = slot.generation;
        let weak: Weak<SessionInner> = Arc::downgrade(&self.inner);
        let handle = self.inner.timer.schedule(
            delay,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    Self { inner }.on_expiry_timer(generation);
                }
            }),
        );
        slot.timer = Some(handle);
        debug!(delay_secs = delay.as_secs(), generation, "auto-expiry armed");
    }

    fn on_expiry_timer(&self, generation: u64) {
        {
            let mut slot = self.lock_slot();
            if slot.generation != generation {
                debug!(
                    generation,
                    current = slot.generation,
                    "superseded expiry timer ignored"
                );
                return;
            }
            slot.timer = None;
            self.clear_locked(&mut slot);
        }
        self.finish_logout(LogoutReason::Expired);
    }

    fn clear_locked(&self, slot: &mut SessionSlot) {
        slot.epoch = slot.epoch.wrapping_add(1);
        slot.disarm();
        if let Err(err) = self.inner.store.clear() {
            error!(error = %err, "failed to clear credential store");
        }
    }

    fn finish_logout(&self, reason: LogoutReason) {
        let was_authenticated = self.publish(false);
        info!(reason = %reason, was_authenticated, "session ended");
        self.inner.navigator.go_to_login();
    }

    /// Publish `authenticated`, notifying subscribers only on a transition.
    /// Returns the previous state.
    fn publish(&self, authenticated: bool) -> bool {
        let mut previous = authenticated;
        self.inner.state.send_if_modified(|current| {
            previous = *current;
            if *current == authenticated {
                false
            } else {
                *current = authenticated;
                true
            }
        });
        previous
    }

    fn lock_slot(&self) -> MutexGuard<'_, SessionSlot> {
        self.inner
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenProvider for SessionManager {
    fn bearer_token(&self) -> Option<BearerToken> {
        self.get_token()
    }
}

impl SessionControl for SessionManager {
    fn has_valid_token(&self) -> bool {
        Self::has_valid_token(self)
    }

    fn end_session(&self, reason: LogoutReason) {
        Self::end_session(self, reason);
    }
}
