//! Test utilities for the client crate.
//!
//! Shared doubles for unit tests (in `src/`) and integration tests (in
//! `tests/`). Compiled for tests and when the `test-support` feature is on.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::BearerToken;
use crate::domain::ports::{
    CollectionSource, Navigator, RemoteSourceError, TimerHandle, TimerSource, TimerTask,
    TokenProvider,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(_) => panic!("test double mutex poisoned"),
    }
}

/// Clock whose instant only moves when a test says so.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Clock frozen at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        *lock(&self.0) += delta;
    }

    /// Jump to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        *lock(&self.0) = now;
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *lock(&self.0)
    }
}

struct ManualEntry {
    delay: Duration,
    cancelled: Arc<AtomicBool>,
    task: Option<TimerTask>,
}

/// Timer that records scheduled callbacks and runs them on demand.
///
/// Callbacks run on the calling thread after the internal lock is released,
/// so a callback may schedule a new timer.
#[derive(Default)]
pub struct ManualTimer {
    entries: Mutex<Vec<ManualEntry>>,
}

struct ManualHandle(Arc<AtomicBool>);

impl TimerHandle for ManualHandle {
    fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl ManualTimer {
    /// Callbacks neither fired nor cancelled.
    pub fn pending(&self) -> usize {
        lock(&self.entries)
            .iter()
            .filter(|entry| entry.task.is_some() && !entry.cancelled.load(Ordering::SeqCst))
            .count()
    }

    /// Delay of the most recently scheduled callback.
    pub fn last_delay(&self) -> Option<Duration> {
        lock(&self.entries).last().map(|entry| entry.delay)
    }

    /// Run every pending callback that was not cancelled. Returns how many
    /// ran.
    pub fn fire_pending(&self) -> usize {
        self.fire(false)
    }

    /// Run every callback not yet run, cancelled ones included, as a timer
    /// backend that lost a cancellation race would.
    pub fn fire_ignoring_cancellation(&self) -> usize {
        self.fire(true)
    }

    fn fire(&self, include_cancelled: bool) -> usize {
        let tasks: Vec<TimerTask> = lock(&self.entries)
            .iter_mut()
            .filter(|entry| include_cancelled || !entry.cancelled.load(Ordering::SeqCst))
            .filter_map(|entry| entry.task.take())
            .collect();
        let count = tasks.len();
        for task in tasks {
            task();
        }
        count
    }
}

impl TimerSource for ManualTimer {
    fn schedule(&self, delay: Duration, task: TimerTask) -> Box<dyn TimerHandle> {
        let cancelled = Arc::new(AtomicBool::new(false));
        lock(&self.entries).push(ManualEntry {
            delay,
            cancelled: Arc::clone(&cancelled),
            task: Some(task),
        });
        Box::new(ManualHandle(cancelled))
    }
}

/// Navigator that counts login redirects.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: AtomicUsize,
}

impl RecordingNavigator {
    /// Number of `go_to_login` calls so far.
    pub fn visits(&self) -> usize {
        self.visits.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn go_to_login(&self) {
        self.visits.fetch_add(1, Ordering::SeqCst);
    }
}

/// Token provider with a settable token.
#[derive(Debug, Default)]
pub struct StaticTokenProvider(Mutex<Option<BearerToken>>);

impl StaticTokenProvider {
    /// Provider holding `raw`.
    pub fn with_token(raw: &str) -> Self {
        Self(Mutex::new(BearerToken::new(raw)))
    }

    /// Replace the held token; `None` signs out.
    pub fn set(&self, raw: Option<&str>) {
        *lock(&self.0) = raw.and_then(BearerToken::new);
    }
}

impl TokenProvider for StaticTokenProvider {
    fn bearer_token(&self) -> Option<BearerToken> {
        lock(&self.0).clone()
    }
}

type FetchHook = Box<dyn Fn() + Send + Sync>;

/// Collection source replaying scripted responses.
///
/// Once the script runs out every further call repeats the last response.
pub struct StubCollectionSource<E> {
    responses: Mutex<VecDeque<Result<Vec<E>, RemoteSourceError>>>,
    last: Mutex<Option<Result<Vec<E>, RemoteSourceError>>>,
    tokens_seen: Mutex<Vec<String>>,
    calls: AtomicUsize,
    hook: Option<FetchHook>,
}

impl<E: Clone> StubCollectionSource<E> {
    /// Source answering every call with `items`.
    pub fn returning(items: Vec<E>) -> Self {
        Self::scripted(vec![Ok(items)])
    }

    /// Source answering calls with `responses` in order.
    pub fn scripted(responses: Vec<Result<Vec<E>, RemoteSourceError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            last: Mutex::new(None),
            tokens_seen: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            hook: None,
        }
    }

    /// Run `hook` during each fetch, before the response is returned.
    #[must_use]
    pub fn with_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Number of fetches so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Raw tokens presented on each fetch.
    pub fn tokens_seen(&self) -> Vec<String> {
        lock(&self.tokens_seen).clone()
    }
}

#[async_trait]
impl<E: Clone + Send + Sync> CollectionSource<E> for StubCollectionSource<E> {
    async fn fetch_all(&self, token: &BearerToken) -> Result<Vec<E>, RemoteSourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.tokens_seen).push(token.as_str().to_owned());
        if let Some(hook) = &self.hook {
            hook();
        }
        let next = lock(&self.responses).pop_front();
        let mut last = lock(&self.last);
        if let Some(response) = next {
            *last = Some(response);
        }
        last.clone()
            .unwrap_or_else(|| Err(RemoteSourceError::transport("no scripted response")))
    }
}
