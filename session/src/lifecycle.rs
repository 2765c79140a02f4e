//! Pending/success/error lifecycle around one asynchronous fetch.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components that load data on mount (the user table, the CLI `users`
//! command) hand a [`FetchLifecycle`] a fetch function, a decoder, and two
//! callbacks, keyed on a dependency value. The lifecycle decides whether a
//! request should go out at all and which completion is allowed to land.
//!
//! DESIGN
//! ======
//! - Same dependency value as the last run: no request.
//! - New dependency value: the previous in-flight request is aborted and its
//!   completion is discarded, so a slow stale response can never overwrite a
//!   newer one.
//! - Responses are status-checked before decoding.
//! - Dropping the last handle or calling [`FetchLifecycle::cancel`] aborts the
//!   in-flight request without running either callback.
//!
//! The lifecycle does not spawn anything. [`FetchLifecycle::run`] returns the
//! future to drive, so the browser can `spawn_local` it and the CLI can
//! simply `.await` it.

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use futures::future::{AbortHandle, Abortable};

use crate::api::RawResponse;
use crate::error::FetchError;

/// Render-facing state of one fetch. Drivers set `Pending` when a run
/// starts and `Success`/`Error` from the callbacks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchState<T> {
    Idle,
    Pending,
    Success(T),
    Error(FetchError),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> FetchState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}

/// How an invocation ended, from the driver's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settled {
    /// The success callback ran.
    Succeeded,
    /// The failure callback ran.
    Failed,
    /// A newer invocation or a cancel took over; no callback ran.
    Discarded,
}

struct Inner<K> {
    deps: Option<K>,
    generation: u64,
    pending: bool,
    abort: Option<AbortHandle>,
}

impl<K> Drop for Inner<K> {
    fn drop(&mut self) {
        if let Some(handle) = self.abort.take() {
            handle.abort();
        }
    }
}

/// Fetch lifecycle keyed on a dependency value `K`. Clones share state.
pub struct FetchLifecycle<K> {
    inner: Arc<Mutex<Inner<K>>>,
}

impl<K> Clone for FetchLifecycle<K> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<K> Default for FetchLifecycle<K> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                deps: None,
                generation: 0,
                pending: false,
                abort: None,
            })),
        }
    }
}

impl<K> std::fmt::Debug for FetchLifecycle<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = lock(&self.inner);
        f.debug_struct("FetchLifecycle")
            .field("generation", &inner.generation)
            .field("pending", &inner.pending)
            .finish_non_exhaustive()
    }
}

fn lock<K>(inner: &Mutex<Inner<K>>) -> MutexGuard<'_, Inner<K>> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<K: PartialEq> FetchLifecycle<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the latest invocation has not settled.
    pub fn is_pending(&self) -> bool {
        lock(&self.inner).pending
    }

    /// Number of invocations started (or cancelled) so far.
    pub fn generation(&self) -> u64 {
        lock(&self.inner).generation
    }

    /// Start an invocation for `deps`, unless `deps` equals the last run's.
    ///
    /// Returns `None` without calling `fetch` when the dependency value is
    /// unchanged. Otherwise marks the lifecycle pending, aborts any earlier
    /// in-flight request, calls `fetch`, and returns the future that settles
    /// this invocation. The caller must drive that future.
    ///
    /// On completion, a non-2xx response or a `decode` failure goes to
    /// `on_error`; decoded data goes to `on_data`. Pending is cleared before
    /// either callback runs. A completion that has been superseded runs
    /// neither.
    pub fn run<T, F, Fut, D, OnData, OnError>(
        &self,
        deps: K,
        fetch: F,
        decode: D,
        on_data: OnData,
        on_error: OnError,
    ) -> Option<impl Future<Output = Settled> + use<K, T, F, Fut, D, OnData, OnError>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<RawResponse, FetchError>>,
        D: FnOnce(RawResponse) -> Result<T, FetchError>,
        OnData: FnOnce(T),
        OnError: FnOnce(FetchError),
    {
        let (generation, registration) = {
            let mut inner = lock(&self.inner);
            if inner.deps.as_ref() == Some(&deps) {
                log::trace!("fetch skipped: dependencies unchanged");
                return None;
            }
            if let Some(previous) = inner.abort.take() {
                log::debug!("aborting superseded fetch #{}", inner.generation);
                previous.abort();
            }
            let (handle, registration) = AbortHandle::new_pair();
            inner.generation += 1;
            inner.deps = Some(deps);
            inner.pending = true;
            inner.abort = Some(handle);
            (inner.generation, registration)
        };

        let request = Abortable::new(fetch(), registration);
        let scope = Arc::downgrade(&self.inner);

        Some(async move {
            let outcome = request.await;
            if !settle(&scope, generation) {
                log::debug!("fetch #{generation} completion discarded");
                return Settled::Discarded;
            }
            let Ok(result) = outcome else {
                return Settled::Discarded;
            };
            match result.and_then(RawResponse::ensure_success).and_then(decode) {
                Ok(data) => {
                    on_data(data);
                    Settled::Succeeded
                }
                Err(err) => {
                    log::warn!("fetch #{generation} failed ({}): {err}", err.kind());
                    on_error(err);
                    Settled::Failed
                }
            }
        })
    }

    /// Abort the in-flight request and forget the dependency value, so the
    /// next [`run`](Self::run) fetches again even with the same value.
    pub fn cancel(&self) {
        let mut inner = lock(&self.inner);
        if let Some(handle) = inner.abort.take() {
            handle.abort();
        }
        inner.generation += 1;
        inner.deps = None;
        inner.pending = false;
    }
}

/// Clear pending if `generation` is still current. False when the scope is
/// gone or a newer invocation owns it.
fn settle<K>(scope: &Weak<Mutex<Inner<K>>>, generation: u64) -> bool {
    let Some(shared) = scope.upgrade() else {
        return false;
    };
    let mut inner = lock(&shared);
    if inner.generation != generation {
        return false;
    }
    inner.pending = false;
    inner.abort = None;
    true
}
