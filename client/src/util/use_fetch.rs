//! Reactive binding for [`session::FetchLifecycle`].
//!
//! SYSTEM CONTEXT
//! ==============
//! Components that load data on mount call [`use_fetch`] once. An effect
//! re-reads the dependency closure whenever its signals change and asks the
//! lifecycle to run; unchanged values do not refetch, stale completions are
//! dropped, and the in-flight request is aborted when the owning component is
//! cleaned up.

use std::future::Future;

use leptos::prelude::*;
use session::{FetchError, FetchLifecycle, FetchState, RawResponse};

/// Run `fetch` whenever `deps` yields a new value; returns the fetch state.
///
/// The state is `Pending` while the latest run is in flight and ends as
/// `Success` or `Error`. A superseded or cancelled run leaves it untouched.
/// `decode` turns a 2xx response into data for `on_data`; any failure
/// (network, non-2xx, decode) goes to `on_error`.
pub fn use_fetch<K, T, Deps, F, Fut, D>(
    deps: Deps,
    fetch: F,
    decode: D,
    on_data: Callback<T>,
    on_error: Callback<FetchError>,
) -> ReadSignal<FetchState<T>>
where
    K: PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
    Deps: Fn() -> K + 'static,
    F: Fn() -> Fut + Clone + 'static,
    Fut: Future<Output = Result<RawResponse, FetchError>> + 'static,
    D: Fn(RawResponse) -> Result<T, FetchError> + Clone + 'static,
{
    let lifecycle = FetchLifecycle::<K>::new();
    let (state, set_state) = signal(FetchState::Idle);

    let scope = lifecycle.clone();
    Effect::new(move || {
        let key = deps();
        let fetch = fetch.clone();
        let decode = decode.clone();
        let Some(invocation) = scope.run(
            key,
            fetch,
            decode,
            move |data: T| {
                set_state.set(FetchState::Success(data.clone()));
                on_data.run(data);
            },
            move |err: FetchError| {
                set_state.set(FetchState::Error(err.clone()));
                on_error.run(err);
            },
        ) else {
            return;
        };
        set_state.set(FetchState::Pending);

        #[cfg(feature = "csr")]
        {
            leptos::task::spawn_local(async move {
                invocation.await;
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            drop(invocation);
        }
    });

    on_cleanup(move || lifecycle.cancel());

    state
}
