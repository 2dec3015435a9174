//! The fetch lifecycle orchestrator.
//!
//! [`run_fetch`] is the single entry point: it drives one network request
//! on behalf of a store, converting the request's lifecycle into
//! notification events for the store's dispatcher.
//!
//! The shape is a straight pipeline with one fork and one sink:
//!
//! ```text
//! gate ──false──▶ done (nothing happened)
//!   │ true
//! cancellation setup ─▶ request notification ─▶ transport ─▶ parse
//!   ─▶ classify ─┬─ success ─▶ receive notification
//!                └─ failure ─▶ failure sink ─▶ error notification
//! ```
//!
//! Nothing escapes: the returned future always completes normally, and
//! every failure either becomes an error notification or is dropped
//! because no error slot was configured.

use http::{HeaderMap, StatusCode};
use store_fetch_core::cancel::{CancelHandle, CancelSignal};
use store_fetch_core::config::ConfigSource;
use store_fetch_core::content::Content;
use store_fetch_core::dispatch::Dispatcher;
use store_fetch_core::environment::{FetchEnvironment, Transport, TransportResponse};
use store_fetch_core::error::{FetchError, is_error_status};
use store_fetch_core::lifecycle::AbortFn;
use store_fetch_core::task::FetchTask;

/// Drive one fetch lifecycle to completion.
///
/// `state` supplies the store's current state to the gate predicate and is
/// read once, before anything else happens. `dispatcher` receives every
/// notification event the task's lifecycle slots produce.
///
/// The returned future never fails. Transport errors, unreadable bodies
/// and error-range statuses all become error notifications (or nothing,
/// when no error slot is configured), and a closed gate completes
/// immediately with no side effects at all.
///
/// Within one invocation the transport is called at most once, the
/// request notification always precedes the transport call, and at most
/// one of the receive and error notifications is dispatched.
#[tracing::instrument(level = "debug", skip_all, fields(url = %task.url()))]
pub async fn run_fetch<E, D, G, A, S>(
    environment: &E,
    task: FetchTask<A, S>,
    dispatcher: D,
    state: G,
) where
    E: FetchEnvironment,
    D: Dispatcher<A> + Clone + Send + 'static,
    G: FnOnce() -> S,
    A: Send + 'static,
{
    let (url, config, mut lifecycle, gate) = task.into_parts();

    // A closed gate is a full skip: no handle, no notification, no request.
    if let Some(gate) = gate {
        if !gate(&state()) {
            tracing::debug!("gate closed, skipping fetch");
            metrics::counter!("fetch.skipped").increment(1);
            return;
        }
    }

    let handle = environment.cancel_handle();
    if let Some(handle) = &handle {
        if let Some(on_abort) = lifecycle.abort.take() {
            spawn_abort_listener(handle.signal(), dispatcher.clone(), on_abort);
        }
    }

    // The request notification precedes the transport call, so the store
    // observes the in-flight state (and holds the handle) before any
    // response can race it.
    if let Some(on_request) = lifecycle.request.take() {
        dispatcher.dispatch(on_request(handle.clone()));
    }

    metrics::counter!("fetch.requests").increment(1);
    let signal = handle.as_ref().map(CancelHandle::signal);

    match execute(environment, &url, &config, signal).await {
        Ok((content, status, headers)) => {
            tracing::debug!(status = %status, "fetch succeeded");
            metrics::counter!("fetch.success").increment(1);
            if let Some(on_receive) = lifecycle.receive.take() {
                dispatcher.dispatch(on_receive(content, status, headers));
            }
        }
        // The abort listener owns the cancellation notification; the
        // failure sink stays silent for it.
        Err(error) if error.is_aborted() => {
            tracing::debug!("fetch aborted");
            metrics::counter!("fetch.aborted").increment(1);
        }
        Err(error) => {
            let status = error.status();
            let message = error.message();
            tracing::warn!(status = ?status, message = %message, "fetch failed");
            metrics::counter!("fetch.error").increment(1);
            if let Some(on_error) = lifecycle.error.take() {
                dispatcher.dispatch(on_error(message, status));
            }
        }
    }
}

/// The fallible middle of the pipeline: resolve the configuration, issue
/// the request, parse the body, classify the status. Everything that can
/// go wrong funnels out of here as one [`FetchError`].
async fn execute<E>(
    environment: &E,
    url: &str,
    config: &ConfigSource,
    signal: Option<CancelSignal>,
) -> Result<(Content, StatusCode, HeaderMap), FetchError>
where
    E: FetchEnvironment,
{
    // Resolved here and nowhere earlier: a lazy source must observe
    // call-time state.
    let config = config.resolve();

    let TransportResponse { status, headers, body } =
        environment.transport().execute(url, config, signal).await?;

    // Structured attempt first, text fallback second; both leave the raw
    // bytes intact, so nothing is lost either way.
    let content = Content::parse(&body);

    if is_error_status(status) {
        return Err(FetchError::Status {
            status,
            message: content.into_message(),
        });
    }

    Ok((content, status, headers))
}

/// Register the abort listener: a task that waits on the cancel signal and
/// dispatches the abort notification if cancellation ever fires.
///
/// The listener's lifetime is bounded by the handle: it exits silently
/// once every clone of the [`CancelHandle`] has been dropped uncancelled.
fn spawn_abort_listener<D, A>(signal: CancelSignal, dispatcher: D, on_abort: AbortFn<A>)
where
    D: Dispatcher<A> + Send + 'static,
    A: Send + 'static,
{
    tokio::spawn(async move {
        if signal.wait().await {
            tracing::debug!("cancellation signalled, dispatching abort notification");
            dispatcher.dispatch(on_abort());
        }
    });
}
