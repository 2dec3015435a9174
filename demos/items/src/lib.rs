//! Item list demo.
//!
//! A miniature store fed by the fetch orchestrator: one state record, one
//! event enum, one reducer function. The interesting part is the wiring in
//! `main.rs`; this module shows what a store built around dispatched fetch
//! notifications looks like.

use store_fetch_core::cancel::CancelHandle;
use store_fetch_core::content::Content;
use store_fetch_core::task::FetchTask;

/// Store state: the loaded items plus request bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct ItemsState {
    /// Items loaded so far.
    pub items: Vec<String>,
    /// Whether a fetch is currently in flight.
    pub loading: bool,
    /// Handle to cancel the in-flight fetch, when there is one.
    pub in_flight: Option<CancelHandle>,
    /// Last failure, rendered for display.
    pub error: Option<String>,
}

/// Notification events produced by the fetch lifecycle.
#[derive(Debug)]
pub enum ItemsEvent {
    /// A fetch started; the handle, when present, can cancel it.
    FetchStarted(Option<CancelHandle>),
    /// A fetch succeeded with parsed content.
    FetchSucceeded(Content),
    /// A fetch failed.
    FetchFailed {
        /// Failure message.
        message: String,
        /// Status code when the failure was an HTTP error.
        status: Option<u16>,
    },
    /// The in-flight fetch was cancelled.
    FetchCancelled,
}

/// Fold one event into the state.
pub fn reduce(state: &mut ItemsState, event: ItemsEvent) {
    match event {
        ItemsEvent::FetchStarted(handle) => {
            state.loading = true;
            state.error = None;
            state.in_flight = handle;
        }
        ItemsEvent::FetchSucceeded(content) => {
            state.loading = false;
            state.in_flight = None;
            state.items = extract_items(&content);
        }
        ItemsEvent::FetchFailed { message, status } => {
            state.loading = false;
            state.in_flight = None;
            state.error = Some(match status {
                Some(status) => format!("{message} (status {status})"),
                None => message,
            });
        }
        ItemsEvent::FetchCancelled => {
            state.loading = false;
            state.in_flight = None;
        }
    }
}

/// The fetch this demo issues, with every lifecycle slot wired to an
/// [`ItemsEvent`] and gated on no other fetch being in flight.
#[must_use]
pub fn items_task(url: &str) -> FetchTask<ItemsEvent, ItemsState> {
    FetchTask::new(url)
        .on_request(ItemsEvent::FetchStarted)
        .on_receive(|content, _status, _headers| ItemsEvent::FetchSucceeded(content))
        .on_error(|message, status| ItemsEvent::FetchFailed {
            message,
            status: status.map(|code| code.as_u16()),
        })
        .on_abort(|| ItemsEvent::FetchCancelled)
        .gate(|state: &ItemsState| !state.loading)
}

/// Pull the item names out of a structured `["a", "b", ...]` body; any
/// other shape yields an empty list.
fn extract_items(content: &Content) -> Vec<String> {
    content
        .as_structured()
        .and_then(serde_json::Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(|value| value.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
