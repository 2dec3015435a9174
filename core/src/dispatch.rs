//! The dispatch boundary between the orchestrator and the store.

/// Consumes notification events on behalf of a store.
///
/// The orchestrator hands every event it produces to exactly one of these;
/// what the store does with them is not its concern. Any `Fn(A)` closure
/// is a dispatcher, so wiring a store's `send` in is a one-liner.
pub trait Dispatcher<A>: Send + Sync {
    /// Hand one notification event to the store.
    fn dispatch(&self, event: A);
}

impl<A, F> Dispatcher<A> for F
where
    F: Fn(A) + Send + Sync,
{
    fn dispatch(&self, event: A) {
        self(event);
    }
}
