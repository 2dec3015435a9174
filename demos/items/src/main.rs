//! Item list demo binary.
//!
//! Drives three fetch lifecycles against a scripted transport and prints
//! the store state after each: a success, an HTTP failure, and a gated
//! invocation that is skipped entirely.

use std::sync::{Arc, Mutex, PoisonError};

use http::StatusCode;
use item_list::{ItemsEvent, ItemsState, items_task, reduce};
use store_fetch_runtime::run_fetch;
use store_fetch_testing::{MockEnvironment, MockTransport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_state(label: &str, state: &ItemsState) {
    println!("\n--- {label} ---");
    println!("  loading:   {}", state.loading);
    println!("  items:     {:?}", state.items);
    println!("  error:     {:?}", state.error);
    println!("  in flight: {}", state.in_flight.is_some());
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "item_list=debug,store_fetch_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Item List: Fetch Lifecycle Demo ===");

    // A store in miniature: shared state, a dispatcher that folds events
    // in, and a snapshot closure for the gate.
    let store = Arc::new(Mutex::new(ItemsState::default()));
    let dispatch = {
        let store = Arc::clone(&store);
        move |event: ItemsEvent| {
            let mut state = store.lock().unwrap_or_else(PoisonError::into_inner);
            reduce(&mut state, event);
        }
    };
    let snapshot = {
        let store = Arc::clone(&store);
        move || store.lock().unwrap_or_else(PoisonError::into_inner).clone()
    };

    let environment = MockEnvironment::new(
        MockTransport::new()
            .respond(
                "/api/items",
                StatusCode::OK,
                r#"["anvil", "rope", "dynamite"]"#,
            )
            .respond("/api/missing", StatusCode::NOT_FOUND, "not found"),
    );

    println!("\n>>> Fetching /api/items");
    run_fetch(&environment, items_task("/api/items"), dispatch.clone(), snapshot.clone()).await;
    print_state("after success", &snapshot());

    println!("\n>>> Fetching /api/missing");
    run_fetch(&environment, items_task("/api/missing"), dispatch.clone(), snapshot.clone()).await;
    print_state("after HTTP failure", &snapshot());

    // Pretend a fetch is already in flight; the gate closes and the
    // invocation is a complete no-op.
    store.lock().unwrap_or_else(PoisonError::into_inner).loading = true;
    println!("\n>>> Fetching /api/items while one is in flight");
    run_fetch(&environment, items_task("/api/items"), dispatch.clone(), snapshot.clone()).await;
    print_state("after gated skip", &snapshot());

    println!(
        "\nTransport saw {} request(s) in total.",
        environment.transport().request_count()
    );
}
