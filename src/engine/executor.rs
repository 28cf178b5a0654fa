//! Runs a single group concurrently: first-error cancellation for create,
//! best-effort wait-all for destroy. Implemented as two distinct paths
//! (spec §9, "First-error vs wait-all") rather than a parameterized one.

use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tokio::sync::Mutex;

use super::errors::EngineError;
use super::plan::Group;
use super::state::StateEntry;

/// Shared, mutex-guarded state list — the Engine's one piece of mutable state.
pub type SharedState = Arc<Mutex<Vec<StateEntry>>>;

/// Launch one task per provider; invoke `create`, append the config to
/// `state` under the mutex on success. Returns as soon as the first task
/// resolves to an error, in completion order rather than declaration order —
/// siblings that haven't finished yet keep running in the background
/// (dropping their join handles doesn't cancel them) and their state appends
/// still land safely under the mutex.
pub async fn create_group(group: &Group, state: &SharedState) -> Result<(), EngineError> {
    if group.is_empty() {
        return Ok(());
    }

    let mut tasks = FuturesUnordered::new();
    for provider in group {
        let provider = Arc::clone(provider);
        let state = Arc::clone(state);
        tasks.push(tokio::spawn(async move {
            provider.create().await?;
            let entry = StateEntry(provider.config());
            state.lock().await.push(entry);
            Ok::<(), String>(())
        }));
    }

    while let Some(result) = tasks.next().await {
        match result {
            Ok(Ok(())) => {}
            Ok(Err(message)) => return Err(EngineError::ProviderCreate(message)),
            Err(join_error) => return Err(EngineError::ProviderCreate(join_error.to_string())),
        }
    }

    Ok(())
}

/// Launch one task per provider, invoke `destroy`, ignore individual errors,
/// wait for all tasks to finish.
pub async fn destroy_group(group: &Group) {
    if group.is_empty() {
        return;
    }

    let mut tasks = Vec::with_capacity(group.len());
    for provider in group {
        let provider = Arc::clone(provider);
        tasks.push(tokio::spawn(async move {
            let _ = provider.destroy().await;
        }));
    }
    for task in tasks {
        let _ = task.await;
    }
}
