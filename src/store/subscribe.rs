use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use super::schema::ContentStore;
use super::types::{Document, QueryOptions, StoreError};
use crate::model::Entity;

/// What a subscription callback receives: the full re-sorted result set,
/// or the error that stopped this refresh. Errors are handed to the caller
/// rather than swallowed — keeping the last-known list on `Err` is the
/// caller's choice, not the store's.
pub type SnapshotResult<T> = Result<Vec<Document<T>>, StoreError>;

// ============================================================================
// Subscription Handle
// ============================================================================

/// Cancellation handle for a live collection query.
///
/// Dropping the handle without calling [`cancel`](Self::cancel) leaves the
/// live query running until the store itself goes away — the page that
/// created a subscription owns cancelling it.
#[derive(Debug)]
pub struct Subscription {
    cancelled: Arc<Mutex<bool>>,
    task: JoinHandle<()>,
}

impl Subscription {
    /// Detach the live query. No callback invocation starts after this
    /// returns; an invocation already in progress completes first, and
    /// this call blocks until it does. Safe to call any number of times,
    /// but never from inside the subscription's own callback.
    pub fn cancel(&self) {
        let mut cancelled = lock(&self.cancelled);
        if !*cancelled {
            *cancelled = true;
            self.task.abort();
            tracing::debug!("subscription cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        *lock(&self.cancelled)
    }
}

/// Lock the cancellation flag, shrugging off poison from a panicked
/// callback.
fn lock(flag: &Mutex<bool>) -> MutexGuard<'_, bool> {
    flag.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Live Queries
// ============================================================================

impl ContentStore {
    /// Open a live query against `collection`.
    ///
    /// The callback receives the full, freshly ordered result set once
    /// immediately and again every time a committed mutation touches the
    /// collection. Invocations for one subscription never overlap: a single
    /// task re-queries and delivers sequentially. Each call creates an
    /// independent subscription; two subscribers to the same collection run
    /// two independent live queries.
    pub fn subscribe_to_collection<T, F>(
        &self,
        collection: &str,
        options: QueryOptions,
        mut callback: F,
    ) -> Subscription
    where
        T: DeserializeOwned + Send + 'static,
        F: FnMut(SnapshotResult<T>) + Send + 'static,
    {
        let store = self.clone();
        let collection: Arc<str> = Arc::from(collection);
        let cancelled = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&cancelled);
        let mut events = self.change_events();

        let task = tokio::spawn(async move {
            refresh(&store, &collection, &options, &flag, &mut callback).await;

            loop {
                match events.recv().await {
                    Ok(event) => {
                        if event.collection.as_ref() == collection.as_ref() {
                            refresh(&store, &collection, &options, &flag, &mut callback).await;
                        }
                    }
                    // Missed events coalesce into one refresh; the query
                    // always returns the current full result set anyway
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(collection = %collection, skipped, "change bus lagged");
                        refresh(&store, &collection, &options, &flag, &mut callback).await;
                    }
                    Err(RecvError::Closed) => break,
                }
                if *lock(&flag) {
                    break;
                }
            }
        });

        Subscription { cancelled, task }
    }

    /// [`subscribe_to_collection`](Self::subscribe_to_collection) against
    /// the entity's own collection.
    pub fn watch<E, F>(&self, options: QueryOptions, callback: F) -> Subscription
    where
        E: Entity,
        F: FnMut(SnapshotResult<E>) + Send + 'static,
    {
        self.subscribe_to_collection(E::COLLECTION, options, callback)
    }
}

/// Re-run the subscription's query and deliver the outcome.
///
/// Delivery holds the cancellation flag's lock: `cancel()` takes the same
/// lock, so a flag observed unset here cannot flip until the callback
/// returns, and a `cancel()` that has returned means no delivery starts.
async fn refresh<T, F>(
    store: &ContentStore,
    collection: &str,
    options: &QueryOptions,
    cancelled: &Mutex<bool>,
    callback: &mut F,
) where
    T: DeserializeOwned + Send,
    F: FnMut(SnapshotResult<T>) + Send,
{
    if *lock(cancelled) {
        return;
    }

    let result = store.get_items::<T>(collection, options).await;
    if let Err(e) = &result {
        tracing::warn!(collection = %collection, error = %e, "live query refresh failed");
    }

    let guard = lock(cancelled);
    if *guard {
        return;
    }
    callback(result);
}
