//! In-process document store.
//!
//! Behaves like a hosted document database from a client's point of view:
//! every operation suspends once before it takes effect, writes merge
//! top-level fields unconditionally, and subscribers receive the full
//! document after each mutation in the order the mutations happened.

use super::{Document, DocumentStore, StoreError, Subscription};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Default)]
struct Entry {
    document: Document,
    subscribers: HashMap<u64, mpsc::UnboundedSender<Document>>,
}

impl Entry {
    /// Sends the current document to every live subscriber, dropping closed ones.
    fn notify(&mut self) {
        let document = &self.document;
        self.subscribers
            .retain(|_, tx| tx.send(document.clone()).is_ok());
    }
}

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<String, Entry>,
    offline: bool,
    next_subscriber: u64,
}

/// Shared in-memory store. Cloning yields another handle to the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory document store");
        Self::default()
    }

    /// While offline, every operation fails with [`StoreError`].
    #[instrument(skip(self))]
    pub fn set_offline(&self, offline: bool) {
        match self.inner.lock() {
            Ok(mut inner) => inner.offline = offline,
            Err(_) => warn!("Store lock poisoned; offline flag unchanged"),
        }
    }

    /// Reads a document without suspending (for inspection and tests).
    pub fn peek(&self, id: &str) -> Option<Document> {
        self.inner
            .lock()
            .ok()
            .and_then(|inner| inner.records.get(id).map(|e| e.document.clone()))
    }

    /// Number of live subscriptions on a document.
    pub fn subscriber_count(&self, id: &str) -> usize {
        self.inner
            .lock()
            .ok()
            .and_then(|inner| inner.records.get(id).map(|e| e.subscribers.len()))
            .unwrap_or(0)
    }

    /// Locks the store, failing if it is offline or poisoned.
    fn connect(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| StoreError::new("Store lock poisoned"))?;
        if inner.offline {
            return Err(StoreError::new("Store is unreachable"));
        }
        Ok(inner)
    }
}

fn unsubscribe(inner: &Weak<Mutex<Inner>>, id: &str, subscriber: u64) {
    if let Some(inner) = inner.upgrade()
        && let Ok(mut inner) = inner.lock()
        && let Some(entry) = inner.records.get_mut(id)
    {
        entry.subscribers.remove(&subscriber);
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    #[instrument(skip(self, initial))]
    async fn create_record(&self, initial: Document) -> Result<String, StoreError> {
        tokio::task::yield_now().await;
        let mut inner = self.connect()?;
        let id = uuid::Uuid::new_v4().simple().to_string();
        inner.records.insert(
            id.clone(),
            Entry {
                document: initial,
                subscribers: HashMap::new(),
            },
        );
        info!(id = %id, "Record created");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn get_record(&self, id: &str) -> Result<Option<Document>, StoreError> {
        tokio::task::yield_now().await;
        let inner = self.connect()?;
        let document = inner.records.get(id).map(|e| e.document.clone());
        debug!(found = document.is_some(), "Record read");
        Ok(document)
    }

    #[instrument(skip(self, fields), fields(field_count = fields.len()))]
    async fn update_fields(&self, id: &str, fields: Document) -> Result<(), StoreError> {
        tokio::task::yield_now().await;
        let mut inner = self.connect()?;
        let entry = inner
            .records
            .get_mut(id)
            .ok_or_else(|| StoreError::new(format!("No record with id '{}'", id)))?;
        let keys: Vec<String> = fields.keys().cloned().collect();
        entry.document.extend(fields);
        entry.notify();
        debug!(?keys, "Fields updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn subscribe(&self, id: &str) -> Result<Subscription, StoreError> {
        tokio::task::yield_now().await;
        let mut inner = self.connect()?;
        let subscriber = inner.next_subscriber;
        inner.next_subscriber += 1;

        let entry = inner
            .records
            .get_mut(id)
            .ok_or_else(|| StoreError::new(format!("No record with id '{}'", id)))?;
        let (tx, rx) = mpsc::unbounded_channel();
        // Initial snapshot; the receiver is alive so this cannot fail.
        let _ = tx.send(entry.document.clone());
        entry.subscribers.insert(subscriber, tx);
        debug!(subscriber, "Subscribed");

        let weak = Arc::downgrade(&self.inner);
        let record_id = id.to_string();
        Ok(Subscription::new(id, rx, move || {
            unsubscribe(&weak, &record_id, subscriber)
        }))
    }
}
