//! Cancellable stream of document snapshots.

use super::Document;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tracing::debug;

/// Live subscription to one document.
///
/// Yields the full document on every change. Dropping the subscription (or
/// calling [`Subscription::cancel`]) unsubscribes.
pub struct Subscription {
    id: String,
    receiver: mpsc::UnboundedReceiver<Document>,
    on_cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Wraps a receiver fed by a store backend. `on_cancel` runs once when
    /// the subscription is cancelled or dropped.
    pub fn new(
        id: impl Into<String>,
        receiver: mpsc::UnboundedReceiver<Document>,
        on_cancel: impl FnOnce() + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            receiver,
            on_cancel: Some(Box::new(on_cancel)),
        }
    }

    /// Identifier of the watched document.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Waits for the next snapshot. `None` once the backend stops delivering.
    pub async fn recv(&mut self) -> Option<Document> {
        self.receiver.recv().await
    }

    /// Stops delivery.
    pub fn cancel(self) {}
}

impl Stream for Subscription {
    type Item = Document;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Document>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(on_cancel) = self.on_cancel.take() {
            debug!(id = %self.id, "Unsubscribing");
            on_cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish_non_exhaustive()
    }
}
