//! Ordered background writer for cart snapshots.
//!
//! Mutations hand complete JSON snapshots to a single writer task over an
//! unbounded channel. The task writes them in arrival order, so a later
//! snapshot can never be overwritten by an earlier one. When several
//! snapshots are waiting, only the newest is written and every waiter gets
//! that write's outcome. A flush reports the outcome of the last write, so a
//! failure is still visible to a flush queued after it was handled.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, trace};

use crate::error::CartError;
use crate::storage::{KeyValueStorage, StorageError};

type WriteOutcome = Result<(), Arc<StorageError>>;

enum WriteRequest {
    /// Store this snapshot.
    Write {
        snapshot: String,
        done: oneshot::Sender<WriteOutcome>,
    },
    /// Reply once every earlier request has been handled.
    Flush { done: oneshot::Sender<WriteOutcome> },
}

/// Handle to the background snapshot writer.
///
/// Dropping every handle closes the queue; the task drains what is left and
/// exits.
#[derive(Debug)]
pub(crate) struct SnapshotWriter {
    tx: mpsc::UnboundedSender<WriteRequest>,
}

impl SnapshotWriter {
    /// Spawn the writer task for `key` on the current Tokio runtime.
    pub(crate) fn spawn<S: KeyValueStorage>(storage: S, key: String) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(storage, key, rx));
        Self { tx }
    }

    /// Queue a snapshot for writing.
    pub(crate) fn enqueue(&self, snapshot: String) -> PendingWrite {
        let (done, rx) = oneshot::channel();
        match self.tx.send(WriteRequest::Write { snapshot, done }) {
            Ok(()) => PendingWrite::waiting(rx),
            Err(_) => PendingWrite::closed(),
        }
    }

    /// Queue a barrier that resolves after all earlier writes, with the
    /// outcome of the last one.
    pub(crate) fn flush(&self) -> PendingWrite {
        let (done, rx) = oneshot::channel();
        match self.tx.send(WriteRequest::Flush { done }) {
            Ok(()) => PendingWrite::waiting(rx),
            Err(_) => PendingWrite::closed(),
        }
    }
}

async fn run_writer<S: KeyValueStorage>(
    storage: S,
    key: String,
    mut rx: mpsc::UnboundedReceiver<WriteRequest>,
) {
    debug!(key = %key, "Snapshot writer started");

    let mut last_outcome: WriteOutcome = Ok(());

    while let Some(first) = rx.recv().await {
        let mut latest = None;
        let mut waiters = Vec::new();
        let mut queued = 0_usize;

        let mut next = Some(first);
        while let Some(request) = next {
            queued += 1;
            match request {
                WriteRequest::Write { snapshot, done } => {
                    latest = Some(snapshot);
                    waiters.push(done);
                }
                WriteRequest::Flush { done } => waiters.push(done),
            }
            next = rx.try_recv().ok();
        }

        if let Some(snapshot) = latest {
            trace!(queued, bytes = snapshot.len(), "Writing snapshot");
            last_outcome = storage.set_item(&key, &snapshot).await.map_err(|e| {
                error!(key = %key, error = %e, "Failed to persist cart snapshot");
                Arc::new(e)
            });
        }

        for done in waiters {
            // The waiter may have dropped its PendingWrite.
            let _ = done.send(last_outcome.clone());
        }
    }

    debug!(key = %key, "Snapshot writer stopped");
}

/// Completion of one queued snapshot write.
///
/// Resolves once the snapshot (or a newer one that superseded it) has been
/// stored. Dropping a `PendingWrite` does not cancel the write.
#[derive(Debug)]
pub struct PendingWrite {
    state: PendingState,
}

#[derive(Debug)]
enum PendingState {
    /// Nothing was queued; resolves immediately.
    Ready,
    /// The writer was gone before the request could be queued.
    Closed,
    Waiting(oneshot::Receiver<WriteOutcome>),
}

impl PendingWrite {
    /// A completion for a mutation that changed nothing.
    #[must_use]
    pub(crate) const fn ready() -> Self {
        Self {
            state: PendingState::Ready,
        }
    }

    const fn closed() -> Self {
        Self {
            state: PendingState::Closed,
        }
    }

    const fn waiting(rx: oneshot::Receiver<WriteOutcome>) -> Self {
        Self {
            state: PendingState::Waiting(rx),
        }
    }
}

impl Future for PendingWrite {
    type Output = Result<(), CartError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.state {
            PendingState::Ready => Poll::Ready(Ok(())),
            PendingState::Closed => Poll::Ready(Err(CartError::WriterClosed)),
            PendingState::Waiting(rx) => Pin::new(rx).poll(cx).map(|received| match received {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(CartError::Write(e)),
                Err(_) => Err(CartError::WriterClosed),
            }),
        }
    }
}
