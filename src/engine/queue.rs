//! Serialized move queue.
//!
//! Turns a burst of move requests into a strictly ordered stream: one action runs at
//! a time, in enqueue order, and a failed action never stops the ones behind it.

use crate::error::MoveError;
use crate::model::QueueEvent;
use anyhow::Result;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::VecDeque;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};
use tokio::sync::{mpsc, oneshot};

type Thunk = Box<dyn FnOnce() -> BoxFuture<'static, Result<()>> + Send>;

/// Resolves once a drain cycle has emptied the queue. Never fails.
pub type Completion = Shared<BoxFuture<'static, ()>>;

struct QueueState {
    pending: VecDeque<Thunk>,
    processing: bool,
    completion: Option<Completion>,
    resolver: Option<oneshot::Sender<()>>,
}

/// Handle to the move queue. Clones share the same queue.
#[derive(Clone)]
pub struct MoveQueue {
    state: Arc<Mutex<QueueState>>,
    event_tx: mpsc::UnboundedSender<QueueEvent>,
}

/// Resolves with the outcome of one enqueued action.
///
/// Dropping the handle does not cancel the action.
#[derive(Debug)]
pub struct MoveHandle {
    rx: oneshot::Receiver<Result<()>>,
}

impl Future for MoveHandle {
    type Output = Result<(), MoveError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|res| match res {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(MoveError::Failed(e)),
            // Sender dropped without running: the action was cleared from the queue.
            Err(_) => Err(MoveError::Discarded),
        })
    }
}

impl MoveQueue {
    pub fn new(event_tx: mpsc::UnboundedSender<QueueEvent>) -> Self {
        Self {
            state: Arc::new(Mutex::new(QueueState {
                pending: VecDeque::new(),
                processing: false,
                completion: None,
                resolver: None,
            })),
            event_tx,
        }
    }

    fn state(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an action and start draining if the queue is idle.
    ///
    /// Must be called from within a tokio runtime.
    pub fn enqueue<F, Fut>(&self, action: F) -> MoveHandle
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let thunk: Thunk = Box::new(move || {
            async move {
                let outcome = AssertUnwindSafe(async move { action().await })
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|_| Err(anyhow::anyhow!("move panicked")));
                let report = match &outcome {
                    Ok(()) => Ok(()),
                    Err(e) => Err(anyhow::anyhow!("{e:#}")),
                };
                let _ = tx.send(outcome);
                report
            }
            .boxed()
        });

        let start_cycle = {
            let mut state = self.state();
            state.pending.push_back(thunk);
            if state.processing {
                false
            } else {
                let (resolver, done) = oneshot::channel::<()>();
                state.processing = true;
                state.resolver = Some(resolver);
                state.completion = Some(done.map(|_| ()).boxed().shared());
                let _ = self.event_tx.send(QueueEvent::QueueStarted);
                true
            }
        };

        if start_cycle {
            tokio::spawn(self.clone().drain());
        }

        MoveHandle { rx }
    }

    async fn drain(self) {
        while let Some(thunk) = self.next_or_finish() {
            if let Err(e) = thunk().await {
                let message = format!("{e:#}");
                tracing::error!("Move failed: {message}");
                let _ = self.event_tx.send(QueueEvent::MoveFailed { message });
            }
        }
    }

    /// Pop the next action, or close the cycle if none is left.
    ///
    /// Closing happens under the same lock as the emptiness check, so an enqueue
    /// racing with the end of a cycle always starts a fresh one.
    fn next_or_finish(&self) -> Option<Thunk> {
        let mut state = self.state();
        if let Some(thunk) = state.pending.pop_front() {
            return Some(thunk);
        }
        if let Some(resolver) = state.resolver.take() {
            let _ = resolver.send(());
        }
        let _ = self.event_tx.send(QueueEvent::QueueEnded);
        state.processing = false;
        None
    }

    /// Drop every action that has not started yet and return how many were dropped.
    ///
    /// This does not stop the action currently running; await [`queue_complete`]
    /// to know when the queue is idle.
    ///
    /// [`queue_complete`]: MoveQueue::queue_complete
    pub fn clear_queue(&self) -> usize {
        let discarded = std::mem::take(&mut self.state().pending);
        let count = discarded.len();
        drop(discarded);
        if count > 0 {
            tracing::debug!(count, "cleared pending moves");
        }
        count
    }

    /// Completion of the current drain cycle, or of the last one if the queue is idle.
    ///
    /// A new cycle gets a new handle, so re-read this after enqueueing.
    pub fn queue_complete(&self) -> Completion {
        self.state()
            .completion
            .clone()
            .unwrap_or_else(|| futures::future::ready(()).boxed().shared())
    }

    pub fn is_processing(&self) -> bool {
        self.state().processing
    }

    pub fn pending(&self) -> usize {
        self.state().pending.len()
    }
}
