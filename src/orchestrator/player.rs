//! Token-level playback on top of the move queue.

use crate::engine::{plan_rotation, Completion, MoveHandle, MoveQueue, RotationExecutor};
use crate::error::NotationError;
use crate::model::{
    BaseMove, GlobalMotionOptions, MotionOptions, MoveInput, MoveToken, QueueEvent, ResolvedMotion,
    WARM_UP_SPEED,
};
use crate::notation;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Plays moves through a [`RotationExecutor`], one at a time.
#[derive(Clone)]
pub(crate) struct Player {
    queue: MoveQueue,
    executor: Arc<dyn RotationExecutor>,
    speed: Duration,
}

impl Player {
    pub fn new(
        executor: Arc<dyn RotationExecutor>,
        speed: Duration,
        event_tx: UnboundedSender<QueueEvent>,
    ) -> Self {
        Self {
            queue: MoveQueue::new(event_tx),
            executor,
            speed,
        }
    }

    fn resolve(&self, options: MotionOptions) -> ResolvedMotion {
        ResolvedMotion {
            speed: options.speed.unwrap_or(self.speed),
            prime: options.prime.unwrap_or(false),
        }
    }

    /// Queue one base rotation. `options.prime` picks the direction.
    ///
    /// Wide turns are a single queued move that turns the outer layer, then the middle one.
    /// Every layer is issued even if an earlier one fails; the first error is reported.
    pub fn rotate(&self, base: BaseMove, options: MotionOptions) -> MoveHandle {
        let requests = plan_rotation(base, self.resolve(options));
        let executor = self.executor.clone();
        self.queue.enqueue(move || async move {
            let mut first_err = None;
            for request in requests {
                if let Err(e) = request.dispatch(&*executor).await {
                    tracing::warn!(?request, error = %e, "rotation step failed");
                    first_err.get_or_insert(e);
                }
            }
            first_err.map_or(Ok(()), Err)
        })
    }

    /// Queue one token. The token decides the direction; `options` only tunes timing.
    pub fn turn(&self, token: MoveToken, options: MotionOptions) -> MoveHandle {
        self.rotate(
            token.base(),
            MotionOptions {
                prime: Some(token.is_prime()),
                ..options
            },
        )
    }

    /// Queue every token without waiting in between and return the cycle completion.
    pub fn sequence(&self, tokens: &[MoveToken], options: GlobalMotionOptions) -> Completion {
        for &token in tokens {
            // Per-move outcomes are reported through queue events.
            let _ = self.turn(token, options.into());
        }
        tracing::debug!(
            queued = tokens.len(),
            pending = self.queue.pending(),
            "sequence queued"
        );
        self.queue.queue_complete()
    }

    /// Queue a mix of tokens and notation lines.
    ///
    /// All lines are parsed before anything is queued, so a bad line queues nothing.
    pub fn play(
        &self,
        inputs: &[MoveInput],
        options: GlobalMotionOptions,
    ) -> Result<Completion, NotationError> {
        let mut tokens = Vec::new();
        for input in inputs {
            match input {
                MoveInput::Token(token) => tokens.push(*token),
                MoveInput::Line(line) => tokens.extend(notation::parse(line)?),
            }
        }
        Ok(self.sequence(&tokens, options))
    }

    /// Play a setup sequence at warm-up speed and wait for it to finish.
    pub async fn play_initial_sequence(&self, line: &str) -> Result<(), NotationError> {
        let completion = self.play(
            &[MoveInput::from(line)],
            GlobalMotionOptions {
                speed: Some(WARM_UP_SPEED),
            },
        )?;
        completion.await;
        tracing::info!("initial sequence applied");
        Ok(())
    }

    /// Drop pending moves. The move in flight still finishes.
    pub fn clear_queue(&self) -> usize {
        self.queue.clear_queue()
    }

    pub fn queue_complete(&self) -> Completion {
        self.queue.queue_complete()
    }

    pub fn is_busy(&self) -> bool {
        self.queue.is_processing()
    }

    /// Drop pending moves and wait until the queue is idle.
    pub async fn reset(&self) {
        self.clear_queue();
        self.queue_complete().await;
    }
}
