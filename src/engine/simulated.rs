use super::{CubeRotation, LayerRotation, RotationExecutor};
use anyhow::Result;
use futures::future::{BoxFuture, FutureExt};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// Stand-in executor for headless use: each rotation just takes `speed` to finish.
#[derive(Debug, Clone, Default)]
pub struct SimulatedExecutor {
    performed: Arc<AtomicU64>,
}

impl SimulatedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of executor calls that have completed.
    pub fn performed(&self) -> u64 {
        self.performed.load(Ordering::Relaxed)
    }
}

impl RotationExecutor for SimulatedExecutor {
    fn rotate_layer(&self, request: LayerRotation) -> BoxFuture<'static, Result<()>> {
        let performed = self.performed.clone();
        async move {
            tracing::debug!(
                axis = ?request.axis,
                layer = request.layer,
                angle = request.angle,
                backwards = request.backwards,
                speed = ?request.speed,
                "rotating layer"
            );
            tokio::time::sleep(request.speed).await;
            performed.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
        .boxed()
    }

    fn rotate_cube(&self, request: CubeRotation) -> BoxFuture<'static, Result<()>> {
        let performed = self.performed.clone();
        async move {
            tracing::debug!(
                axis = ?request.axis,
                angle = request.angle,
                backwards = request.backwards,
                speed = ?request.speed,
                "rotating cube"
            );
            tokio::time::sleep(request.speed).await;
            performed.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
        .boxed()
    }
}
