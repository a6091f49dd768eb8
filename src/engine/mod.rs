//! Move execution: the serialized move queue and the boundary to whatever actually
//! performs a rotation (a renderer, a puzzle model, or the simulated executor).

mod queue;
mod simulated;

pub(crate) use queue::{Completion, MoveHandle, MoveQueue};
pub(crate) use simulated::SimulatedExecutor;

use crate::model::{Axis, BaseMove, ResolvedMotion, RotationTarget, QUARTER_TURN_DEGREES};
use anyhow::Result;
use futures::future::BoxFuture;
use std::time::Duration;

/// Turn a single layer along an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerRotation {
    pub axis: Axis,
    pub layer: u8,
    pub angle: f32,
    pub backwards: bool,
    pub speed: Duration,
}

/// Turn the whole assembly along an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeRotation {
    pub axis: Axis,
    pub angle: f32,
    pub backwards: bool,
    pub speed: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationRequest {
    Layer(LayerRotation),
    Cube(CubeRotation),
}

impl RotationRequest {
    pub fn dispatch(self, executor: &dyn RotationExecutor) -> BoxFuture<'static, Result<()>> {
        match self {
            RotationRequest::Layer(req) => executor.rotate_layer(req),
            RotationRequest::Cube(req) => executor.rotate_cube(req),
        }
    }
}

/// Performs rotations. Each returned future resolves once the visual/state effect
/// has finished; the queue never starts the next rotation before that.
pub trait RotationExecutor: Send + Sync + 'static {
    fn rotate_layer(&self, request: LayerRotation) -> BoxFuture<'static, Result<()>>;
    fn rotate_cube(&self, request: CubeRotation) -> BoxFuture<'static, Result<()>>;
}

/// Expand a base rotation into executor requests, in the order they must run.
///
/// The direction sent is the binding's base direction flipped when `motion.prime` is set.
pub fn plan_rotation(base: BaseMove, motion: ResolvedMotion) -> Vec<RotationRequest> {
    let binding = base.binding();
    let backwards = binding.backwards ^ motion.prime;
    match binding.target {
        RotationTarget::Layers(layers) => layers
            .iter()
            .map(|&layer| {
                RotationRequest::Layer(LayerRotation {
                    axis: binding.axis,
                    layer,
                    angle: QUARTER_TURN_DEGREES,
                    backwards,
                    speed: motion.speed,
                })
            })
            .collect(),
        RotationTarget::WholeCube => vec![RotationRequest::Cube(CubeRotation {
            axis: binding.axis,
            angle: QUARTER_TURN_DEGREES,
            backwards,
            speed: motion.speed,
        })],
    }
}
