//! Move orchestration.
//!
//! This module owns the player that resolves tokens into executor calls on the move
//! queue, and the command-driven controller that interactive front ends talk to.

mod controller;
mod player;

pub(crate) use controller::{run_controller, PlayerCommand};
pub(crate) use player::Player;
