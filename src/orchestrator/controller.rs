//! Interactive playback controller.
//!
//! Owns command handling for interactive front ends and reports back through queue events.

use super::Player;
use crate::model::{GlobalMotionOptions, QueueEvent};
use crate::notation;
use anyhow::Result;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time::Duration;

/// Commands emitted by front ends to drive the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PlayerCommand {
    Play(String),
    Invert(String),
    Clear,
    Reset,
    Quit,
}

impl PlayerCommand {
    /// Read one line of interactive input. Lines starting with `:` are commands,
    /// anything else is a moves line.
    pub fn from_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let Some(command) = line.strip_prefix(':') else {
            return Some(PlayerCommand::Play(line.to_string()));
        };
        let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
        match name {
            "invert" | "i" => Some(PlayerCommand::Invert(rest.trim().to_string())),
            "clear" | "c" => Some(PlayerCommand::Clear),
            "reset" | "r" => Some(PlayerCommand::Reset),
            "quit" | "q" => Some(PlayerCommand::Quit),
            _ => None,
        }
    }
}

/// Drive the player from commands until quit, then wait for queued moves to finish.
pub(crate) async fn run_controller(
    player: Player,
    event_tx: UnboundedSender<QueueEvent>,
    mut cmd_rx: UnboundedReceiver<PlayerCommand>,
) -> Result<()> {
    let mut quit_pending = false;
    // If the last moves take a while after quit, tell the user we are still busy.
    let mut finish_deadline: Option<tokio::time::Instant> = None;
    let mut watchdog = tokio::time::interval(Duration::from_millis(500));

    loop {
        let idle = player.queue_complete();
        tokio::select! {
            cmd = cmd_rx.recv(), if !quit_pending => {
                match cmd {
                    Some(PlayerCommand::Play(line)) => match notation::parse(&line) {
                        Ok(tokens) => {
                            let _ = player.sequence(&tokens, GlobalMotionOptions::default());
                        }
                        Err(e) => {
                            let _ = event_tx.send(QueueEvent::Info(e.to_string()));
                        }
                    },
                    Some(PlayerCommand::Invert(line)) => {
                        let _ = event_tx.send(QueueEvent::Info(notation::invert(&line)));
                    }
                    Some(PlayerCommand::Clear) => {
                        let cleared = player.clear_queue();
                        let _ = event_tx.send(QueueEvent::Info(format!(
                            "Cleared {cleared} pending moves"
                        )));
                    }
                    Some(PlayerCommand::Reset) => {
                        player.reset().await;
                        let _ = event_tx.send(QueueEvent::Info("Reset".into()));
                    }
                    Some(PlayerCommand::Quit) | None => {
                        quit_pending = true;
                        if player.is_busy() {
                            let _ = event_tx.send(QueueEvent::Info("Finishing moves…".into()));
                            finish_deadline =
                                Some(tokio::time::Instant::now() + Duration::from_secs(3));
                        }
                    }
                }
            }
            _ = idle, if quit_pending => break,
            _ = watchdog.tick() => {
                if let Some(deadline) = finish_deadline {
                    if tokio::time::Instant::now() >= deadline && player.is_busy() {
                        let _ = event_tx.send(QueueEvent::Info("Still finishing moves…".into()));
                        finish_deadline = None;
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SimulatedExecutor;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    #[test]
    fn reads_commands_and_moves() {
        assert_eq!(
            PlayerCommand::from_line("R U R'"),
            Some(PlayerCommand::Play("R U R'".into()))
        );
        assert_eq!(
            PlayerCommand::from_line(":invert (R U) R'"),
            Some(PlayerCommand::Invert("(R U) R'".into()))
        );
        assert_eq!(PlayerCommand::from_line(" :q "), Some(PlayerCommand::Quit));
        assert_eq!(PlayerCommand::from_line(":clear"), Some(PlayerCommand::Clear));
        assert_eq!(PlayerCommand::from_line(":nope"), None);
        assert_eq!(PlayerCommand::from_line("   "), None);
    }

    #[tokio::test(start_paused = true)]
    async fn quit_waits_for_queued_moves() {
        let executor = Arc::new(SimulatedExecutor::new());
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let player = Player::new(executor.clone(), Duration::from_millis(100), event_tx.clone());

        cmd_tx.send(PlayerCommand::Play("R U2 Rw".into())).unwrap();
        cmd_tx.send(PlayerCommand::Invert("R U R'".into())).unwrap();
        cmd_tx.send(PlayerCommand::Play("Q".into())).unwrap();
        cmd_tx.send(PlayerCommand::Quit).unwrap();

        run_controller(player, event_tx, cmd_rx).await.unwrap();

        // R, U, U and both layers of Rw.
        assert_eq!(executor.performed(), 5);
        let mut messages = Vec::new();
        while let Ok(ev) = event_rx.try_recv() {
            messages.push(ev);
        }
        assert!(messages.contains(&QueueEvent::Info("U' R' U".into())));
        assert!(messages.contains(&QueueEvent::Info("Invalid move: Q".into())));
        assert_eq!(messages.last(), Some(&QueueEvent::QueueEnded));
    }

    #[tokio::test(start_paused = true)]
    async fn clear_drops_pending_moves() {
        let executor = Arc::new(SimulatedExecutor::new());
        let (event_tx, _event_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let player = Player::new(executor.clone(), Duration::from_millis(100), event_tx.clone());

        let controller = tokio::spawn(run_controller(player, event_tx, cmd_rx));
        cmd_tx.send(PlayerCommand::Play("R U F".into())).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        cmd_tx.send(PlayerCommand::Clear).unwrap();
        cmd_tx.send(PlayerCommand::Quit).unwrap();
        controller.await.unwrap().unwrap();

        assert_eq!(executor.performed(), 1);
    }
}
