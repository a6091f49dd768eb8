use crate::engine::SimulatedExecutor;
use crate::model::{
    GlobalMotionOptions, MoveToken, PlayConfig, PlaybackReport, QueueEvent, DEFAULT_SPEED,
};
use crate::notation;
use crate::orchestrator::{run_controller, Player, PlayerCommand};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

/// Output line routing for stdout/stderr writer.
enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Spawn a blocking writer for stdout/stderr to avoid blocking async tasks.
fn spawn_output_writer() -> (
    mpsc::UnboundedSender<OutputLine>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, mut rx) = mpsc::unbounded_channel::<OutputLine>();
    let handle = tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let mut out = std::io::LineWriter::new(stdout.lock());
        let mut err = std::io::LineWriter::new(stderr.lock());

        while let Some(line) = rx.blocking_recv() {
            match line {
                OutputLine::Stdout(msg) => {
                    let _ = writeln!(out, "{}", msg);
                }
                OutputLine::Stderr(msg) => {
                    let _ = writeln!(err, "{}", msg);
                }
            }
        }

        let _ = out.flush();
        let _ = err.flush();
    });
    (tx, handle)
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "twisty-moves",
    version,
    about = "Parse, invert and play twisty-puzzle move notation"
)]
pub struct Cli {
    /// Moves line, e.g. "R U R' U'" or "(R U) R'"
    pub moves: Option<String>,

    /// Print the inverse of the moves line instead of parsing it
    #[arg(long)]
    pub invert: bool,

    /// Play the moves through the simulated executor and report the run
    #[arg(long)]
    pub play: bool,

    /// Read moves lines and :commands from stdin and play them as they arrive
    #[arg(long)]
    pub interactive: bool,

    /// List every move token with its canonical spelling and rotation
    #[arg(long)]
    pub list: bool,

    /// Print JSON output
    #[arg(long)]
    pub json: bool,

    /// Run silently: suppress all output except errors
    #[arg(long)]
    pub silent: bool,

    /// Time each quarter turn takes
    #[arg(long, default_value_t = humantime::Duration::from(DEFAULT_SPEED))]
    pub speed: humantime::Duration,

    /// Moves applied quickly before playback starts
    #[arg(long)]
    pub initial_sequence: Option<String>,

    /// Print queue lifecycle events to stderr
    #[arg(long)]
    pub echo_events: bool,
}

pub async fn run(args: Cli) -> Result<()> {
    if args.silent && !args.json {
        return Err(anyhow::anyhow!(
            "--silent can only be used with --json. Use --silent --json together."
        ));
    }

    if args.list {
        return run_list(&args).await;
    }

    if args.interactive {
        return run_interactive(args).await;
    }

    let line = args
        .moves
        .clone()
        .context("a moves line is required unless --interactive or --list is given")?;

    if args.play {
        return run_playback(&args, &line).await;
    }

    if args.invert {
        let inverted = notation::invert(&line);
        let out = if args.json {
            serde_json::to_string_pretty(&serde_json::json!({
                "input": line,
                "inverted": inverted,
            }))?
        } else {
            inverted
        };
        return print_stdout(&args, vec![out]).await;
    }

    run_parse(&args, &line).await
}

/// Build a `PlayConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> PlayConfig {
    PlayConfig {
        speed: Duration::from(args.speed),
        initial_sequence: args.initial_sequence.clone(),
        echo_events: args.echo_events && !args.silent,
    }
}

/// Write lines to stdout through the output writer, unless running silently.
async fn print_stdout(args: &Cli, lines: Vec<String>) -> Result<()> {
    if args.silent {
        return Ok(());
    }
    let (out_tx, out_handle) = spawn_output_writer();
    for line in lines {
        let _ = out_tx.send(OutputLine::Stdout(line));
    }
    drop(out_tx);
    let _ = out_handle.await;
    Ok(())
}

async fn run_parse(args: &Cli, line: &str) -> Result<()> {
    let tokens = notation::parse(line).context("failed to parse moves line")?;
    let canonical = notation::serialize(&tokens)?;

    let out = if args.json {
        let tokens: Vec<_> = tokens
            .iter()
            .map(|t| serde_json::json!({ "token": t, "alias": t.to_string() }))
            .collect();
        serde_json::to_string_pretty(&serde_json::json!({
            "input": line,
            "notation": canonical,
            "tokens": tokens,
        }))?
    } else {
        canonical
    };
    print_stdout(args, vec![out]).await
}

async fn run_list(args: &Cli) -> Result<()> {
    let rows: Vec<_> = MoveToken::ALL
        .iter()
        .map(|&token| {
            let binding = token.base().binding();
            (token, binding, binding.backwards ^ token.is_prime())
        })
        .collect();

    let lines = if args.json {
        let entries: Vec<_> = rows
            .iter()
            .map(|(token, binding, backwards)| {
                serde_json::json!({
                    "token": token,
                    "alias": token.to_string(),
                    "axis": binding.axis,
                    "target": format!("{:?}", binding.target),
                    "backwards": backwards,
                })
            })
            .collect();
        vec![serde_json::to_string_pretty(&entries)?]
    } else {
        rows.iter()
            .map(|(token, binding, backwards)| {
                format!(
                    "{:<4} {:?} {:?} backwards={}",
                    token.to_string(),
                    binding.axis,
                    binding.target,
                    backwards
                )
            })
            .collect()
    };
    print_stdout(args, lines).await
}

/// Play one line through the simulated executor and print a report.
async fn run_playback(args: &Cli, line: &str) -> Result<()> {
    let cfg = build_config(args);
    let tokens = notation::parse(line).context("failed to parse moves line")?;
    let (out_tx, out_handle) = spawn_output_writer();
    let (evt_tx, mut evt_rx) = mpsc::unbounded_channel::<QueueEvent>();

    let echo = cfg.echo_events;
    let event_out = out_tx.clone();
    let events = tokio::spawn(async move {
        let mut failed = 0u64;
        while let Some(ev) = evt_rx.recv().await {
            if matches!(ev, QueueEvent::MoveFailed { .. }) {
                failed += 1;
            }
            if echo {
                let _ = event_out.send(OutputLine::Stderr(ev.to_message()));
            }
        }
        failed
    });

    let executor = Arc::new(SimulatedExecutor::new());
    let player = Player::new(executor.clone(), cfg.speed, evt_tx);

    if let Some(initial) = cfg.initial_sequence.as_deref() {
        player
            .play_initial_sequence(initial)
            .await
            .context("failed to apply initial sequence")?;
    }
    let warm_up_calls = executor.performed();

    let start = Instant::now();
    player
        .sequence(&tokens, GlobalMotionOptions::default())
        .await;
    let elapsed = start.elapsed();

    // Dropping the player closes the event channel once the drain task has exited.
    drop(player);
    let failed = events.await.context("event consumer task failed")?;

    let report = PlaybackReport {
        timestamp_utc: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "now".into()),
        input: line.to_string(),
        notation: notation::serialize(&tokens)?,
        tokens: tokens.len(),
        executed: executor.performed() - warm_up_calls,
        failed,
        elapsed,
        config: cfg,
    };

    if !args.silent {
        if args.json {
            let out = serde_json::to_string_pretty(&report)?;
            let _ = out_tx.send(OutputLine::Stdout(out));
        } else {
            for line in crate::text_summary::build_text_summary(&report).lines {
                let _ = out_tx.send(OutputLine::Stdout(line));
            }
        }
    }

    drop(out_tx);
    let _ = out_handle.await;
    Ok(())
}

/// Read stdin lines as commands and play them until quit or end of input.
async fn run_interactive(args: Cli) -> Result<()> {
    let cfg = build_config(&args);
    let (out_tx, out_handle) = spawn_output_writer();
    let (evt_tx, mut evt_rx) = mpsc::unbounded_channel::<QueueEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<PlayerCommand>();

    let executor = Arc::new(SimulatedExecutor::new());
    let player = Player::new(executor, cfg.speed, evt_tx.clone());
    if let Some(initial) = cfg.initial_sequence.as_deref() {
        player
            .play_initial_sequence(initial)
            .await
            .context("failed to apply initial sequence")?;
    }

    let echo = cfg.echo_events;
    let event_out = out_tx.clone();
    let events = tokio::spawn(async move {
        while let Some(ev) = evt_rx.recv().await {
            match ev {
                QueueEvent::Info(msg) => {
                    let _ = event_out.send(OutputLine::Stdout(msg));
                }
                other if echo => {
                    let _ = event_out.send(OutputLine::Stderr(other.to_message()));
                }
                _ => {}
            }
        }
    });

    let reader_out = out_tx.clone();
    let reader = tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match PlayerCommand::from_line(&line) {
                Some(cmd) => {
                    let quit = cmd == PlayerCommand::Quit;
                    if cmd_tx.send(cmd).is_err() || quit {
                        break;
                    }
                }
                None if line.trim().is_empty() => {}
                None => {
                    let _ = reader_out.send(OutputLine::Stderr(format!(
                        "Unknown command: {}",
                        line.trim()
                    )));
                }
            }
        }
    });

    run_controller(player, evt_tx, cmd_rx).await?;

    // The reader may still be parked on stdin; it holds an output sender.
    reader.abort();
    let _ = reader.await;
    let _ = events.await;
    drop(out_tx);
    let _ = out_handle.await;
    Ok(())
}
