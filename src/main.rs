mod cli;
mod engine;
mod error;
mod model;
mod notation;
mod orchestrator;
mod text_summary;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn default_filter(silent: bool) -> &'static str {
    if silent {
        "twisty_moves=error"
    } else {
        "twisty_moves=warn"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let is_silent = args.silent;

    // Logs go to stderr so stdout stays clean for notation and JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(is_silent))),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli::run(args).await {
        Ok(()) => {
            // Exit explicitly: an interactive stdin reader would otherwise hold the runtime open.
            std::process::exit(0);
        }
        Err(e) => {
            if is_silent {
                println!("{}", e);
                std::process::exit(1);
            } else {
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_is_warn_unless_silent() {
        assert_eq!(default_filter(false), "twisty_moves=warn");
        assert_eq!(default_filter(true), "twisty_moves=error");
    }
}
