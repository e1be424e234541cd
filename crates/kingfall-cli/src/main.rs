//! kingfall - play a simplified chess variant against the computer.
//!
//! Reads commands from stdin, one per line. Configuration comes from a TOML
//! file and can be overridden on the command line.

mod command;
mod config;
mod render;
mod session;

use clap::Parser;
use command::Command;
use config::AppConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use session::{Flow, Session};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Play kingfall against the computer.
#[derive(Parser)]
#[command(name = "kingfall")]
#[command(about = "Play a simplified chess variant against the computer")]
struct Args {
    /// Path to the configuration file
    #[arg(long, default_value_os_t = AppConfig::default_path())]
    config: PathBuf,

    /// Seed for the computer's random choices
    #[arg(long)]
    seed: Option<u64>,

    /// Half-width of the random jitter added to move scores
    #[arg(long)]
    jitter: Option<f64>,

    /// Reply immediately instead of pausing before the computer's move
    #[arg(long)]
    no_delay: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut config = AppConfig::load(&args.config)?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(jitter) = args.jitter {
        config.selector.jitter = jitter;
    }
    if args.no_delay {
        config.think_delay_ms = 0;
    }
    config.validate()?;
    tracing::info!(config = ?args.config, ?config, "configuration loaded");

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(
        config.selector,
        rng,
        Duration::from_millis(config.think_delay_ms),
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    session.start(&mut stdout)?;

    let mut lines = stdin.lock().lines();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match Command::parse(&line) {
            Ok(cmd) => {
                tracing::debug!(?cmd, "command");
                if session.handle(cmd, &mut stdout)? == Flow::Quit {
                    break;
                }
            }
            Err(e) => writeln!(stdout, "{}", e)?,
        }
    }

    Ok(())
}
