//! Stack-snapshot inspection shell
//!
//! Loads a frozen stack snapshot and runs machine-interface commands
//! against it: one command per input line, one JSON object per output line.

mod logging;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use framescope_mi::{execute, render, Command};
use framescope_stack::Session;
use framescope_target::{NullFilterChain, SnapshotTarget};

#[derive(Parser, Debug)]
#[command(name = "stack-shell")]
#[command(about = "Run stack-inspection machine-interface commands against a stack snapshot")]
#[command(version = "0.1.0")]
struct Args {
    /// Stack snapshot file (JSON)
    snapshot: PathBuf,

    /// Run a single command and exit instead of reading stdin
    #[arg(long, short = 'c', value_name = "COMMAND")]
    command: Option<String>,

    /// Log file path (default: stderr)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::initialize_logging(args.log_file.as_deref())?;

    let mut target = SnapshotTarget::from_path(&args.snapshot)
        .with_context(|| format!("failed to load snapshot {}", args.snapshot.display()))?;
    info!("Loaded snapshot with {} frames", target.frame_count());

    let mut session = Session::new();
    let mut filters = NullFilterChain;

    let stdout = io::stdout();
    if let Some(line) = args.command {
        run_line(&mut target, &mut filters, &mut session, &line, &mut stdout.lock())?;
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read command line")?;
        if line.trim().is_empty() {
            continue;
        }
        run_line(&mut target, &mut filters, &mut session, &line, &mut stdout.lock())?;
    }
    Ok(())
}

fn run_line(
    target: &mut SnapshotTarget,
    filters: &mut NullFilterChain,
    session: &mut Session,
    line: &str,
    out: &mut impl Write,
) -> Result<()> {
    let outcome =
        Command::parse_line(line).and_then(|command| execute(target, filters, session, command));
    writeln!(out, "{}", render(&outcome))?;
    Ok(())
}
