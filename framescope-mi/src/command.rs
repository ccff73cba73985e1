//! Command parsing
//!
//! Every machine-interface command has a fixed argument-shape contract.
//! A violation is a usage error, reported before anything executes; no
//! partial output is ever produced for a malformed command line.

use framescope_target::{PrintMode, Result, StackError};

/// One parsed machine-interface command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// One-way latch: allow frame-filter delegation for the session.
    EnableFrameFilters,
    /// Backtrace listing over an inclusive level range; no bounds means the
    /// whole stack.
    ListFrames {
        no_filters: bool,
        bounds: Option<(i32, i32)>,
    },
    /// Stack depth, counting at most `max` frames (`-1` for all).
    InfoDepth { max: i32 },
    /// Locals of the selected frame.
    ListLocals { no_filters: bool, mode: PrintMode },
    /// Arguments of every frame in the range.
    ListArgs {
        no_filters: bool,
        mode: PrintMode,
        bounds: Option<(i32, i32)>,
    },
    /// Locals and arguments of the selected frame.
    ListVariables { no_filters: bool, mode: PrintMode },
    /// Re-designate the selected frame.
    SelectFrame { spec: String },
    /// Location of the selected frame.
    InfoFrame,
}

impl Command {
    /// Split a raw command line into tokens and parse it.
    pub fn parse_line(line: &str) -> Result<Self> {
        let tokens = shlex::split(line)
            .ok_or_else(|| StackError::Usage("unbalanced quoting in command line".to_string()))?;
        let (name, args) = tokens
            .split_first()
            .ok_or_else(|| StackError::Usage("empty command".to_string()))?;
        Self::parse(name, args)
    }

    /// Parse one tokenized command against its argument-shape contract.
    pub fn parse(name: &str, args: &[String]) -> Result<Self> {
        match name {
            "enable-frame-filters" => {
                expect_no_args(name, args)?;
                Ok(Command::EnableFrameFilters)
            }
            "list-frames" => {
                let (no_filters, rest) = take_no_filters(args);
                let bounds = parse_bounds(name, rest)?;
                Ok(Command::ListFrames { no_filters, bounds })
            }
            "info-depth" => match args {
                [] => Ok(Command::InfoDepth { max: -1 }),
                [max] => Ok(Command::InfoDepth {
                    max: parse_int(name, max)?,
                }),
                _ => Err(usage(name, "expected at most one argument")),
            },
            "list-locals" => {
                let (no_filters, rest) = take_no_filters(args);
                let mode = parse_sole_mode(name, rest)?;
                Ok(Command::ListLocals { no_filters, mode })
            }
            "list-variables" => {
                let (no_filters, rest) = take_no_filters(args);
                let mode = parse_sole_mode(name, rest)?;
                Ok(Command::ListVariables { no_filters, mode })
            }
            "list-args" => {
                let (no_filters, rest) = take_no_filters(args);
                let (mode_token, rest) = rest
                    .split_first()
                    .ok_or_else(|| usage(name, "expected a print mode"))?;
                let mode = parse_mode(name, mode_token)?;
                let bounds = parse_bounds(name, rest)?;
                Ok(Command::ListArgs {
                    no_filters,
                    mode,
                    bounds,
                })
            }
            "select-frame" => match args {
                [spec] => Ok(Command::SelectFrame { spec: spec.clone() }),
                _ => Err(usage(name, "expected exactly one frame specification")),
            },
            "info-frame" => {
                expect_no_args(name, args)?;
                Ok(Command::InfoFrame)
            }
            _ => Err(StackError::Usage(format!("undefined command: {name}"))),
        }
    }
}

fn usage(command: &str, message: &str) -> StackError {
    StackError::Usage(format!("{command}: {message}"))
}

fn expect_no_args(command: &str, args: &[String]) -> Result<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(usage(command, "no arguments allowed"))
    }
}

/// `--no-filters`, when present, must be the first token; anywhere else it
/// fails the contract of whatever argument position it lands in.
fn take_no_filters(args: &[String]) -> (bool, &[String]) {
    match args.split_first() {
        Some((flag, rest)) if flag.as_str() == "--no-filters" => (true, rest),
        _ => (false, args),
    }
}

fn parse_int(command: &str, token: &str) -> Result<i32> {
    token
        .parse()
        .map_err(|_| usage(command, &format!("expected an integer, got '{token}'")))
}

/// Frame bounds come as both low and high, or not at all.
fn parse_bounds(command: &str, args: &[String]) -> Result<Option<(i32, i32)>> {
    match args {
        [] => Ok(None),
        [low, high] => Ok(Some((parse_int(command, low)?, parse_int(command, high)?))),
        _ => Err(usage(command, "expected no frame bounds or both low and high")),
    }
}

fn parse_mode(command: &str, token: &str) -> Result<PrintMode> {
    PrintMode::parse_token(token)
        .ok_or_else(|| usage(command, &format!("unknown print mode '{token}'")))
}

/// The print mode must be the sole remaining token.
fn parse_sole_mode(command: &str, args: &[String]) -> Result<PrintMode> {
    match args {
        [token] => parse_mode(command, token),
        _ => Err(usage(command, "expected exactly one print mode")),
    }
}
