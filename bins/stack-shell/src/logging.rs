use anyhow::Result;
use std::path::Path;
use std::sync::OnceLock;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

static INIT_GUARD: OnceLock<()> = OnceLock::new();

/// Initialize tracing output for the shell.
///
/// Command results go to stdout, so logs go to the given file, or to stderr
/// when none is configured. Filtering follows `RUST_LOG`.
pub fn initialize_logging(log_file_path: Option<&Path>) -> Result<()> {
    if INIT_GUARD.set(()).is_err() {
        // Already initialized elsewhere; do nothing and succeed
        return Ok(());
    }

    match log_file_path {
        Some(path) => {
            let log_file = std::fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)?;
            let file_subscriber = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(log_file)
                .with_filter(tracing_subscriber::filter::EnvFilter::from_default_env());
            let init_res = tracing_subscriber::registry()
                .with(file_subscriber)
                .try_init();
            let _ = init_res; // ignore AlreadyInit errors silently
        }
        None => {
            let init_res = tracing_subscriber::fmt()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
                .try_init();
            let _ = init_res;
        }
    }

    Ok(())
}
