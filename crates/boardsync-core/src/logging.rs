use tracing_subscriber::{fmt, EnvFilter};

pub const DEBUG_LOG_ENV: &str = "BOARDSYNC_DEBUG_LOG";

/// Installs the global tracing subscriber.
///
/// With `BOARDSYNC_DEBUG_LOG` set to a file path, everything down to DEBUG is
/// appended to that file. Otherwise `RUST_LOG` is honoured, defaulting to `warn`.
/// Returns `Ok(false)` if a subscriber was already installed.
pub fn init_tracing() -> std::io::Result<bool> {
    if let Ok(log_path) = std::env::var(DEBUG_LOG_ENV) {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        return Ok(fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .try_init()
            .is_ok());
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    Ok(fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok())
}
