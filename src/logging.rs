//! Logger bootstrap for the `byline` binary. The library only emits records
//! through the [`log`] facade; installing a backend is left to the binary.

use flexi_logger::{Logger, LoggerHandle};
use log::debug;

const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Starts logging to stderr at `level`. A `RUST_LOG` specification in the
/// environment takes precedence over `level`. The returned handle must be
/// kept alive for as long as logging is needed.
///
/// # Errors
/// - Returns an error when `level` isn't one of `off`, `error`, `warn`,
///   `info`, `debug`, or `trace`.
/// - Returns an error when the logger backend can't be started.
pub fn init_logging(level: &str) -> Result<LoggerHandle, String> {
    let level = normalize_level(level)?;
    let handle = Logger::try_with_env_or_str(level)
        .map_err(|err| format!("invalid log level `{}`: {}", level, err))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("failed to start logger: {}", err))?;
    debug!("logging started at level {}", level);
    Ok(handle)
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    let lowered = level.trim().to_ascii_lowercase();
    LEVELS
        .iter()
        .find(|candidate| **candidate == lowered)
        .copied()
        .ok_or_else(|| {
            format!(
                "unsupported log level `{}`; expected one of {}",
                level,
                LEVELS.join(", ")
            )
        })
}
