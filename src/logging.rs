//! Logging initialisation for fusion-ctl.
//!
//! When `FUSION_LOG=1`, structured logs are also written to
//! `<log dir>/fusion-ctl.log` (see [`crate::paths`]). Otherwise only stderr
//! output (filtered by `RUST_LOG`, default `warn`) is enabled.
//!
//! Keep the returned guard alive for the duration of the process so that
//! buffered log lines are flushed on exit.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::paths::AppPaths;

pub struct LogGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Initialise the global tracing subscriber. `verbose` raises the stderr
/// default to `debug` when `RUST_LOG` is unset.
pub fn init(verbose: bool) -> LogGuard {
    let default_level = if verbose { "debug" } else { "warn" };

    let file_guard = if std::env::var("FUSION_LOG").as_deref() == Ok("1") {
        let dir = match AppPaths::resolve() {
            Some(paths) if paths.ensure().is_ok() => paths.logs,
            _ => {
                let dir = std::env::temp_dir().join("fusion-ctl");
                let _ = std::fs::create_dir_all(&dir);
                dir
            }
        };
        let file_appender = tracing_appender::rolling::never(dir, "fusion-ctl.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

        tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new(if verbose { "debug" } else { "info" })
            }))
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(file_layer)
            .init();

        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();

        None
    };

    LogGuard {
        _file_guard: file_guard,
    }
}
