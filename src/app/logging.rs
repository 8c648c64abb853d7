use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

/// Log filter variable, e.g. `KARAOKEBOX_LOG=karaokebox=debug`
pub const LOG_ENV: &str = "KARAOKEBOX_LOG";

/// Send logs to a daily file under `dir`; the terminal belongs to the UI.
/// Keep the guard alive until exit or buffered lines are lost.
pub fn configure_logging(dir: &Path) -> WorkerGuard {
    let env_filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::daily(dir, "karaokebox.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_line_number(true);

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();

    guard
}
