//! Logging Infrastructure
//!
//! Console output goes to stderr so tables on stdout stay clean. With a log
//! directory configured, a daily rotating file receives the same events.

use std::fs;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging
///
/// `RUST_LOG` takes precedence over `level`. With `log_dir` set, files are
/// written as `<log_dir>/console.YYYY-MM-DD`.
pub fn init_logger(level: &str, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    let subscriber = tracing_subscriber::registry().with(console_layer);

    if let Some(dir) = log_dir {
        fs::create_dir_all(dir)?;
        let file_log = RollingFileAppender::new(Rotation::DAILY, dir, "console");
        let file_layer = fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file_log))
            .with_filter(EnvFilter::new(level));

        subscriber.with(file_layer).try_init()?;
    } else {
        subscriber.try_init()?;
    }

    Ok(())
}
