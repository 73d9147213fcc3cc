//! Tracing subscriber setup.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppConfig, LoggingConfig};

/// Default filter when `RUST_LOG` is not set: our crate at the configured
/// level, everything else at warn.
fn default_directive(level: &str) -> String {
    format!("warn,parish_admin={level}")
}

/// Install the global subscriber.
///
/// Logs go to stdout and, when enabled, to a daily rolling file. Keep the
/// returned guard alive for the life of the program or buffered file output
/// is lost.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(&config.level)));

    let mut guard = None;
    let file_layer = if config.file {
        let dir = AppConfig::log_dir();
        match RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("parish-admin")
            .filename_suffix("log")
            .build(&dir)
        {
            Ok(appender) => {
                let (writer, worker) = tracing_appender::non_blocking(appender);
                guard = Some(worker);
                Some(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
            }
            Err(e) => {
                eprintln!("Failed to open log directory {}: {}", dir.display(), e);
                None
            }
        }
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_parses() {
        let directive = default_directive("debug");
        assert_eq!(directive, "warn,parish_admin=debug");
        assert!(EnvFilter::try_new(directive).is_ok());
    }
}
