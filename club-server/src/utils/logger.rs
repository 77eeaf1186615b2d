//! Logging Infrastructure
//!
//! `RUST_LOG` takes precedence; otherwise the configured level applies to
//! this crate and `tower_http`.

use std::path::Path;

use tracing_subscriber::EnvFilter;

fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "club_server={log_level},tower_http={log_level},security=info,sqlx=warn"
        ))
    })
}

/// Initialize the logger on stdout
pub fn init_logger(log_level: &str) {
    init_logger_with_file(log_level, false, None);
}

/// Initialize the logger with optional daily-rolling file output
///
/// File output is used only when `log_dir` exists. Safe to call more than
/// once; later calls are ignored.
pub fn init_logger_with_file(log_level: &str, json: bool, log_dir: Option<&str>) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(log_level))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.is_dir() {
            let file_appender = tracing_appender::rolling::daily(log_path, "club-server");
            let builder = builder.with_ansi(false).with_writer(file_appender);
            let _ = if json {
                builder.json().try_init()
            } else {
                builder.try_init()
            };
            return;
        }
        eprintln!("LOG_DIR {dir} does not exist, logging to stdout");
    }

    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
