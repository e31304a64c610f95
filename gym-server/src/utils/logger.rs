//! Logging Infrastructure
//!
//! Console output plus, when a log directory is configured:
//! - Daily rotating application logs under `app/` (pruned by [`cleanup_old_logs`])
//! - Daily rotating audit logs under `audit/` (never pruned)
//!
//! Audit events are emitted with `target: "audit"`, see [`crate::audit_log`].

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::Filter;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

const APP_PREFIX: &str = "app";
const AUDIT_PREFIX: &str = "audit";
const LOG_SUFFIX: &str = "log";

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn"); `RUST_LOG` wins when set
/// * `json_format` - JSON lines (production) or human-readable (development)
/// * `log_dir` - Optional directory for file logging
/// * `retention_days` - How long application logs are kept
///
/// # Examples
/// ```no_run
/// # fn main() -> anyhow::Result<()> {
/// // Development setup (console only)
/// gym_server::utils::logger::init_logger_with_file("debug", false, None, 14)?;
/// # Ok(())
/// # }
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&Path>,
    retention_days: i64,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if json_format {
        layers.push(
            fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .boxed(),
        );
    } else {
        layers.push(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .boxed(),
        );
    }

    if let Some(log_dir) = log_dir {
        let app_dir = log_dir.join(APP_PREFIX);
        let audit_dir = log_dir.join(AUDIT_PREFIX);
        fs::create_dir_all(&app_dir)?;
        fs::create_dir_all(&audit_dir)?;

        // Everything except audit events goes to the app log
        layers.push(file_layer(
            json_format,
            daily_appender(&app_dir, APP_PREFIX)?,
            filter_fn(|meta| meta.target() != "audit"),
        ));
        layers.push(file_layer(
            json_format,
            daily_appender(&audit_dir, AUDIT_PREFIX)?,
            filter_fn(|meta| meta.target() == "audit"),
        ));

        // 需要 tokio runtime; main 在 #[tokio::main] 内调用
        tokio::spawn(periodic_cleanup(log_dir.to_path_buf(), retention_days));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

fn daily_appender(dir: &Path, prefix: &str) -> anyhow::Result<RollingFileAppender> {
    Ok(RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix(LOG_SUFFIX)
        .build(dir)?)
}

fn file_layer<F>(json_format: bool, appender: RollingFileAppender, filter: F) -> BoxedLayer
where
    F: Filter<Registry> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(appender));

    if json_format {
        layer.json().with_filter(filter).boxed()
    } else {
        layer.with_filter(filter).boxed()
    }
}

/// Delete application log files older than `retention_days`.
///
/// Only `app/app.YYYY-MM-DD.log` files are considered; audit logs are kept
/// forever. Returns how many files were removed.
pub fn cleanup_old_logs(log_dir: &Path, retention_days: i64) -> anyhow::Result<usize> {
    let cutoff = Local::now().date_naive() - chrono::Duration::days(retention_days);

    let app_log_dir = log_dir.join(APP_PREFIX);
    if !app_log_dir.exists() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if let Some(date) = rotated_date(name)
            && date < cutoff
        {
            fs::remove_file(&path)?;
            removed += 1;
            tracing::info!(file = %name, "Deleted old log file");
        }
    }

    Ok(removed)
}

/// `app.2024-01-31.log` -> 2024-01-31
fn rotated_date(file_name: &str) -> Option<NaiveDate> {
    let date_part = file_name
        .strip_prefix(APP_PREFIX)?
        .strip_prefix('.')?
        .strip_suffix(LOG_SUFFIX)?
        .strip_suffix('.')?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Periodic cleanup task - runs every hour
async fn periodic_cleanup(log_dir: PathBuf, retention_days: i64) {
    use tokio::time::{Duration, sleep};

    loop {
        if let Err(e) = cleanup_old_logs(&log_dir, retention_days) {
            tracing::error!(error = %e, "Failed to cleanup old logs");
        }
        sleep(Duration::from_secs(3600)).await;
    }
}

/// Audit log helper - records member lifecycle changes
///
/// # Examples
/// ```no_run
/// gym_server::audit_log!("create", "member:42");
/// gym_server::audit_log!("renew", "member:42", "plan=Yearly");
/// ```
#[macro_export]
macro_rules! audit_log {
    ($action:expr, $resource:expr) => {
        tracing::info!(
            target: "audit",
            action = %$action,
            resource = %$resource,
            timestamp = chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
    ($action:expr, $resource:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            action = %$action,
            resource = %$resource,
            details = %$details,
            timestamp = chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
}
