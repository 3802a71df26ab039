//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::infrastructure::paths::{get_data_dir, LOG_FILE_NAME};
use crate::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber with file output.
///
/// # Level Resolution
///
/// 1. `RUST_LOG` if set and valid
/// 2. `config.trace_level` if set
/// 3. Default: `"info"`
///
/// # File Location
///
/// `<data_dir>/recipebox.log`, rotated at 10 MB with three backups.
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently returns if directory creation fails (logging is optional)
/// - Idempotent: only the first call installs a subscriber
///
/// # Example
///
/// ```rust
/// use recipebox::observability::init_tracing;
/// use recipebox::Config;
///
/// let dir = tempfile::tempdir().unwrap();
/// let config = Config {
///     data_dir: Some(dir.path().display().to_string()),
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let data_dir = get_data_dir(config.data_dir.as_deref());
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(FileWriter::new(data_dir.join(LOG_FILE_NAME)))
        .with_ansi(false)
        .with_target(true);

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);

    let _ = subscriber.try_init();
}
