use betbrain::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Console logging plus, when BETBRAIN_LOG_DIR is writable, a daily rolling
/// file. The returned guard flushes the file writer and must outlive the server.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    // `tracing_appender::rolling::daily` panics if it cannot create the
    // initial file, so writability is checked first.
    let log_dir = std::env::var("BETBRAIN_LOG_DIR").ok();
    let (file_layer, guard) = match log_dir.as_deref().map(prepare_log_dir) {
        Some(Ok(dir)) => {
            let file_appender = tracing_appender::rolling::daily(dir, "betbrain.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false) // No color codes in file
                .with_target(true);
            (Some(layer), Some(guard))
        }
        Some(Err(e)) => {
            eprintln!("Warning: {}, file logging disabled", e);
            (None, None)
        }
        None => (None, None),
    };

    // Console layer, JSON or human readable
    let json_layer = config
        .json
        .then(|| tracing_subscriber::fmt::layer().json().with_current_span(false));
    let text_layer = (!config.json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .with(file_layer)
        .init();

    if let (Some(dir), Some(_)) = (log_dir.as_deref(), guard.as_ref()) {
        eprintln!("Logging to: {}/betbrain.log", dir);
    }
    guard
}

fn prepare_log_dir(dir: &str) -> Result<&str, String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Could not create log directory {} ({})", dir, e))?;

    let test_path = std::path::Path::new(dir).join(".betbrain_write_test");
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&test_path)
        .map_err(|e| format!("Could not write to log directory {} ({})", dir, e))?;
    let _ = std::fs::remove_file(&test_path);
    Ok(dir)
}

pub fn init_logging_simple() {
    // Minimal logging for one-shot commands
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .try_init();
}
