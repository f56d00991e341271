use std::sync::{Arc, Mutex};

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::domain::error::Result;
use crate::infrastructure::config::ConfigService;
use crate::interfaces::http::{add_log, start_server, LogEntry};

pub async fn run() -> Result<()> {
    let config = ConfigService::load()?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let logs: Arc<Mutex<Vec<LogEntry>>> = Arc::new(Mutex::new(Vec::new()));

    info!(
        host = %config.server.host,
        port = config.server.port,
        workers = config.server.workers,
        yates_correction = config.analysis.yates_correction,
        "Starting chi-square API"
    );
    add_log(
        &logs,
        "INFO",
        "HttpApi",
        &format!(
            "Listening on http://{}:{}",
            config.server.host, config.server.port
        ),
    );

    start_server(&config, logs)?.await?;
    Ok(())
}
