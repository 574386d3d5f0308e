use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use handlescope::config::{self, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = config::load_config()?;
    config::validate_config(&cfg)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.logging.level.clone()));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    if cfg.logging.file.is_empty() {
        subscriber.init();
    } else {
        let log_file = std::fs::File::create(&cfg.logging.file)?;
        subscriber.with_writer(std::sync::Mutex::new(log_file)).init();
    }

    info!("handlescope v{}", env!("CARGO_PKG_VERSION"));

    let pid: u32 = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => std::process::id(),
    };

    run(pid, &cfg).await
}

/// Scans `pid` and prints the resolved records as JSON lines
#[cfg(windows)]
async fn run(pid: u32, cfg: &Config) -> Result<()> {
    use handlescope::{drain_scan, pending_records, start_scan_with, ScanOptions};
    use std::time::Duration;

    let token = start_scan_with(pid, ScanOptions::from(cfg));
    if !token.is_valid() {
        anyhow::bail!("platform snapshot facility unavailable");
    }
    info!(%token, pid, "scan started");

    // No completion signal at this layer; poll until the record count
    // settles.
    let mut last = 0;
    for _ in 0..150 {
        tokio::time::sleep(Duration::from_millis(200)).await;
        let count = pending_records(token);
        if count > 0 && count == last {
            break;
        }
        last = count;
    }

    let records = drain_scan(token);
    info!(count = records.len(), "scan drained");
    for record in &records {
        println!("{}", serde_json::to_string(record)?);
    }

    Ok(())
}

#[cfg(not(windows))]
async fn run(pid: u32, _cfg: &Config) -> Result<()> {
    anyhow::bail!("handle enumeration requires Windows (requested pid {pid})")
}
