//! catalog-fill binary entrypoint kept minimal. The run itself lives in `catalog_fill::app`.

use std::fmt;
use std::sync::OnceLock;

use clap::Parser;

use catalog_fill::args::Args;

/// Local-time log timestamps, `YYYY-MM-DD-T HH:MM:SS`.
struct FillTimer;

impl tracing_subscriber::fmt::time::FormatTime for FillTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S");
        write!(w, "{ts}")
    }
}

/// Keeps the non-blocking log writer alive until exit.
static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Route diagnostics to stderr so stdout carries only the summary.
fn init_logging() {
    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_timer(FillTimer)
        .init();
    let _ = LOG_GUARD.set(guard);
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging();

    tracing::info!(auto = args.auto, "catalog-fill starting");
    match catalog_fill::app::run(args.auto).await {
        Ok(results) => {
            println!("Processing results:");
            for result in &results {
                println!("{result}");
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "run aborted");
            eprintln!("Error: {err}");
        }
    }
    tracing::info!("catalog-fill exited");
}
