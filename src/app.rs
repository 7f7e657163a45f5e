//! Process-level wiring: configuration, credential, keywords, client, and
//! the scheduler run.

use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::config::{ApiKey, SyncConfig};
use crate::error::SyncError;
use crate::sync::{
    Pipeline, RunResult, SchedulerOptions, ShutdownTrigger, run_locales, shutdown_channel,
};
use crate::translate::{KeywordSet, OpenAiClient};

/// What: Run a full synchronization over every configured locale.
///
/// Inputs:
/// - `auto_mode`: Repeat each locale until it has no gaps left
///
/// Output:
/// - One `RunResult` per non-source locale
///
/// # Errors
/// - Returns `SyncError::Configuration` when the configuration, credential,
///   keyword file, or HTTP client cannot be set up; no locale work starts then.
///
/// Details:
/// - Ctrl-C requests a graceful stop: running attempts are abandoned and
///   remaining locales are reported as cancelled. A catalog write already
///   handed to the blocking pool still completes; it is atomic either way.
pub async fn run(auto_mode: bool) -> Result<Vec<RunResult>, SyncError> {
    let config = SyncConfig::load(None).await?;
    let api_key = ApiKey::from_env()?;
    let keywords = KeywordSet::load(&config.keywords_path).await?;
    let client = OpenAiClient::new(&config, api_key)?;

    if auto_mode {
        tracing::info!("auto mode enabled, locales with remaining keys will be reprocessed");
    }

    let pipeline = Arc::new(
        Pipeline::new(
            CatalogStore::new(config.locales_dir.clone()),
            client,
            keywords,
            config.effective_batch_size(),
        )
        .with_site(config.site_url.clone(), config.source_locale.clone()),
    );
    let options = SchedulerOptions::from_config(&config, auto_mode);

    let (trigger, signal) = shutdown_channel();
    let ctrl_c = tokio::spawn(forward_ctrl_c(trigger));
    let results = run_locales(pipeline, &config.target_locales(), &options, &signal).await;
    ctrl_c.abort();
    Ok(results)
}

/// Trigger shutdown on the first Ctrl-C.
async fn forward_ctrl_c(trigger: ShutdownTrigger) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::warn!("interrupt received, stopping after current attempts");
            trigger.trigger();
        }
        Err(e) => tracing::warn!(error = %e, "unable to listen for Ctrl-C"),
    }
}
