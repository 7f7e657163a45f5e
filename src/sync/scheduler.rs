//! Bounded worker pool that drives the pipeline across locales.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use super::{Pipeline, ShutdownSignal};
use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::translate::CompletionService;

/// Final state of one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Last attempt succeeded; `remaining` gaps are left.
    Processed {
        /// Untranslated entries still in the catalog.
        remaining: usize,
    },
    /// Locale failed or was cancelled.
    Failed {
        /// Reason shown in the summary.
        message: String,
    },
}

/// Per-locale outcome reported by [`run_locales`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// Locale code.
    pub locale: String,
    /// How it ended.
    pub status: RunStatus,
}

impl RunResult {
    /// Successful result with `remaining` gaps left.
    #[must_use]
    pub fn processed(locale: impl Into<String>, remaining: usize) -> Self {
        Self {
            locale: locale.into(),
            status: RunStatus::Processed { remaining },
        }
    }

    /// Failed result carrying `message`.
    #[must_use]
    pub fn failed(locale: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            status: RunStatus::Failed {
                message: message.into(),
            },
        }
    }

    /// Whether this locale failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self.status, RunStatus::Failed { .. })
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            RunStatus::Processed { .. } => write!(f, "{} processing completed", self.locale),
            RunStatus::Failed { message } => {
                write!(f, "{} processing failed: {message}", self.locale)
            }
        }
    }
}

/// Scheduling knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerOptions {
    /// Locale that is never scheduled.
    pub source_locale: String,
    /// Worker pool width.
    pub concurrency: usize,
    /// Repeat a locale until no gaps remain.
    pub auto_mode: bool,
    /// Auto mode pass limit per locale; 0 disables the limit.
    pub max_auto_passes: usize,
    /// Auto mode passes without progress before failing; 0 disables the check.
    pub stall_limit: usize,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            source_locale: "en".to_string(),
            concurrency: 3,
            auto_mode: false,
            max_auto_passes: 100,
            stall_limit: 3,
        }
    }
}

impl SchedulerOptions {
    /// Options for a run described by `config`.
    #[must_use]
    pub fn from_config(config: &SyncConfig, auto_mode: bool) -> Self {
        Self {
            source_locale: config.source_locale.clone(),
            concurrency: config.concurrency,
            auto_mode,
            max_auto_passes: config.max_auto_passes,
            stall_limit: config.stall_limit,
        }
    }
}

/// What: Process every non-source locale with a bounded pool of workers.
///
/// Inputs:
/// - `pipeline`: Shared per-locale pipeline
/// - `locales`: Locales to process, in queue order
/// - `options`: Pool width, auto mode, and its bounds
/// - `shutdown`: Cancellation signal checked before each locale and each pass
///
/// Output:
/// - One `RunResult` per distinct non-source locale, in completion order
///
/// Details:
/// - At most `concurrency` locales are in progress at once; idle workers pull
///   the next pending locale from a shared queue.
/// - A failing locale never stops the others.
/// - After shutdown, unstarted and interrupted locales are reported as cancelled.
pub async fn run_locales<S>(
    pipeline: Arc<Pipeline<S>>,
    locales: &[String],
    options: &SchedulerOptions,
    shutdown: &ShutdownSignal,
) -> Vec<RunResult>
where
    S: CompletionService + 'static,
{
    let mut pending: VecDeque<String> = VecDeque::new();
    for locale in locales {
        if *locale != options.source_locale && !pending.contains(locale) {
            pending.push_back(locale.clone());
        }
    }
    let total = pending.len();
    if total == 0 {
        return Vec::new();
    }

    let width = options.concurrency.clamp(1, total);
    tracing::info!(
        locales = total,
        workers = width,
        auto = options.auto_mode,
        "processing locales"
    );

    let queue = Arc::new(Mutex::new(pending));
    let (res_tx, mut res_rx) = mpsc::unbounded_channel::<RunResult>();
    let workers: Vec<_> = (0..width)
        .map(|worker| {
            let pipeline = Arc::clone(&pipeline);
            let queue = Arc::clone(&queue);
            let res_tx = res_tx.clone();
            let shutdown = shutdown.clone();
            let options = options.clone();
            tokio::spawn(async move {
                worker_loop(worker, &pipeline, &queue, &res_tx, &shutdown, &options).await;
            })
        })
        .collect();
    drop(res_tx);

    for joined in futures::future::join_all(workers).await {
        if let Err(e) = joined {
            tracing::error!(error = %e, "locale worker terminated abnormally");
        }
    }

    let mut results = Vec::with_capacity(total);
    while let Some(result) = res_rx.recv().await {
        results.push(result);
    }
    // Locales a dead worker left behind still get a result.
    if let Ok(mut leftover) = queue.lock() {
        results.extend(
            leftover
                .drain(..)
                .map(|locale| RunResult::failed(locale, "not processed")),
        );
    }
    results
}

/// Pop the next pending locale.
fn next_locale(queue: &Mutex<VecDeque<String>>) -> Option<String> {
    queue.lock().ok().and_then(|mut q| q.pop_front())
}

/// One pool worker: pull, process, report, repeat until the queue is empty.
async fn worker_loop<S: CompletionService>(
    worker: usize,
    pipeline: &Pipeline<S>,
    queue: &Mutex<VecDeque<String>>,
    res_tx: &mpsc::UnboundedSender<RunResult>,
    shutdown: &ShutdownSignal,
    options: &SchedulerOptions,
) {
    while let Some(locale) = next_locale(queue) {
        let result = if shutdown.is_triggered() {
            RunResult::failed(&locale, SyncError::Cancelled.to_string())
        } else {
            tracing::info!(worker, locale = %locale, "processing language");
            process_locale(pipeline, &locale, options, shutdown.clone()).await
        };
        match &result.status {
            RunStatus::Processed { remaining } => {
                tracing::info!(locale = %locale, remaining, "locale done");
            }
            RunStatus::Failed { message } => {
                tracing::warn!(locale = %locale, error = %message, "locale failed");
            }
        }
        if res_tx.send(result).is_err() {
            break;
        }
    }
}

/// What: Run one locale to its final state.
///
/// Inputs:
/// - `pipeline`: Shared pipeline
/// - `locale`: Locale to process
/// - `options`: Auto mode and its bounds
/// - `shutdown`: Cancellation signal, raced against every attempt
///
/// Output:
/// - `RunResult` for `locale`
///
/// Details:
/// - Without auto mode a single attempt decides the result.
/// - In auto mode attempts repeat, each re-reading the catalog, until no gaps
///   remain, the pass limit is hit, or the gap count stops shrinking for
///   `stall_limit` passes in a row.
async fn process_locale<S: CompletionService>(
    pipeline: &Pipeline<S>,
    locale: &str,
    options: &SchedulerOptions,
    mut shutdown: ShutdownSignal,
) -> RunResult {
    let mut passes = 0usize;
    let mut best = usize::MAX;
    let mut stalled = 0usize;

    loop {
        if shutdown.is_triggered() {
            return RunResult::failed(locale, SyncError::Cancelled.to_string());
        }
        passes += 1;
        let attempt = tokio::select! {
            biased;
            () = shutdown.triggered() => Err(SyncError::Cancelled),
            r = pipeline.run_attempt(locale) => r,
        };
        let report = match attempt {
            Ok(report) => report,
            Err(e) => return RunResult::failed(locale, e.to_string()),
        };

        if !options.auto_mode || report.remaining == 0 {
            return RunResult::processed(locale, report.remaining);
        }

        if report.remaining < best {
            best = report.remaining;
            stalled = 0;
        } else {
            stalled += 1;
        }
        if options.stall_limit > 0 && stalled >= options.stall_limit {
            return RunResult::failed(
                locale,
                format!(
                    "no progress after {stalled} passes, {} keys remaining",
                    report.remaining
                ),
            );
        }
        if options.max_auto_passes > 0 && passes >= options.max_auto_passes {
            return RunResult::failed(
                locale,
                format!(
                    "gave up after {passes} passes, {} keys remaining",
                    report.remaining
                ),
            );
        }
        tracing::info!(
            locale = %locale,
            remaining = report.remaining,
            pass = passes,
            "auto mode: reprocessing"
        );
    }
}
