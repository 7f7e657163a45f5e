//! Catalog synchronization: the per-locale pipeline and the scheduler that
//! runs it over all target locales.
//!
//! Within one locale the stages run strictly in sequence; across locales a
//! bounded pool of workers runs independent pipelines with no shared
//! mutable catalog state.

mod pipeline;
mod scheduler;
mod shutdown;

pub use pipeline::{AttemptReport, Pipeline};
pub use scheduler::{RunResult, RunStatus, SchedulerOptions, run_locales};
pub use shutdown::{ShutdownSignal, ShutdownTrigger, shutdown_channel};
