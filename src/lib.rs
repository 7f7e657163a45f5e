//! Library entry for catalog-fill exposing the catalog pipeline for the binary and integration tests.

pub mod app;
pub mod args;
pub mod catalog;
pub mod config;
pub mod error;
pub mod i18n;
pub mod sync;
pub mod translate;

pub use error::SyncError;
