//! Command-line argument definition.

use clap::Parser;

/// catalog-fill - fill missing strings in per-locale message catalogs
#[derive(Parser, Debug, Clone, Copy, PartialEq, Eq)]
#[command(name = "catalog-fill")]
#[command(version)]
#[command(about = "Fill missing strings in per-locale message catalogs using a text-completion service", long_about = None)]
pub struct Args {
    /// Keep reprocessing each locale until no untranslated keys remain
    #[arg(long)]
    pub auto: bool,
}
