//! Command-line argument parsing.

pub mod definition;

pub use definition::Args;
