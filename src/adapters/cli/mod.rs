//! CLI Adapter
//!
//! Command-line interface for the MA excursion analyzer.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{AnalysisArgs, AnalyzeCmd, CliApp, Command, OutputFormat, WatchCmd};
