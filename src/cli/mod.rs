//! CLI layer for textmend.
//!
//! Provides the command-line interface using clap, with commands for
//! cleaning transcripts, previewing reveal chunks, and repairing
//! completion payloads.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
