//! I/O utilities for textmend.
//!
//! Provides file reading with memory mapping support for efficient
//! handling of large transcripts, plus the stdin fallback the CLI uses.

pub mod reader;

pub use reader::{FileReader, read_file, read_input};
