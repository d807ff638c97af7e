//! # Textmend
//!
//! Reconstruction pipeline for AI chat answers.
//!
//! Textmend repairs the text artifacts that streaming model output
//! accumulates before it reaches a renderer: stray whitespace, stutter
//! duplication of characters and words, and collapsed block structure.
//! The repaired text can then be split into timed reveal chunks.
//!
//! ## Features
//!
//! - **Normalization**: Collapses whitespace noise and strips control characters
//! - **Deduplication**: Removes character stutter and repeated words, idempotently
//! - **Reflow**: Rebuilds paragraph, heading, and list spacing
//! - **Protected Spans**: Code fences, inline code, and URLs pass through byte-exact
//! - **Reveal Chunking**: Grapheme-aware chunk splitting with a timing schedule
//!
//! ## Example
//!
//! ```
//! use textmend::pipeline::Pipeline;
//!
//! let pipeline = Pipeline::default();
//! assert_eq!(pipeline.clean("Helllo   wooorld!!!"), "Hello world!!!");
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
// Note: unsafe is needed for memory-mapped I/O (memmap2)
#![warn(unsafe_code)]

pub mod cli;
pub mod core;
pub mod error;
pub mod io;
pub mod payload;
pub mod pipeline;
pub mod reveal;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use core::{Chunk, PipelineConfig, RevealOptions};

// Re-export pipeline types
pub use pipeline::{Pipeline, Stage, available_stages};

// Re-export reveal types
pub use reveal::{RevealSplitter, RevealStep, schedule};

// Re-export payload helpers
pub use payload::{repair_completion, repair_completion_str};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
