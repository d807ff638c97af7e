//! Core domain models for textmend.
//!
//! This module contains the fundamental data structures used throughout the
//! pipeline: configuration and reveal chunks. These are pure domain models
//! with no I/O dependencies.

pub mod chunk;
pub mod config;

pub use chunk::Chunk;
pub use config::{PipelineConfig, RevealOptions};
