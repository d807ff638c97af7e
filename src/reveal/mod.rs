//! Renderer adapter: reveal chunking and timing.
//!
//! The renderer shows clean text incrementally instead of all at once.
//! [`RevealSplitter`] cuts clean text into chunks at natural boundaries,
//! and [`schedule`] assigns each chunk a reveal offset from
//! [`RevealOptions`](crate::core::RevealOptions). No timers run here; the
//! host renderer owns the clock.

pub mod splitter;
pub mod timeline;

pub use splitter::RevealSplitter;
pub use timeline::{RevealStep, schedule};
