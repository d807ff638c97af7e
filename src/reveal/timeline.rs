//! Reveal timing schedule.
//!
//! Maps chunks to reveal instants. The schedule is pure data; driving an
//! actual timer is left to the renderer host.

use crate::core::{Chunk, RevealOptions};
use serde::{Deserialize, Serialize};

/// A single reveal instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealStep {
    /// Index of the chunk to reveal.
    pub index: usize,

    /// Milliseconds after schedule start at which the chunk reveals.
    pub at_ms: u64,
}

/// Builds the reveal schedule for a chunk sequence.
///
/// Chunk `i` reveals at `delay_ms + i * speed_ms`. Arithmetic saturates,
/// so extreme option values clamp to `u64::MAX` instead of wrapping.
#[must_use]
pub fn schedule(chunks: &[Chunk], options: RevealOptions) -> Vec<RevealStep> {
    chunks
        .iter()
        .map(|chunk| RevealStep {
            index: chunk.index,
            at_ms: options.delay_ms.saturating_add(
                u64::try_from(chunk.index)
                    .unwrap_or(u64::MAX)
                    .saturating_mul(options.speed_ms),
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::RevealSplitter;

    fn sample_chunks() -> Vec<Chunk> {
        RevealSplitter::new().split("One two three four")
    }

    #[test]
    fn test_schedule_empty() {
        assert!(schedule(&[], RevealOptions::new()).is_empty());
    }

    #[test]
    fn test_schedule_default_timing() {
        let steps = schedule(&sample_chunks(), RevealOptions::new());
        assert_eq!(steps[0].at_ms, 0);
        assert_eq!(steps[1].at_ms, 30);
        assert_eq!(steps[2].at_ms, 60);
    }

    #[test]
    fn test_schedule_with_delay() {
        let options = RevealOptions::new().with_speed_ms(10).with_delay_ms(500);
        let steps = schedule(&sample_chunks(), options);
        assert_eq!(steps[0].at_ms, 500);
        assert_eq!(steps[1].at_ms, 510);
    }

    #[test]
    fn test_schedule_matches_chunk_indices() {
        let chunks = sample_chunks();
        let steps = schedule(&chunks, RevealOptions::new());
        assert_eq!(steps.len(), chunks.len());
        for (step, chunk) in steps.iter().zip(&chunks) {
            assert_eq!(step.index, chunk.index);
        }
    }

    #[test]
    fn test_schedule_saturates() {
        let chunks = vec![Chunk::new("x".to_string(), 0..1, usize::MAX)];
        let options = RevealOptions::new().with_speed_ms(u64::MAX).with_delay_ms(1);
        let steps = schedule(&chunks, options);
        assert_eq!(steps[0].at_ms, u64::MAX);
    }

    #[test]
    fn test_step_serialization() {
        let step = RevealStep { index: 2, at_ms: 60 };
        let json = serde_json::to_string(&step);
        assert!(json.is_ok());
        assert!(json.unwrap().contains("\"at_ms\":60"));
    }
}
