//! Pipeline and reveal configuration.
//!
//! All behaviour that the original system kept in module-global state is an
//! explicit per-call value here. A [`PipelineConfig`] is handed to the
//! pipeline entry point; nothing is read from process-wide state.

use crate::error::{ConfigError, Result};
use std::collections::BTreeSet;

/// Default minimum reveal chunk length in grapheme clusters.
pub const DEFAULT_MIN_CHUNK_LEN: usize = 3;

/// Default reveal speed in milliseconds per chunk.
pub const DEFAULT_SPEED_MS: u64 = 30;

/// Default reveal start delay in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 0;

/// Letters that legitimately double in English spelling.
///
/// A tripled character whose lowercase form is in this list reduces to two
/// copies; anything else reduces to one. `o` is deliberately absent: in
/// stutter artifacts ("wooorld") a tripled `o` is noise far more often than
/// an intended doubling.
pub const DEFAULT_DOUBLED_LETTERS: &[char] = &[
    'b', 'c', 'd', 'e', 'f', 'g', 'l', 'm', 'n', 'p', 'r', 's', 't', 'z',
];

/// URL scheme prefixes that open a protected span.
pub const DEFAULT_URL_SCHEMES: &[&str] = &["http://", "https://"];

/// Configuration for the reconstruction pipeline.
///
/// This allows callers to customize correction policy without modifying
/// the pipeline itself.
///
/// # Examples
///
/// ```
/// use textmend::core::PipelineConfig;
///
/// let config = PipelineConfig::new().with_doubled_letters("lo");
/// assert!(config.allows_double('L'));
/// assert!(!config.allows_double('s'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// URL scheme prefixes treated as protected-span openers.
    pub url_schemes: Vec<String>,

    /// Lowercase letters allowed to keep a doubled form.
    pub doubled_letters: BTreeSet<char>,

    /// Minimum reveal chunk length in grapheme clusters.
    pub min_chunk_len: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineConfig {
    /// Creates a configuration with the default correction policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            url_schemes: DEFAULT_URL_SCHEMES.iter().map(|s| (*s).to_string()).collect(),
            doubled_letters: DEFAULT_DOUBLED_LETTERS.iter().copied().collect(),
            min_chunk_len: DEFAULT_MIN_CHUNK_LEN,
        }
    }

    /// Replaces the doubled-letter allow list.
    ///
    /// Letters are stored lowercase; matching is ASCII case-insensitive.
    #[must_use]
    pub fn with_doubled_letters(mut self, letters: &str) -> Self {
        self.doubled_letters = letters.chars().map(|c| c.to_ascii_lowercase()).collect();
        self
    }

    /// Replaces the protected URL scheme prefixes.
    #[must_use]
    pub fn with_url_schemes(mut self, schemes: &[&str]) -> Self {
        self.url_schemes = schemes.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Sets the minimum reveal chunk length.
    #[must_use]
    pub const fn with_min_chunk_len(mut self, min_chunk_len: usize) -> Self {
        self.min_chunk_len = min_chunk_len;
        self
    }

    /// Returns whether `ch` may keep a doubled form.
    ///
    /// Matching is ASCII case-insensitive, so `L` and `l` agree.
    #[must_use]
    pub fn allows_double(&self, ch: char) -> bool {
        self.doubled_letters.contains(&ch.to_ascii_lowercase())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the minimum chunk length is zero, an allow-list
    /// entry is not alphabetic, or a URL scheme is missing its `://` suffix.
    pub fn validate(&self) -> Result<()> {
        if self.min_chunk_len == 0 {
            return Err(ConfigError::MinChunkTooSmall { value: 0 }.into());
        }
        for &ch in &self.doubled_letters {
            if !ch.is_alphabetic() {
                return Err(ConfigError::NonAlphabeticAllowListChar { ch }.into());
            }
        }
        for scheme in &self.url_schemes {
            if !scheme.ends_with("://") || scheme.len() <= "://".len() {
                return Err(ConfigError::MalformedUrlScheme {
                    scheme: scheme.clone(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Timing options for the reveal schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealOptions {
    /// Milliseconds between consecutive chunk reveals.
    pub speed_ms: u64,

    /// Milliseconds before the first chunk reveals.
    pub delay_ms: u64,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl RevealOptions {
    /// Creates options with the default reveal timing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            speed_ms: DEFAULT_SPEED_MS,
            delay_ms: DEFAULT_DELAY_MS,
        }
    }

    /// Sets the per-chunk reveal speed.
    #[must_use]
    pub const fn with_speed_ms(mut self, speed_ms: u64) -> Self {
        self.speed_ms = speed_ms;
        self
    }

    /// Sets the initial reveal delay.
    #[must_use]
    pub const fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}
