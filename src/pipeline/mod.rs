//! Text reconstruction pipeline.
//!
//! Three stages repair generation artifacts in order:
//!
//! - **Normalize**: whitespace and control-character cleanup
//! - **Dedupe**: stuttered character and word correction
//! - **Reflow**: block-level structural spacing
//!
//! Every stage is a total function over Unicode strings: any input maps to
//! an output, never an error. All stages share the protected-span scanner,
//! so fenced code, inline code, and URLs pass through byte for byte.
//!
//! [`Pipeline::clean`] runs the stages behind a panic boundary; if an
//! internal bug unwinds, the caller gets the raw input back unmodified.

pub mod dedupe;
pub mod normalize;
pub mod reflow;
pub mod scanner;

pub use dedupe::dedupe;
pub use normalize::normalize;
pub use reflow::reflow;

use crate::core::PipelineConfig;
use crate::error::{CommandError, Result};
use rayon::prelude::*;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Selects which stage of the pipeline to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Whitespace normalization only.
    Normalize,
    /// Duplication correction only.
    Dedupe,
    /// Structural re-flow only.
    Reflow,
    /// All stages in order.
    All,
}

impl Stage {
    /// Parses a stage name.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnknownStage`] if the name is not recognized.
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "normalize" => Ok(Self::Normalize),
            "dedupe" => Ok(Self::Dedupe),
            "reflow" => Ok(Self::Reflow),
            "all" => Ok(Self::All),
            _ => Err(CommandError::UnknownStage {
                name: name.to_string(),
            }
            .into()),
        }
    }

    /// Returns the stage name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normalize => "normalize",
            Self::Dedupe => "dedupe",
            Self::Reflow => "reflow",
            Self::All => "all",
        }
    }
}

/// Lists available stage names.
#[must_use]
pub fn available_stages() -> Vec<&'static str> {
    vec!["normalize", "dedupe", "reflow", "all"]
}

/// The text reconstruction pipeline.
///
/// Holds the per-call configuration; the pipeline itself is stateless
/// between calls and safe to share across threads.
///
/// # Examples
///
/// ```
/// use textmend::pipeline::Pipeline;
///
/// let pipeline = Pipeline::default();
/// assert_eq!(pipeline.clean("Helllo wooorld!!!"), "Hello world!!!");
/// assert_eq!(
///     pipeline.clean("The the model model is is great."),
///     "The model is great."
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Creates a pipeline with the given configuration.
    #[must_use]
    pub const fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Returns the pipeline configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs the whitespace normalization stage.
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        normalize::normalize(text, &self.config)
    }

    /// Runs the duplication correction stage.
    #[must_use]
    pub fn dedupe(&self, text: &str) -> String {
        dedupe::dedupe(text, &self.config)
    }

    /// Runs the structural re-flow stage.
    #[must_use]
    pub fn reflow(&self, text: &str) -> String {
        reflow::reflow(text, &self.config)
    }

    /// Runs a single stage, or all of them for [`Stage::All`].
    #[must_use]
    pub fn apply(&self, stage: Stage, text: &str) -> String {
        match stage {
            Stage::Normalize => self.normalize(text),
            Stage::Dedupe => self.dedupe(text),
            Stage::Reflow => self.reflow(text),
            Stage::All => self.clean(text),
        }
    }

    /// Runs all stages in order behind the panic boundary.
    ///
    /// The stages are total, so under normal operation this is equivalent
    /// to `reflow(dedupe(normalize(raw)))`. If an internal bug unwinds,
    /// the raw input is returned unmodified rather than surfacing an
    /// error to the renderer.
    #[must_use]
    pub fn clean(&self, raw: &str) -> String {
        catch_unwind(AssertUnwindSafe(|| self.run_stages(raw)))
            .unwrap_or_else(|_| raw.to_string())
    }

    fn run_stages(&self, raw: &str) -> String {
        let normalized = normalize::normalize(raw, &self.config);
        let deduped = dedupe::dedupe(&normalized, &self.config);
        reflow::reflow(&deduped, &self.config)
    }

    /// Cleans independent texts in parallel.
    ///
    /// Results keep the order of the inputs. Each text is cleaned in
    /// isolation; there is no shared state between them.
    #[must_use]
    pub fn clean_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<String> {
        texts.par_iter().map(|t| self.clean(t.as_ref())).collect()
    }
}
