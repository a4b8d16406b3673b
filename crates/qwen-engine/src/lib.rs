//! # qwen-engine
//!
//! The "narrow waist" of the qwen-serve stack. Defines the core
//! [`GenerationEngine`] trait and associated types that the runtime and
//! server crates depend on. Implementations can swap the actual model
//! runtime without changing application code.
//!
//! ## Design Notes
//!
//! ### Blocking Contract
//! [`GenerationEngine::generate`] is deliberately blocking: real model
//! runtimes are CPU/accelerator-bound and hold the calling thread for the
//! whole sampling run. Bridging into an async request handler is the
//! runtime crate's job, not the engine's.
//!
//! ### Interior Mutability
//! `generate` takes `&self` to allow a single engine handle to be shared
//! across worker threads. Implementations that carry mutable state are
//! responsible for their own synchronization.

mod config;

pub use config::{EngineConfig, MODEL_ENV, TENSOR_PARALLEL_ENV};

pub type Result<T> = std::result::Result<T, EngineError>;

/// Top-level error type for all engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Model loading failed: {0}")]
    ModelLoad(String),
    #[error("Generation failed: {0}")]
    Generation(String),
}

/// Sampling parameters for a single generation call.
///
/// Constructed fresh per request. `top_p` is pinned to the nucleus
/// threshold the service always runs with; the remaining fields come from
/// the request or fall back to the defaults below.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingConfig {
    /// Sampling temperature (0.0 = greedy).
    pub temperature: f32,
    /// Nucleus sampling threshold.
    pub top_p: f32,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
    /// Stop sequences; generation halts before any of these appear.
    pub stop: Vec<String>,
}

impl SamplingConfig {
    /// Default sampling temperature when the request omits one.
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    /// Default generation length when the request omits one.
    pub const DEFAULT_MAX_TOKENS: u32 = 512;
    /// Default stop sequence, preventing the model from hallucinating a
    /// new user turn after its reply.
    pub const DEFAULT_STOP: &'static str = "[User]:";
    /// Fixed nucleus threshold applied to every request.
    pub const NUCLEUS_TOP_P: f32 = 0.95;
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: Self::DEFAULT_TEMPERATURE,
            top_p: Self::NUCLEUS_TOP_P,
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            stop: vec![Self::DEFAULT_STOP.to_string()],
        }
    }
}

/// One sampling candidate inside a sequence.
///
/// `text` is optional: runtimes can report a candidate that was cancelled
/// internally before producing usable text.
#[derive(Debug, Clone)]
pub struct CandidateOutput {
    pub text: Option<String>,
}

/// All candidates generated for one input sequence.
#[derive(Debug, Clone)]
pub struct SequenceOutput {
    pub candidates: Vec<CandidateOutput>,
}

/// Raw result of a generation call, one entry per input sequence.
///
/// The façade only ever submits a single prompt, but the shape keeps the
/// runtime's native batch nesting so adapters stay honest about what the
/// engine may hand back: zero sequences, sequences without candidates, and
/// candidates without text all occur in the wild.
#[derive(Debug, Clone, Default)]
pub struct GenerationOutput {
    pub sequences: Vec<SequenceOutput>,
}

impl GenerationOutput {
    /// A well-formed single-candidate output. Convenience for engines and
    /// tests that produce exactly one text.
    pub fn of_text(text: impl Into<String>) -> Self {
        Self {
            sequences: vec![SequenceOutput {
                candidates: vec![CandidateOutput {
                    text: Some(text.into()),
                }],
            }],
        }
    }

    /// An output with no sequences at all.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// The core engine trait — everything else plugs into this.
///
/// Implementations own model weights and sampling internals. Callers treat
/// the engine as a black box: one prompt and one [`SamplingConfig`] in, one
/// [`GenerationOutput`] out, exactly one model invocation per call.
pub trait GenerationEngine: Send + Sync {
    /// Run one blocking generation pass over `prompt`.
    fn generate(&self, prompt: &str, config: &SamplingConfig) -> Result<GenerationOutput>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_defaults_match_service_policy() {
        let config = SamplingConfig::default();
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.top_p, 0.95);
        assert_eq!(config.max_tokens, 512);
        assert_eq!(config.stop, vec!["[User]:".to_string()]);
    }

    #[test]
    fn of_text_builds_single_candidate() {
        let out = GenerationOutput::of_text("hello");
        assert_eq!(out.sequences.len(), 1);
        assert_eq!(out.sequences[0].candidates.len(), 1);
        assert_eq!(out.sequences[0].candidates[0].text.as_deref(), Some("hello"));
    }

    #[test]
    fn empty_output_has_no_sequences() {
        assert!(GenerationOutput::empty().sequences.is_empty());
    }

    #[test]
    fn engine_error_display() {
        let err = EngineError::ModelLoad("out of memory".to_string());
        assert!(format!("{err}").contains("out of memory"));
        let err = EngineError::Generation("sampler panic".to_string());
        assert!(format!("{err}").contains("sampler panic"));
    }
}
