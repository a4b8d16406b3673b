//! Integration tests for the qwen-engine core trait and types.
//!
//! Validates:
//! - GenerationEngine can be implemented by mock backends
//! - Trait objects work for dynamic dispatch (the "narrow waist" pattern)
//! - The output shape can represent every degenerate case a runtime emits

use qwen_engine::*;
use std::sync::Arc;

/// A canned-response engine. Demonstrates the trait can be implemented
/// without any real model runtime behind it.
struct CannedEngine {
    reply: String,
}

impl GenerationEngine for CannedEngine {
    fn generate(&self, prompt: &str, _config: &SamplingConfig) -> Result<GenerationOutput> {
        if prompt.is_empty() {
            return Err(EngineError::Generation("empty prompt".to_string()));
        }
        Ok(GenerationOutput::of_text(self.reply.clone()))
    }
}

/// An engine that always fails, for error-path coverage.
struct BrokenEngine;

impl GenerationEngine for BrokenEngine {
    fn generate(&self, _prompt: &str, _config: &SamplingConfig) -> Result<GenerationOutput> {
        Err(EngineError::Generation("device lost".to_string()))
    }
}

#[test]
fn engine_trait_is_implementable() {
    let engine = CannedEngine {
        reply: "hi".to_string(),
    };
    let out = engine.generate("hello", &SamplingConfig::default()).unwrap();
    assert_eq!(out.sequences[0].candidates[0].text.as_deref(), Some("hi"));
}

#[test]
fn engine_works_through_trait_object() {
    let engine: Arc<dyn GenerationEngine> = Arc::new(CannedEngine {
        reply: "dyn dispatch".to_string(),
    });
    let out = engine.generate("x", &SamplingConfig::default()).unwrap();
    assert_eq!(
        out.sequences[0].candidates[0].text.as_deref(),
        Some("dyn dispatch")
    );
}

#[test]
fn engine_errors_carry_context() {
    let err = BrokenEngine
        .generate("x", &SamplingConfig::default())
        .unwrap_err();
    assert!(format!("{err}").contains("device lost"));
}

#[test]
fn engine_handle_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Arc<dyn GenerationEngine>>();
}

#[test]
fn output_shape_represents_degenerate_cases() {
    // No sequences at all.
    let none = GenerationOutput::empty();
    assert!(none.sequences.is_empty());

    // A sequence with no candidates.
    let no_candidates = GenerationOutput {
        sequences: vec![SequenceOutput { candidates: vec![] }],
    };
    assert!(no_candidates.sequences[0].candidates.is_empty());

    // A candidate with no usable text.
    let no_text = GenerationOutput {
        sequences: vec![SequenceOutput {
            candidates: vec![CandidateOutput { text: None }],
        }],
    };
    assert!(no_text.sequences[0].candidates[0].text.is_none());
}

#[test]
fn sampling_config_clones_independently() {
    let base = SamplingConfig::default();
    let mut tweaked = base.clone();
    tweaked.temperature = 0.0;
    tweaked.stop = vec!["\n".to_string()];
    assert_eq!(base.temperature, 0.7);
    assert_eq!(base.stop, vec!["[User]:".to_string()]);
    assert_eq!(tweaked.temperature, 0.0);
}
