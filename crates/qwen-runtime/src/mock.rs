//! Deterministic stand-in engine.
//!
//! Echoes the prompt back as its single candidate, making the whole
//! request-to-response pipeline observable without model weights.
//! The server binary runs on this until a real runtime implements
//! [`GenerationEngine`].

use qwen_engine::{EngineConfig, EngineError, GenerationEngine, GenerationOutput, SamplingConfig};

/// Echo engine used by the server binary and the test suites.
pub struct MockEngine {
    model: String,
}

impl MockEngine {
    /// "Load" the mock engine.
    ///
    /// Fails on an unusable configuration the same way a real runtime
    /// would refuse to start, so the fatal-at-startup path stays exercised.
    pub fn load(config: &EngineConfig) -> Result<Self, EngineError> {
        if config.model.trim().is_empty() {
            return Err(EngineError::ModelLoad(
                "model identifier is empty".to_string(),
            ));
        }
        tracing::info!(
            model = %config.model,
            tensor_parallel = config.tensor_parallel,
            gpu_memory_utilization = config.gpu_memory_utilization,
            "mock engine loaded"
        );
        Ok(Self {
            model: config.model.clone(),
        })
    }

    /// The model identifier this engine pretends to serve.
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl GenerationEngine for MockEngine {
    fn generate(&self, prompt: &str, _config: &SamplingConfig) -> qwen_engine::Result<GenerationOutput> {
        Ok(GenerationOutput::of_text(prompt.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_rejects_blank_model() {
        let config = EngineConfig {
            model: "   ".to_string(),
            ..EngineConfig::default()
        };
        assert!(matches!(
            MockEngine::load(&config),
            Err(EngineError::ModelLoad(_))
        ));
    }

    #[test]
    fn echoes_prompt_as_single_candidate() {
        let engine = MockEngine::load(&EngineConfig::default()).unwrap();
        let out = engine
            .generate("[Assistant]:", &SamplingConfig::default())
            .unwrap();
        assert_eq!(
            out.sequences[0].candidates[0].text.as_deref(),
            Some("[Assistant]:")
        );
    }

    #[test]
    fn reports_configured_model() {
        let config = EngineConfig {
            model: "Qwen/Qwen1.5-14B".to_string(),
            ..EngineConfig::default()
        };
        let engine = MockEngine::load(&config).unwrap();
        assert_eq!(engine.model(), "Qwen/Qwen1.5-14B");
    }
}
