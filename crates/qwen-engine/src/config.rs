//! Engine startup configuration.
//!
//! Read once from the environment at process start and handed to the
//! engine constructor. Nothing here is consulted again after the engine
//! handle exists.

/// Environment variable overriding the model identifier.
pub const MODEL_ENV: &str = "QWEN_MODEL";
/// Environment variable overriding the tensor-parallel degree.
pub const TENSOR_PARALLEL_ENV: &str = "QWEN_TENSOR_PARALLEL";

const DEFAULT_MODEL: &str = "Qwen/Qwen1.5-4B";
const GPU_MEMORY_UTILIZATION: f32 = 0.90;

/// Configuration consumed by the engine at load time.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Model identifier to load.
    pub model: String,
    /// Tensor-parallel degree (number of devices the model is sharded over).
    pub tensor_parallel: u32,
    /// Fraction of accelerator memory the engine may claim.
    pub gpu_memory_utilization: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            tensor_parallel: 1,
            gpu_memory_utilization: GPU_MEMORY_UTILIZATION,
        }
    }
}

impl EngineConfig {
    /// Build the configuration from the process environment.
    ///
    /// `QWEN_MODEL` overrides the model identifier; `QWEN_TENSOR_PARALLEL`
    /// overrides the parallel degree and is ignored when non-numeric or
    /// zero. The memory-utilization target is a fixed policy, not an
    /// environment input.
    pub fn from_env() -> Self {
        let model = parse_model(std::env::var(MODEL_ENV).ok());
        let tensor_parallel = parse_tensor_parallel(std::env::var(TENSOR_PARALLEL_ENV).ok());
        if tensor_parallel > 1 {
            tracing::info!(tensor_parallel, "tensor-parallel override active");
        }
        Self {
            model,
            tensor_parallel,
            gpu_memory_utilization: GPU_MEMORY_UTILIZATION,
        }
    }
}

fn parse_model(raw: Option<String>) -> String {
    raw.filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string())
}

fn parse_tensor_parallel(raw: Option<String>) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|&degree| degree > 0)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_defaults_when_unset_or_blank() {
        assert_eq!(parse_model(None), DEFAULT_MODEL);
        assert_eq!(parse_model(Some("  ".to_string())), DEFAULT_MODEL);
    }

    #[test]
    fn model_override_wins() {
        assert_eq!(
            parse_model(Some("Qwen/Qwen1.5-14B".to_string())),
            "Qwen/Qwen1.5-14B"
        );
    }

    #[test]
    fn tensor_parallel_defaults_to_one() {
        assert_eq!(parse_tensor_parallel(None), 1);
    }

    #[test]
    fn tensor_parallel_ignores_garbage() {
        assert_eq!(parse_tensor_parallel(Some("two".to_string())), 1);
        assert_eq!(parse_tensor_parallel(Some("".to_string())), 1);
        assert_eq!(parse_tensor_parallel(Some("-4".to_string())), 1);
        assert_eq!(parse_tensor_parallel(Some("0".to_string())), 1);
    }

    #[test]
    fn tensor_parallel_accepts_positive_degree() {
        assert_eq!(parse_tensor_parallel(Some("4".to_string())), 4);
        assert_eq!(parse_tensor_parallel(Some(" 2 ".to_string())), 2);
    }

    #[test]
    fn memory_utilization_is_fixed() {
        assert_eq!(EngineConfig::default().gpu_memory_utilization, 0.90);
    }
}
