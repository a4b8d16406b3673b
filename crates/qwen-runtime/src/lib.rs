//! # qwen-runtime
//!
//! Concurrency bridging between the async HTTP layer and the blocking
//! [`qwen_engine::GenerationEngine`] call. Provides [`EnginePool`] — a
//! fixed-size set of dedicated worker threads that serialize access to the
//! engine — and [`MockEngine`], a deterministic echo engine used by the
//! server binary and the test suites.

mod mock;
mod pool;

pub use mock::MockEngine;
pub use pool::{generate_text, EnginePool};
