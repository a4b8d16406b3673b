use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;

use qwen_engine::EngineConfig;
use qwen_runtime::{EnginePool, MockEngine};
use qwen_server::{run_server, AppState};

/// qwen-serve — OpenAI-compatible chat completions over a local engine
#[derive(Parser)]
#[command(name = "qwen-server")]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1:8000")]
    addr: SocketAddr,

    /// Number of engine worker threads (how many generation calls may
    /// overlap, not the expected request volume).
    #[arg(long, default_value_t = 2)]
    workers: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let engine_config = EngineConfig::from_env();
    let engine = match MockEngine::load(&engine_config) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            // Serving without an engine handle would answer every request
            // with garbage; refuse to start instead.
            eprintln!("error: engine failed to initialize: {e}");
            std::process::exit(1);
        }
    };

    let pool = Arc::new(EnginePool::start(engine, cli.workers));
    let state = AppState::new(pool);

    run_server(state, cli.addr).await?;
    Ok(())
}
