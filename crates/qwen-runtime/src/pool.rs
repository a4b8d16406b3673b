//! Fixed-size worker pool isolating blocking generation from the async layer.
//!
//! The HTTP layer handles many requests concurrently; the engine call is
//! blocking and accelerator-bound. [`EnginePool`] spawns a small number of
//! dedicated OS threads that drain a shared job queue, so at most `size`
//! engine calls run at once and the async runtime never blocks. Requests
//! beyond the pool size queue until a worker frees up.
//!
//! ```text
//! ┌──────────────┐    job channel     ┌───────────────────┐
//! │ axum handler │ ─── Job ─────────> │ engine-worker-0..N │
//! │ (async task) │ <── oneshot ────── │ (dedicated threads)│
//! └──────────────┘                    └───────────────────┘
//! ```
//!
//! Shutdown stops intake first, lets workers finish everything already
//! queued, then joins each thread. The engine handle is released when the
//! last worker exits, never by garbage-collection timing.

use std::sync::{Arc, Mutex};
use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender};
use tokio::sync::oneshot;

use qwen_engine::{GenerationEngine, GenerationOutput, SamplingConfig};

/// One queued generation request.
struct Job {
    prompt: String,
    config: SamplingConfig,
    reply: oneshot::Sender<String>,
}

/// Bounded-concurrency front of a shared [`GenerationEngine`].
pub struct EnginePool {
    job_tx: Mutex<Option<Sender<Job>>>,
    workers: Mutex<Vec<thread::JoinHandle<()>>>,
    size: usize,
}

impl EnginePool {
    /// Spawn `size` worker threads over a shared engine handle.
    ///
    /// `size` should match how many generation calls the engine can
    /// usefully overlap, not the expected request volume. A size of zero
    /// is promoted to one so the pool can always make progress.
    pub fn start(engine: Arc<dyn GenerationEngine>, size: usize) -> Self {
        let size = size.max(1);
        let (job_tx, job_rx) = unbounded::<Job>();

        let workers = (0..size)
            .map(|i| {
                let engine = Arc::clone(&engine);
                let jobs = job_rx.clone();
                thread::Builder::new()
                    .name(format!("engine-worker-{i}"))
                    .spawn(move || worker_loop(engine, jobs))
                    .expect("failed to spawn engine worker thread")
            })
            .collect();

        tracing::info!(workers = size, "engine pool started");

        Self {
            job_tx: Mutex::new(Some(job_tx)),
            workers: Mutex::new(workers),
            size,
        }
    }

    /// Number of worker threads (the concurrency ceiling).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Generate text without blocking the calling task.
    ///
    /// Enqueues the job and suspends until a worker replies. Every failure
    /// mode past this point degrades to empty text: the caller always gets
    /// a usable string, never an error.
    pub async fn generate(&self, prompt: String, config: SamplingConfig) -> String {
        let sender = self
            .job_tx
            .lock()
            .expect("engine pool mutex poisoned")
            .clone();
        let Some(sender) = sender else {
            tracing::warn!("generate called after pool shutdown");
            return String::new();
        };

        let (reply_tx, reply_rx) = oneshot::channel();
        let job = Job {
            prompt,
            config,
            reply: reply_tx,
        };
        if sender.send(job).is_err() {
            tracing::warn!("engine pool job queue disconnected");
            return String::new();
        }

        match reply_rx.await {
            Ok(text) => text,
            Err(_) => {
                tracing::error!("engine worker dropped its reply");
                String::new()
            }
        }
    }

    /// Stop accepting work, drain queued jobs, and join every worker.
    ///
    /// Idempotent; the `Drop` impl calls this as a fallback so worker
    /// threads are never leaked.
    pub fn shutdown(&self) {
        let sender = self
            .job_tx
            .lock()
            .expect("engine pool mutex poisoned")
            .take();
        // Dropping the sender disconnects the channel; workers finish the
        // remaining queue, then their recv() errors and they exit.
        drop(sender);

        let handles: Vec<_> = {
            let mut workers = self.workers.lock().expect("engine pool mutex poisoned");
            workers.drain(..).collect()
        };
        if handles.is_empty() {
            return;
        }
        for handle in handles {
            if handle.join().is_err() {
                tracing::error!("engine worker panicked during shutdown");
            }
        }
        tracing::info!("engine pool shut down");
    }
}

impl Drop for EnginePool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(engine: Arc<dyn GenerationEngine>, jobs: Receiver<Job>) {
    while let Ok(job) = jobs.recv() {
        let text = generate_text(engine.as_ref(), &job.prompt, &job.config);
        // The requester may already be gone; nothing to do then.
        let _ = job.reply.send(text);
    }
    tracing::debug!("engine worker exiting");
}

/// Run one blocking generation call and normalize its output.
///
/// Invokes the engine exactly once. Every failure mode maps to empty text
/// rather than an error, so a broken generation never turns into a broken
/// HTTP response:
/// - the call itself fails: logged at error level;
/// - the result carries no sequences, or the first sequence no candidates:
///   legitimately empty (an immediate stop-sequence match does this);
/// - candidates exist but none carries text: logged as malformed.
pub fn generate_text(
    engine: &dyn GenerationEngine,
    prompt: &str,
    config: &SamplingConfig,
) -> String {
    match engine.generate(prompt, config) {
        Ok(output) => match extract_text(output) {
            Extracted::Text(text) => text,
            Extracted::Empty => {
                tracing::debug!("engine produced no output for this prompt");
                String::new()
            }
            Extracted::Malformed(reason) => {
                tracing::warn!(reason, "malformed engine output, returning empty text");
                String::new()
            }
        },
        Err(err) => {
            tracing::error!(error = %err, "generation call failed, returning empty text");
            String::new()
        }
    }
}

/// Verdict of unwrapping a [`GenerationOutput`].
enum Extracted {
    Text(String),
    Empty,
    Malformed(&'static str),
}

/// Total mapping from the engine's nested result shape to a verdict.
///
/// Scans candidates in order and takes the first that actually carries
/// text; multi-candidate sampling makes the later entries fallbacks, not
/// alternatives to merge.
fn extract_text(output: GenerationOutput) -> Extracted {
    let Some(first) = output.sequences.into_iter().next() else {
        return Extracted::Empty;
    };
    if first.candidates.is_empty() {
        return Extracted::Empty;
    }
    for candidate in first.candidates {
        if let Some(text) = candidate.text {
            return Extracted::Text(text);
        }
    }
    Extracted::Malformed("no candidate carried text")
}
