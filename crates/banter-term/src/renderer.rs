//! Queued terminal renderer with a typing animation.
//!
//! Replies render strictly one at a time in submission order. Each message
//! is drawn character by character with a randomized per-character delay,
//! and callers get a completion handle that resolves once their message is
//! fully on screen, so deferred side effects can fire at the right moment.

use std::collections::VecDeque;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use banter_core::error::BanterError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::oneshot;
use tokio::sync::Notify;
use tokio::time::{sleep, Duration};
use tracing::debug;

/// Pacing knobs for the typing animation.
///
/// `max_char_delay_ms` is expected to be at least `min_char_delay_ms`;
/// the configuration layer upholds that when loading from a file.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Draw character by character when true, whole lines when false.
    pub animate: bool,
    pub min_char_delay_ms: u64,
    pub max_char_delay_ms: u64,
    /// Pause between queued messages.
    pub message_gap_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            animate: true,
            min_char_delay_ms: 50,
            max_char_delay_ms: 150,
            message_gap_ms: 800,
        }
    }
}

/// Where rendered output goes. The renderer writes small chunks (single
/// characters while animating) and ends each message with `end_line`.
pub trait RenderSink: Send {
    fn write_chunk(&mut self, text: &str);
    fn end_line(&mut self);
}

/// Sink that writes to stdout, flushing after every chunk so partial
/// lines appear as they are typed.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl RenderSink for StdoutSink {
    fn write_chunk(&mut self, text: &str) {
        let mut out = std::io::stdout();
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }

    fn end_line(&mut self) {
        let mut out = std::io::stdout();
        let _ = out.write_all(b"\n");
        let _ = out.flush();
    }
}

struct RenderJob {
    text: String,
    done: oneshot::Sender<()>,
}

struct RendererInner {
    config: RenderConfig,
    queue: Mutex<VecDeque<RenderJob>>,
    sink: Mutex<Box<dyn RenderSink>>,
    // Set under the queue lock when a job is taken, cleared once it has
    // fully rendered, so `is_busy` never misses an in-flight message.
    rendering: AtomicBool,
    // Latched by `shutdown`; submissions that observe it are refused.
    stopping: AtomicBool,
    wake: Notify,
    shutdown: Notify,
}

/// Serialized message renderer. Clones share one queue and sink.
#[derive(Clone)]
pub struct TypingRenderer {
    inner: Arc<RendererInner>,
}

impl TypingRenderer {
    pub fn new(config: RenderConfig, sink: Box<dyn RenderSink>) -> Self {
        Self {
            inner: Arc::new(RendererInner {
                config,
                queue: Mutex::new(VecDeque::new()),
                sink: Mutex::new(sink),
                rendering: AtomicBool::new(false),
                stopping: AtomicBool::new(false),
                wake: Notify::new(),
                shutdown: Notify::new(),
            }),
        }
    }

    /// Queue one message. The returned handle resolves when the message has
    /// fully rendered; dropping it is fine if the caller does not care.
    /// Refused once `shutdown` has been signalled.
    pub fn submit(&self, text: impl Into<String>) -> Result<oneshot::Receiver<()>, BanterError> {
        if self.inner.stopping.load(Ordering::Acquire) {
            return Err(BanterError::ShuttingDown);
        }
        let (done, rx) = oneshot::channel();
        let text = text.into();
        debug!(len = text.len(), "Message queued for rendering");
        self.inner
            .queue
            .lock()
            .expect("render queue mutex poisoned")
            .push_back(RenderJob { text, done });
        self.inner.wake.notify_one();
        Ok(rx)
    }

    /// True while a message is rendering or still queued.
    pub fn is_busy(&self) -> bool {
        // Queue before flag: once the queue reads empty, the pop that set
        // the flag is already visible, so an in-flight job cannot slip
        // between the two checks.
        !self
            .inner
            .queue
            .lock()
            .expect("render queue mutex poisoned")
            .is_empty()
            || self.inner.rendering.load(Ordering::Acquire)
    }

    /// Render loop. Pops jobs in FIFO order and waits when the queue is
    /// empty. Returns on the shutdown signal.
    pub async fn run(&self) {
        let mut rng = StdRng::from_os_rng();
        loop {
            let job = {
                let mut queue = self
                    .inner
                    .queue
                    .lock()
                    .expect("render queue mutex poisoned");
                let job = queue.pop_front();
                if job.is_some() {
                    self.inner.rendering.store(true, Ordering::Release);
                }
                job
            };

            match job {
                Some(job) => {
                    self.render_job(job, &mut rng).await;
                    self.inner.rendering.store(false, Ordering::Release);

                    let more_queued = !self
                        .inner
                        .queue
                        .lock()
                        .expect("render queue mutex poisoned")
                        .is_empty();
                    if more_queued && self.inner.config.message_gap_ms > 0 {
                        sleep(Duration::from_millis(self.inner.config.message_gap_ms)).await;
                    }
                }
                None => {
                    tokio::select! {
                        _ = self.inner.wake.notified() => {}
                        _ = self.inner.shutdown.notified() => {
                            debug!("Renderer shutting down");
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Signal the render loop to stop once its queue drains. Messages
    /// submitted after this point are refused.
    pub fn shutdown(&self) {
        self.inner.stopping.store(true, Ordering::Release);
        self.inner.shutdown.notify_one();
    }

    async fn render_job(&self, job: RenderJob, rng: &mut StdRng) {
        if self.inner.config.animate {
            let min = self.inner.config.min_char_delay_ms;
            let max = self.inner.config.max_char_delay_ms.max(min);
            let mut buf = [0u8; 4];
            for ch in job.text.chars() {
                self.write(ch.encode_utf8(&mut buf));
                let delay = rng.random_range(min..=max);
                if delay > 0 {
                    sleep(Duration::from_millis(delay)).await;
                }
            }
        } else {
            self.write(&job.text);
        }
        self.inner
            .sink
            .lock()
            .expect("render sink mutex poisoned")
            .end_line();
        let _ = job.done.send(());
    }

    fn write(&self, chunk: &str) {
        self.inner
            .sink
            .lock()
            .expect("render sink mutex poisoned")
            .write_chunk(chunk);
    }
}

// =============================================================================
// Tests
// =============================================================================
