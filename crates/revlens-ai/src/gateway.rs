//! Lazy, idempotent classifier initialization and per-call classification.
//!
//! The gateway guarantees a single in-flight initialization: concurrent
//! `ensure_ready` callers join the attempt already running instead of
//! starting a second model load. A failed attempt is retryable by a later
//! call, so the system is never left unrecoverable.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use revlens_core::{RawPrediction, Readiness, Verdict};
use thiserror::Error;
use tokio::sync::Notify;
use tracing::{debug, info, warn};

/// Default bound on backend initialization; an unbounded hang would leave
/// the analysis trigger permanently disabled.
pub const DEFAULT_INIT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("classifier initialization failed: {0}")]
    Init(String),

    #[error("classifier initialization timed out after {0:?}")]
    InitTimeout(Duration),

    #[error("classifier is not ready")]
    NotReady,

    #[error("inference failed: {0}")]
    Inference(String),
}

/// A sentiment inference engine.
///
/// `init` performs the (possibly slow) model load; `classify` returns raw
/// predictions, top-1 first. Any service exposing this shape is
/// substitutable.
pub trait ClassifierBackend: Send + Sync {
    fn init(&self) -> impl Future<Output = Result<(), GatewayError>> + Send;

    fn classify(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Vec<RawPrediction>, GatewayError>> + Send;
}

enum InitState {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Wraps a [`ClassifierBackend`] with readiness tracking, initialization
/// joining, a load timeout, and prediction normalization.
pub struct Gateway<B> {
    backend: B,
    init_timeout: Duration,
    state: Mutex<InitState>,
    settled: Notify,
}

impl<B: ClassifierBackend> Gateway<B> {
    pub fn new(backend: B) -> Self {
        Self::with_timeout(backend, DEFAULT_INIT_TIMEOUT)
    }

    pub fn with_timeout(backend: B, init_timeout: Duration) -> Self {
        Self {
            backend,
            init_timeout,
            state: Mutex::new(InitState::Idle),
            settled: Notify::new(),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, InitState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.state(), InitState::Ready)
    }

    pub fn readiness(&self) -> Readiness {
        match &*self.state() {
            InitState::Idle | InitState::Loading => Readiness::Loading,
            InitState::Ready => Readiness::Ready,
            InitState::Failed(reason) => Readiness::Failed(reason.clone()),
        }
    }

    /// Initialize the backend if it is not ready yet.
    ///
    /// Resolves immediately when already ready. While an attempt is in
    /// flight, additional callers wait for that attempt's outcome rather
    /// than starting another load. After a failure, the next fresh call
    /// starts a new attempt.
    pub async fn ensure_ready(&self) -> Result<(), GatewayError> {
        loop {
            {
                let mut state = self.state();
                match &*state {
                    InitState::Ready => return Ok(()),
                    InitState::Idle | InitState::Failed(_) => {
                        *state = InitState::Loading;
                        // Fall through as the loading leader.
                    }
                    InitState::Loading => {
                        // Register before releasing the lock so a settle
                        // between unlock and await is not missed.
                        let settled = self.settled.notified();
                        drop(state);
                        settled.await;
                        match &*self.state() {
                            InitState::Ready => return Ok(()),
                            InitState::Failed(reason) => {
                                return Err(GatewayError::Init(reason.clone()));
                            }
                            // Another attempt started in between; re-join.
                            InitState::Idle | InitState::Loading => continue,
                        }
                    }
                }
            }

            info!("initializing classifier backend");
            let outcome = match tokio::time::timeout(self.init_timeout, self.backend.init()).await
            {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e),
                Err(_) => Err(GatewayError::InitTimeout(self.init_timeout)),
            };

            let mut state = self.state();
            match &outcome {
                Ok(()) => {
                    info!("classifier ready");
                    *state = InitState::Ready;
                }
                Err(e) => {
                    warn!(error = %e, "classifier initialization failed");
                    *state = InitState::Failed(e.to_string());
                }
            }
            drop(state);
            self.settled.notify_waiters();
            return outcome;
        }
    }

    /// Classify one review text, normalizing the backend's top-1 prediction.
    ///
    /// Fails fast with [`GatewayError::NotReady`] when `ensure_ready` has
    /// not succeeded. The text is expected to be non-empty (corpus entries
    /// always are).
    pub async fn classify(&self, text: &str) -> Result<Verdict, GatewayError> {
        if !self.is_ready() {
            return Err(GatewayError::NotReady);
        }
        let predictions = self.backend.classify(text).await?;
        let verdict = Verdict::from_predictions(&predictions);
        debug!(label = %verdict.label, confidence = verdict.confidence, "classified review");
        Ok(verdict)
    }
}
