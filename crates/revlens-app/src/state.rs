//! The application state machine.
//!
//! Owns what the original page kept as global mutable state — the loaded
//! corpus, the classifier handle, the in-flight flag — as explicit fields
//! with a documented lifecycle: initialized by [`App::start`], mutated only
//! by the defined transitions, dropped with the host.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::Rng;
use revlens_ai::{ClassifierBackend, Gateway, GatewayError};
use revlens_core::{Corpus, Readiness, Verdict};
use revlens_corpus::CorpusSource;
use revlens_sink::{AnalysisRecord, AnalysisSink};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Observable coarse state, for hosts driving loading/disabled/error
/// indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// At least one subsystem is still initializing.
    Loading,
    /// Both subsystems ready; a trigger is accepted.
    Ready,
    /// An analysis is in flight; further triggers are rejected.
    Analyzing,
    /// At least one subsystem failed to initialize.
    Failed,
}

#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// A previous analysis has not resolved yet. Ignored, never queued.
    #[error("analysis already in progress")]
    Busy,

    /// The corpus is still loading or its load failed.
    #[error("reviews are not available: {0}")]
    CorpusNotReady(String),

    /// The corpus loaded but holds no reviews.
    #[error("no reviews loaded")]
    CorpusEmpty,

    /// The classifier is still loading or its initialization failed.
    #[error("classifier is not ready: {0}")]
    ClassifierNotReady(String),

    #[error(transparent)]
    Classification(#[from] GatewayError),
}

/// A completed analysis.
#[derive(Debug)]
pub struct Analysis {
    pub review: String,
    pub verdict: Verdict,
    /// Handle of the detached logging task. The state machine never awaits
    /// it; tests may, to observe the sink call deterministically.
    pub log_task: JoinHandle<()>,
}

enum CorpusState {
    Loading,
    Ready(Corpus),
    Failed(String),
}

/// Orchestrates corpus source, classifier gateway, and logging sink.
///
/// Collaborators are injected, so the machine is testable without any
/// rendering surface or network.
pub struct App<S, B, K> {
    source: S,
    gateway: Gateway<B>,
    sink: Arc<K>,
    corpus: Mutex<CorpusState>,
    analyzing: AtomicBool,
}

/// Clears the in-flight flag on every exit path, so the trigger can never
/// be left stuck disabled.
struct TriggerGuard<'a>(&'a AtomicBool);

impl Drop for TriggerGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S, B, K> App<S, B, K>
where
    S: CorpusSource,
    B: ClassifierBackend,
    K: AnalysisSink,
{
    pub fn new(source: S, gateway: Gateway<B>, sink: Arc<K>) -> Self {
        Self {
            source,
            gateway,
            sink,
            corpus: Mutex::new(CorpusState::Loading),
            analyzing: AtomicBool::new(false),
        }
    }

    /// Start both subsystems concurrently. Their initializations are
    /// independent; either may fail without preventing the other from
    /// completing. Outcomes land in the per-subsystem readiness states.
    pub async fn start(&self) {
        let (_, init) = tokio::join!(self.load_corpus(), self.gateway.ensure_ready());
        // The gateway already recorded the failure; readiness reflects it.
        if init.is_err() {
            debug!("classifier unavailable after startup");
        }
    }

    async fn load_corpus(&self) {
        match self.source.load().await {
            Ok(corpus) => {
                info!(reviews = corpus.len(), "corpus ready");
                *self.corpus_state() = CorpusState::Ready(corpus);
            }
            Err(e) => {
                warn!(error = %e, "corpus load failed");
                *self.corpus_state() = CorpusState::Failed(e.to_string());
            }
        }
    }

    fn corpus_state(&self) -> MutexGuard<'_, CorpusState> {
        self.corpus.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn corpus_readiness(&self) -> Readiness {
        match &*self.corpus_state() {
            CorpusState::Loading => Readiness::Loading,
            CorpusState::Ready(_) => Readiness::Ready,
            CorpusState::Failed(reason) => Readiness::Failed(reason.clone()),
        }
    }

    pub fn classifier_readiness(&self) -> Readiness {
        self.gateway.readiness()
    }

    pub fn state(&self) -> AppState {
        if self.analyzing.load(Ordering::Acquire) {
            return AppState::Analyzing;
        }
        match (self.corpus_readiness(), self.classifier_readiness()) {
            (Readiness::Ready, Readiness::Ready) => AppState::Ready,
            (Readiness::Failed(_), _) | (_, Readiness::Failed(_)) => AppState::Failed,
            _ => AppState::Loading,
        }
    }

    /// Analyze one randomly sampled review.
    pub async fn analyze(&self) -> Result<Analysis, AnalyzeError> {
        self.analyze_with(&mut rand::rng()).await
    }

    /// [`analyze`](Self::analyze) with an injected generator, so tests can
    /// drive a seeded `StdRng`.
    pub async fn analyze_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Analysis, AnalyzeError> {
        let _guard = self.acquire_trigger()?;

        // A failed load is retried lazily on the next trigger.
        if matches!(&*self.corpus_state(), CorpusState::Failed(_)) {
            debug!("corpus previously failed, retrying load");
            self.load_corpus().await;
        }

        let review = {
            let state = self.corpus_state();
            match &*state {
                CorpusState::Loading => {
                    return Err(AnalyzeError::CorpusNotReady("still loading".into()));
                }
                CorpusState::Failed(reason) => {
                    return Err(AnalyzeError::CorpusNotReady(reason.clone()));
                }
                CorpusState::Ready(corpus) => corpus
                    .sample(rng)
                    .ok_or(AnalyzeError::CorpusEmpty)?
                    .to_string(),
            }
        };

        match self.gateway.readiness() {
            Readiness::Ready => {}
            Readiness::Loading => {
                return Err(AnalyzeError::ClassifierNotReady("still loading".into()));
            }
            Readiness::Failed(reason) => {
                return Err(AnalyzeError::ClassifierNotReady(reason));
            }
        }

        let verdict = self.gateway.classify(&review).await?;
        info!(label = %verdict.label, confidence = verdict.confidence, "analysis complete");

        let log_task = self.spawn_log(&review, &verdict);
        Ok(Analysis {
            review,
            verdict,
            log_task,
        })
    }

    fn acquire_trigger(&self) -> Result<TriggerGuard<'_>, AnalyzeError> {
        self.analyzing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AnalyzeError::Busy)?;
        Ok(TriggerGuard(&self.analyzing))
    }

    /// Detached, best-effort logging; the outcome never reaches the caller
    /// and never alters the result already produced.
    fn spawn_log(&self, review: &str, verdict: &Verdict) -> JoinHandle<()> {
        let record = AnalysisRecord::new(review, verdict.label, verdict.confidence);
        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move {
            if let Err(e) = sink.log(record).await {
                warn!(error = %e, "analysis logging failed");
            }
        })
    }
}
