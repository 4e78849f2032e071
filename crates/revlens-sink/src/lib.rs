//! Best-effort logging of analysis results to a remote webhook.
//!
//! The sink is fire-and-forget from the application's point of view: the
//! state machine spawns the call detached and swallows failures, so a dead
//! endpoint can never block or fail an analysis.

use std::future::Future;
use std::sync::{PoisonError, RwLock};

use revlens_core::SentimentLabel;
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("log request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("log endpoint returned status {status}")]
    Status { status: u16 },
}

/// One analysis result, serialized to the webhook's form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRecord {
    pub review: String,
    pub sentiment: String,
    pub confidence: String,
}

impl AnalysisRecord {
    pub fn new(review: &str, label: SentimentLabel, confidence: f32) -> Self {
        Self {
            review: review.to_string(),
            sentiment: label.as_str().to_string(),
            confidence: format!("{confidence}"),
        }
    }

    fn form_fields(&self) -> [(&'static str, &str); 3] {
        [
            ("review", &self.review),
            ("sentiment", &self.sentiment),
            ("confidence", &self.confidence),
        ]
    }
}

/// A destination for analysis records.
pub trait AnalysisSink: Send + Sync + 'static {
    fn log(&self, record: AnalysisRecord) -> impl Future<Output = Result<(), SinkError>> + Send;
}

/// Discards every record. Used when logging is disabled.
pub struct NoopSink;

impl AnalysisSink for NoopSink {
    async fn log(&self, _record: AnalysisRecord) -> Result<(), SinkError> {
        Ok(())
    }
}

/// POSTs records as form-encoded key/value pairs to a configured endpoint.
///
/// With no endpoint configured the sink is a no-op, so hosts can wire it
/// unconditionally and flip the endpoint at runtime.
pub struct WebhookSink {
    client: reqwest::Client,
    endpoint: RwLock<Option<Url>>,
}

impl WebhookSink {
    pub fn new(endpoint: Option<Url>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: RwLock::new(endpoint),
        }
    }

    pub fn set_endpoint(&self, endpoint: Option<Url>) {
        *self
            .endpoint
            .write()
            .unwrap_or_else(PoisonError::into_inner) = endpoint;
    }

    pub fn endpoint(&self) -> Option<Url> {
        self.endpoint
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AnalysisSink for WebhookSink {
    async fn log(&self, record: AnalysisRecord) -> Result<(), SinkError> {
        let Some(endpoint) = self.endpoint() else {
            return Ok(());
        };

        debug!(endpoint = %endpoint, sentiment = %record.sentiment, "logging analysis");
        let resp = self
            .client
            .post(endpoint)
            .form(&record.form_fields())
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SinkError::Status {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
