//! HTTP inference backend.
//!
//! Talks to a service exposing `GET /` as a readiness probe and
//! `POST /classify` taking `{"text": ...}` and answering
//! `[{"label": ..., "score": ...}]`, top-1 first. Any sentiment model
//! behind this shape is substitutable.

use revlens_core::RawPrediction;
use serde_json::json;
use tracing::info;

use crate::gateway::{ClassifierBackend, GatewayError};

pub struct RemoteClassifier {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteClassifier {
    /// Create a backend client for the given service base URL.
    ///
    /// `base_url` should be like `http://localhost:8080` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl ClassifierBackend for RemoteClassifier {
    async fn init(&self) -> Result<(), GatewayError> {
        info!(url = %self.base_url, "probing inference service");
        let resp = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| GatewayError::Init(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(GatewayError::Init(format!(
                "inference service returned status {}",
                status.as_u16()
            )));
        }
        Ok(())
    }

    async fn classify(&self, text: &str) -> Result<Vec<RawPrediction>, GatewayError> {
        let url = format!("{}/classify", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&json!({ "text": text }))
            .send()
            .await
            .map_err(|e| GatewayError::Inference(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(GatewayError::Inference(format!(
                "inference service returned status {}",
                status.as_u16()
            )));
        }

        resp.json::<Vec<RawPrediction>>()
            .await
            .map_err(|e| GatewayError::Inference(format!("unusable response shape: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        let backend = RemoteClassifier::new("http://localhost:8080/");
        assert_eq!(backend.base_url, "http://localhost:8080");
    }

    #[test]
    fn prediction_wire_shape_decodes() {
        let raw = r#"[{"label": "POSITIVE", "score": 0.97}, {"score": 0.03}]"#;
        let predictions: Vec<RawPrediction> = serde_json::from_str(raw).unwrap();
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].label.as_deref(), Some("POSITIVE"));
        assert!(predictions[1].label.is_none());
    }
}
