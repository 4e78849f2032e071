//! Sentiment verdicts and raw-prediction normalization.
//!
//! Classifier backends return whatever label vocabulary their model was
//! trained with; [`Verdict::from_predictions`] normalizes the top-1
//! prediction to a fixed label set so the host always has something to
//! render.

use serde::Deserialize;

/// Normalized sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLabel {
    Positive,
    Negative,
    /// Fallback for neutral, unrecognized, or absent backend labels.
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One raw prediction as produced by a classifier backend.
///
/// Wire shape of the inference service: `[{"label": ..., "score": ...}]`,
/// top-1 first. The label may be absent; the score may fall outside [0, 1]
/// for misbehaving backends and is clamped during normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPrediction {
    #[serde(default)]
    pub label: Option<String>,
    pub score: f32,
}

/// A classification result: normalized label plus confidence in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub label: SentimentLabel,
    pub confidence: f32,
}

/// Confidence assigned when the backend label is unrecognized or missing.
const FALLBACK_CONFIDENCE: f32 = 0.5;

impl Verdict {
    /// Neutral verdict with mid-scale confidence.
    pub fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            confidence: FALLBACK_CONFIDENCE,
        }
    }

    /// Normalize a backend's predictions into a verdict (top-1 used).
    ///
    /// Labels are matched case-insensitively; anything outside the known
    /// vocabulary — including an empty prediction list — becomes `Neutral`
    /// with confidence 0.5 rather than an error, so a successful backend
    /// call always yields something renderable.
    pub fn from_predictions(predictions: &[RawPrediction]) -> Self {
        let Some(top) = predictions.first() else {
            return Self::neutral();
        };
        let normalized = top.label.as_deref().map(str::to_ascii_uppercase);
        let label = match normalized.as_deref() {
            Some("POSITIVE") => SentimentLabel::Positive,
            Some("NEGATIVE") => SentimentLabel::Negative,
            Some("NEUTRAL") => SentimentLabel::Neutral,
            _ => return Self::neutral(),
        };
        Self {
            label,
            confidence: top.score.clamp(0.0, 1.0),
        }
    }

    /// Confidence formatted as a percentage with one decimal place.
    pub fn percent(&self) -> String {
        format!("{:.1}%", self.confidence * 100.0)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label, self.percent())
    }
}
