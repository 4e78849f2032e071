//! Review sources: where the raw TSV comes from.

use std::future::Future;
use std::path::PathBuf;

use revlens_core::Corpus;
use thiserror::Error;
use tracing::info;

use crate::parse::parse_tsv;

#[derive(Debug, Error)]
pub enum LoadError {
    /// Transport-level failure: the source could not be reached.
    #[error("corpus source unreachable: {0}")]
    Http(#[from] reqwest::Error),

    /// The source answered with a non-success status.
    #[error("corpus source returned status {status}")]
    Status { status: u16 },

    /// Local file could not be read.
    #[error("corpus file unreadable: {0}")]
    Io(#[from] std::io::Error),

    /// The source was reached but its content could not be parsed.
    #[error("corpus source malformed: {0}")]
    Malformed(String),

    /// Parsing succeeded but no usable rows remained.
    #[error("corpus contains no usable rows")]
    Empty,
}

impl LoadError {
    /// True for transport-level failures, as opposed to malformed content.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status { .. } | Self::Io(_))
    }
}

/// A source of review texts.
///
/// `load` fails with [`LoadError`] on network failure, malformed content,
/// or an empty result; it never terminates the host.
pub trait CorpusSource: Send + Sync {
    fn load(&self) -> impl Future<Output = Result<Corpus, LoadError>> + Send;
}

/// Fetches the review TSV over HTTP.
pub struct HttpCorpusSource {
    client: reqwest::Client,
    url: String,
    column: String,
}

impl HttpCorpusSource {
    pub fn new(url: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            column: column.into(),
        }
    }
}

impl CorpusSource for HttpCorpusSource {
    async fn load(&self) -> Result<Corpus, LoadError> {
        info!(url = %self.url, "fetching corpus");
        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
            });
        }

        let raw = resp.text().await?;
        let corpus = parse_tsv(&raw, &self.column)?;
        if corpus.is_empty() {
            return Err(LoadError::Empty);
        }
        info!(reviews = corpus.len(), "corpus loaded");
        Ok(corpus)
    }
}

/// Reads the review TSV from a local file.
pub struct FileCorpusSource {
    path: PathBuf,
    column: String,
}

impl FileCorpusSource {
    pub fn new(path: impl Into<PathBuf>, column: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            column: column.into(),
        }
    }
}

impl CorpusSource for FileCorpusSource {
    async fn load(&self) -> Result<Corpus, LoadError> {
        info!(path = %self.path.display(), "reading corpus");
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let corpus = parse_tsv(&raw, &self.column)?;
        if corpus.is_empty() {
            return Err(LoadError::Empty);
        }
        info!(reviews = corpus.len(), "corpus loaded");
        Ok(corpus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_source_loads_reviews() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("revlens-corpus-test-{}.tsv", std::process::id()));
        tokio::fs::write(&path, "text\nGreat product!\nTerrible service.\n")
            .await
            .unwrap();

        let source = FileCorpusSource::new(&path, "text");
        let corpus = source.load().await.unwrap();
        assert_eq!(corpus.len(), 2);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn missing_file_is_unreachable() {
        let source = FileCorpusSource::new("/nonexistent/reviews.tsv", "text");
        let err = source.load().await.unwrap_err();
        assert!(err.is_unreachable(), "got {err:?}");
    }

    #[tokio::test]
    async fn blank_only_file_is_empty() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("revlens-corpus-blank-{}.tsv", std::process::id()));
        tokio::fs::write(&path, "text\n\n   \n").await.unwrap();

        let source = FileCorpusSource::new(&path, "text");
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, LoadError::Empty), "got {err:?}");

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[test]
    fn malformed_is_not_unreachable() {
        let err = LoadError::Malformed("no 'text' column".into());
        assert!(!err.is_unreachable());
    }
}
