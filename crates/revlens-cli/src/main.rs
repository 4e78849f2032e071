mod session;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use revlens_ai::{Gateway, RemoteClassifier};
use revlens_app::{App, AppConfig, default_config_path};
use revlens_core::Corpus;
use revlens_corpus::{CorpusSource, FileCorpusSource, HttpCorpusSource, LoadError};
use revlens_sink::WebhookSink;

/// Analyze random reviews from a TSV corpus with a remote sentiment model.
#[derive(Parser)]
#[command(name = "revlens", version)]
struct Args {
    /// Corpus location: an http(s) URL or a local file path.
    corpus: String,

    /// Column holding the review text.
    #[arg(long, default_value = "text")]
    column: String,

    /// Base URL of the sentiment inference service.
    #[arg(long, env = "REVLENS_MODEL_URL")]
    model_url: String,

    /// Analyze a single review and exit.
    #[arg(long)]
    once: bool,

    /// Classifier initialization timeout, in seconds.
    #[arg(long, default_value_t = 60)]
    init_timeout: u64,

    /// Config file path (default: OS config dir).
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Corpus source picked from the CLI argument shape.
enum ReviewSource {
    Http(HttpCorpusSource),
    File(FileCorpusSource),
}

impl CorpusSource for ReviewSource {
    async fn load(&self) -> Result<Corpus, LoadError> {
        match self {
            Self::Http(source) => source.load().await,
            Self::File(source) => source.load().await,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    tracing::info!("revlens v{}", env!("CARGO_PKG_VERSION"));

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let config = AppConfig::load(&config_path)?;

    let source = if args.corpus.starts_with("http://") || args.corpus.starts_with("https://") {
        ReviewSource::Http(HttpCorpusSource::new(&args.corpus, &args.column))
    } else {
        ReviewSource::File(FileCorpusSource::new(&args.corpus, &args.column))
    };

    let gateway = Gateway::with_timeout(
        RemoteClassifier::new(&args.model_url),
        Duration::from_secs(args.init_timeout),
    );
    let sink = Arc::new(WebhookSink::new(config.endpoint_url()));
    let app = App::new(source, gateway, Arc::clone(&sink));

    println!("loading reviews and classifier...");
    app.start().await;
    session::print_status(&app);

    if args.once {
        let analysis = app.analyze().await?;
        session::print_analysis(&analysis);
        // Give the detached log call a chance to finish before exit.
        let _ = analysis.log_task.await;
        return Ok(());
    }

    session::run(&app, &sink, &config_path).await
}
