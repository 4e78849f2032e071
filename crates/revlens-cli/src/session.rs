//! Interactive analysis session and result rendering.

use std::path::Path;

use revlens_ai::ClassifierBackend;
use revlens_app::{Analysis, App, AppConfig};
use revlens_corpus::CorpusSource;
use revlens_sink::{AnalysisSink, WebhookSink};

pub fn print_analysis(analysis: &Analysis) {
    println!("\"{}\"", analysis.review);
    println!("{}", analysis.verdict);
}

pub fn print_status<S, B, K>(app: &App<S, B, K>)
where
    S: CorpusSource,
    B: ClassifierBackend,
    K: AnalysisSink,
{
    println!(
        "reviews: {} | classifier: {}",
        app.corpus_readiness(),
        app.classifier_readiness()
    );
}

/// Read commands from stdin until EOF or `quit`.
///
/// Enter triggers an analysis; rejections print as status lines and leave
/// any previously rendered result in place.
pub async fn run<S, B>(
    app: &App<S, B, WebhookSink>,
    sink: &WebhookSink,
    config_path: &Path,
) -> anyhow::Result<()>
where
    S: CorpusSource,
    B: ClassifierBackend,
{
    use tokio::io::AsyncBufReadExt;

    println!("press Enter to analyze a random review");
    println!("commands: status | endpoint <url> | quit");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => match app.analyze().await {
                Ok(analysis) => print_analysis(&analysis),
                Err(e) => println!("! {e}"),
            },
            "status" => print_status(app),
            "quit" | "q" | "exit" => break,
            cmd => {
                if let Some(raw) = cmd.strip_prefix("endpoint ") {
                    match AppConfig::save_endpoint(config_path, raw) {
                        Ok(url) => {
                            sink.set_endpoint(Some(url));
                            println!("logging endpoint saved");
                        }
                        Err(e) => println!("! {e}"),
                    }
                } else {
                    println!("! unknown command: {cmd}");
                }
            }
        }
    }
    Ok(())
}
