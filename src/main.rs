use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

use truthlens::client::{AnalysisResponse, ClientConfig, DetectionClient};
use truthlens::highlight::HighlightEngine;
use truthlens::ingest::{Document, DocumentReader, IngestConfig, PageProgress};
use truthlens::output::{self, OutputFormat};
use truthlens::stats::RunStats;
use truthlens::summary::summarize;

#[derive(Parser, Debug)]
#[command(name = "truthlens")]
#[command(about = "Highlight persuasive-language techniques in text and PDFs")]
#[command(version)]
struct Args {
    /// Text or PDF file to analyze (reads stdin if omitted)
    input: Option<PathBuf>,

    /// Treat the input as a PDF regardless of extension
    #[arg(long)]
    pdf: bool,

    /// Read the detection response from a JSON file instead of calling the service
    #[arg(long)]
    analysis: Option<PathBuf>,

    /// Detection service base URL (defaults to $TRUTHLENS_API_BASE or http://127.0.0.1:8000)
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout for the detection service
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Output rendition
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Stats output file path
    #[arg(long)]
    stats_out: Option<PathBuf>,

    /// Suppress the PDF page progress bar
    #[arg(long)]
    no_progress: bool,
}

fn page_progress_bar(hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{spinner} Reading PDF [{bar:30}] page {pos}/{len}")?
            .progress_chars("=>-"),
    );
    Ok(bar)
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: logs go to stderr as JSON so stdout carries only the rendered output
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    let source = args
        .input
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdin".to_string());
    let mut stats = RunStats::new(source);

    // Ingest
    let ingest_start = Instant::now();
    let reader = DocumentReader::new(IngestConfig {
        force_pdf: args.pdf,
        ..Default::default()
    });
    let document = match &args.input {
        Some(path) => reader.read_path(path).await?,
        None => reader.read_stdin().await?,
    };

    let bar = page_progress_bar(args.no_progress || !matches!(document, Document::Pdf(_)))?;
    let progress_bar = bar.clone();
    let ingested = reader
        .extract(document, move |progress: PageProgress| {
            progress_bar.set_length(progress.total as u64);
            progress_bar.set_position(progress.page as u64);
        })
        .await;
    bar.finish_and_clear();
    let ingested = ingested?;

    stats.chars_analyzed = ingested.text.chars().count() as u64;
    stats.pages = ingested.pages.map(|p| p as u64);
    stats.ingest_time_ms = ingest_start.elapsed().as_millis() as u64;

    // Analyze
    let analysis_start = Instant::now();
    let analysis = match &args.analysis {
        Some(path) => AnalysisResponse::from_json_file(path).await?,
        None => {
            let mut config = ClientConfig {
                timeout: Duration::from_secs(args.timeout_secs),
                ..Default::default()
            };
            if let Some(endpoint) = &args.endpoint {
                config.base_url = endpoint.clone();
            }
            let client = DetectionClient::new(config)?;
            client.analyze(&ingested.text).await?
        }
    };
    stats.analysis_time_ms = analysis_start.elapsed().as_millis() as u64;

    // Render
    let render_start = Instant::now();
    let rendering = HighlightEngine::new().render(&ingested.text, &analysis.highlights);
    stats.record_rendering(&rendering);
    stats.render_time_ms = render_start.elapsed().as_millis() as u64;

    info!(
        annotations = rendering.annotations_total,
        skipped = rendering.annotations_skipped,
        segments = rendering.segments_merged,
        "Highlight rendering complete"
    );

    let summary = summarize(&analysis);
    let content = output::render(args.format, &rendering.nodes, &summary)?;
    output::write_output(args.out.as_deref(), &content)
        .await
        .context("Failed to write output")?;

    if let Some(stats_path) = &args.stats_out {
        stats
            .save(stats_path)
            .await
            .with_context(|| format!("Failed to write stats to {}", stats_path.display()))?;
        info!("Wrote run stats to {}", stats_path.display());
    }

    Ok(())
}
