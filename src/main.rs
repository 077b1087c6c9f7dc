//! candidate-match CLI entrypoint.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use mimalloc::MiMalloc;

use candidate_match::config::Config;
use candidate_match::documents::load_directory;
use candidate_match::{
    GenaiSummarizer, JustificationCache, OpenAiEmbedder, Ranker, RankingOptions, ScoredCandidate,
    write_csv, write_json,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Rank resumes against a job description.
#[derive(Debug, Parser)]
#[command(name = "candidate-match", version, about)]
struct Cli {
    /// File containing the job description.
    #[arg(long, value_name = "FILE")]
    job: PathBuf,

    /// Directory of resumes (.pdf, .txt, .md).
    #[arg(long, value_name = "DIR")]
    resumes: PathBuf,

    /// Write the ranking to this file and print a table instead.
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Export format.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Every field of every ranked candidate.
    Json,
    /// Candidate name, file name, adjusted score and justification.
    Csv,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    let description = tokio::fs::read_to_string(&cli.job)
        .await
        .with_context(|| format!("failed to read job description {}", cli.job.display()))?;

    let candidates = load_directory(&cli.resumes, config.max_candidates).await?;
    tracing::info!(
        resumes = candidates.len(),
        embedding_model = %config.embedding_model,
        summary_model = %config.summary_model,
        "Starting ranking"
    );

    let embedder = OpenAiEmbedder::from_env(&config)?;
    let summarizer = GenaiSummarizer::from_config(&config);
    let ranker = Ranker::new(embedder, summarizer, JustificationCache::new())
        .with_options(RankingOptions::from_config(&config));

    let ranked = ranker.run(&description, candidates).await?;

    let cache = ranker.cache();
    cache.run_pending_tasks().await;
    tracing::info!(
        justifications = cache.len(),
        hits = cache.stats().hits,
        misses = cache.stats().misses,
        "Justification cache"
    );

    let mut rendered = Vec::new();
    match cli.format {
        Format::Json => write_json(&ranked, &mut rendered)?,
        Format::Csv => write_csv(&ranked, &mut rendered)?,
    }

    match &cli.output {
        Some(path) => {
            tokio::fs::write(path, rendered)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            print_table(&ranked);
            tracing::info!(path = %path.display(), format = ?cli.format, "Ranking written");
        }
        None => {
            use std::io::Write;
            std::io::stdout().lock().write_all(&rendered)?;
        }
    }

    Ok(())
}

fn print_table(ranked: &[ScoredCandidate]) {
    println!(
        "{:>4}  {:<28} {:<28} {:>8} {:>8} {:>7}",
        "#", "Candidate", "File", "Score", "Raw", "Factor"
    );
    for (rank, candidate) in ranked.iter().enumerate() {
        println!(
            "{:>4}  {:<28} {:<28} {:>8.2} {:>8.2} {:>7.2}",
            rank + 1,
            clip(candidate.display_name(), 28),
            clip(candidate.identifier(), 28),
            candidate.adjusted_score(),
            candidate.raw_similarity(),
            candidate.penalty_factor(),
        );
        println!("      {}", candidate.justification().replace('\n', " "));
    }
}

fn clip(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
