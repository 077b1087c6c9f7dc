//! Ranks three inline resumes with canned embeddings, no network access needed.
//!
//! ```text
//! cargo run --example rank_inline --features mock
//! ```

use candidate_match::{
    CandidateRecord, JustificationCache, MockEmbedder, MockSummarizer, Ranker,
};

const JOB: &str = "Backend engineer: Rust, async networking, Postgres";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let resumes = [
        ("ada.txt", "Ada Lovelace\nRust services on tokio, Postgres tuning"),
        ("grace.txt", "Grace Hopper\nCOBOL compilers, mainframes"),
        ("linus.txt", "Linus\nKernel networking stack, C, some Rust"),
    ];

    let embedder = MockEmbedder::new()
        .with_vector(JOB, vec![1.0, 0.2, 0.0])
        .with_vector(resumes[0].1, vec![0.9, 0.3, 0.1])
        .with_vector(resumes[1].1, vec![0.1, 0.0, 1.0])
        .with_vector(resumes[2].1, vec![0.7, 0.6, 0.2]);

    let mut candidates: Vec<CandidateRecord> = resumes
        .iter()
        .map(|(file, text)| {
            CandidateRecord::new(*file, Some(text.to_string()))
                .with_display_name(candidate_match::documents::extract_display_name(text))
        })
        .collect();
    candidates.push(CandidateRecord::unreadable("scan.pdf"));

    let ranker = Ranker::new(embedder, MockSummarizer::new(), JustificationCache::new());
    let ranked = ranker.run(JOB, candidates).await?;

    for (i, c) in ranked.iter().enumerate() {
        println!(
            "{}. {:<14} {:>6.2}  ({})",
            i + 1,
            c.display_name(),
            c.adjusted_score(),
            c.justification()
        );
    }
    println!("\n{}", serde_json::to_string_pretty(&ranked)?);

    Ok(())
}
