use std::time::Duration;

use super::*;
use crate::cache::{CacheStats, JustificationCache};
use crate::constants::{TRUNCATION_NOTICE, UNREADABLE_JUSTIFICATION};
use crate::embedding::{EmbeddingError, MockEmbedder};
use crate::penalty::{PenaltyNote, PenaltyPolicy};
use crate::summary::MockSummarizer;

const DESCRIPTION: &str = "Senior Rust engineer, async networking";

fn ranker() -> Ranker<MockEmbedder, MockSummarizer> {
    Ranker::new(
        MockEmbedder::new(),
        MockSummarizer::new(),
        JustificationCache::new(),
    )
}

fn readable(id: &str, text: &str, vector: Vec<f32>) -> CandidateRecord {
    CandidateRecord::new(id, Some(text.to_string())).with_vector(vector)
}

fn ids(ranked: &[ScoredCandidate]) -> Vec<&str> {
    ranked.iter().map(|c| c.identifier()).collect()
}

#[tokio::test]
async fn test_rank_end_to_end_example() {
    let ranker = ranker();
    let candidates = vec![
        readable("A", "ok", vec![1.0, 0.0]),
        CandidateRecord::unreadable("B"),
        readable("C", "ok", vec![0.0, 1.0]),
    ];

    let ranked = ranker
        .rank(DESCRIPTION, &[1.0, 0.0], candidates)
        .await
        .unwrap();

    assert_eq!(ids(&ranked), vec!["A", "B", "C"]);

    let a = &ranked[0];
    assert_eq!(a.raw_similarity(), 100.0);
    assert_eq!(a.penalty_factor(), 1.0);
    assert_eq!(a.adjusted_score(), 100.0);
    assert_eq!(a.justification(), "Fit: ok");
    assert!(!a.is_degraded());

    let b = &ranked[1];
    assert_eq!(b.raw_similarity(), 0.0);
    assert_eq!(b.adjusted_score(), 0.0);
    assert_eq!(b.justification(), UNREADABLE_JUSTIFICATION);
    assert_eq!(b.penalty_note(), PenaltyNote::Unreadable);
    assert_eq!(b.failures(), &[CandidateFailure::UnreadableInput]);

    let c = &ranked[2];
    assert_eq!(c.raw_similarity(), 0.0);
    assert_eq!(c.penalty_factor(), 1.0);
    assert_eq!(c.adjusted_score(), 0.0);
}

#[tokio::test]
async fn test_rank_ties_keep_input_order() {
    let ranker = ranker();
    let candidates: Vec<_> = ["first", "second", "third", "fourth"]
        .into_iter()
        .map(|id| readable(id, id, vec![0.5, 0.5]))
        .collect();

    let ranked = ranker
        .rank(DESCRIPTION, &[1.0, 1.0], candidates)
        .await
        .unwrap();

    assert_eq!(ids(&ranked), vec!["first", "second", "third", "fourth"]);
    assert!(ranked.iter().all(|c| c.adjusted_score() == 100.0));
}

#[tokio::test]
async fn test_rank_sorts_descending() {
    let ranker = ranker();
    let candidates = vec![
        readable("low", "low", vec![0.0, 1.0]),
        readable("mid", "mid", vec![1.0, 1.0]),
        readable("high", "high", vec![1.0, 0.0]),
    ];

    let ranked = ranker
        .rank(DESCRIPTION, &[1.0, 0.0], candidates)
        .await
        .unwrap();

    assert_eq!(ids(&ranked), vec!["high", "mid", "low"]);
    assert_eq!(ranked[1].raw_similarity(), 70.71);
}

#[tokio::test]
async fn test_unreadable_with_vector_still_scores_zero() {
    let ranker = ranker();
    let candidates = vec![CandidateRecord::unreadable("ghost").with_vector(vec![1.0, 0.0])];

    let ranked = ranker
        .rank(DESCRIPTION, &[1.0, 0.0], candidates)
        .await
        .unwrap();

    let ghost = &ranked[0];
    assert_eq!(ghost.raw_similarity(), 100.0);
    assert_eq!(ghost.penalty_factor(), 0.0);
    assert_eq!(ghost.adjusted_score(), 0.0);
    assert_eq!(ghost.justification(), UNREADABLE_JUSTIFICATION);
    assert_eq!(ranker.summarizer().call_count(), 0);
}

#[tokio::test]
async fn test_readable_without_vector_records_embedding_failure() {
    let ranker = ranker();
    let candidates = vec![CandidateRecord::new("novec", Some("text".to_string()))];

    let ranked = ranker
        .rank(DESCRIPTION, &[1.0, 0.0], candidates)
        .await
        .unwrap();

    let novec = &ranked[0];
    assert_eq!(novec.raw_similarity(), 0.0);
    assert_eq!(novec.justification(), "Fit: text");
    assert!(matches!(
        novec.failures(),
        [CandidateFailure::EmbeddingFailure { .. }]
    ));
}

#[tokio::test]
async fn test_dimension_mismatch_is_invalid_vector() {
    let ranker = ranker();
    let candidates = vec![
        readable("bad", "bad", vec![1.0, 0.0, 0.0]),
        readable("good", "good", vec![1.0, 0.0]),
    ];

    let ranked = ranker
        .rank(DESCRIPTION, &[1.0, 0.0], candidates)
        .await
        .unwrap();

    assert_eq!(ids(&ranked), vec!["good", "bad"]);
    let bad = &ranked[1];
    assert_eq!(bad.raw_similarity(), 0.0);
    assert!(matches!(
        bad.failures(),
        [CandidateFailure::InvalidVector { reason }] if reason.contains("dimension mismatch")
    ));
}

#[tokio::test]
async fn test_summarizer_failure_keeps_penalty() {
    let ranker = Ranker::new(
        MockEmbedder::new(),
        MockSummarizer::new().failing_on("broken resume"),
        JustificationCache::new(),
    );
    let candidates = vec![readable("broken", "broken resume", vec![1.0, 0.0])];

    let ranked = ranker
        .rank(DESCRIPTION, &[1.0, 0.0], candidates)
        .await
        .unwrap();

    let broken = &ranked[0];
    assert_eq!(broken.penalty_factor(), 1.0);
    assert_eq!(broken.adjusted_score(), 100.0);
    assert!(
        broken
            .justification()
            .starts_with("Error generating summary: ")
    );
    assert!(matches!(
        broken.failures(),
        [CandidateFailure::SummarizationFailure { .. }]
    ));
}

#[tokio::test]
async fn test_truncated_candidate_is_penalized_and_prefixed() {
    let options = RankingOptions {
        policy: PenaltyPolicy::default().with_max_tokens(3),
        ..RankingOptions::default()
    };
    let ranker = ranker().with_options(options);
    let candidates = vec![
        readable("long", "alpha  beta\ngamma delta", vec![1.0, 0.0]),
        readable("fits", "one two three", vec![1.0, 0.0]),
    ];

    let ranked = ranker
        .rank(DESCRIPTION, &[1.0, 0.0], candidates)
        .await
        .unwrap();

    assert_eq!(ids(&ranked), vec!["fits", "long"]);

    let long = &ranked[1];
    assert_eq!(long.penalty_factor(), 0.8);
    assert_eq!(long.adjusted_score(), 80.0);
    assert_eq!(long.penalty_note(), PenaltyNote::Truncated);
    assert_eq!(
        long.justification(),
        format!("{TRUNCATION_NOTICE}Fit: alpha")
    );

    let cached = ranker
        .cache()
        .lookup_pair(DESCRIPTION, "alpha beta gamma")
        .await;
    assert_eq!(cached.as_deref(), Some("Fit: alpha"));

    let fits = &ranked[0];
    assert_eq!(fits.penalty_factor(), 1.0);
    assert_eq!(fits.justification(), "Fit: one");
}

#[tokio::test]
async fn test_identical_pairs_summarize_once() {
    let ranker = Ranker::new(
        MockEmbedder::new(),
        MockSummarizer::new().with_delay(Duration::from_millis(20)),
        JustificationCache::new(),
    );
    let candidates = vec![
        readable("copy-1", "same resume text", vec![1.0, 0.0]),
        readable("copy-2", "same resume text", vec![1.0, 0.0]),
    ];

    let ranked = ranker
        .rank(DESCRIPTION, &[1.0, 0.0], candidates)
        .await
        .unwrap();

    assert_eq!(ranked[0].justification(), ranked[1].justification());
    assert_eq!(ranker.summarizer().call_count(), 1);
    assert_eq!(ranker.cache().stats(), CacheStats { hits: 1, misses: 1 });
}

#[tokio::test]
async fn test_cache_shared_across_runs() {
    let ranker = ranker();
    let make = || vec![readable("A", "ok", vec![1.0, 0.0])];

    ranker.rank(DESCRIPTION, &[1.0, 0.0], make()).await.unwrap();
    ranker.rank(DESCRIPTION, &[1.0, 0.0], make()).await.unwrap();
    ranker
        .rank("A different role", &[1.0, 0.0], make())
        .await
        .unwrap();

    assert_eq!(ranker.summarizer().call_count(), 2);
}

#[tokio::test]
async fn test_failed_summaries_are_retried_next_run() {
    let ranker = Ranker::new(
        MockEmbedder::new(),
        MockSummarizer::new().failing_on("flaky"),
        JustificationCache::new(),
    );
    let make = || vec![readable("A", "flaky", vec![1.0, 0.0])];

    ranker.rank(DESCRIPTION, &[1.0, 0.0], make()).await.unwrap();
    ranker.rank(DESCRIPTION, &[1.0, 0.0], make()).await.unwrap();

    assert_eq!(ranker.summarizer().call_count(), 2);
    assert!(ranker.cache().is_empty());
}

#[tokio::test]
async fn test_rank_rejects_empty_reference() {
    let ranker = ranker();
    let result = ranker
        .rank(DESCRIPTION, &[], vec![readable("A", "ok", vec![1.0])])
        .await;
    assert!(matches!(result, Err(RankingError::EmptyReference)));
}

#[tokio::test]
async fn test_rank_rejects_non_finite_reference() {
    let ranker = ranker();
    for reference in [[f32::NAN, 0.0], [1.0, f32::INFINITY]] {
        let result = ranker
            .rank(DESCRIPTION, &reference, vec![readable("A", "ok", vec![1.0, 0.0])])
            .await;
        assert!(matches!(
            result,
            Err(RankingError::InvalidReference { reason }) if reason.contains("not finite")
        ));
    }
    assert_eq!(ranker.summarizer().call_count(), 0);
}

#[tokio::test]
async fn test_rank_rejects_zero_reference() {
    let ranker = ranker();
    let result = ranker
        .rank(DESCRIPTION, &[0.0, 0.0], vec![readable("B", "ok", vec![1.0, 0.0])])
        .await;
    assert!(matches!(
        result,
        Err(RankingError::InvalidReference { reason }) if reason == "zero magnitude"
    ));
}

#[tokio::test]
async fn test_run_rejects_unusable_reference_embedding() {
    let embedder = MockEmbedder::new()
        .with_vector(DESCRIPTION, vec![0.0, 0.0, 0.0])
        .with_fallback(vec![1.0, 0.0, 0.0]);
    let ranker = Ranker::new(embedder, MockSummarizer::new(), JustificationCache::new());

    let result = ranker
        .run(DESCRIPTION, vec![CandidateRecord::new("a", Some("ok".into()))])
        .await;

    assert!(matches!(result, Err(RankingError::InvalidReference { .. })));
    assert_eq!(ranker.embedder().call_count(), 1);
}

#[tokio::test]
async fn test_rank_empty_candidates() {
    let ranker = ranker();
    let ranked = ranker.rank(DESCRIPTION, &[1.0, 0.0], vec![]).await.unwrap();
    assert!(ranked.is_empty());
}

#[tokio::test]
async fn test_run_embeds_and_ranks() {
    let embedder = MockEmbedder::new()
        .with_vector(DESCRIPTION, vec![1.0, 0.0])
        .with_vector("tokio and hyper", vec![0.9, 0.1])
        .with_vector("watercolor painting", vec![0.0, 1.0]);
    let ranker = Ranker::new(embedder, MockSummarizer::new(), JustificationCache::new());

    let candidates = vec![
        CandidateRecord::new("painter.pdf", Some("watercolor painting".to_string())),
        CandidateRecord::unreadable("scan.pdf"),
        CandidateRecord::new("rustacean.pdf", Some("tokio and hyper".to_string()))
            .with_display_name("Ferris"),
    ];

    let ranked = ranker.run(DESCRIPTION, candidates).await.unwrap();

    assert_eq!(ids(&ranked), vec!["rustacean.pdf", "painter.pdf", "scan.pdf"]);
    assert_eq!(ranked[0].display_name(), "Ferris");
    assert!(ranked[0].raw_similarity() > 99.0);

    // The unreadable candidate is never sent to the embedder.
    let mut calls = ranker.embedder().calls();
    assert_eq!(calls.remove(0), DESCRIPTION);
    calls.sort();
    assert_eq!(calls, vec!["tokio and hyper", "watercolor painting"]);
}

#[tokio::test]
async fn test_run_reference_failure_is_fatal() {
    let embedder = MockEmbedder::new()
        .with_fallback(vec![1.0, 0.0])
        .failing_on(DESCRIPTION);
    let ranker = Ranker::new(embedder, MockSummarizer::new(), JustificationCache::new());

    let result = ranker
        .run(
            DESCRIPTION,
            vec![CandidateRecord::new("a", Some("ok".into()))],
        )
        .await;

    assert!(matches!(
        result,
        Err(RankingError::ReferenceEmbedding(
            EmbeddingError::InferenceFailed { .. }
        ))
    ));
    assert_eq!(ranker.summarizer().call_count(), 0);
}

#[tokio::test]
async fn test_run_candidate_embedding_failure_degrades() {
    let embedder = MockEmbedder::new()
        .with_fallback(vec![1.0, 0.0])
        .failing_on("unembeddable");
    let ranker = Ranker::new(embedder, MockSummarizer::new(), JustificationCache::new());

    let candidates = vec![
        CandidateRecord::new("x", Some("unembeddable".into())),
        CandidateRecord::new("y", Some("fine".into())),
    ];

    let ranked = ranker.run(DESCRIPTION, candidates).await.unwrap();

    assert_eq!(ids(&ranked), vec!["y", "x"]);
    let x = &ranked[1];
    assert_eq!(x.raw_similarity(), 0.0);
    assert_eq!(x.justification(), "Fit: unembeddable");
    assert!(matches!(
        x.failures(),
        [CandidateFailure::EmbeddingFailure { reason }] if reason.contains("mock failure")
    ));
}

#[tokio::test]
async fn test_run_rejects_blank_description() {
    let ranker = ranker();
    let result = ranker.run("  \n", vec![]).await;
    assert!(matches!(result, Err(RankingError::EmptyDescription)));
    assert_eq!(ranker.embedder().call_count(), 0);
}

#[tokio::test]
async fn test_run_caps_candidates() {
    let embedder = MockEmbedder::new().with_fallback(vec![1.0, 0.0]);
    let options = RankingOptions {
        max_candidates: 2,
        ..RankingOptions::default()
    };
    let ranker = Ranker::new(embedder, MockSummarizer::new(), JustificationCache::new())
        .with_options(options);

    let candidates: Vec<_> = (0..5)
        .map(|i| CandidateRecord::new(format!("c{i}"), Some(format!("resume {i}"))))
        .collect();

    let ranked = ranker.run(DESCRIPTION, candidates).await.unwrap();

    assert_eq!(ids(&ranked), vec!["c0", "c1"]);
    assert_eq!(ranker.embedder().call_count(), 3);
}

#[tokio::test]
async fn test_zero_limits_are_floored_to_one() {
    let embedder = MockEmbedder::new().with_fallback(vec![1.0, 0.0]);
    let options = RankingOptions {
        max_candidates: 0,
        concurrency: 0,
        ..RankingOptions::default()
    };
    let ranker = Ranker::new(embedder, MockSummarizer::new(), JustificationCache::new())
        .with_options(options);

    let candidates = vec![
        CandidateRecord::new("kept", Some("first".into())),
        CandidateRecord::new("dropped", Some("second".into())),
    ];

    let ranked = ranker.run(DESCRIPTION, candidates).await.unwrap();

    assert_eq!(ids(&ranked), vec!["kept"]);
}

#[tokio::test]
async fn test_concurrency_of_one_preserves_results() {
    let options = RankingOptions {
        concurrency: 1,
        ..RankingOptions::default()
    };
    let ranker = ranker().with_options(options);
    let candidates = vec![
        readable("A", "a", vec![0.0, 1.0]),
        readable("B", "b", vec![1.0, 0.0]),
    ];

    let ranked = ranker
        .rank(DESCRIPTION, &[1.0, 0.0], candidates)
        .await
        .unwrap();
    assert_eq!(ids(&ranked), vec!["B", "A"]);
}

#[test]
fn test_options_from_config() {
    let config = crate::config::Config {
        max_tokens: 100,
        truncation_penalty: 0.5,
        concurrency: 2,
        max_candidates: 10,
        ..crate::config::Config::default()
    };
    let options = RankingOptions::from_config(&config);

    assert_eq!(options.policy.max_tokens(), 100);
    assert_eq!(options.policy.truncation_penalty(), 0.5);
    assert_eq!(options.concurrency, 2);
    assert_eq!(options.max_candidates, 10);
}

#[test]
fn test_scored_candidate_serializes_failures() {
    let record = CandidateRecord::new("a.pdf", Some("text".into())).with_display_name("Ada");
    let scored = ScoredCandidate::new(
        &record,
        50.0,
        "why".into(),
        0.8,
        PenaltyNote::Truncated,
        vec![CandidateFailure::EmbeddingFailure {
            reason: "timeout".into(),
        }],
    );

    let json = serde_json::to_value(&scored).unwrap();
    assert_eq!(json["identifier"], "a.pdf");
    assert_eq!(json["display_name"], "Ada");
    assert_eq!(json["adjusted_score"], 40.0);
    assert_eq!(json["penalty_note"], "truncated");
    assert_eq!(json["failures"][0]["kind"], "embedding_failure");
    assert_eq!(json["failures"][0]["reason"], "timeout");
}
