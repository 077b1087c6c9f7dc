use std::cmp::Ordering;

use futures_util::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};

use crate::cache::JustificationCache;
use crate::config::Config;
use crate::constants::{
    DEFAULT_CONCURRENCY, DEFAULT_MAX_CANDIDATES, SUMMARY_ERROR_PREFIX, TRUNCATION_NOTICE,
    UNREADABLE_JUSTIFICATION,
};
use crate::embedding::Embedder;
use crate::penalty::PenaltyPolicy;
use crate::scoring::similarity_score;
use crate::summary::Summarizer;

use super::error::{CandidateFailure, RankingError, RankingResult};
use super::types::{CandidateRecord, ScoredCandidate};

/// Tunables for a [`Ranker`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingOptions {
    pub policy: PenaltyPolicy,
    /// Candidates processed concurrently. At least 1.
    pub concurrency: usize,
    /// Candidates accepted by [`Ranker::run`]; the rest are dropped. At least 1.
    pub max_candidates: usize,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            policy: PenaltyPolicy::default(),
            concurrency: DEFAULT_CONCURRENCY,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

impl RankingOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            policy: PenaltyPolicy::from_config(config),
            concurrency: config.concurrency,
            max_candidates: config.max_candidates,
        }
    }
}

/// Rejects a reference no candidate can be meaningfully compared against.
fn validate_reference(reference: &[f32]) -> RankingResult<()> {
    if reference.is_empty() {
        return Err(RankingError::EmptyReference);
    }
    if let Some(index) = reference.iter().position(|x| !x.is_finite()) {
        return Err(RankingError::InvalidReference {
            reason: format!("component {index} is not finite"),
        });
    }
    if reference.iter().all(|&x| x == 0.0) {
        return Err(RankingError::InvalidReference {
            reason: "zero magnitude".to_string(),
        });
    }
    Ok(())
}

/// A candidate after the embedding step, with any embedding failure carried along.
struct EmbeddedCandidate {
    record: CandidateRecord,
    failure: Option<CandidateFailure>,
}

/// Ranks candidates against a description.
///
/// The justification cache is supplied by the caller, who decides its lifetime: a fresh cache
/// per run, or one cache reused across runs of a session.
pub struct Ranker<E: Embedder, S: Summarizer> {
    embedder: E,
    summarizer: S,
    cache: JustificationCache,
    options: RankingOptions,
}

impl<E: Embedder, S: Summarizer> std::fmt::Debug for Ranker<E, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ranker")
            .field("cache", &self.cache)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<E: Embedder, S: Summarizer> Ranker<E, S> {
    pub fn new(embedder: E, summarizer: S, cache: JustificationCache) -> Self {
        Self {
            embedder,
            summarizer,
            cache,
            options: RankingOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RankingOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RankingOptions {
        &self.options
    }

    pub fn cache(&self) -> &JustificationCache {
        &self.cache
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    pub fn summarizer(&self) -> &S {
        &self.summarizer
    }

    /// Full pipeline: embeds the description and every readable candidate, then ranks.
    ///
    /// Fails only if the description is blank or its embedding is missing or unusable.
    /// Candidate embedding failures are recorded on the affected candidates.
    #[instrument(skip_all, fields(candidates = candidates.len()))]
    pub async fn run(
        &self,
        description: &str,
        candidates: Vec<CandidateRecord>,
    ) -> RankingResult<Vec<ScoredCandidate>> {
        if description.trim().is_empty() {
            return Err(RankingError::EmptyDescription);
        }

        let candidates = self.cap(candidates);

        let reference = self
            .embedder
            .embed(description)
            .await
            .map_err(RankingError::ReferenceEmbedding)?;
        validate_reference(&reference)?;
        debug!(dim = reference.len(), "Reference embedding ready");

        let embedded = self.embed_candidates(candidates).await;
        self.rank_embedded(description, &reference, embedded).await
    }

    /// Ranks candidates whose vectors (if any) were computed beforehand.
    ///
    /// A readable candidate without a vector is treated as an embedding failure. An empty,
    /// non-finite or all-zero reference fails the whole run.
    #[instrument(skip_all, fields(candidates = candidates.len(), dim = reference.len()))]
    pub async fn rank(
        &self,
        description: &str,
        reference: &[f32],
        candidates: Vec<CandidateRecord>,
    ) -> RankingResult<Vec<ScoredCandidate>> {
        validate_reference(reference)?;

        let embedded = candidates
            .into_iter()
            .map(|record| EmbeddedCandidate {
                record,
                failure: None,
            })
            .collect();
        self.rank_embedded(description, reference, embedded).await
    }

    fn cap(&self, mut candidates: Vec<CandidateRecord>) -> Vec<CandidateRecord> {
        let max = self.options.max_candidates.max(1);
        if candidates.len() > max {
            warn!(
                received = candidates.len(),
                kept = max,
                "Too many candidates, ranking only the first ones"
            );
            candidates.truncate(max);
        }
        candidates
    }

    async fn embed_candidates(&self, candidates: Vec<CandidateRecord>) -> Vec<EmbeddedCandidate> {
        let embedder = &self.embedder;

        stream::iter(candidates)
            .map(|mut record| async move {
                let Some(text) = record.raw_text.as_deref() else {
                    record.vector = None;
                    return EmbeddedCandidate {
                        record,
                        failure: None,
                    };
                };

                match embedder.embed(text).await {
                    Ok(vector) => {
                        record.vector = Some(vector);
                        EmbeddedCandidate {
                            record,
                            failure: None,
                        }
                    }
                    Err(e) => {
                        warn!(
                            identifier = %record.identifier,
                            error = %e,
                            "Candidate embedding failed"
                        );
                        record.vector = None;
                        EmbeddedCandidate {
                            record,
                            failure: Some(CandidateFailure::EmbeddingFailure {
                                reason: e.to_string(),
                            }),
                        }
                    }
                }
            })
            .buffered(self.options.concurrency.max(1))
            .collect()
            .await
    }

    async fn rank_embedded(
        &self,
        description: &str,
        reference: &[f32],
        candidates: Vec<EmbeddedCandidate>,
    ) -> RankingResult<Vec<ScoredCandidate>> {
        let mut scored: Vec<ScoredCandidate> = stream::iter(candidates)
            .map(|candidate| self.score_candidate(description, reference, candidate))
            .buffered(self.options.concurrency.max(1))
            .collect()
            .await;

        // Vec::sort_by is stable: equal scores keep input order.
        scored.sort_by(|a, b| {
            b.adjusted_score()
                .partial_cmp(&a.adjusted_score())
                .unwrap_or(Ordering::Equal)
        });

        let stats = self.cache.stats();
        info!(
            ranked = scored.len(),
            degraded = scored.iter().filter(|c| c.is_degraded()).count(),
            top_score = scored.first().map(|c| c.adjusted_score()),
            cache_hits = stats.hits,
            cache_misses = stats.misses,
            "Ranking complete"
        );

        Ok(scored)
    }

    async fn score_candidate(
        &self,
        description: &str,
        reference: &[f32],
        candidate: EmbeddedCandidate,
    ) -> ScoredCandidate {
        let EmbeddedCandidate { record, failure } = candidate;
        let mut failures: Vec<CandidateFailure> = failure.into_iter().collect();

        let raw_similarity = match similarity_score(reference, record.vector.as_deref()) {
            Ok(score) => score,
            Err(e) => {
                warn!(identifier = %record.identifier, error = %e, "Candidate vector rejected");
                failures.push(CandidateFailure::InvalidVector {
                    reason: e.to_string(),
                });
                0.0
            }
        };

        if record.is_readable() && record.vector.is_none() && failures.is_empty() {
            failures.push(CandidateFailure::EmbeddingFailure {
                reason: "no embedding produced".to_string(),
            });
        }

        let outcome = self.options.policy.assess(&record);

        let justification = match outcome.text.as_deref() {
            None => {
                failures.push(CandidateFailure::UnreadableInput);
                UNREADABLE_JUSTIFICATION.to_string()
            }
            Some(text) => {
                let key = JustificationCache::key_for(description, text);
                match self
                    .cache
                    .get_or_compute(key, self.summarizer.summarize(description, text))
                    .await
                {
                    Ok(summary) if outcome.is_truncated() => format!("{TRUNCATION_NOTICE}{summary}"),
                    Ok(summary) => summary,
                    Err(e) => {
                        warn!(identifier = %record.identifier, error = %e, "Summarization failed");
                        failures.push(CandidateFailure::SummarizationFailure {
                            reason: e.to_string(),
                        });
                        format!("{SUMMARY_ERROR_PREFIX}: {e}")
                    }
                }
            }
        };

        debug!(
            identifier = %record.identifier,
            raw_similarity,
            penalty = outcome.factor,
            note = %outcome.note,
            "Candidate scored"
        );

        ScoredCandidate::new(
            &record,
            raw_similarity,
            justification,
            outcome.factor,
            outcome.note,
            failures,
        )
    }
}
