use crate::constants::validate_embedding_dim;

use super::error::{ScoringError, ScoringResult};

/// Cosine similarity of two equal-length vectors, in `[-1, 1]`.
///
/// Zero-magnitude vectors score `0.0`. Accumulation happens in `f64` so long embeddings
/// do not lose precision.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> ScoringResult<f64> {
    validate_embedding_dim(b.len(), a.len())?;

    let mut dot = 0.0f64;
    let mut norm_a_sq = 0.0f64;
    let mut norm_b_sq = 0.0f64;

    for (index, (&av, &bv)) in a.iter().zip(b.iter()).enumerate() {
        if !av.is_finite() || !bv.is_finite() {
            return Err(ScoringError::NonFiniteComponent { index });
        }
        let av = f64::from(av);
        let bv = f64::from(bv);
        dot += av * bv;
        norm_a_sq += av * av;
        norm_b_sq += bv * bv;
    }

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok((dot / (norm_a * norm_b)).clamp(-1.0, 1.0))
    }
}

/// Similarity of a candidate to the reference as a percentage.
///
/// `None` (no embedding was produced) scores `0.0`. Negative cosine values floor at `0.0` so
/// the result always lies in `[0, 100]`.
pub fn similarity_score(reference: &[f32], candidate: Option<&[f32]>) -> ScoringResult<f64> {
    let Some(candidate) = candidate else {
        return Ok(0.0);
    };

    let cosine = cosine_similarity(reference, candidate)?;
    Ok(round2((cosine * 100.0).clamp(0.0, 100.0)))
}

/// Rounds to two decimal places, normalizing `-0.0` to `0.0`.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}
