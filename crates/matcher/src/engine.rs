use store::{EmbeddingRecord, StoreError};
use tracing::{debug, warn};

use crate::types::{BestMatch, NoMatch};

#[cfg(test)]
mod tests;

/// Sum of squared per-dimension differences, or `None` when the lengths differ.
#[inline]
pub fn squared_euclidean(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() {
        return None;
    }
    Some(
        a.iter()
            .zip(b)
            .map(|(x, y)| {
                let d = x - y;
                d * d
            })
            .sum(),
    )
}

/// Distance from `query` to a stored record.
pub fn distance_to(query: &[f32], candidate: &EmbeddingRecord) -> Result<f32, StoreError> {
    squared_euclidean(query, &candidate.embedding).ok_or_else(|| StoreError::DimensionMismatch {
        person_id: candidate.person_id.clone(),
        expected: query.len(),
        got: candidate.embedding.len(),
    })
}

/// Find the candidate nearest to `query` and accept it if its squared
/// distance is at most `threshold`.
///
/// Candidates whose dimensionality differs from the query are skipped and
/// logged; the search continues over the rest. Among equal minimal distances
/// the first candidate in `candidates` wins, so the result is deterministic
/// for a fixed input order. The function holds no state and takes no locks.
pub fn find_best_match(
    query: &[f32],
    candidates: &[EmbeddingRecord],
    threshold: f32,
) -> Result<BestMatch, NoMatch> {
    if candidates.is_empty() {
        return Err(NoMatch::NoTrainedIdentities);
    }

    let mut best: Option<(&str, f32)> = None;
    let mut mismatches = Vec::new();

    for candidate in candidates {
        let distance = match distance_to(query, candidate) {
            Ok(distance) => distance,
            Err(err) => {
                warn!(error = %err, "skipping candidate with incompatible embedding");
                mismatches.push(err);
                continue;
            }
        };
        if distance.is_nan() {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate.person_id.as_str(), distance)),
        }
    }

    let Some((person_id, distance)) = best else {
        return Err(NoMatch::NoComparableCandidates { mismatches });
    };

    debug!(
        candidates = candidates.len(),
        skipped = mismatches.len(),
        nearest = person_id,
        distance,
        threshold,
        "nearest candidate found"
    );

    if distance > threshold {
        return Err(NoMatch::BelowThreshold {
            nearest: person_id.to_string(),
            distance,
        });
    }

    Ok(BestMatch {
        person_id: person_id.to_string(),
        distance,
    })
}
