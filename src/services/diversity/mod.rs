/// Diversity Layer
///
/// Post-processes the score-sorted candidate sequence so that no single
/// author can occupy unbounded top-of-feed real estate. The penalty grows
/// harmonically (1, 1/2, 1/3, ...), suppressing prolific authors without
/// eliminating them.
use crate::models::ScoredCandidate;
use std::collections::HashMap;
use tracing::trace;
use uuid::Uuid;

pub struct DiversityLayer;

impl Default for DiversityLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl DiversityLayer {
    pub fn new() -> Self {
        Self
    }

    /// Apply the harmonic author penalty to an already score-sorted
    /// sequence.
    ///
    /// Single forward pass, no re-sorting inside: because the input is in
    /// descending score order, an author's second-best post receives the
    /// 2x penalty, their third-best the 3x penalty, and so on. The caller
    /// re-sorts by the adjusted scores afterwards.
    ///
    /// The seen-count map is local to this call; nothing is shared across
    /// invocations.
    pub fn rerank(&self, mut candidates: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
        let mut seen_by_author: HashMap<Uuid, usize> = HashMap::new();

        for candidate in &mut candidates {
            let seen = seen_by_author.entry(candidate.post.author_id).or_insert(0);
            let factor = 1.0 / (1.0 + *seen as f64);
            candidate.score *= factor;
            candidate.breakdown.diversity_factor = factor;
            *seen += 1;

            trace!(
                post_id = %candidate.post.id,
                author_id = %candidate.post.author_id,
                diversity_factor = factor,
                "applied diversity penalty"
            );
        }

        candidates
    }
}
