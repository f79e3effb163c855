/// Feed Ranker
///
/// Orchestrates the full ranking pipeline: resolve authors, score every
/// candidate, sort, apply the diversity penalty, sort again, emit the
/// diagnostic top-N to the observer, and return the ordered posts.
use crate::config::RankingConfig;
use crate::models::{Post, ScoredCandidate, User};
use crate::services::{DiversityLayer, ScoringLayer};
use chrono::{DateTime, Utc};
use rand::RngCore;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Sink for the post-ranking diagnostic dump.
///
/// Purely observational: implementations must not influence the returned
/// ordering. Injectable so the ranking pipeline stays testable without
/// capturing log output.
#[cfg_attr(test, mockall::automock)]
pub trait RankObserver: Send + Sync {
    fn feed_ranked(&self, top: &[ScoredCandidate]);
}

/// Default observer: emits the top candidates as structured tracing events.
pub struct TracingObserver;

impl RankObserver for TracingObserver {
    fn feed_ranked(&self, top: &[ScoredCandidate]) {
        for (rank, candidate) in top.iter().enumerate() {
            debug!(
                rank = rank + 1,
                post_id = %candidate.post.id,
                score = format!("{:.4}", candidate.score),
                reason = candidate.breakdown.reason.as_str(),
                breakdown = %serde_json::json!(candidate.breakdown),
                "feed ranking result"
            );
        }
    }
}

/// Observer that discards the diagnostic dump.
pub struct NoopObserver;

impl RankObserver for NoopObserver {
    fn feed_ranked(&self, _top: &[ScoredCandidate]) {}
}

pub struct FeedRanker {
    scoring: ScoringLayer,
    diversity: DiversityLayer,
    observer: Arc<dyn RankObserver>,
    observer_top_n: usize,
}

impl Default for FeedRanker {
    fn default() -> Self {
        Self::new(RankingConfig::default())
    }
}

impl FeedRanker {
    pub fn new(config: RankingConfig) -> Self {
        Self::with_observer(config, Arc::new(TracingObserver))
    }

    pub fn with_observer(config: RankingConfig, observer: Arc<dyn RankObserver>) -> Self {
        let observer_top_n = config.observer_top_n;
        Self {
            scoring: ScoringLayer::new(config),
            diversity: DiversityLayer::new(),
            observer,
            observer_top_n,
        }
    }

    /// Rank a feed for a viewer using the wall clock and thread-local
    /// entropy for jitter. Production entry point.
    pub fn rank_feed(&self, posts: &[Post], viewer: Option<&User>, users: &[User]) -> Vec<Post> {
        self.rank_feed_at(posts, viewer, users, Utc::now(), &mut rand::thread_rng())
    }

    /// Rank a feed with an injected clock and randomness source.
    ///
    /// Identical inputs, clock, and rng state produce an identical
    /// ordering; tests pass a fixed clock and a stubbed rng.
    pub fn rank_feed_at(
        &self,
        posts: &[Post],
        viewer: Option<&User>,
        users: &[User],
        now: DateTime<Utc>,
        rng: &mut dyn RngCore,
    ) -> Vec<Post> {
        let authors: HashMap<Uuid, &User> = users.iter().map(|u| (u.id, u)).collect();

        let mut scored: Vec<ScoredCandidate> = posts
            .iter()
            .filter_map(|post| {
                let Some(author) = authors.get(&post.author_id) else {
                    // Upstream data-integrity gap, not an error: the post
                    // is excluded from the feed.
                    debug!(
                        post_id = %post.id,
                        author_id = %post.author_id,
                        "dropping post with unresolvable author"
                    );
                    return None;
                };
                let (score, breakdown) = self.scoring.score(post, viewer, author, now, rng);
                Some(ScoredCandidate {
                    post: post.clone(),
                    score,
                    breakdown,
                })
            })
            .collect();

        sort_by_score_desc(&mut scored);
        let mut scored = self.diversity.rerank(scored);
        sort_by_score_desc(&mut scored);

        let top_n = self.observer_top_n.min(scored.len());
        self.observer.feed_ranked(&scored[..top_n]);

        scored.into_iter().map(|c| c.post).collect()
    }
}

// NaN scores are treated as equal so the sort never panics.
fn sort_by_score_desc(candidates: &mut [ScoredCandidate]) {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
