/// Scoring Layer
///
/// Computes the Dynamic Visibility Score for a single candidate post:
/// four weighted sub-scores (freshness, engagement, affinity, interest)
/// combined with multiplicative creator-level boosts and a small random
/// jitter that breaks exact ties unpredictably.
use crate::config::RankingConfig;
use crate::models::{Post, RankReason, ScoreBreakdown, User};
use crate::utils::{days_since, exponential_decay, hours_since};
use chrono::{DateTime, Utc};
use rand::{Rng, RngCore};

pub struct ScoringLayer {
    config: RankingConfig,
}

impl ScoringLayer {
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Score a single post for a viewer.
    ///
    /// `viewer` is `None` in anonymous/guest contexts; affinity and interest
    /// then fall back to their neutral values. The author must already be
    /// resolved by the caller; posts with no resolvable author are filtered
    /// before scoring, never passed here.
    ///
    /// Total over well-formed inputs; there is no error path.
    pub fn score(
        &self,
        post: &Post,
        viewer: Option<&User>,
        author: &User,
        now: DateTime<Utc>,
        rng: &mut dyn RngCore,
    ) -> (f64, ScoreBreakdown) {
        let cfg = &self.config;

        // A missing creation timestamp counts as "just created".
        let age_hours = post
            .created_at
            .map(|created| hours_since(created, now))
            .unwrap_or(0.0);

        let freshness = exponential_decay(age_hours, cfg.decay_lambda);

        let raw_engagement = f64::from(post.reaction_count) * cfg.val_reaction
            + f64::from(post.comment_count) * cfg.val_comment
            + f64::from(post.share_count) * cfg.val_share
            + f64::from(post.view_count.unwrap_or(0)) * cfg.val_view;

        // Strict thresholds: exactly 50 raw engagement is not viral,
        // exactly 3 hours old is not fast-moving.
        let viral_multiplier = if raw_engagement > cfg.viral_engagement_threshold {
            cfg.viral_multiplier
        } else {
            1.0
        };
        let velocity_multiplier = if age_hours < cfg.velocity_hours_threshold
            && raw_engagement > cfg.velocity_engagement_threshold
        {
            cfg.velocity_multiplier
        } else {
            1.0
        };
        let engagement = raw_engagement * viral_multiplier * velocity_multiplier;

        let affinity = self.affinity_score(viewer, author);
        let interest = self.interest_score(viewer, post);

        let base_score = freshness * cfg.weight_freshness
            + engagement * cfg.weight_engagement
            + affinity * cfg.weight_affinity
            + interest * cfg.weight_interest;

        // An author with no creation timestamp counts as established,
        // never newly joined.
        let author_age_days = author
            .created_at
            .map(|created| days_since(created, now))
            .unwrap_or(f64::MAX);
        let new_creator_boost = if author_age_days < cfg.new_creator_days_threshold {
            cfg.new_creator_multiplier
        } else {
            1.0
        };

        // Anti-monopoly dampener: effective reach shrinks logarithmically
        // with follower count. The +10 offset keeps log10 away from its
        // singularity at zero followers.
        let follower_dampener = 1.0 / (author.followers.len() as f64 + 10.0).log10();

        let jitter = rng.gen::<f64>() * cfg.jitter_max;
        let score = base_score * new_creator_boost * follower_dampener + jitter;

        let reason = if new_creator_boost > 1.0 {
            RankReason::NewCreatorBoost
        } else if viral_multiplier > 1.0 {
            RankReason::Viral
        } else if velocity_multiplier > 1.0 {
            RankReason::HighVelocity
        } else if affinity > cfg.affinity_following {
            RankReason::MutualFollow
        } else if affinity > 1.0 {
            RankReason::Following
        } else {
            RankReason::Standard
        };

        let breakdown = ScoreBreakdown {
            freshness,
            engagement,
            affinity,
            interest,
            base_score,
            new_creator_boost,
            viral_multiplier,
            velocity_multiplier,
            follower_dampener,
            diversity_factor: 1.0,
            reason,
        };

        (score, breakdown)
    }

    /// Relational boost between viewer and author.
    ///
    /// Neutral (1.0) when anonymous or when the viewer is the author;
    /// the author's own posts get no relational advantage.
    fn affinity_score(&self, viewer: Option<&User>, author: &User) -> f64 {
        let Some(viewer) = viewer else {
            return 1.0;
        };
        if viewer.id == author.id {
            return 1.0;
        }
        if viewer.following.contains(&author.id) {
            if author.followers.contains(&viewer.id) {
                self.config.affinity_mutual
            } else {
                self.config.affinity_following
            }
        } else {
            1.0
        }
    }

    /// Topical overlap between the viewer's interests and the post's tags,
    /// matched case-insensitively. Zero when either side is empty.
    fn interest_score(&self, viewer: Option<&User>, post: &Post) -> f64 {
        let Some(viewer) = viewer else {
            return 0.0;
        };
        if viewer.interests.is_empty() || post.tags.is_empty() {
            return 0.0;
        }
        let interests: Vec<String> = viewer
            .interests
            .iter()
            .map(|i| i.to_lowercase())
            .collect();
        let matches = post
            .tags
            .iter()
            .filter(|tag| interests.contains(&tag.to_lowercase()))
            .count();
        matches as f64 * self.config.interest_match_value
    }
}
