use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Candidate post as handed over by the feed-assembly layer.
///
/// Only the fields the ranking engine reads; content fields live with the
/// content service and never reach the scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    /// Missing timestamp is treated as "just created" (zero age).
    pub created_at: Option<DateTime<Utc>>,
    pub reaction_count: u32,
    pub comment_count: u32,
    pub share_count: u32,
    pub view_count: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Viewer or author record from the user directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub followers: HashSet<Uuid>,
    #[serde(default)]
    pub following: HashSet<Uuid>,
    #[serde(default)]
    pub interests: Vec<String>,
}

/// Which rule dominated a post's score, for the diagnostic trace.
///
/// Precedence (highest first): new-creator boost, viral, velocity,
/// mutual follow, one-way follow, standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankReason {
    NewCreatorBoost,
    Viral,
    HighVelocity,
    MutualFollow,
    Following,
    Standard,
}

impl RankReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankReason::NewCreatorBoost => "new creator boost",
            RankReason::Viral => "high engagement (viral)",
            RankReason::HighVelocity => "trending (high velocity)",
            RankReason::MutualFollow => "mutual follow",
            RankReason::Following => "you follow them",
            RankReason::Standard => "standard rank",
        }
    }
}

/// Full per-post score decomposition, emitted on the diagnostic channel.
///
/// Not used for ordering; the final score alone decides the feed.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub freshness: f64,
    pub engagement: f64,
    pub affinity: f64,
    pub interest: f64,
    pub base_score: f64,
    pub new_creator_boost: f64,
    pub viral_multiplier: f64,
    pub velocity_multiplier: f64,
    pub follower_dampener: f64,
    /// Harmonic penalty applied by the diversity pass (1.0 before it runs).
    pub diversity_factor: f64,
    pub reason: RankReason,
}

/// A post paired with its computed score, alive for one ranking call.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub post: Post,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}
