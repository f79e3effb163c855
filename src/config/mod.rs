use serde::Deserialize;
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: String, value: String },
}

/// Tunable constants of the ranking engine.
///
/// `Default` carries the production values; individual knobs can be
/// overridden through environment variables (see [`RankingConfig::from_env`]).
#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    /// Weight of the freshness sub-score in the base score.
    pub weight_freshness: f64,
    /// Weight of the engagement sub-score in the base score.
    pub weight_engagement: f64,
    /// Weight of the affinity sub-score in the base score.
    pub weight_affinity: f64,
    /// Weight of the interest sub-score in the base score.
    pub weight_interest: f64,

    /// Engagement value of a single reaction.
    pub val_reaction: f64,
    /// Engagement value of a single comment.
    pub val_comment: f64,
    /// Engagement value of a single share.
    pub val_share: f64,
    /// Engagement value of a single view.
    pub val_view: f64,

    /// Exponential decay rate for freshness (per hour).
    pub decay_lambda: f64,

    /// Multiplier applied to posts by recently joined creators.
    pub new_creator_multiplier: f64,
    /// Account age below which a creator counts as new, in days.
    pub new_creator_days_threshold: f64,

    /// Raw engagement above which a post counts as viral (strict).
    pub viral_engagement_threshold: f64,
    pub viral_multiplier: f64,

    /// Post age below which the velocity boost can apply, in hours.
    pub velocity_hours_threshold: f64,
    /// Raw engagement above which a young post counts as fast-moving (strict).
    pub velocity_engagement_threshold: f64,
    pub velocity_multiplier: f64,

    /// Affinity when the viewer follows the author one-way.
    pub affinity_following: f64,
    /// Affinity when the follow is mutual.
    pub affinity_mutual: f64,

    /// Score contribution per matched interest tag.
    pub interest_match_value: f64,

    /// Upper bound (exclusive) of the uniform tie-breaking jitter.
    pub jitter_max: f64,

    /// How many top candidates the observer receives after ranking.
    pub observer_top_n: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            weight_freshness: 1.0,
            weight_engagement: 1.5,
            weight_affinity: 2.0,
            weight_interest: 0.8,
            val_reaction: 0.5,
            val_comment: 2.0,
            val_share: 3.0,
            val_view: 0.05,
            decay_lambda: 0.05,
            new_creator_multiplier: 1.5,
            new_creator_days_threshold: 30.0,
            viral_engagement_threshold: 50.0,
            viral_multiplier: 1.3,
            velocity_hours_threshold: 3.0,
            velocity_engagement_threshold: 10.0,
            velocity_multiplier: 1.4,
            affinity_following: 1.5,
            affinity_mutual: 2.0,
            interest_match_value: 0.5,
            jitter_max: 0.1,
            observer_top_n: 5,
        }
    }
}

impl RankingConfig {
    /// Load config from the environment, falling back to defaults.
    ///
    /// Only the primary feed-personality knobs are exposed; the remaining
    /// constants change rarely enough that a code change is the right
    /// vehicle for them.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        config.weight_freshness = env_f64("RANKING_WEIGHT_FRESHNESS", config.weight_freshness)?;
        config.weight_engagement = env_f64("RANKING_WEIGHT_ENGAGEMENT", config.weight_engagement)?;
        config.weight_affinity = env_f64("RANKING_WEIGHT_AFFINITY", config.weight_affinity)?;
        config.weight_interest = env_f64("RANKING_WEIGHT_INTEREST", config.weight_interest)?;
        config.decay_lambda = env_f64("RANKING_DECAY_LAMBDA", config.decay_lambda)?;
        config.jitter_max = env_f64("RANKING_JITTER_MAX", config.jitter_max)?;
        Ok(config)
    }
}

fn env_f64(var: &str, default: f64) -> Result<f64, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}
