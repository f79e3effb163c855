//! Feed Ranking Engine
//!
//! Computes a Dynamic Visibility Score for each candidate post and produces
//! a total feed order for a viewing user. The score combines four weighted
//! sub-scores (freshness, engagement, affinity, interest) with creator-level
//! boosts, then a diversity pass suppresses consecutive over-representation
//! of the same author.
//!
//! # Architecture
//! - **Scoring Layer**: per-post score from weighted sub-scores and boosts
//! - **Diversity Layer**: harmonic penalty on repeated authors
//! - **Feed Ranker**: score → sort → diversity rerank → sort → posts
//!
//! The engine is a pure function of (candidates, viewer, user directory);
//! it never mutates its inputs and performs no I/O beyond an injectable
//! observability sink.

pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use config::{ConfigError, RankingConfig};
pub use models::{Post, RankReason, ScoreBreakdown, ScoredCandidate, User};
pub use services::{
    DiversityLayer, FeedRanker, NoopObserver, RankObserver, ScoringLayer, TracingObserver,
};
