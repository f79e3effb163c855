pub mod diversity;
pub mod feed;
pub mod scoring;

pub use diversity::DiversityLayer;
pub use feed::{FeedRanker, NoopObserver, RankObserver, TracingObserver};
pub use scoring::ScoringLayer;
