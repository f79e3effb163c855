// Utility functions for the ranking engine.

use chrono::{DateTime, Utc};

/// Hours elapsed since `then`, clamped at zero for future timestamps.
pub fn hours_since(then: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let seconds = (now - then).num_milliseconds() as f64 / 1000.0;
    (seconds / 3600.0).max(0.0)
}

/// Days elapsed since `then`, clamped at zero.
pub fn days_since(then: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    hours_since(then, now) / 24.0
}

/// Exponential time decay: e^(-lambda * age_hours), in (0, 1].
pub fn exponential_decay(age_hours: f64, lambda: f64) -> f64 {
    (-lambda * age_hours).exp()
}
