//! ATS scoring: pure, deterministic resume-vs-target matching.
//!
//! Every scorer accumulates earned (`matched`) and available (`total`) weight
//! into a [`Tally`] and normalizes it to a 0–100 percentage at the end.
//! Nothing in here touches storage; callers persist the score.

pub mod applicant;
pub mod opportunity;
pub mod recommend;
pub mod rubric;
pub mod text;

use chrono::{DateTime, Utc};

const MILLIS_PER_YEAR: f64 = 1000.0 * 60.0 * 60.0 * 24.0 * 365.0;

/// Normalized score plus the raw weights it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResult {
    pub score: u32,
    pub matched: u64,
    pub total: u64,
}

/// Running matched/total accumulator shared by the weighted scorers.
///
/// Weights are `u32` but sums are kept in `u64` so rubric-supplied weights
/// cannot overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub matched: u64,
    pub total: u64,
}

impl Tally {
    /// All-or-nothing criterion.
    pub fn check(&mut self, weight: u32, hit: bool) {
        self.total = self.total.saturating_add(weight.into());
        if hit {
            self.matched = self.matched.saturating_add(weight.into());
        }
    }

    /// Criterion with partial credit. `earned` is capped at `weight`.
    pub fn credit(&mut self, weight: u32, earned: u32) {
        self.total = self.total.saturating_add(weight.into());
        self.matched = self.matched.saturating_add(earned.min(weight).into());
    }

    /// Substitutes the `(fallback_matched / 10)` baseline when nothing was
    /// available to score, then normalizes.
    pub fn finish(self, fallback_matched: u32) -> ScoreResult {
        let (matched, total) = if self.total == 0 {
            (u64::from(fallback_matched), 10)
        } else {
            (self.matched, self.total)
        };
        ScoreResult {
            score: percentage(matched, total),
            matched,
            total,
        }
    }
}

/// `round(100 * matched / total)`, half away from zero, never above 100.
pub fn percentage(matched: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    ((matched as f64 / total as f64) * 100.0).round().min(100.0) as u32
}

/// Rubric weights of zero or none fall back to the criterion's default.
pub fn weight_or(weight: Option<u32>, default: u32) -> u32 {
    match weight {
        Some(w) if w > 0 => w,
        _ => default,
    }
}

/// Span in 365-day years. Negative spans clamp to zero.
pub fn years_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let millis = (end - start).num_milliseconds() as f64;
    (millis / MILLIS_PER_YEAR).max(0.0)
}
