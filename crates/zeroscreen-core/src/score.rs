//! Scoring and level progression.
//!
//! ## Point delta
//!
//! ```text
//! delta = round((goal_seconds - logged_seconds + 2400) / 10)
//! ```
//!
//! Logging exactly 40 minutes over the goal scores zero; every 10 seconds
//! under that line is worth one point. Halves round away from zero.
//!
//! ## Applying a delta
//!
//! | Delta | New total |
//! |-------|-----------|
//! | > 0 | `points + delta` |
//! | = 0 | unchanged |
//! | < 0 | `0` (an over-budget day wipes all progress) |
//!
//! ## Levels
//!
//! Every 4000 points is one level. The fraction toward the next level is the
//! remainder over 4000.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Allowance added to the goal before scoring, in seconds (40 minutes).
pub const SCORE_OFFSET_SECONDS: i128 = 2400;

/// Seconds per point.
pub const SCORE_DIVISOR: i128 = 10;

pub const POINTS_PER_LEVEL: i64 = 4000;

/// Point change for one logging event.
///
/// Computed exactly in integer arithmetic, so any pair of `u64` inputs gives
/// a result that fits in an `i64`.
pub fn compute_score_delta(goal_seconds: u64, logged_seconds: u64) -> i64 {
    let numerator = i128::from(goal_seconds) - i128::from(logged_seconds) + SCORE_OFFSET_SECONDS;
    let half = SCORE_DIVISOR / 2;
    let rounded = if numerator >= 0 {
        (numerator + half) / SCORE_DIVISOR
    } else {
        -((-numerator + half) / SCORE_DIVISOR)
    };
    // |rounded| <= (u64::MAX + 2405) / 10, well inside i64.
    rounded as i64
}

/// New cumulative total after applying `delta` to `current_points`.
///
/// # Errors
/// Returns [`CoreError::ArithmeticOverflow`] if a positive delta would push
/// the total past `i64::MAX`.
pub fn apply_score(current_points: i64, delta: i64) -> Result<i64> {
    match ScoreOutcome::from_delta(delta) {
        ScoreOutcome::Increased => current_points
            .checked_add(delta)
            .ok_or(CoreError::ArithmeticOverflow {
                current: current_points,
                delta,
            }),
        ScoreOutcome::Unchanged => Ok(current_points),
        ScoreOutcome::Reset => Ok(0),
    }
}

/// What a logging event did to the point total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreOutcome {
    Increased,
    Unchanged,
    Reset,
}

impl ScoreOutcome {
    pub fn from_delta(delta: i64) -> Self {
        match delta {
            d if d > 0 => ScoreOutcome::Increased,
            0 => ScoreOutcome::Unchanged,
            _ => ScoreOutcome::Reset,
        }
    }

    /// Message shown once time has been logged.
    pub fn message(&self) -> &'static str {
        match self {
            ScoreOutcome::Increased => {
                "Thanks for logging, check your score! And don't use your phone for the rest of the day!"
            }
            ScoreOutcome::Unchanged => {
                "No changes to your score this time. Try setting a better goal tomorrow!"
            }
            ScoreOutcome::Reset => "Uh oh! Your screen time went over. Try better next time!",
        }
    }
}

/// Level and progress derived from a point total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub level: i64,
    /// Progress toward the next level, in `[0, 1)`.
    pub fraction: f64,
    pub points_into_level: i64,
    pub points_to_next_level: i64,
}

impl Level {
    /// Whole percent toward the next level, truncated.
    pub fn percent_to_next(&self) -> u8 {
        (self.points_into_level * 100 / POINTS_PER_LEVEL) as u8
    }

    pub fn next_level(&self) -> i64 {
        self.level.saturating_add(1)
    }

    /// `"5% To Level 2"`
    pub fn summary(&self) -> String {
        format!("{}% To Level {}", self.percent_to_next(), self.next_level())
    }
}

/// Level for a cumulative point total.
///
/// Uses Euclidean division so the fraction stays in `[0, 1)` even if a
/// negative total is ever passed in.
pub fn compute_level(points: i64) -> Level {
    let level = points.div_euclid(POINTS_PER_LEVEL);
    let into = points.rem_euclid(POINTS_PER_LEVEL);
    Level {
        level,
        fraction: into as f64 / POINTS_PER_LEVEL as f64,
        points_into_level: into,
        points_to_next_level: POINTS_PER_LEVEL - into,
    }
}
