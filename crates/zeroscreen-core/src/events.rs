use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::score::ScoreOutcome;

/// Every state change in [`ProgressState`](crate::ProgressState) produces an Event.
/// Presentation layers subscribe to them instead of polling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    GoalSet {
        previous_goal_seconds: u64,
        goal_seconds: u64,
        at: DateTime<Utc>,
    },
    TimeLogged {
        logged_seconds: u64,
        goal_seconds: u64,
        delta: i64,
        previous_points: i64,
        points: i64,
        outcome: ScoreOutcome,
        at: DateTime<Utc>,
    },
    OnboardingCompleted {
        at: DateTime<Utc>,
    },
    /// All three persisted fields were reset to their defaults.
    DataErased {
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::GoalSet { at, .. }
            | Event::TimeLogged { at, .. }
            | Event::OnboardingCompleted { at }
            | Event::DataErased { at } => *at,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Event::GoalSet { .. } => "goal_set",
            Event::TimeLogged { .. } => "time_logged",
            Event::OnboardingCompleted { .. } => "onboarding_completed",
            Event::DataErased { .. } => "data_erased",
        }
    }
}
