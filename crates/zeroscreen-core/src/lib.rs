//! # ZeroScreen Core Library
//!
//! This library provides the core logic for ZeroScreen, a screen-time game:
//! set a daily goal, log actual screen time at the end of the day, and earn
//! points that build toward levels. The CLI binary is a thin layer over the
//! same library, and any other front-end is expected to be as well.
//!
//! ## Architecture
//!
//! - **Score**: pure functions turning (goal, logged time) into a point delta
//!   and a point total into a level
//! - **Progress**: the persisted goal, points and onboarding flag, with
//!   change notification
//! - **Storage**: SQLite key-value state and TOML-based configuration
//! - **Onboarding** and **Share**: the first-run flow and the score card
//!
//! ## Key Components
//!
//! - [`ProgressState`]: source of truth for persisted progress
//! - [`compute_score_delta`], [`apply_score`], [`compute_level`]: scoring
//! - [`Database`]: SQLite-backed [`StateStore`]
//! - [`Config`]: application configuration management

pub mod duration;
pub mod error;
pub mod events;
pub mod onboarding;
pub mod progress;
pub mod score;
pub mod share;
pub mod storage;

pub use duration::{HoursMinutes, MAX_DURATION_SECONDS};
pub use error::{ConfigError, CoreError, DatabaseError, Result, ValidationError};
pub use events::Event;
pub use onboarding::{OnboardingFlow, OnboardingStep};
pub use progress::{LogOutcome, ProgressSnapshot, ProgressState, SubscriptionId};
pub use score::{apply_score, compute_level, compute_score_delta, Level, ScoreOutcome};
pub use share::ShareCard;
pub use storage::{Config, Database, MemoryStore, StateStore};
