//! Points, levels, login streaks, and activity heatmaps for the Grove engine.
//!
//! This crate holds the user-level progression rules. Every operation takes
//! the current state plus one input and mutates or returns new state; none
//! perform I/O.
//!
//! # Modules
//!
//! - [`activity`] -- Per-day completion buckets and intensity tiers
//! - [`config`] -- Scoring parameters ([`PointsConfig`])
//! - [`error`] -- Error types for all progression operations ([`ProgressionError`])
//! - [`points`] -- Task scoring, level thresholds, level-up detection
//! - [`rewards`] -- Static streak-bonus and intensity tables
//! - [`streak`] -- Daily login streak tracking

pub mod activity;
pub mod config;
pub mod error;
pub mod points;
pub mod rewards;
pub mod streak;

// Re-export primary types at crate root for convenience.
pub use activity::{aggregate_activity, summarize};
pub use config::PointsConfig;
pub use error::ProgressionError;
pub use points::{
    award_task_completion, credit_points, level_for_points, level_of, level_progress,
    level_threshold, points_for_completion,
};
pub use rewards::{STREAK_BONUS_TIERS, StreakTier, intensity_tier, streak_bonus};
pub use streak::{active_streak, record_login};
