//! Configuration loading and the engine facade for Grove.
//!
//! This crate ties the rule crates together:
//!
//! - [`config`] -- `grove-config.yaml` loading, validation, and conversion
//!   into the per-crate configs.
//! - [`engine`] -- [`GrowthEngine`], the single entry point the application
//!   calls for points, logins, plants, and activity.
//! - [`error`] -- [`EngineError`], wrapping every subsystem rejection.
//!
//! # Usage
//!
//! ```
//! use chrono::Utc;
//! use grove_core::{EngineConfig, GrowthEngine};
//! use grove_types::{TaskCompletion, TaskId, UserId, UserProgress};
//!
//! let config = EngineConfig::default();
//! let mut engine = GrowthEngine::from_config(&config);
//! let mut user = UserProgress::new(UserId::new(), Utc::now());
//!
//! let event = TaskCompletion {
//!     task_id: TaskId::new(),
//!     difficulty: 2,
//!     rating: Some(4),
//!     completed_at: Utc::now(),
//!     plant_id: None,
//! };
//! let reward = engine.complete_task(&mut user, &event).ok();
//! assert_eq!(reward.map(|r| r.award.points_awarded), Some(140));
//! ```

pub mod config;
pub mod engine;
pub mod error;

pub use config::{ConfigError, EngineConfig};
pub use engine::{GrowthEngine, HarvestReward, LoginReward, TaskReward};
pub use error::EngineError;
