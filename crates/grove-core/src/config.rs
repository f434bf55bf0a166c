//! Configuration loading and typed config structures for the Grove engine.
//!
//! The canonical configuration lives in `grove-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads and validates the file.
//! Every field has a default, so an empty file yields the built-in values.

use std::collections::BTreeSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use grove_garden::GardenConfig;
use grove_progression::PointsConfig;
use grove_types::{FertilizerEffect, PlantType};

/// Environment variable that overrides `logging.level`.
pub const LOG_LEVEL_ENV: &str = "GROVE_LOG_LEVEL";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is outside its allowed range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
///
/// Mirrors the structure of `grove-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Points and level parameters.
    #[serde(default)]
    pub points: PointsSection,

    /// Plant growth, harvest, and catalog parameters.
    #[serde(default)]
    pub garden: GardenSection,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl EngineConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// `GROVE_LOG_LEVEL` overrides `logging.level` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value fails validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.apply_log_level_override(std::env::var(LOG_LEVEL_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// No environment overrides are applied.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace `logging.level` with `level` when it is set and non-empty.
    pub fn apply_log_level_override(&mut self, level: Option<String>) {
        if let Some(level) = level.filter(|l| !l.trim().is_empty()) {
            self.logging.level = level;
        }
    }

    /// Check every value against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.points.validate()?;
        self.garden.validate()?;
        if self.logging.level.trim().is_empty() {
            return Err(invalid("logging.level", "must not be empty"));
        }
        Ok(())
    }

    /// The scoring parameters for `grove-progression`.
    pub const fn points_config(&self) -> PointsConfig {
        PointsConfig {
            base_per_difficulty: self.points.base_per_difficulty,
            rating_bonus_per_star: self.points.rating_bonus_per_star,
            base_level_points: self.points.base_level_points,
            max_rating: self.points.max_rating,
            max_activity_days: self.points.max_activity_days,
        }
    }

    /// The growth parameters and catalogs for `grove-garden`.
    pub fn garden_config(&self) -> GardenConfig {
        let garden = &self.garden;
        GardenConfig {
            xp_per_completion: garden.xp_per_completion,
            level_reward_factor: garden.level_reward_factor,
            per_task_reward_factor: garden.per_task_reward_factor,
            wither_after_days: garden.wither_after_days,
            plant_types: garden
                .plant_types
                .iter()
                .map(|t| (t.id.clone(), t.clone()))
                .collect(),
            fertilizers: garden
                .fertilizers
                .iter()
                .map(|f| (f.id.clone(), f.clone()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Points
// ---------------------------------------------------------------------------

/// Points and level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PointsSection {
    /// Points per unit of task difficulty.
    #[serde(default = "default_base_per_difficulty")]
    pub base_per_difficulty: u64,

    /// Points per rating star.
    #[serde(default = "default_rating_bonus_per_star")]
    pub rating_bonus_per_star: u64,

    /// Points needed per level.
    #[serde(default = "default_base_level_points")]
    pub base_level_points: u64,

    /// Highest accepted rating.
    #[serde(default = "default_max_rating")]
    pub max_rating: u32,

    /// Longest activity range one aggregation may cover, in days.
    #[serde(default = "default_max_activity_days")]
    pub max_activity_days: u32,
}

impl PointsSection {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_per_difficulty == 0 {
            return Err(invalid("points.base_per_difficulty", "must be positive"));
        }
        if self.base_level_points == 0 {
            return Err(invalid("points.base_level_points", "must be positive"));
        }
        if self.max_rating == 0 {
            return Err(invalid("points.max_rating", "must be positive"));
        }
        if self.max_activity_days == 0 {
            return Err(invalid("points.max_activity_days", "must be positive"));
        }
        Ok(())
    }
}

impl Default for PointsSection {
    fn default() -> Self {
        Self {
            base_per_difficulty: default_base_per_difficulty(),
            rating_bonus_per_star: default_rating_bonus_per_star(),
            base_level_points: default_base_level_points(),
            max_rating: default_max_rating(),
            max_activity_days: default_max_activity_days(),
        }
    }
}

const fn default_base_per_difficulty() -> u64 {
    50
}

const fn default_rating_bonus_per_star() -> u64 {
    10
}

const fn default_base_level_points() -> u64 {
    200
}

const fn default_max_rating() -> u32 {
    5
}

const fn default_max_activity_days() -> u32 {
    366
}

// ---------------------------------------------------------------------------
// Garden
// ---------------------------------------------------------------------------

/// Plant growth and harvest configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GardenSection {
    /// XP added to a plant per completion, before fertilizer.
    #[serde(default = "default_xp_per_completion")]
    pub xp_per_completion: u64,

    /// Harvest points per plant level.
    #[serde(default = "default_level_reward_factor")]
    pub level_reward_factor: Decimal,

    /// Harvest points per completed task.
    #[serde(default = "default_per_task_reward_factor")]
    pub per_task_reward_factor: Decimal,

    /// Days without a completion before a plant withers; absent disables it.
    #[serde(default)]
    pub wither_after_days: Option<u32>,

    /// Plant species catalog.
    #[serde(default = "grove_garden::config::default_plant_types")]
    pub plant_types: Vec<PlantType>,

    /// Fertilizer catalog.
    #[serde(default = "grove_garden::config::default_fertilizers")]
    pub fertilizers: Vec<FertilizerEffect>,
}

impl GardenSection {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.xp_per_completion == 0 {
            return Err(invalid("garden.xp_per_completion", "must be positive"));
        }
        if self.level_reward_factor.is_sign_negative() {
            return Err(invalid("garden.level_reward_factor", "must not be negative"));
        }
        if self.per_task_reward_factor.is_sign_negative() {
            return Err(invalid(
                "garden.per_task_reward_factor",
                "must not be negative",
            ));
        }
        if self.wither_after_days == Some(0) {
            return Err(invalid(
                "garden.wither_after_days",
                "must be at least 1 day when set",
            ));
        }

        let mut seen = BTreeSet::new();
        for plant_type in &self.plant_types {
            let field = format!("garden.plant_types.{}", plant_type.id);
            if !seen.insert(plant_type.id.as_str()) {
                return Err(invalid(&field, "duplicate id"));
            }
            if plant_type.xp_per_level == 0 {
                return Err(invalid(&field, "xp_per_level must be positive"));
            }
            if plant_type.max_level == 0 {
                return Err(invalid(&field, "max_level must be positive"));
            }
        }

        let mut seen = BTreeSet::new();
        for fertilizer in &self.fertilizers {
            let field = format!("garden.fertilizers.{}", fertilizer.id);
            if !seen.insert(fertilizer.id.as_str()) {
                return Err(invalid(&field, "duplicate id"));
            }
            if fertilizer.growth_multiplier <= Decimal::ONE {
                return Err(invalid(&field, "growth_multiplier must be greater than 1"));
            }
            if fertilizer
                .harvest_multiplier
                .is_some_and(|m| m < Decimal::ONE)
            {
                return Err(invalid(&field, "harvest_multiplier must be at least 1"));
            }
        }
        Ok(())
    }
}

impl Default for GardenSection {
    fn default() -> Self {
        Self {
            xp_per_completion: default_xp_per_completion(),
            level_reward_factor: default_level_reward_factor(),
            per_task_reward_factor: default_per_task_reward_factor(),
            wither_after_days: None,
            plant_types: grove_garden::config::default_plant_types(),
            fertilizers: grove_garden::config::default_fertilizers(),
        }
    }
}

const fn default_xp_per_completion() -> u64 {
    10
}

const fn default_level_reward_factor() -> Decimal {
    Decimal::from_parts(20, 0, 0, false, 0)
}

const fn default_per_task_reward_factor() -> Decimal {
    Decimal::from_parts(5, 0, 0, false, 0)
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSection {
    /// Log level or `tracing` filter directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    String::from("info")
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_owned(),
        reason: reason.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
