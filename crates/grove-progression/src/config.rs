//! Tunable constants for points and levels.
//!
//! The [`PointsConfig`] struct bundles every scoring parameter so that the
//! same values drive task rewards, level thresholds, and the activity
//! heatmap. `grove-core` builds it from `grove-config.yaml`.

/// Scoring parameters for task completions and levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsConfig {
    /// Points per unit of task difficulty (default: 50).
    pub base_per_difficulty: u64,

    /// Points per rating star (default: 10).
    pub rating_bonus_per_star: u64,

    /// Points per level; level N starts at `base_level_points * (N - 1)`
    /// (default: 200).
    pub base_level_points: u64,

    /// Highest accepted rating (default: 5).
    pub max_rating: u32,

    /// Longest activity range, in days, that one aggregation may cover
    /// (default: 366).
    pub max_activity_days: u32,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            base_per_difficulty: 50,
            rating_bonus_per_star: 10,
            base_level_points: 200,
            max_rating: 5,
            max_activity_days: 366,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = PointsConfig::default();
        assert_eq!(cfg.base_per_difficulty, 50);
        assert_eq!(cfg.rating_bonus_per_star, 10);
        assert_eq!(cfg.base_level_points, 200);
        assert_eq!(cfg.max_rating, 5);
        assert_eq!(cfg.max_activity_days, 366);
    }
}
