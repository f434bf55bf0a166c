//! Enumeration types for the Grove engine.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Plant lifecycle
// ---------------------------------------------------------------------------

/// Lifecycle status of a plant.
///
/// Transitions are one-directional:
///
/// ```text
/// growing --> mature --> harvested
///    |           |
///    +-----------+-----> withered
/// ```
///
/// `Harvested` and `Withered` are terminal: no field of a plant in either
/// state may change again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum PlantStatus {
    /// Accumulating XP below the type's maximum level.
    Growing,
    /// At maximum level and waiting for an explicit harvest.
    Mature,
    /// Harvested for a reward. Terminal.
    Harvested,
    /// Abandoned through neglect. Terminal.
    Withered,
}

impl PlantStatus {
    /// Whether the status is terminal (`Harvested` or `Withered`).
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Harvested | Self::Withered)
    }

    /// Return the lowercase name used in logs and messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Growing => "growing",
            Self::Mature => "mature",
            Self::Harvested => "harvested",
            Self::Withered => "withered",
        }
    }
}

impl core::fmt::Display for PlantStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Activity intensity
// ---------------------------------------------------------------------------

/// Discrete intensity bucket (0--4) classifying a day's activity for
/// heatmap display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum IntensityTier {
    /// Tier 0: no points that day.
    Idle,
    /// Tier 1: 1--50 points.
    Light,
    /// Tier 2: 51--100 points.
    Moderate,
    /// Tier 3: 101--200 points.
    Busy,
    /// Tier 4: more than 200 points.
    Intense,
}

impl IntensityTier {
    /// Return the numeric tier (0--4).
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Light => 1,
            Self::Moderate => 2,
            Self::Busy => 3,
            Self::Intense => 4,
        }
    }
}

// ---------------------------------------------------------------------------
// Points ledger
// ---------------------------------------------------------------------------

/// What produced a points ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum PointsSource {
    /// Points awarded for a completed task.
    TaskCompletion,
    /// Daily login streak bonus.
    LoginBonus,
    /// Reward paid out when a mature plant is harvested.
    HarvestReward,
    /// Points spent buying fertilizer for a plant.
    FertilizerPurchase,
}

impl PointsSource {
    /// Whether entries of this source remove points from the balance.
    ///
    /// Only fertilizer purchases are debits; every other source credits
    /// both the lifetime total and the spendable balance.
    pub const fn is_debit(self) -> bool {
        matches!(self, Self::FertilizerPurchase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        assert!(!PlantStatus::Growing.is_terminal());
        assert!(!PlantStatus::Mature.is_terminal());
        assert!(PlantStatus::Harvested.is_terminal());
        assert!(PlantStatus::Withered.is_terminal());
    }

    #[test]
    fn plant_status_serializes_lowercase() {
        let json = serde_json::to_string(&PlantStatus::Withered).ok();
        assert_eq!(json.as_deref(), Some("\"withered\""));
    }

    #[test]
    fn intensity_tiers_are_ordered() {
        assert!(IntensityTier::Idle < IntensityTier::Light);
        assert!(IntensityTier::Busy < IntensityTier::Intense);
        assert_eq!(IntensityTier::Intense.as_u8(), 4);
    }

    #[test]
    fn only_fertilizer_is_debit() {
        assert!(PointsSource::FertilizerPurchase.is_debit());
        assert!(!PointsSource::TaskCompletion.is_debit());
        assert!(!PointsSource::LoginBonus.is_debit());
        assert!(!PointsSource::HarvestReward.is_debit());
    }
}
