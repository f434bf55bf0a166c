//! Core entity and result structs for the Grove engine.
//!
//! Entities (`UserProgress`, `Plant`, `PointsEntry`) are the state the
//! integrator persists. Result structs (`PointsAward`, `LoginOutcome`, ...)
//! are what each engine operation hands back to the presentation layer.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::enums::{IntensityTier, PlantStatus, PointsSource};
use crate::ids::{FertilizerId, PlantId, PlantTypeId, PointsEntryId, TaskId, UserId};

// ---------------------------------------------------------------------------
// User progression
// ---------------------------------------------------------------------------

/// Per-user progression record.
///
/// The level is never stored: it is always derived from `total_points`, so a
/// stored level can never disagree with the points it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UserProgress {
    /// The user this record belongs to.
    pub user_id: UserId,
    /// Lifetime points earned. Never decreases; drives the level.
    pub total_points: u64,
    /// Spendable points (earned minus spent on fertilizer).
    pub balance: u64,
    /// Current consecutive-day login streak.
    pub current_streak: u32,
    /// Longest streak ever reached.
    pub longest_streak: u32,
    /// Calendar date of the most recent login, if any.
    pub last_login: Option<NaiveDate>,
    /// Number of distinct days the user has logged in.
    pub total_logins: u64,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl UserProgress {
    /// Create a fresh record: zero points, no streak, level 1.
    pub const fn new(user_id: UserId, created_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            total_points: 0,
            balance: 0,
            current_streak: 0,
            longest_streak: 0,
            last_login: None,
            total_logins: 0,
            created_at,
        }
    }
}

/// A completed task. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TaskCompletion {
    /// The task that was completed.
    pub task_id: TaskId,
    /// Difficulty of the task (1 or more, no upper bound).
    pub difficulty: u32,
    /// Optional post-completion rating (1--5 by default).
    pub rating: Option<u32>,
    /// When the task was completed.
    pub completed_at: DateTime<Utc>,
    /// Plant the completion was logged against, if any.
    pub plant_id: Option<PlantId>,
}

/// Signal that a points award moved the user up one or more levels.
///
/// A multi-level jump produces a single signal carrying the final level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LevelUp {
    /// Level before the award.
    pub previous_level: u32,
    /// Level after the award.
    pub new_level: u32,
}

/// Result of crediting points to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PointsAward {
    /// Points added by this award.
    pub points_awarded: u64,
    /// Lifetime total after the award.
    pub new_total: u64,
    /// Present when the award crossed at least one level threshold.
    pub level_up: Option<LevelUp>,
}

/// Where a point total sits within its level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LevelProgress {
    /// Level derived from the total.
    pub level: u32,
    /// Points earned since reaching `level`.
    pub points_into_level: u64,
    /// Points still needed to reach `level + 1`.
    pub points_to_next_level: u64,
}

/// Result of a successful daily login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LoginOutcome {
    /// Streak length after this login.
    pub streak: u32,
    /// Streak length before this login.
    pub previous_streak: u32,
    /// Bonus points for today's streak tier. Not yet credited.
    pub bonus_points: u64,
}

// ---------------------------------------------------------------------------
// Garden
// ---------------------------------------------------------------------------

/// A plant species in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlantType {
    /// Catalog key.
    pub id: PlantTypeId,
    /// Display name.
    pub name: String,
    /// XP needed per level; level N needs `xp_per_level * N`.
    pub xp_per_level: u64,
    /// Level at which the plant becomes mature.
    pub max_level: u32,
}

/// A purchasable fertilizer in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FertilizerEffect {
    /// Catalog key.
    pub id: FertilizerId,
    /// Display name.
    pub name: String,
    /// XP growth-rate multiplier. Always greater than one.
    #[ts(as = "String")]
    pub growth_multiplier: Decimal,
    /// Optional harvest-reward multiplier.
    #[ts(as = "Option<String>")]
    pub harvest_multiplier: Option<Decimal>,
    /// Price in spendable points.
    pub cost: u64,
}

/// Fertilizer applied to a specific plant.
///
/// The multipliers are copied from the catalog at application time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AppliedFertilizer {
    /// Catalog key of the fertilizer.
    pub fertilizer_id: FertilizerId,
    /// XP growth-rate multiplier in effect.
    #[ts(as = "String")]
    pub growth_multiplier: Decimal,
    /// Harvest-reward multiplier in effect, if the fertilizer has one.
    #[ts(as = "Option<String>")]
    pub harvest_multiplier: Option<Decimal>,
    /// When the fertilizer was applied.
    pub applied_at: DateTime<Utc>,
}

/// A per-goal plant that grows with task completions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Plant {
    /// Unique plant identifier.
    pub id: PlantId,
    /// The user who owns the plant.
    pub owner_id: UserId,
    /// Species of the plant.
    pub type_id: PlantTypeId,
    /// Current level, starting at 1 and capped at the type's max level.
    pub level: u32,
    /// XP accumulated toward the next level (kept past the max level).
    pub xp: u64,
    /// Lifecycle status.
    pub status: PlantStatus,
    /// Number of task completions logged against the plant.
    pub tasks_completed: u32,
    /// Active fertilizer, at most one.
    pub fertilizer: Option<AppliedFertilizer>,
    /// When the plant was planted.
    pub planted_at: DateTime<Utc>,
    /// Last completion (or planting) time; the neglect clock.
    pub last_tended_at: DateTime<Utc>,
    /// When the plant was harvested.
    pub harvested_at: Option<DateTime<Utc>>,
    /// When the plant withered.
    pub withered_at: Option<DateTime<Utc>>,
}

impl Plant {
    /// Whether the plant currently has a fertilizer applied.
    pub const fn has_fertilizer(&self) -> bool {
        self.fertilizer.is_some()
    }
}

/// Result of logging one task completion against a plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GrowthOutcome {
    /// The plant that grew.
    pub plant_id: PlantId,
    /// XP added, after the fertilizer multiplier.
    pub xp_gained: u64,
    /// Level before the completion.
    pub previous_level: u32,
    /// Level after the completion.
    pub new_level: u32,
    /// Whether this completion moved the plant from growing to mature.
    pub matured: bool,
}

/// Result of harvesting a mature plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HarvestOutcome {
    /// The harvested plant.
    pub plant_id: PlantId,
    /// Points to credit to the owner.
    pub reward: u64,
    /// When the harvest happened.
    pub harvested_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Points ledger
// ---------------------------------------------------------------------------

/// One movement of points for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PointsEntry {
    /// Unique entry identifier.
    pub id: PointsEntryId,
    /// User whose points moved.
    pub user_id: UserId,
    /// What produced the movement; also decides credit versus debit.
    pub source: PointsSource,
    /// Number of points moved. Always positive.
    pub amount: u64,
    /// Related entity (task, plant), if any.
    pub reference_id: Option<Uuid>,
    /// When the movement was recorded.
    pub recorded_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Activity
// ---------------------------------------------------------------------------

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DateRange {
    /// First day in the range.
    pub start: NaiveDate,
    /// Last day in the range (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range from `start` to `end`, both inclusive.
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether `date` falls inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Completions and points attributed to one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ActivityBucket {
    /// The day.
    pub date: NaiveDate,
    /// Completions that day.
    pub count: u32,
    /// Points earned from completions that day.
    pub points: u64,
    /// Heatmap tier of `points`.
    pub tier: IntensityTier,
}

/// Totals over a run of activity buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ActivitySummary {
    /// Completions across all buckets.
    pub total_completions: u64,
    /// Points across all buckets.
    pub total_points: u64,
    /// Days with at least one completion.
    pub active_days: u32,
    /// Longest run of consecutive active days.
    pub longest_active_run: u32,
}
