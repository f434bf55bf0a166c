//! The [`GrowthEngine`] facade.
//!
//! Composes the progression, garden, and ledger crates into the operation
//! groups the application calls: task completion, daily login, fertilizer,
//! plant growth and harvest, and the activity heatmap.
//!
//! The engine owns the plant registry and the points ledger. User progress
//! records are owned by the caller and passed in by `&mut`, so concurrent
//! mutation of one user or one plant is ruled out by the borrow checker.
//!
//! Every operation is atomic: on error, neither the user, the plant, nor the
//! ledger is modified. Composite operations work on a copy of the user
//! record and commit it only once every step has succeeded.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use grove_garden::{Garden, GardenConfig};
use grove_ledger::PointsLedger;
use grove_ledger::reconciliation::{ReconciliationResult, reconcile};
use grove_progression::PointsConfig;
use grove_types::{
    ActivityBucket, AppliedFertilizer, DateRange, FertilizerId, GrowthOutcome, HarvestOutcome,
    LevelProgress, LoginOutcome, Plant, PlantId, PlantTypeId, PointsAward, PointsEntry,
    TaskCompletion, UserProgress,
};

use crate::config::EngineConfig;
use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Operation results
// ---------------------------------------------------------------------------

/// Result of a daily login: the streak update and the credited bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoginReward {
    /// Streak transition and bonus tier.
    pub login: LoginOutcome,
    /// The bonus credit, with any level-up it caused.
    pub award: PointsAward,
}

/// Result of a task completion applied to the user and, if set, its plant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskReward {
    /// Points credited for the completion.
    pub award: PointsAward,
    /// Plant growth, when the completion was logged against a plant.
    pub growth: Option<GrowthOutcome>,
}

/// Result of harvesting a plant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HarvestReward {
    /// The harvested plant and its reward.
    pub harvest: HarvestOutcome,
    /// The reward credit, with any level-up it caused.
    pub award: PointsAward,
}

// ---------------------------------------------------------------------------
// GrowthEngine
// ---------------------------------------------------------------------------

/// Progression and growth engine.
#[derive(Debug, Clone)]
pub struct GrowthEngine {
    points: PointsConfig,
    garden_config: GardenConfig,
    garden: Garden,
    ledger: PointsLedger,
}

impl GrowthEngine {
    /// Create an engine with an empty garden and ledger.
    pub const fn new(points: PointsConfig, garden_config: GardenConfig) -> Self {
        Self::with_state(points, garden_config, Garden::new(), PointsLedger::new())
    }

    /// Create an engine from a validated [`EngineConfig`].
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.points_config(), config.garden_config())
    }

    /// Create an engine over previously persisted plants and ledger entries.
    pub const fn with_state(
        points: PointsConfig,
        garden_config: GardenConfig,
        garden: Garden,
        ledger: PointsLedger,
    ) -> Self {
        Self {
            points,
            garden_config,
            garden,
            ledger,
        }
    }

    /// Scoring parameters in use.
    pub const fn points_config(&self) -> &PointsConfig {
        &self.points
    }

    /// Garden parameters and catalogs in use.
    pub const fn garden_config(&self) -> &GardenConfig {
        &self.garden_config
    }

    /// The plant registry.
    pub const fn garden(&self) -> &Garden {
        &self.garden
    }

    /// The points ledger.
    pub const fn ledger(&self) -> &PointsLedger {
        &self.ledger
    }

    /// Consume the engine and hand its garden and ledger to the integrator.
    pub fn into_parts(self) -> (Garden, PointsLedger) {
        (self.garden, self.ledger)
    }

    /// Remove and return every ledger entry recorded so far.
    pub fn take_ledger_entries(&mut self) -> Vec<PointsEntry> {
        self.ledger.take_entries()
    }

    // -----------------------------------------------------------------------
    // Points and levels
    // -----------------------------------------------------------------------

    /// Score a completion and credit it to the user.
    ///
    /// Only the user's points change; use [`Self::complete_task`] to also
    /// grow the plant the completion was logged against.
    pub fn award_task_completion(
        &mut self,
        user: &mut UserProgress,
        event: &TaskCompletion,
    ) -> Result<PointsAward, EngineError> {
        let award = grove_progression::award_task_completion(&self.points, user, event)?;
        self.record_task_reward(user, event, award.points_awarded)?;
        Ok(award)
    }

    /// Level and position within it for the user's lifetime points.
    pub fn level_progress(&self, user: &UserProgress) -> LevelProgress {
        grove_progression::level_progress(&self.points, user.total_points)
    }

    /// Check the user's totals against the ledger.
    pub fn reconcile(&self, user: &UserProgress) -> ReconciliationResult {
        reconcile(user, self.ledger.entries())
    }

    // -----------------------------------------------------------------------
    // Login streak
    // -----------------------------------------------------------------------

    /// Register today's login and credit the streak bonus.
    ///
    /// A second call for the same day returns
    /// [`ProgressionError::AlreadyClaimedToday`](grove_progression::ProgressionError::AlreadyClaimedToday)
    /// and changes nothing.
    pub fn record_login(
        &mut self,
        user: &mut UserProgress,
        today: NaiveDate,
    ) -> Result<LoginReward, EngineError> {
        let mut next = user.clone();
        let login = grove_progression::record_login(&mut next, today)?;
        let award = grove_progression::credit_points(&self.points, &mut next, login.bonus_points)?;

        *user = next;
        if login.bonus_points > 0 {
            let at = today.and_time(NaiveTime::MIN).and_utc();
            self.ledger
                .record_login_bonus(user.user_id, login.bonus_points, at)?;
        }
        Ok(LoginReward { login, award })
    }

    // -----------------------------------------------------------------------
    // Garden
    // -----------------------------------------------------------------------

    /// Plant a new seed for the user.
    pub fn plant_seed(
        &mut self,
        user: &UserProgress,
        type_id: &PlantTypeId,
        now: DateTime<Utc>,
    ) -> Result<&Plant, EngineError> {
        Ok(self
            .garden
            .plant_seed(&self.garden_config, user.user_id, type_id, now)?)
    }

    /// Buy a fertilizer and apply it to one of the user's plants.
    ///
    /// Rejections are distinct [`GardenError`](grove_garden::GardenError)
    /// variants: `PlantUnavailable`, `AlreadyFertilized`, and
    /// `InsufficientPoints`.
    pub fn apply_fertilizer(
        &mut self,
        user: &mut UserProgress,
        plant_id: PlantId,
        fertilizer_id: &FertilizerId,
        now: DateTime<Utc>,
    ) -> Result<AppliedFertilizer, EngineError> {
        let cost = self.garden_config.fertilizer(fertilizer_id)?.cost;
        let applied =
            self.garden
                .apply_fertilizer(&self.garden_config, plant_id, fertilizer_id, user, now)?;
        if cost > 0 {
            self.ledger
                .record_fertilizer_purchase(user.user_id, cost, plant_id, now)?;
        }
        Ok(applied)
    }

    /// Grow a plant by one completion without touching the user's points.
    ///
    /// The completion must be valid (difficulty and rating) and logged
    /// against `plant_id`.
    pub fn complete_task_on_plant(
        &mut self,
        plant_id: PlantId,
        event: &TaskCompletion,
    ) -> Result<GrowthOutcome, EngineError> {
        grove_progression::points_for_completion(&self.points, event)?;
        Ok(self.garden.tend(&self.garden_config, plant_id, event)?)
    }

    /// Apply a completion to both the user's points and, when the event
    /// names one, the user's plant.
    ///
    /// Both sides are validated before either is changed.
    pub fn complete_task(
        &mut self,
        user: &mut UserProgress,
        event: &TaskCompletion,
    ) -> Result<TaskReward, EngineError> {
        if let Some(plant_id) = event.plant_id {
            self.check_plant_owner(user, plant_id)?;
            self.garden.check_tend(plant_id, event)?;
        }

        let mut next = user.clone();
        let award = grove_progression::award_task_completion(&self.points, &mut next, event)?;
        let growth = match event.plant_id {
            Some(plant_id) => Some(self.garden.tend(&self.garden_config, plant_id, event)?),
            None => None,
        };

        *user = next;
        self.record_task_reward(user, event, award.points_awarded)?;
        Ok(TaskReward { award, growth })
    }

    /// Harvest one of the user's mature plants and credit the reward.
    pub fn harvest_plant(
        &mut self,
        user: &mut UserProgress,
        plant_id: PlantId,
        now: DateTime<Utc>,
    ) -> Result<HarvestReward, EngineError> {
        let plant = self.check_plant_owner(user, plant_id)?;
        let reward = grove_garden::plant::harvest_reward(&self.garden_config, plant)?;

        let mut next = user.clone();
        let award = grove_progression::credit_points(&self.points, &mut next, reward)?;
        let harvest = self
            .garden
            .harvest(&self.garden_config, plant_id, user.user_id, now)?;

        *user = next;
        if harvest.reward > 0 {
            self.ledger
                .record_harvest_reward(user.user_id, harvest.reward, plant_id, now)?;
        }
        Ok(HarvestReward { harvest, award })
    }

    /// Wither every plant that has gone untended too long.
    pub fn wither_neglected(&mut self, now: DateTime<Utc>) -> Vec<PlantId> {
        self.garden.wither_neglected(&self.garden_config, now)
    }

    /// Remove one of the user's harvested or withered plants.
    pub fn remove_plant(
        &mut self,
        user: &UserProgress,
        plant_id: PlantId,
    ) -> Result<Plant, EngineError> {
        self.check_plant_owner(user, plant_id)?;
        let plant = self.garden.remove(plant_id)?;
        tracing::debug!(plant_id = %plant_id, status = %plant.status, "plant removed");
        Ok(plant)
    }

    /// Remove every harvested or withered plant from the garden.
    pub fn drain_terminal_plants(&mut self) -> Vec<Plant> {
        self.garden.drain_terminal()
    }

    // -----------------------------------------------------------------------
    // Activity
    // -----------------------------------------------------------------------

    /// One heatmap bucket per day in `range`, scored with the engine's
    /// points parameters.
    pub fn aggregate_activity(
        &self,
        events: &[TaskCompletion],
        range: DateRange,
    ) -> Result<Vec<ActivityBucket>, EngineError> {
        Ok(grove_progression::aggregate_activity(
            &self.points,
            events,
            range,
        )?)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn check_plant_owner(
        &self,
        user: &UserProgress,
        plant_id: PlantId,
    ) -> Result<&Plant, EngineError> {
        let plant = self.garden.get(plant_id)?;
        if plant.owner_id != user.user_id {
            return Err(grove_garden::GardenError::NotPlantOwner {
                plant_id,
                user_id: user.user_id,
            }
            .into());
        }
        Ok(plant)
    }

    fn record_task_reward(
        &mut self,
        user: &UserProgress,
        event: &TaskCompletion,
        amount: u64,
    ) -> Result<(), EngineError> {
        if amount > 0 {
            self.ledger
                .record_task_reward(user.user_id, amount, event.task_id, event.completed_at)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
