//! Plant Growth State Machine.
//!
//! # Lifecycle
//!
//! ```text
//! growing --(reach max level)--> mature --(harvest)--> harvested
//!    |                             |
//!    +-------(neglect)-------------+----------------> withered
//! ```
//!
//! # Growth
//!
//! Each completion logged against a plant adds
//! `floor(xp_per_completion * growth_multiplier)` XP, where the multiplier
//! is 1 without fertilizer. Advancing from level N to N+1 spends
//! `xp_per_level * N` XP; several levels can be gained at once. Once the
//! plant reaches the type's `max_level` it becomes mature. Further XP is
//! still accumulated but never advances the plant past the max level.
//!
//! # Harvest
//!
//! ```text
//! reward = floor((level * level_reward_factor
//!                 + tasks_completed * per_task_reward_factor) * harvest_multiplier)
//! ```
//!
//! A harvested or withered plant rejects every further operation.

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use grove_types::{
    GrowthOutcome, HarvestOutcome, Plant, PlantId, PlantStatus, PlantType, TaskCompletion, UserId,
};

use crate::config::GardenConfig;
use crate::error::GardenError;

/// Create a new plant at level 1 with no XP.
///
/// A type whose `max_level` is 1 produces a plant that is mature from the
/// start.
pub fn plant_seed(plant_type: &PlantType, owner_id: UserId, now: DateTime<Utc>) -> Plant {
    let status = if plant_type.max_level <= 1 {
        PlantStatus::Mature
    } else {
        PlantStatus::Growing
    };

    Plant {
        id: PlantId::new(),
        owner_id,
        type_id: plant_type.id.clone(),
        level: 1,
        xp: 0,
        status,
        tasks_completed: 0,
        fertilizer: None,
        planted_at: now,
        last_tended_at: now,
        harvested_at: None,
        withered_at: None,
    }
}

/// Reject any operation on a plant in a terminal state.
pub const fn ensure_not_terminal(plant: &Plant) -> Result<(), GardenError> {
    if plant.status.is_terminal() {
        return Err(GardenError::PlantUnavailable {
            plant_id: plant.id,
            status: plant.status,
        });
    }
    Ok(())
}

/// XP one completion adds to this plant, after any fertilizer.
pub fn xp_gain(cfg: &GardenConfig, plant: &Plant) -> Result<u64, GardenError> {
    let multiplier = plant
        .fertilizer
        .as_ref()
        .map_or(Decimal::ONE, |f| f.growth_multiplier);

    Decimal::from(cfg.xp_per_completion)
        .checked_mul(multiplier)
        .and_then(|xp| xp.floor().to_u64())
        .ok_or_else(|| overflow("fertilized XP gain"))
}

/// XP still required to reach the next level.
///
/// Returns `None` once the plant is at its type's max level.
pub fn xp_for_next_level(plant: &Plant, plant_type: &PlantType) -> Option<u64> {
    if plant.level >= plant_type.max_level {
        return None;
    }
    let required = plant_type.xp_per_level.checked_mul(u64::from(plant.level))?;
    Some(required.saturating_sub(plant.xp))
}

/// Apply one task completion to a plant.
///
/// # Errors
///
/// Returns [`GardenError::PlantUnavailable`] for a terminal plant,
/// [`GardenError::CompletionNotForPlant`] if the completion names a
/// different plant (or none), and [`GardenError::ArithmeticOverflow`] on
/// overflow. The plant is unchanged on error.
pub fn tend(
    cfg: &GardenConfig,
    plant_type: &PlantType,
    plant: &mut Plant,
    event: &TaskCompletion,
) -> Result<GrowthOutcome, GardenError> {
    ensure_not_terminal(plant)?;
    if event.plant_id != Some(plant.id) {
        return Err(GardenError::CompletionNotForPlant { plant_id: plant.id });
    }

    let xp_gained = xp_gain(cfg, plant)?;
    let mut xp = plant
        .xp
        .checked_add(xp_gained)
        .ok_or_else(|| overflow("plant XP"))?;
    let tasks_completed = plant
        .tasks_completed
        .checked_add(1)
        .ok_or_else(|| overflow("plant task counter"))?;

    let previous_level = plant.level;
    let mut level = plant.level;
    while level < plant_type.max_level {
        let required = plant_type
            .xp_per_level
            .checked_mul(u64::from(level))
            .ok_or_else(|| overflow("level requirement"))?;
        if xp < required {
            break;
        }
        xp = xp
            .checked_sub(required)
            .ok_or_else(|| overflow("level XP subtraction"))?;
        level = level
            .checked_add(1)
            .ok_or_else(|| overflow("plant level"))?;
    }

    let matured = plant.status == PlantStatus::Growing && level >= plant_type.max_level;

    plant.xp = xp;
    plant.level = level;
    plant.tasks_completed = tasks_completed;
    plant.last_tended_at = plant.last_tended_at.max(event.completed_at);
    if matured {
        plant.status = PlantStatus::Mature;
        tracing::info!(plant_id = %plant.id, level, "plant matured");
    }

    tracing::debug!(
        plant_id = %plant.id,
        xp_gained,
        previous_level,
        level,
        xp,
        "plant tended"
    );

    Ok(GrowthOutcome {
        plant_id: plant.id,
        xp_gained,
        previous_level,
        new_level: level,
        matured,
    })
}

/// Compute the harvest reward for a plant's current state.
pub fn harvest_reward(cfg: &GardenConfig, plant: &Plant) -> Result<u64, GardenError> {
    let multiplier = plant
        .fertilizer
        .as_ref()
        .and_then(|f| f.harvest_multiplier)
        .unwrap_or(Decimal::ONE);

    let level_part = Decimal::from(plant.level).checked_mul(cfg.level_reward_factor);
    let task_part = Decimal::from(plant.tasks_completed).checked_mul(cfg.per_task_reward_factor);

    level_part
        .zip(task_part)
        .and_then(|(l, t)| l.checked_add(t))
        .and_then(|base| base.checked_mul(multiplier))
        .and_then(|reward| reward.floor().to_u64())
        .ok_or_else(|| overflow("harvest reward"))
}

/// Harvest a mature plant.
///
/// The plant becomes `harvested` and `harvested_at` is stamped. The reward
/// is returned for the caller to credit.
///
/// # Errors
///
/// Returns [`GardenError::NotMature`] for a growing plant and
/// [`GardenError::PlantUnavailable`] for a terminal one.
pub fn harvest(
    cfg: &GardenConfig,
    plant_type: &PlantType,
    plant: &mut Plant,
    now: DateTime<Utc>,
) -> Result<HarvestOutcome, GardenError> {
    ensure_not_terminal(plant)?;
    if plant.status != PlantStatus::Mature {
        return Err(GardenError::NotMature {
            plant_id: plant.id,
            level: plant.level,
            max_level: plant_type.max_level,
        });
    }

    let reward = harvest_reward(cfg, plant)?;
    plant.status = PlantStatus::Harvested;
    plant.harvested_at = Some(now);

    tracing::info!(
        plant_id = %plant.id,
        owner_id = %plant.owner_id,
        level = plant.level,
        tasks_completed = plant.tasks_completed,
        reward,
        "plant harvested"
    );

    Ok(HarvestOutcome {
        plant_id: plant.id,
        reward,
        harvested_at: now,
    })
}

/// Whether a plant has gone untended long enough to wither.
///
/// Always `false` when withering is disabled or the plant is terminal.
pub fn is_neglected(cfg: &GardenConfig, plant: &Plant, now: DateTime<Utc>) -> bool {
    let Some(days) = cfg.wither_after_days else {
        return false;
    };
    if plant.status.is_terminal() {
        return false;
    }
    TimeDelta::try_days(i64::from(days))
        .is_some_and(|limit| now.signed_duration_since(plant.last_tended_at) >= limit)
}

/// Wither the plant if it is neglected. Returns whether it withered.
pub fn wither_if_neglected(cfg: &GardenConfig, plant: &mut Plant, now: DateTime<Utc>) -> bool {
    if !is_neglected(cfg, plant, now) {
        return false;
    }
    plant.status = PlantStatus::Withered;
    plant.withered_at = Some(now);
    tracing::info!(
        plant_id = %plant.id,
        last_tended_at = %plant.last_tended_at,
        "plant withered from neglect"
    );
    true
}

fn overflow(context: &str) -> GardenError {
    GardenError::ArithmeticOverflow {
        context: format!("{context} overflow"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
