//! Fertilizer purchase and application.
//!
//! A plant holds at most one fertilizer for its whole life. Buying one
//! debits the owner's spendable balance by exactly the fertilizer's cost.
//! Lifetime points (and therefore the user's level) are untouched.

use chrono::{DateTime, Utc};

use grove_types::{AppliedFertilizer, FertilizerEffect, Plant, UserProgress};

use crate::error::GardenError;
use crate::plant::ensure_not_terminal;

/// Check every precondition for applying `fertilizer` without mutating.
///
/// Checks run in a fixed order: ownership, terminal state, existing
/// fertilizer, then balance.
pub fn check_fertilizer(
    plant: &Plant,
    fertilizer: &FertilizerEffect,
    user: &UserProgress,
) -> Result<(), GardenError> {
    if plant.owner_id != user.user_id {
        return Err(GardenError::NotPlantOwner {
            plant_id: plant.id,
            user_id: user.user_id,
        });
    }
    ensure_not_terminal(plant)?;
    if let Some(existing) = &plant.fertilizer {
        return Err(GardenError::AlreadyFertilized {
            plant_id: plant.id,
            fertilizer_id: existing.fertilizer_id.clone(),
        });
    }
    if user.balance < fertilizer.cost {
        return Err(GardenError::InsufficientPoints {
            required: fertilizer.cost,
            available: user.balance,
        });
    }
    Ok(())
}

/// Purchase `fertilizer` and apply it to `plant`.
///
/// The multipliers are copied onto the plant, so later catalog edits do not
/// change a fertilizer that is already in the ground. On error neither the
/// plant nor the user is modified.
pub fn apply_fertilizer(
    plant: &mut Plant,
    fertilizer: &FertilizerEffect,
    user: &mut UserProgress,
    now: DateTime<Utc>,
) -> Result<AppliedFertilizer, GardenError> {
    check_fertilizer(plant, fertilizer, user)?;

    let balance = user
        .balance
        .checked_sub(fertilizer.cost)
        .ok_or(GardenError::InsufficientPoints {
            required: fertilizer.cost,
            available: user.balance,
        })?;

    let applied = AppliedFertilizer {
        fertilizer_id: fertilizer.id.clone(),
        growth_multiplier: fertilizer.growth_multiplier,
        harvest_multiplier: fertilizer.harvest_multiplier,
        applied_at: now,
    };

    user.balance = balance;
    plant.fertilizer = Some(applied.clone());

    tracing::info!(
        plant_id = %plant.id,
        user_id = %user.user_id,
        fertilizer = %fertilizer.id,
        cost = fertilizer.cost,
        balance,
        "fertilizer applied"
    );

    Ok(applied)
}
