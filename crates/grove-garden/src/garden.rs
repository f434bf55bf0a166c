//! Plant registry.
//!
//! [`Garden`] owns every plant keyed by [`PlantId`] and resolves plant types
//! and fertilizers from a [`GardenConfig`] catalog before delegating to the
//! rules in [`crate::plant`] and [`crate::fertilizer`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use grove_types::{
    AppliedFertilizer, FertilizerId, GrowthOutcome, HarvestOutcome, Plant, PlantId, PlantTypeId,
    TaskCompletion, UserId, UserProgress,
};

use crate::config::GardenConfig;
use crate::error::GardenError;
use crate::fertilizer;
use crate::plant;

/// Registry mapping plant IDs to plants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Garden {
    plants: BTreeMap<PlantId, Plant>,
}

impl Garden {
    /// Create an empty garden.
    pub const fn new() -> Self {
        Self {
            plants: BTreeMap::new(),
        }
    }

    /// Rebuild a garden from previously persisted plants.
    pub fn from_plants(plants: impl IntoIterator<Item = Plant>) -> Self {
        Self {
            plants: plants.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    /// Plant a new seed of `type_id` for `owner_id`.
    pub fn plant_seed(
        &mut self,
        cfg: &GardenConfig,
        owner_id: UserId,
        type_id: &PlantTypeId,
        now: DateTime<Utc>,
    ) -> Result<&Plant, GardenError> {
        let plant_type = cfg.plant_type(type_id)?;
        let plant = plant::plant_seed(plant_type, owner_id, now);
        tracing::debug!(
            plant_id = %plant.id,
            owner_id = %owner_id,
            plant_type = %type_id,
            "seed planted"
        );
        Ok(self.plants.entry(plant.id).or_insert(plant))
    }

    /// Look up a plant.
    pub fn get(&self, plant_id: PlantId) -> Result<&Plant, GardenError> {
        self.plants
            .get(&plant_id)
            .ok_or(GardenError::PlantNotFound(plant_id))
    }

    /// Look up a plant for mutation.
    pub fn get_mut(&mut self, plant_id: PlantId) -> Result<&mut Plant, GardenError> {
        self.plants
            .get_mut(&plant_id)
            .ok_or(GardenError::PlantNotFound(plant_id))
    }

    /// All plants owned by `owner_id`, in ID order.
    pub fn plants_of(&self, owner_id: UserId) -> impl Iterator<Item = &Plant> {
        self.plants.values().filter(move |p| p.owner_id == owner_id)
    }

    /// Every plant, in ID order.
    pub fn plants(&self) -> impl Iterator<Item = &Plant> {
        self.plants.values()
    }

    /// Number of plants, terminal ones included.
    pub fn len(&self) -> usize {
        self.plants.len()
    }

    /// Whether the garden has no plants.
    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    /// Number of plants that are still growing or mature.
    pub fn active_count(&self) -> usize {
        self.plants
            .values()
            .filter(|p| !p.status.is_terminal())
            .count()
    }

    /// Check that `event` could be applied to `plant_id` without applying it.
    pub fn check_tend(&self, plant_id: PlantId, event: &TaskCompletion) -> Result<(), GardenError> {
        let plant = self.get(plant_id)?;
        plant::ensure_not_terminal(plant)?;
        if event.plant_id != Some(plant_id) {
            return Err(GardenError::CompletionNotForPlant { plant_id });
        }
        Ok(())
    }

    /// Apply a task completion to the plant it was logged against.
    pub fn tend(
        &mut self,
        cfg: &GardenConfig,
        plant_id: PlantId,
        event: &TaskCompletion,
    ) -> Result<GrowthOutcome, GardenError> {
        let plant = self
            .plants
            .get_mut(&plant_id)
            .ok_or(GardenError::PlantNotFound(plant_id))?;
        let plant_type = cfg.plant_type(&plant.type_id)?;
        plant::tend(cfg, plant_type, plant, event)
    }

    /// Buy a fertilizer from the catalog and apply it to a plant.
    pub fn apply_fertilizer(
        &mut self,
        cfg: &GardenConfig,
        plant_id: PlantId,
        fertilizer_id: &FertilizerId,
        user: &mut UserProgress,
        now: DateTime<Utc>,
    ) -> Result<AppliedFertilizer, GardenError> {
        let effect = cfg.fertilizer(fertilizer_id)?;
        let plant = self
            .plants
            .get_mut(&plant_id)
            .ok_or(GardenError::PlantNotFound(plant_id))?;
        fertilizer::apply_fertilizer(plant, effect, user, now)
    }

    /// Harvest a mature plant owned by `owner_id`.
    pub fn harvest(
        &mut self,
        cfg: &GardenConfig,
        plant_id: PlantId,
        owner_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<HarvestOutcome, GardenError> {
        let plant = self
            .plants
            .get_mut(&plant_id)
            .ok_or(GardenError::PlantNotFound(plant_id))?;
        if plant.owner_id != owner_id {
            return Err(GardenError::NotPlantOwner {
                plant_id,
                user_id: owner_id,
            });
        }
        let plant_type = cfg.plant_type(&plant.type_id)?;
        plant::harvest(cfg, plant_type, plant, now)
    }

    /// Remove a harvested or withered plant and hand it back to the caller.
    ///
    /// Growing and mature plants stay in the garden.
    pub fn remove(&mut self, plant_id: PlantId) -> Result<Plant, GardenError> {
        let plant = self.get(plant_id)?;
        if !plant.status.is_terminal() {
            return Err(GardenError::PlantStillActive {
                plant_id,
                status: plant.status,
            });
        }
        self.plants
            .remove(&plant_id)
            .ok_or(GardenError::PlantNotFound(plant_id))
    }

    /// Remove every harvested or withered plant, in ID order.
    pub fn drain_terminal(&mut self) -> Vec<Plant> {
        let (terminal, active): (BTreeMap<_, _>, BTreeMap<_, _>) =
            std::mem::take(&mut self.plants)
                .into_iter()
                .partition(|(_, p)| p.status.is_terminal());
        self.plants = active;
        terminal.into_values().collect()
    }

    /// Consume the garden and return its plants, in ID order.
    pub fn into_plants(self) -> Vec<Plant> {
        self.plants.into_values().collect()
    }

    /// Wither every neglected plant. Returns the IDs that withered.
    pub fn wither_neglected(&mut self, cfg: &GardenConfig, now: DateTime<Utc>) -> Vec<PlantId> {
        self.plants
            .values_mut()
            .filter_map(|p| plant::wither_if_neglected(cfg, p, now).then_some(p.id))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use grove_types::{PlantStatus, TaskId};

    use super::*;

    fn sunflower() -> PlantTypeId {
        PlantTypeId::new("sunflower")
    }

    fn completion(plant_id: PlantId) -> TaskCompletion {
        TaskCompletion {
            task_id: TaskId::new(),
            difficulty: 2,
            rating: None,
            completed_at: Utc::now(),
            plant_id: Some(plant_id),
        }
    }

    fn seed(garden: &mut Garden, cfg: &GardenConfig, owner: UserId) -> PlantId {
        garden
            .plant_seed(cfg, owner, &sunflower(), Utc::now())
            .map(|p| p.id)
            .unwrap_or_default()
    }

    #[test]
    fn plant_and_lookup() {
        let cfg = GardenConfig::default();
        let mut garden = Garden::new();
        let owner = UserId::new();
        let id = seed(&mut garden, &cfg, owner);

        assert_eq!(garden.len(), 1);
        assert_eq!(garden.get(id).map(|p| p.owner_id).ok(), Some(owner));
        assert!(matches!(
            garden.get(PlantId::new()),
            Err(GardenError::PlantNotFound(_))
        ));
    }

    #[test]
    fn unknown_plant_type_rejected() {
        let cfg = GardenConfig::default();
        let mut garden = Garden::new();
        assert!(matches!(
            garden.plant_seed(&cfg, UserId::new(), &PlantTypeId::new("kudzu"), Utc::now()),
            Err(GardenError::UnknownPlantType(_))
        ));
        assert!(garden.is_empty());
    }

    #[test]
    fn plants_of_filters_by_owner() {
        let cfg = GardenConfig::default();
        let mut garden = Garden::new();
        let alice = UserId::new();
        let bob = UserId::new();
        seed(&mut garden, &cfg, alice);
        seed(&mut garden, &cfg, alice);
        seed(&mut garden, &cfg, bob);

        assert_eq!(garden.plants_of(alice).count(), 2);
        assert_eq!(garden.plants_of(bob).count(), 1);
    }

    #[test]
    fn grow_to_harvest() {
        let cfg = GardenConfig::default();
        let mut garden = Garden::new();
        let owner = UserId::new();
        let id = seed(&mut garden, &cfg, owner);

        for _ in 0..12 {
            assert!(garden.tend(&cfg, id, &completion(id)).is_ok());
        }
        assert_eq!(
            garden.get(id).map(|p| p.status).ok(),
            Some(PlantStatus::Mature)
        );

        assert!(matches!(
            garden.harvest(&cfg, id, UserId::new(), Utc::now()),
            Err(GardenError::NotPlantOwner { .. })
        ));
        let reward = garden.harvest(&cfg, id, owner, Utc::now()).map(|h| h.reward);
        assert_eq!(reward.ok(), Some(140));
        assert_eq!(garden.active_count(), 0);
        assert_eq!(garden.len(), 1);
    }

    #[test]
    fn check_tend_matches_tend() {
        let cfg = GardenConfig::default();
        let mut garden = Garden::new();
        let id = seed(&mut garden, &cfg, UserId::new());
        let other = seed(&mut garden, &cfg, UserId::new());

        assert!(garden.check_tend(id, &completion(id)).is_ok());
        assert!(matches!(
            garden.check_tend(id, &completion(other)),
            Err(GardenError::CompletionNotForPlant { .. })
        ));
    }

    #[test]
    fn fertilizer_from_catalog() {
        let cfg = GardenConfig::default();
        let mut garden = Garden::new();
        let owner = UserId::new();
        let id = seed(&mut garden, &cfg, owner);
        let mut user = UserProgress::new(owner, Utc::now());
        user.balance = 200;

        let applied = garden.apply_fertilizer(
            &cfg,
            id,
            &FertilizerId::new("bloom-boost"),
            &mut user,
            Utc::now(),
        );
        assert!(applied.is_ok());
        assert_eq!(user.balance, 50);

        // bloom-boost doubles growth: 20 XP, enough for level 2.
        let outcome = garden.tend(&cfg, id, &completion(id)).ok();
        assert_eq!(outcome.map(|o| o.new_level), Some(2));

        assert!(matches!(
            garden.apply_fertilizer(&cfg, id, &FertilizerId::new("guano"), &mut user, Utc::now()),
            Err(GardenError::UnknownFertilizer(_))
        ));
    }

    #[test]
    fn wither_sweep_reports_ids() {
        let cfg = GardenConfig {
            wither_after_days: Some(5),
            ..GardenConfig::default()
        };
        let mut garden = Garden::new();
        let start = Utc::now();
        let stale = garden
            .plant_seed(&cfg, UserId::new(), &sunflower(), start)
            .map(|p| p.id)
            .unwrap_or_default();
        let fresh = garden
            .plant_seed(&cfg, UserId::new(), &sunflower(), start + TimeDelta::days(4))
            .map(|p| p.id)
            .unwrap_or_default();

        let withered = garden.wither_neglected(&cfg, start + TimeDelta::days(6));
        assert_eq!(withered, vec![stale]);
        assert_eq!(
            garden.get(fresh).map(|p| p.status).ok(),
            Some(PlantStatus::Growing)
        );

        // A second sweep does nothing new.
        assert!(garden.wither_neglected(&cfg, start + TimeDelta::days(6)).is_empty());
    }

    #[test]
    fn only_terminal_plants_are_removed() {
        let cfg = GardenConfig::default();
        let mut garden = Garden::new();
        let owner = UserId::new();
        let id = seed(&mut garden, &cfg, owner);

        assert!(matches!(
            garden.remove(id),
            Err(GardenError::PlantStillActive {
                status: PlantStatus::Growing,
                ..
            })
        ));
        for _ in 0..12 {
            assert!(garden.tend(&cfg, id, &completion(id)).is_ok());
        }
        assert!(garden.harvest(&cfg, id, owner, Utc::now()).is_ok());

        let removed = garden.remove(id).map(|p| p.status);
        assert_eq!(removed.ok(), Some(PlantStatus::Harvested));
        assert!(garden.is_empty());
        assert!(matches!(
            garden.remove(id),
            Err(GardenError::PlantNotFound(_))
        ));
    }

    #[test]
    fn drain_terminal_keeps_active_plants() {
        let cfg = GardenConfig {
            wither_after_days: Some(5),
            ..GardenConfig::default()
        };
        let start = Utc::now();
        let mut garden = Garden::new();
        let stale = garden
            .plant_seed(&cfg, UserId::new(), &sunflower(), start)
            .map(|p| p.id)
            .unwrap_or_default();
        let fresh = garden
            .plant_seed(&cfg, UserId::new(), &sunflower(), start + TimeDelta::days(4))
            .map(|p| p.id)
            .unwrap_or_default();
        garden.wither_neglected(&cfg, start + TimeDelta::days(6));

        let drained: Vec<PlantId> = garden.drain_terminal().iter().map(|p| p.id).collect();
        assert_eq!(drained, vec![stale]);
        assert_eq!(garden.len(), 1);
        assert!(garden.get(fresh).is_ok());
        assert!(garden.drain_terminal().is_empty());
    }

    #[test]
    fn persisted_plants_rebuild_the_garden() {
        let cfg = GardenConfig::default();
        let mut garden = Garden::new();
        let owner = UserId::new();
        let id = seed(&mut garden, &cfg, owner);
        assert!(garden.tend(&cfg, id, &completion(id)).is_ok());

        let rebuilt = Garden::from_plants(garden.clone().into_plants());
        assert_eq!(rebuilt, garden);
        assert_eq!(rebuilt.plants_of(owner).count(), 1);
    }
}
