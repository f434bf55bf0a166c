//! Garden parameters and the plant and fertilizer catalogs.
//!
//! [`GardenConfig`] bundles every growth and harvest tunable. `grove-core`
//! builds it from the `garden` section of `grove-config.yaml`; the default
//! matches the built-in catalog.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use grove_types::{FertilizerEffect, FertilizerId, PlantType, PlantTypeId};

use crate::error::GardenError;

/// Configuration for plant growth, harvest, and withering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GardenConfig {
    /// XP added to a plant per task completion, before fertilizer (default: 10).
    pub xp_per_completion: u64,

    /// Harvest points per plant level (default: 20).
    pub level_reward_factor: Decimal,

    /// Harvest points per completed task (default: 5).
    pub per_task_reward_factor: Decimal,

    /// Days without a completion after which a plant withers.
    ///
    /// `None` disables withering (default).
    pub wither_after_days: Option<u32>,

    /// Plant species keyed by catalog ID.
    pub plant_types: BTreeMap<PlantTypeId, PlantType>,

    /// Fertilizers keyed by catalog ID.
    pub fertilizers: BTreeMap<FertilizerId, FertilizerEffect>,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            xp_per_completion: 10,
            level_reward_factor: Decimal::new(20, 0),
            per_task_reward_factor: Decimal::new(5, 0),
            wither_after_days: None,
            plant_types: default_plant_types()
                .into_iter()
                .map(|t| (t.id.clone(), t))
                .collect(),
            fertilizers: default_fertilizers()
                .into_iter()
                .map(|f| (f.id.clone(), f))
                .collect(),
        }
    }
}

impl GardenConfig {
    /// Look up a plant type.
    pub fn plant_type(&self, id: &PlantTypeId) -> Result<&PlantType, GardenError> {
        self.plant_types
            .get(id)
            .ok_or_else(|| GardenError::UnknownPlantType(id.clone()))
    }

    /// Look up a fertilizer.
    pub fn fertilizer(&self, id: &FertilizerId) -> Result<&FertilizerEffect, GardenError> {
        self.fertilizers
            .get(id)
            .ok_or_else(|| GardenError::UnknownFertilizer(id.clone()))
    }
}

/// The built-in plant catalog.
pub fn default_plant_types() -> Vec<PlantType> {
    vec![
        PlantType {
            id: PlantTypeId::new("sunflower"),
            name: String::from("Sunflower"),
            xp_per_level: 20,
            max_level: 4,
        },
        PlantType {
            id: PlantTypeId::new("tomato"),
            name: String::from("Tomato"),
            xp_per_level: 30,
            max_level: 4,
        },
        PlantType {
            id: PlantTypeId::new("bonsai"),
            name: String::from("Bonsai"),
            xp_per_level: 50,
            max_level: 5,
        },
    ]
}

/// The built-in fertilizer catalog.
pub fn default_fertilizers() -> Vec<FertilizerEffect> {
    vec![
        FertilizerEffect {
            id: FertilizerId::new("compost"),
            name: String::from("Compost"),
            growth_multiplier: Decimal::new(15, 1),
            harvest_multiplier: None,
            cost: 50,
        },
        FertilizerEffect {
            id: FertilizerId::new("bloom-boost"),
            name: String::from("Bloom Boost"),
            growth_multiplier: Decimal::new(2, 0),
            harvest_multiplier: Some(Decimal::new(15, 1)),
            cost: 150,
        },
    ]
}
