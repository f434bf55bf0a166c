//! Error types for the grove-garden crate.
//!
//! Fertilizer rejections (`PlantUnavailable`, `AlreadyFertilized`,
//! `InsufficientPoints`) are distinct variants so the caller can render the
//! matching message.

use grove_types::{FertilizerId, PlantId, PlantStatus, PlantTypeId, UserId};

/// Errors that can occur during plant operations.
#[derive(Debug, thiserror::Error)]
pub enum GardenError {
    /// The plant is harvested or withered and accepts no further changes.
    #[error("plant {plant_id} is {status} and can no longer change")]
    PlantUnavailable {
        /// The plant that was targeted.
        plant_id: PlantId,
        /// Its terminal status.
        status: PlantStatus,
    },

    /// Removal was requested for a plant that is still growing or mature.
    #[error("plant {plant_id} is {status} and cannot be removed")]
    PlantStillActive {
        /// The plant that was targeted.
        plant_id: PlantId,
        /// Its current status.
        status: PlantStatus,
    },

    /// The plant already has an active fertilizer.
    #[error("plant {plant_id} is already fertilized with {fertilizer_id}")]
    AlreadyFertilized {
        /// The plant that was targeted.
        plant_id: PlantId,
        /// The fertilizer already applied.
        fertilizer_id: FertilizerId,
    },

    /// The user cannot afford the fertilizer.
    #[error("insufficient points: need {required}, have {available}")]
    InsufficientPoints {
        /// Fertilizer cost.
        required: u64,
        /// User's spendable balance.
        available: u64,
    },

    /// Harvest attempted before the plant reached its maximum level.
    #[error("plant {plant_id} is not mature (level {level} of {max_level})")]
    NotMature {
        /// The plant that was targeted.
        plant_id: PlantId,
        /// Its current level.
        level: u32,
        /// The level it must reach.
        max_level: u32,
    },

    /// The acting user does not own the plant.
    #[error("user {user_id} does not own plant {plant_id}")]
    NotPlantOwner {
        /// The plant that was targeted.
        plant_id: PlantId,
        /// The acting user.
        user_id: UserId,
    },

    /// A completion was routed to a plant it was not logged against.
    #[error("task completion is not logged against plant {plant_id}")]
    CompletionNotForPlant {
        /// The plant that received the completion.
        plant_id: PlantId,
    },

    /// No plant with this ID exists in the garden.
    #[error("plant not found: {0}")]
    PlantNotFound(PlantId),

    /// The plant type is not in the catalog.
    #[error("unknown plant type: {0}")]
    UnknownPlantType(PlantTypeId),

    /// The fertilizer is not in the catalog.
    #[error("unknown fertilizer: {0}")]
    UnknownFertilizer(FertilizerId),

    /// An arithmetic overflow occurred.
    #[error("arithmetic overflow: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },
}
