//! Shared type definitions for the Grove progression and growth engine.
//!
//! This crate is the single source of truth for the data the engine reads
//! and produces. Types flow to `TypeScript` via `ts-rs` for the UI layer.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifiers and catalog keys
//! - [`enums`] -- Plant status, intensity tiers, points sources
//! - [`structs`] -- Entities (user progress, plants, ledger entries) and operation results

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{IntensityTier, PlantStatus, PointsSource};
pub use ids::{FertilizerId, PlantId, PlantTypeId, PointsEntryId, TaskId, UserId};
pub use structs::{
    ActivityBucket, ActivitySummary, AppliedFertilizer, DateRange, FertilizerEffect,
    GrowthOutcome, HarvestOutcome, LevelProgress, LevelUp, LoginOutcome, Plant, PlantType,
    PointsAward, PointsEntry, TaskCompletion, UserProgress,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // The files are written to the `bindings/` directory relative to
        // the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::UserId::export_all();
        let _ = crate::ids::PlantId::export_all();
        let _ = crate::ids::TaskId::export_all();
        let _ = crate::ids::PointsEntryId::export_all();
        let _ = crate::ids::PlantTypeId::export_all();
        let _ = crate::ids::FertilizerId::export_all();

        // Enums
        let _ = crate::enums::PlantStatus::export_all();
        let _ = crate::enums::IntensityTier::export_all();
        let _ = crate::enums::PointsSource::export_all();

        // Structs
        let _ = crate::structs::UserProgress::export_all();
        let _ = crate::structs::TaskCompletion::export_all();
        let _ = crate::structs::LevelUp::export_all();
        let _ = crate::structs::PointsAward::export_all();
        let _ = crate::structs::LevelProgress::export_all();
        let _ = crate::structs::LoginOutcome::export_all();
        let _ = crate::structs::PlantType::export_all();
        let _ = crate::structs::FertilizerEffect::export_all();
        let _ = crate::structs::AppliedFertilizer::export_all();
        let _ = crate::structs::Plant::export_all();
        let _ = crate::structs::GrowthOutcome::export_all();
        let _ = crate::structs::HarvestOutcome::export_all();
        let _ = crate::structs::PointsEntry::export_all();
        let _ = crate::structs::DateRange::export_all();
        let _ = crate::structs::ActivityBucket::export_all();
        let _ = crate::structs::ActivitySummary::export_all();
    }
}
