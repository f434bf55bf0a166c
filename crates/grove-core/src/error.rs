//! Error type for the [`GrowthEngine`](crate::GrowthEngine) facade.

use grove_garden::GardenError;
use grove_ledger::LedgerError;
use grove_progression::ProgressionError;

/// Any rejection an engine operation can return.
///
/// Each variant wraps the subsystem error unchanged, so the caller can still
/// match on the precise rejection (already claimed, insufficient points,
/// plant unavailable, ...).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Points, levels, login streak, or activity rejection.
    #[error("progression error: {0}")]
    Progression(#[from] ProgressionError),

    /// Plant, fertilizer, or harvest rejection.
    #[error("garden error: {0}")]
    Garden(#[from] GardenError),

    /// The ledger refused an entry.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
