//! Append-only points ledger for the Grove progression engine.
//!
//! Every point a user earns or spends is recorded here as a
//! [`PointsEntry`](grove_types::PointsEntry). The ledger is an audit trail
//! kept alongside [`UserProgress`](grove_types::UserProgress): the progress
//! record holds the running totals, the ledger holds the movements that
//! produced them, and [`reconciliation`] checks that the two agree.
//!
//! # Modules
//!
//! - [`ledger`] -- The [`PointsLedger`] struct: append-only log with recording methods.
//! - [`entry`] -- The [`EntryBuilder`] for validated entry construction.
//! - [`reconciliation`] -- Checks a user record against its ledger entries.
//!
//! # Credits and debits
//!
//! | Source | Direction | Totals affected |
//! |--------|-----------|-----------------|
//! | `TaskCompletion` | credit | lifetime total, balance |
//! | `LoginBonus` | credit | lifetime total, balance |
//! | `HarvestReward` | credit | lifetime total, balance |
//! | `FertilizerPurchase` | debit | balance only |
//!
//! # Usage
//!
//! ```
//! use grove_ledger::PointsLedger;
//! use grove_ledger::reconciliation::{ReconciliationResult, reconcile};
//! use grove_types::{TaskId, UserId, UserProgress};
//! use chrono::Utc;
//!
//! let mut ledger = PointsLedger::new();
//! let mut user = UserProgress::new(UserId::new(), Utc::now());
//!
//! ledger.record_task_reward(user.user_id, 140, TaskId::new(), Utc::now()).ok();
//! user.total_points = 140;
//! user.balance = 140;
//!
//! assert_eq!(reconcile(&user, ledger.entries()), ReconciliationResult::Balanced);
//! ```

pub mod entry;
pub mod ledger;
pub mod reconciliation;

// Re-export primary types at crate root.
pub use entry::EntryBuilder;
pub use ledger::PointsLedger;
pub use reconciliation::ReconciliationResult;

use grove_types::UserId;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when recording ledger entries.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Amount must be strictly positive.
    #[error("ledger entry amount must be non-zero")]
    ZeroAmount,

    /// A required field was not set on the builder.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Summing entries overflowed.
    #[error("arithmetic overflow in ledger totals: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },

    /// An internal error that should not occur in normal operation.
    #[error("internal ledger error: {0}")]
    InternalError(&'static str),
}

// ---------------------------------------------------------------------------
// Discrepancy type
// ---------------------------------------------------------------------------

/// A mismatch between a user's progress record and its ledger entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerDiscrepancy {
    /// The user whose totals disagree.
    pub user_id: UserId,
    /// `(recorded, from_ledger)` lifetime totals, when they differ.
    pub total_points: Option<(u64, u64)>,
    /// `(recorded, from_ledger)` balances, when they differ.
    pub balance: Option<(u64, u64)>,
    /// Human-readable description of the discrepancy.
    pub message: String,
}

impl core::fmt::Display for LedgerDiscrepancy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)
    }
}
