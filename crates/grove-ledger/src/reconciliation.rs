//! Reconciliation of a user's progress record against the ledger.
//!
//! The progress record keeps running totals; the ledger keeps the movements.
//! For every user U the following must hold:
//!
//! ```text
//! U.total_points == sum(credits for U)
//! U.balance      == sum(credits for U) - sum(debits for U)
//! ```
//!
//! A violation produces a [`LedgerDiscrepancy`].

use grove_types::{PointsEntry, UserProgress};

use crate::LedgerDiscrepancy;
use crate::ledger::sum_amounts;

/// The result of reconciling one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconciliationResult {
    /// The record and the ledger agree.
    Balanced,
    /// The record and the ledger disagree.
    Discrepancy(LedgerDiscrepancy),
}

/// Reconcile a user's totals against ledger entries.
///
/// Entries for other users are ignored, so the full ledger can be passed.
pub fn reconcile(user: &UserProgress, entries: &[PointsEntry]) -> ReconciliationResult {
    let (Ok(credits), Ok(debits)) = (
        sum_amounts(own_entries(entries, user).filter(|e| !e.source.is_debit())),
        sum_amounts(own_entries(entries, user).filter(|e| e.source.is_debit())),
    ) else {
        return ReconciliationResult::Discrepancy(LedgerDiscrepancy {
            user_id: user.user_id,
            total_points: None,
            balance: None,
            message: format!("ledger totals overflow for user {}", user.user_id),
        });
    };

    let ledger_balance = credits.checked_sub(debits);

    let total_mismatch = (user.total_points != credits).then_some((user.total_points, credits));
    let balance_mismatch = match ledger_balance {
        Some(expected) if expected == user.balance => None,
        Some(expected) => Some((user.balance, expected)),
        // Spent more than was ever earned: report zero as the ledger view.
        None => Some((user.balance, 0)),
    };

    if total_mismatch.is_none() && balance_mismatch.is_none() {
        return ReconciliationResult::Balanced;
    }

    let mut parts = Vec::new();
    if let Some((recorded, derived)) = total_mismatch {
        parts.push(format!("total_points recorded={recorded} ledger={derived}"));
    }
    if let Some((recorded, derived)) = balance_mismatch {
        parts.push(format!("balance recorded={recorded} ledger={derived}"));
    }
    let message = format!(
        "points ledger discrepancy for user {}: {}",
        user.user_id,
        parts.join(", ")
    );
    tracing::warn!(user_id = %user.user_id, "{message}");

    ReconciliationResult::Discrepancy(LedgerDiscrepancy {
        user_id: user.user_id,
        total_points: total_mismatch,
        balance: balance_mismatch,
        message,
    })
}

fn own_entries<'a>(
    entries: &'a [PointsEntry],
    user: &UserProgress,
) -> impl Iterator<Item = &'a PointsEntry> + use<'a> {
    let user_id = user.user_id;
    entries.iter().filter(move |e| e.user_id == user_id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use grove_types::{PlantId, TaskId, UserId};

    use super::*;
    use crate::PointsLedger;

    fn user_with(total_points: u64, balance: u64) -> UserProgress {
        let mut user = UserProgress::new(UserId::new(), Utc::now());
        user.total_points = total_points;
        user.balance = balance;
        user
    }

    #[test]
    fn empty_ledger_matches_new_user() {
        let user = user_with(0, 0);
        assert_eq!(reconcile(&user, &[]), ReconciliationResult::Balanced);
    }

    #[test]
    fn credits_and_debits_balance() {
        let user = user_with(200, 150);
        let mut ledger = PointsLedger::new();
        let now = Utc::now();
        assert!(ledger.record_task_reward(user.user_id, 170, TaskId::new(), now).is_ok());
        assert!(ledger.record_login_bonus(user.user_id, 30, now).is_ok());
        assert!(
            ledger
                .record_fertilizer_purchase(user.user_id, 50, PlantId::new(), now)
                .is_ok()
        );

        assert_eq!(reconcile(&user, ledger.entries()), ReconciliationResult::Balanced);
    }

    #[test]
    fn total_mismatch_detected() {
        let user = user_with(100, 100);
        let mut ledger = PointsLedger::new();
        assert!(ledger.record_login_bonus(user.user_id, 90, Utc::now()).is_ok());

        let ReconciliationResult::Discrepancy(d) = reconcile(&user, ledger.entries()) else {
            assert!(false, "expected discrepancy");
            return;
        };
        assert_eq!(d.total_points, Some((100, 90)));
        assert_eq!(d.balance, Some((100, 90)));
        assert!(d.message.contains("total_points"));
    }

    #[test]
    fn balance_only_mismatch_detected() {
        let user = user_with(100, 100);
        let mut ledger = PointsLedger::new();
        let now = Utc::now();
        assert!(ledger.record_login_bonus(user.user_id, 100, now).is_ok());
        assert!(
            ledger
                .record_fertilizer_purchase(user.user_id, 40, PlantId::new(), now)
                .is_ok()
        );

        let result = reconcile(&user, ledger.entries());
        let ReconciliationResult::Discrepancy(d) = result else {
            assert!(false, "expected discrepancy");
            return;
        };
        assert_eq!(d.total_points, None);
        assert_eq!(d.balance, Some((100, 60)));
    }

    #[test]
    fn other_users_are_ignored() {
        let user = user_with(10, 10);
        let mut ledger = PointsLedger::new();
        let now = Utc::now();
        assert!(ledger.record_login_bonus(user.user_id, 10, now).is_ok());
        assert!(ledger.record_login_bonus(UserId::new(), 500, now).is_ok());
        assert_eq!(reconcile(&user, ledger.entries()), ReconciliationResult::Balanced);
    }
}
