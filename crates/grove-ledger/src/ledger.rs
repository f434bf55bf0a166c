//! The points ledger: an append-only log of every points movement.
//!
//! # Design
//!
//! - **Append-only**: entries are never modified or deleted.
//! - **Positive amounts**: direction comes from the entry's source, so an
//!   amount is never negative or zero.
//! - **Derived totals**: earned and spent sums are recomputed from the
//!   entries on demand, never cached.

use chrono::{DateTime, Utc};

use grove_types::{PlantId, PointsEntry, PointsSource, TaskId, UserId};

use crate::{EntryBuilder, LedgerError};

// ---------------------------------------------------------------------------
// PointsLedger
// ---------------------------------------------------------------------------

/// Append-only record of point credits and debits for any number of users.
#[derive(Debug, Clone, Default)]
pub struct PointsLedger {
    /// All entries, in insertion order.
    entries: Vec<PointsEntry>,
}

impl PointsLedger {
    /// Create a new empty ledger.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Rebuild a ledger from entries loaded by the integrator.
    pub const fn from_entries(entries: Vec<PointsEntry>) -> Self {
        Self { entries }
    }

    /// Return the number of entries in the ledger.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return whether the ledger has no entries.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return all entries in insertion order.
    pub fn entries(&self) -> &[PointsEntry] {
        &self.entries
    }

    /// Remove and return every entry, leaving the ledger empty.
    ///
    /// The integrator persists the returned entries; reconciling a user later
    /// needs the persisted entries together with anything recorded since.
    pub fn take_entries(&mut self) -> Vec<PointsEntry> {
        std::mem::take(&mut self.entries)
    }

    /// Consume the ledger and return its entries in insertion order.
    pub fn into_entries(self) -> Vec<PointsEntry> {
        self.entries
    }

    /// Iterate over the entries belonging to one user.
    pub fn entries_for(&self, user_id: UserId) -> impl Iterator<Item = &PointsEntry> {
        self.entries.iter().filter(move |e| e.user_id == user_id)
    }

    /// Validate a builder and append the resulting entry.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the entry fails validation.
    pub fn record(&mut self, builder: EntryBuilder) -> Result<&PointsEntry, LedgerError> {
        let entry = builder.build()?;
        tracing::debug!(
            user_id = %entry.user_id,
            source = ?entry.source,
            amount = entry.amount,
            "points entry recorded"
        );
        self.entries.push(entry);

        self.entries.last().ok_or(LedgerError::InternalError(
            "failed to retrieve entry after append",
        ))
    }

    /// Record points awarded for a completed task.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the entry fails validation.
    pub fn record_task_reward(
        &mut self,
        user_id: UserId,
        amount: u64,
        task_id: TaskId,
        at: DateTime<Utc>,
    ) -> Result<&PointsEntry, LedgerError> {
        self.record(
            EntryBuilder::new(user_id, PointsSource::TaskCompletion)
                .amount(amount)
                .reference_id(task_id.into_inner())
                .recorded_at(at),
        )
    }

    /// Record a daily login streak bonus.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the entry fails validation.
    pub fn record_login_bonus(
        &mut self,
        user_id: UserId,
        amount: u64,
        at: DateTime<Utc>,
    ) -> Result<&PointsEntry, LedgerError> {
        self.record(
            EntryBuilder::new(user_id, PointsSource::LoginBonus)
                .amount(amount)
                .recorded_at(at),
        )
    }

    /// Record the reward paid for harvesting a plant.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the entry fails validation.
    pub fn record_harvest_reward(
        &mut self,
        user_id: UserId,
        amount: u64,
        plant_id: PlantId,
        at: DateTime<Utc>,
    ) -> Result<&PointsEntry, LedgerError> {
        self.record(
            EntryBuilder::new(user_id, PointsSource::HarvestReward)
                .amount(amount)
                .reference_id(plant_id.into_inner())
                .recorded_at(at),
        )
    }

    /// Record points spent on fertilizer for a plant.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the entry fails validation.
    pub fn record_fertilizer_purchase(
        &mut self,
        user_id: UserId,
        amount: u64,
        plant_id: PlantId,
        at: DateTime<Utc>,
    ) -> Result<&PointsEntry, LedgerError> {
        self.record(
            EntryBuilder::new(user_id, PointsSource::FertilizerPurchase)
                .amount(amount)
                .reference_id(plant_id.into_inner())
                .recorded_at(at),
        )
    }

    /// Sum of all credits for a user (the lifetime total).
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ArithmeticOverflow`] if the sum overflows.
    pub fn earned(&self, user_id: UserId) -> Result<u64, LedgerError> {
        sum_amounts(self.entries_for(user_id).filter(|e| !e.source.is_debit()))
    }

    /// Sum of all debits for a user.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ArithmeticOverflow`] if the sum overflows.
    pub fn spent(&self, user_id: UserId) -> Result<u64, LedgerError> {
        sum_amounts(self.entries_for(user_id).filter(|e| e.source.is_debit()))
    }
}

/// Sum entry amounts with overflow checking.
pub(crate) fn sum_amounts<'a>(
    mut entries: impl Iterator<Item = &'a PointsEntry>,
) -> Result<u64, LedgerError> {
    entries.try_fold(0_u64, |acc, e| {
        acc.checked_add(e.amount)
            .ok_or_else(|| LedgerError::ArithmeticOverflow {
                context: format!("summing {:?} entries", e.source),
            })
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ledger_is_empty() {
        let ledger = PointsLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
    }

    #[test]
    fn credits_and_debits_are_separated() {
        let mut ledger = PointsLedger::new();
        let user = UserId::new();
        let plant = PlantId::new();
        let now = Utc::now();

        assert!(ledger.record_task_reward(user, 140, TaskId::new(), now).is_ok());
        assert!(ledger.record_login_bonus(user, 30, now).is_ok());
        assert!(ledger.record_harvest_reward(user, 80, plant, now).is_ok());
        assert!(ledger.record_fertilizer_purchase(user, 50, plant, now).is_ok());

        assert_eq!(ledger.len(), 4);
        assert_eq!(ledger.earned(user).ok(), Some(250));
        assert_eq!(ledger.spent(user).ok(), Some(50));
    }

    #[test]
    fn users_are_independent() {
        let mut ledger = PointsLedger::new();
        let alice = UserId::new();
        let bob = UserId::new();
        let now = Utc::now();

        assert!(ledger.record_login_bonus(alice, 10, now).is_ok());
        assert!(ledger.record_login_bonus(bob, 20, now).is_ok());

        assert_eq!(ledger.entries_for(alice).count(), 1);
        assert_eq!(ledger.earned(alice).ok(), Some(10));
        assert_eq!(ledger.earned(bob).ok(), Some(20));
    }

    #[test]
    fn zero_amount_is_not_appended() {
        let mut ledger = PointsLedger::new();
        let result = ledger.record_login_bonus(UserId::new(), 0, Utc::now());
        assert!(result.is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn overflowing_sum_is_an_error() {
        let user = UserId::new();
        let now = Utc::now();
        let mut ledger = PointsLedger::new();
        assert!(ledger.record_login_bonus(user, u64::MAX, now).is_ok());
        assert!(ledger.record_login_bonus(user, 1, now).is_ok());
        assert!(matches!(
            ledger.earned(user),
            Err(LedgerError::ArithmeticOverflow { .. })
        ));
    }

    #[test]
    fn taken_entries_rebuild_the_ledger() {
        let mut ledger = PointsLedger::new();
        let user = UserId::new();
        let now = Utc::now();
        assert!(ledger.record_login_bonus(user, 10, now).is_ok());
        assert!(ledger.record_task_reward(user, 40, TaskId::new(), now).is_ok());

        let taken = ledger.take_entries();
        assert!(ledger.is_empty());
        assert_eq!(taken.len(), 2);

        let restored = PointsLedger::from_entries(taken);
        assert_eq!(restored.earned(user).ok(), Some(50));
        assert_eq!(restored.into_entries().len(), 2);
    }

    #[test]
    fn reference_ids_link_entities() {
        let mut ledger = PointsLedger::new();
        let user = UserId::new();
        let task = TaskId::new();
        let entry = ledger.record_task_reward(user, 10, task, Utc::now()).ok().cloned();
        assert_eq!(entry.and_then(|e| e.reference_id), Some(task.into_inner()));
    }
}
