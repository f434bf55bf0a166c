//! Entry builder and validation for the points ledger.
//!
//! Provides an [`EntryBuilder`] that rejects zero amounts and missing
//! timestamps before producing a [`PointsEntry`].

use chrono::{DateTime, Utc};
use uuid::Uuid;

use grove_types::{PointsEntry, PointsEntryId, PointsSource, UserId};

use crate::LedgerError;

// ---------------------------------------------------------------------------
// Entry builder
// ---------------------------------------------------------------------------

/// Builder for constructing validated [`PointsEntry`] values.
///
/// # Examples
///
/// ```
/// use grove_ledger::EntryBuilder;
/// use grove_types::{PointsSource, UserId};
/// use chrono::Utc;
///
/// let entry = EntryBuilder::new(UserId::new(), PointsSource::LoginBonus)
///     .amount(20)
///     .recorded_at(Utc::now())
///     .build();
///
/// assert!(entry.is_ok());
/// ```
#[derive(Debug)]
pub struct EntryBuilder {
    user_id: UserId,
    source: PointsSource,
    amount: Option<u64>,
    reference_id: Option<Uuid>,
    recorded_at: Option<DateTime<Utc>>,
}

impl EntryBuilder {
    /// Start building an entry for the given user and source.
    pub const fn new(user_id: UserId, source: PointsSource) -> Self {
        Self {
            user_id,
            source,
            amount: None,
            reference_id: None,
            recorded_at: None,
        }
    }

    /// Set the number of points moved.
    #[must_use]
    pub const fn amount(mut self, amount: u64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Link the entry to a related entity (task, plant).
    #[must_use]
    pub const fn reference_id(mut self, id: Uuid) -> Self {
        self.reference_id = Some(id);
        self
    }

    /// Set when the movement happened.
    #[must_use]
    pub const fn recorded_at(mut self, at: DateTime<Utc>) -> Self {
        self.recorded_at = Some(at);
        self
    }

    /// Validate inputs and produce a [`PointsEntry`].
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::MissingField`] if the amount or timestamp is
    /// not set, and [`LedgerError::ZeroAmount`] if the amount is zero.
    pub fn build(self) -> Result<PointsEntry, LedgerError> {
        let amount = self.amount.ok_or(LedgerError::MissingField("amount"))?;
        let recorded_at = self
            .recorded_at
            .ok_or(LedgerError::MissingField("recorded_at"))?;

        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        Ok(PointsEntry {
            id: PointsEntryId::new(),
            user_id: self.user_id,
            source: self.source,
            amount,
            reference_id: self.reference_id,
            recorded_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_valid_entry() {
        let user = UserId::new();
        let task = Uuid::now_v7();
        let entry = EntryBuilder::new(user, PointsSource::TaskCompletion)
            .amount(140)
            .reference_id(task)
            .recorded_at(Utc::now())
            .build();

        let entry = entry.ok();
        assert_eq!(entry.as_ref().map(|e| e.amount), Some(140));
        assert_eq!(entry.as_ref().map(|e| e.user_id), Some(user));
        assert_eq!(entry.and_then(|e| e.reference_id), Some(task));
    }

    #[test]
    fn zero_amount_rejected() {
        let result = EntryBuilder::new(UserId::new(), PointsSource::HarvestReward)
            .amount(0)
            .recorded_at(Utc::now())
            .build();
        assert!(matches!(result, Err(LedgerError::ZeroAmount)));
    }

    #[test]
    fn missing_amount_rejected() {
        let result = EntryBuilder::new(UserId::new(), PointsSource::LoginBonus)
            .recorded_at(Utc::now())
            .build();
        assert!(matches!(result, Err(LedgerError::MissingField("amount"))));
    }

    #[test]
    fn missing_timestamp_rejected() {
        let result = EntryBuilder::new(UserId::new(), PointsSource::LoginBonus)
            .amount(10)
            .build();
        assert!(matches!(result, Err(LedgerError::MissingField("recorded_at"))));
    }
}
