//! Journal file format.
//!
//! A journal is a JSON document listing users and the actions they took, in
//! the order they happened. Users and plants are referred to by labels local
//! to the journal; the replay assigns real IDs.
//!
//! ```json
//! {
//!   "users": [{ "name": "ada", "created_at": "2026-02-01T08:00:00Z" }],
//!   "entries": [
//!     { "action": "login", "user": "ada", "date": "2026-02-01" },
//!     { "action": "plant", "user": "ada", "plant": "sunny", "plant_type": "sunflower",
//!       "at": "2026-02-01T08:05:00Z" },
//!     { "action": "complete", "user": "ada", "difficulty": 2, "rating": 4,
//!       "plant": "sunny", "at": "2026-02-01T09:00:00Z" },
//!     { "action": "fertilize", "user": "ada", "plant": "sunny", "fertilizer": "compost",
//!       "at": "2026-02-01T09:30:00Z" },
//!     { "action": "harvest", "user": "ada", "plant": "sunny", "at": "2026-02-09T18:00:00Z" },
//!     { "action": "tend_check", "at": "2026-03-01T00:00:00Z" }
//!   ]
//! }
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use grove_types::{FertilizerId, PlantTypeId};

/// A parsed journal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Journal {
    /// Users that appear in the journal.
    pub users: Vec<JournalUser>,
    /// Actions, oldest first.
    #[serde(default)]
    pub entries: Vec<JournalEntry>,
}

impl Journal {
    /// Parse a journal from JSON.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Timestamp of the last entry, if any.
    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.entries.iter().map(JournalEntry::timestamp).max()
    }
}

/// A user declared in the journal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JournalUser {
    /// Label used by entries.
    pub name: String,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

/// One recorded action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum JournalEntry {
    /// Daily login.
    Login {
        /// User label.
        user: String,
        /// Calendar day of the login.
        date: NaiveDate,
    },
    /// Plant a seed.
    Plant {
        /// User label.
        user: String,
        /// Label for the new plant.
        plant: String,
        /// Catalog plant type.
        plant_type: PlantTypeId,
        /// When it was planted.
        at: DateTime<Utc>,
    },
    /// Complete a task, optionally logged against a plant.
    Complete {
        /// User label.
        user: String,
        /// Task difficulty.
        difficulty: u32,
        /// Optional post-completion rating.
        #[serde(default)]
        rating: Option<u32>,
        /// Plant label, if the task was logged against one.
        #[serde(default)]
        plant: Option<String>,
        /// When the task was completed.
        at: DateTime<Utc>,
    },
    /// Buy and apply a fertilizer.
    Fertilize {
        /// User label.
        user: String,
        /// Plant label.
        plant: String,
        /// Catalog fertilizer.
        fertilizer: FertilizerId,
        /// When it was applied.
        at: DateTime<Utc>,
    },
    /// Harvest a mature plant.
    Harvest {
        /// User label.
        user: String,
        /// Plant label.
        plant: String,
        /// When it was harvested.
        at: DateTime<Utc>,
    },
    /// Wither every neglected plant as of `at`.
    TendCheck {
        /// Point in time to check against.
        at: DateTime<Utc>,
    },
}

impl JournalEntry {
    /// The action name as it appears in the journal.
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Plant { .. } => "plant",
            Self::Complete { .. } => "complete",
            Self::Fertilize { .. } => "fertilize",
            Self::Harvest { .. } => "harvest",
            Self::TendCheck { .. } => "tend_check",
        }
    }

    /// When the action happened. Logins count from the start of their day.
    pub const fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Login { date, .. } => date.and_time(chrono::NaiveTime::MIN).and_utc(),
            Self::Plant { at, .. }
            | Self::Complete { at, .. }
            | Self::Fertilize { at, .. }
            | Self::Harvest { at, .. }
            | Self::TendCheck { at } => *at,
        }
    }
}
