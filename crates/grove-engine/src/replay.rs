//! Journal replay and end-of-run summary.
//!
//! [`Replay`] feeds each [`JournalEntry`] through the [`GrowthEngine`] in
//! order. Engine rejections are logged and counted; unknown labels abort the
//! run because the journal itself is malformed.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use grove_core::{EngineError, GrowthEngine};
use grove_ledger::ReconciliationResult;
use grove_progression::{active_streak, summarize};
use grove_types::{
    ActivitySummary, DateRange, PlantId, PlantStatus, PlantTypeId, TaskCompletion, TaskId,
    UserProgress,
};

use crate::error::ReplayError;
use crate::journal::{Journal, JournalEntry, JournalUser};

/// Days shown in the activity heatmap, ending on the summary date.
pub const HEATMAP_DAYS: u64 = 30;

/// Replay state: the engine plus the label maps the journal needs.
#[derive(Debug)]
pub struct Replay {
    engine: GrowthEngine,
    users: BTreeMap<String, UserProgress>,
    plants: BTreeMap<String, PlantId>,
    history: BTreeMap<String, Vec<TaskCompletion>>,
    applied: u64,
    rejected: u64,
}

impl Replay {
    /// Start a replay with the journal's users and no history.
    pub fn new(engine: GrowthEngine, users: &[JournalUser]) -> Result<Self, ReplayError> {
        let mut by_name = BTreeMap::new();
        for user in users {
            let progress = UserProgress::new(grove_types::UserId::new(), user.created_at);
            if by_name.insert(user.name.clone(), progress).is_some() {
                return Err(ReplayError::DuplicateUser(user.name.clone()));
            }
        }
        Ok(Self {
            engine,
            users: by_name,
            plants: BTreeMap::new(),
            history: BTreeMap::new(),
            applied: 0,
            rejected: 0,
        })
    }

    /// Replay a whole journal.
    pub fn run(engine: GrowthEngine, journal: &Journal) -> Result<Self, ReplayError> {
        let mut replay = Self::new(engine, &journal.users)?;
        for entry in &journal.entries {
            replay.apply(entry)?;
        }
        tracing::info!(
            applied = replay.applied,
            rejected = replay.rejected,
            "journal replayed"
        );
        Ok(replay)
    }

    /// Entries the engine accepted.
    pub const fn applied(&self) -> u64 {
        self.applied
    }

    /// Entries the engine rejected.
    pub const fn rejected(&self) -> u64 {
        self.rejected
    }

    /// A user's progress record by label.
    #[cfg(test)]
    pub fn user(&self, name: &str) -> Option<&UserProgress> {
        self.users.get(name)
    }

    /// Apply one entry.
    pub fn apply(&mut self, entry: &JournalEntry) -> Result<(), ReplayError> {
        let result: Result<(), EngineError> = match entry {
            JournalEntry::Login { user, date } => {
                let progress = user_mut(&mut self.users, user)?;
                self.engine.record_login(progress, *date).map(|reward| {
                    tracing::debug!(
                        user = %user,
                        streak = reward.login.streak,
                        bonus = reward.login.bonus_points,
                        "login replayed"
                    );
                })
            }
            JournalEntry::Plant {
                user,
                plant,
                plant_type,
                at,
            } => {
                if self.plants.contains_key(plant) {
                    return Err(ReplayError::DuplicatePlant(plant.clone()));
                }
                let progress = user_mut(&mut self.users, user)?;
                let planted = self
                    .engine
                    .plant_seed(progress, plant_type, *at)
                    .map(|p| p.id);
                planted.map(|id| {
                    self.plants.insert(plant.clone(), id);
                })
            }
            JournalEntry::Complete {
                user,
                difficulty,
                rating,
                plant,
                at,
            } => {
                let plant_id = plant
                    .as_deref()
                    .map(|label| plant_id(&self.plants, label))
                    .transpose()?;
                let event = TaskCompletion {
                    task_id: TaskId::new(),
                    difficulty: *difficulty,
                    rating: *rating,
                    completed_at: *at,
                    plant_id,
                };
                let progress = user_mut(&mut self.users, user)?;
                self.engine.complete_task(progress, &event).map(|reward| {
                    if let Some(up) = reward.award.level_up {
                        tracing::info!(user = %user, new_level = up.new_level, "user levelled up");
                    }
                    self.history.entry(user.clone()).or_default().push(event);
                })
            }
            JournalEntry::Fertilize {
                user,
                plant,
                fertilizer,
                at,
            } => {
                let plant_id = plant_id(&self.plants, plant)?;
                let progress = user_mut(&mut self.users, user)?;
                self.engine
                    .apply_fertilizer(progress, plant_id, fertilizer, *at)
                    .map(drop)
            }
            JournalEntry::Harvest { user, plant, at } => {
                let plant_id = plant_id(&self.plants, plant)?;
                let progress = user_mut(&mut self.users, user)?;
                self.engine
                    .harvest_plant(progress, plant_id, *at)
                    .map(|reward| {
                        tracing::info!(
                            user = %user,
                            plant = %plant,
                            reward = reward.harvest.reward,
                            "harvest replayed"
                        );
                    })
            }
            JournalEntry::TendCheck { at } => {
                let withered = self.engine.wither_neglected(*at);
                if !withered.is_empty() {
                    tracing::info!(count = withered.len(), at = %at, "plants withered");
                }
                Ok(())
            }
        };

        match result {
            Ok(()) => self.applied = self.applied.saturating_add(1),
            Err(err) => {
                tracing::warn!(action = entry.action(), error = %err, "journal entry rejected");
                self.rejected = self.rejected.saturating_add(1);
            }
        }
        Ok(())
    }

    /// Summaries for every user as of `as_of`, in label order.
    pub fn summarize(&self, as_of: NaiveDate) -> Result<Vec<UserSummary>, ReplayError> {
        let start = as_of
            .checked_sub_days(Days::new(HEATMAP_DAYS.saturating_sub(1)))
            .unwrap_or(as_of);
        let range = DateRange::new(start, as_of);
        let labels: BTreeMap<PlantId, &str> = self
            .plants
            .iter()
            .map(|(label, id)| (*id, label.as_str()))
            .collect();

        self.users
            .iter()
            .map(|(name, user)| -> Result<UserSummary, ReplayError> {
                let events = self.history.get(name).map_or(&[][..], Vec::as_slice);
                let buckets = self.engine.aggregate_activity(events, range)?;
                let level = self.engine.level_progress(user);
                let plants = self
                    .engine
                    .garden()
                    .plants_of(user.user_id)
                    .map(|p| PlantSummary {
                        label: labels.get(&p.id).copied().unwrap_or_default().to_owned(),
                        plant_type: p.type_id.clone(),
                        level: p.level,
                        xp: p.xp,
                        status: p.status,
                        tasks_completed: p.tasks_completed,
                        fertilized: p.has_fertilizer(),
                    })
                    .collect();

                Ok(UserSummary {
                    name: name.clone(),
                    level: level.level,
                    points_to_next_level: level.points_to_next_level,
                    total_points: user.total_points,
                    balance: user.balance,
                    streak: active_streak(user, as_of),
                    longest_streak: user.longest_streak,
                    total_logins: user.total_logins,
                    heatmap: heatmap_row(&buckets),
                    activity: summarize(&buckets),
                    plants,
                    ledger_balanced: self.engine.reconcile(user) == ReconciliationResult::Balanced,
                })
            })
            .collect()
    }
}

/// End-of-replay view of one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    /// Journal label.
    pub name: String,
    /// Level derived from lifetime points.
    pub level: u32,
    /// Points needed for the next level.
    pub points_to_next_level: u64,
    /// Lifetime points.
    pub total_points: u64,
    /// Spendable points.
    pub balance: u64,
    /// Streak as displayed on the summary date.
    pub streak: u32,
    /// Longest streak reached.
    pub longest_streak: u32,
    /// Days logged in.
    pub total_logins: u64,
    /// One intensity digit (0-4) per heatmap day, oldest first.
    pub heatmap: String,
    /// Totals over the heatmap window.
    pub activity: ActivitySummary,
    /// The user's plants.
    pub plants: Vec<PlantSummary>,
    /// Whether the user's totals match the ledger.
    pub ledger_balanced: bool,
}

/// End-of-replay view of one plant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlantSummary {
    /// Journal label.
    pub label: String,
    /// Catalog plant type.
    pub plant_type: PlantTypeId,
    /// Current level.
    pub level: u32,
    /// XP toward the next level.
    pub xp: u64,
    /// Lifecycle status.
    pub status: PlantStatus,
    /// Completions received.
    pub tasks_completed: u32,
    /// Whether a fertilizer was applied.
    pub fertilized: bool,
}

fn heatmap_row(buckets: &[grove_types::ActivityBucket]) -> String {
    buckets
        .iter()
        .map(|b| char::from_digit(u32::from(b.tier.as_u8()), 10).unwrap_or('?'))
        .collect()
}

fn user_mut<'a>(
    users: &'a mut BTreeMap<String, UserProgress>,
    name: &str,
) -> Result<&'a mut UserProgress, ReplayError> {
    users
        .get_mut(name)
        .ok_or_else(|| ReplayError::UnknownUser(name.to_owned()))
}

fn plant_id(plants: &BTreeMap<String, PlantId>, label: &str) -> Result<PlantId, ReplayError> {
    plants
        .get(label)
        .copied()
        .ok_or_else(|| ReplayError::UnknownPlant(label.to_owned()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use grove_core::EngineConfig;

    use super::*;

    fn run(json: &str) -> Result<Replay, ReplayError> {
        let journal = Journal::parse(json)?;
        Replay::run(GrowthEngine::from_config(&EngineConfig::default()), &journal)
    }

    const JOURNAL: &str = r#"{
        "users": [{ "name": "ada", "created_at": "2026-02-01T08:00:00Z" }],
        "entries": [
            { "action": "login", "user": "ada", "date": "2026-02-01" },
            { "action": "login", "user": "ada", "date": "2026-02-01" },
            { "action": "plant", "user": "ada", "plant": "sunny",
              "plant_type": "sunflower", "at": "2026-02-01T08:05:00Z" },
            { "action": "complete", "user": "ada", "difficulty": 2, "rating": 4,
              "plant": "sunny", "at": "2026-02-01T09:00:00Z" },
            { "action": "fertilize", "user": "ada", "plant": "sunny",
              "fertilizer": "bloom-boost", "at": "2026-02-01T09:10:00Z" },
            { "action": "harvest", "user": "ada", "plant": "sunny",
              "at": "2026-02-01T10:00:00Z" },
            { "action": "login", "user": "ada", "date": "2026-02-02" }
        ]
    }"#;

    #[test]
    fn rejections_are_counted_not_fatal() {
        let replay = run(JOURNAL);
        assert!(replay.is_ok(), "{replay:?}");
        let Ok(replay) = replay else { return };

        // Duplicate login and premature harvest are rejected.
        assert_eq!(replay.applied(), 5);
        assert_eq!(replay.rejected(), 2);

        let ada = replay.user("ada");
        // 10 + 140 + 10 login/completion, minus 150 fertilizer.
        assert_eq!(ada.map(|u| u.total_points), Some(160));
        assert_eq!(ada.map(|u| u.balance), Some(10));
        assert_eq!(ada.map(|u| u.current_streak), Some(2));
    }

    #[test]
    fn summary_covers_heatmap_window() {
        let Ok(replay) = run(JOURNAL) else {
            return;
        };
        let as_of = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap_or_default();
        let summaries = replay.summarize(as_of).unwrap_or_default();
        assert_eq!(summaries.len(), 1);

        let ada = summaries.first();
        assert_eq!(ada.map(|s| s.heatmap.len()), Some(30));
        assert_eq!(
            ada.map(|s| s.heatmap.ends_with("30")),
            Some(true),
            "140 points lands in the busy tier the day before"
        );
        assert_eq!(ada.map(|s| s.activity.total_completions), Some(1));
        assert_eq!(ada.map(|s| s.ledger_balanced), Some(true));
        assert_eq!(ada.map(|s| s.plants.len()), Some(1));
        assert_eq!(
            ada.and_then(|s| s.plants.first()).map(|p| p.label.as_str()),
            Some("sunny")
        );
    }

    #[test]
    fn demo_journal_replays() {
        let replay = run(include_str!("../../../demos/journal.json"));
        assert!(replay.is_ok(), "{replay:?}");
        let Ok(replay) = replay else { return };

        // Duplicate final login and the second harvest are rejected.
        assert_eq!(replay.rejected(), 2);
        let as_of = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap_or_default();
        let summaries = replay.summarize(as_of).unwrap_or_default();
        assert!(summaries.iter().all(|s| s.ledger_balanced));

        let ada = summaries.iter().find(|s| s.name == "ada");
        assert_eq!(
            ada.and_then(|s| s.plants.first()).map(|p| p.status),
            Some(PlantStatus::Harvested)
        );
        // Streak broken by the missed seventh day.
        assert_eq!(ada.map(|s| s.longest_streak), Some(7));
        assert_eq!(ada.map(|s| s.streak), Some(0));

        let lin = summaries.iter().find(|s| s.name == "lin");
        assert_eq!(
            lin.and_then(|s| s.plants.first()).map(|p| p.status),
            Some(PlantStatus::Growing)
        );
    }

    #[test]
    fn unknown_user_aborts() {
        let json = r#"{ "users": [], "entries": [
            { "action": "login", "user": "ghost", "date": "2026-02-01" }
        ] }"#;
        assert!(matches!(run(json), Err(ReplayError::UnknownUser(_))));
    }

    #[test]
    fn unknown_plant_aborts() {
        let json = r#"{
            "users": [{ "name": "ada", "created_at": "2026-02-01T08:00:00Z" }],
            "entries": [
                { "action": "harvest", "user": "ada", "plant": "nope", "at": "2026-02-01T09:00:00Z" }
            ]
        }"#;
        assert!(matches!(run(json), Err(ReplayError::UnknownPlant(_))));
    }

    #[test]
    fn duplicate_user_rejected() {
        let json = r#"{ "users": [
            { "name": "ada", "created_at": "2026-02-01T08:00:00Z" },
            { "name": "ada", "created_at": "2026-02-02T08:00:00Z" }
        ] }"#;
        assert!(matches!(run(json), Err(ReplayError::DuplicateUser(_))));
    }
}
