//! Points & Level Calculator.
//!
//! Turns task completions into points and derives a user's level from the
//! lifetime total.
//!
//! # Scoring
//!
//! ```text
//! points = difficulty * base_per_difficulty + rating * rating_bonus_per_star
//! ```
//!
//! The rating term is zero when the completion has no rating.
//!
//! # Levels
//!
//! Each level costs a fixed `base_level_points`:
//!
//! ```text
//! level_threshold(level) = base_level_points * (level - 1)
//! level(points)          = points / base_level_points + 1
//! ```
//!
//! so level 1 starts at 0 points. The level is never stored; it is
//! recomputed from the total every time it is needed.

use grove_types::{LevelProgress, LevelUp, PointsAward, TaskCompletion, UserProgress};

use crate::config::PointsConfig;
use crate::error::ProgressionError;

/// Compute the points a completion is worth.
///
/// # Errors
///
/// Returns [`ProgressionError::InvalidDifficulty`] for a difficulty of 0,
/// [`ProgressionError::InvalidRating`] for a rating outside
/// `1..=max_rating`, and [`ProgressionError::ArithmeticOverflow`] if the
/// product overflows.
pub fn points_for_completion(
    cfg: &PointsConfig,
    event: &TaskCompletion,
) -> Result<u64, ProgressionError> {
    if event.difficulty == 0 {
        return Err(ProgressionError::InvalidDifficulty {
            difficulty: event.difficulty,
        });
    }

    let base = u64::from(event.difficulty)
        .checked_mul(cfg.base_per_difficulty)
        .ok_or_else(|| overflow("difficulty points"))?;

    let bonus = match event.rating {
        None => 0,
        Some(rating) if rating == 0 || rating > cfg.max_rating => {
            return Err(ProgressionError::InvalidRating {
                rating,
                max_rating: cfg.max_rating,
            });
        }
        Some(rating) => u64::from(rating)
            .checked_mul(cfg.rating_bonus_per_star)
            .ok_or_else(|| overflow("rating bonus"))?,
    };

    base.checked_add(bonus)
        .ok_or_else(|| overflow("completion points"))
}

/// Lifetime points at which `level` begins.
///
/// Returns `None` for level 0 (levels start at 1) or on overflow.
pub fn level_threshold(cfg: &PointsConfig, level: u32) -> Option<u64> {
    let steps = level.checked_sub(1)?;
    cfg.base_level_points.checked_mul(u64::from(steps))
}

/// Derive the level for a lifetime point total.
///
/// The result is the unique level with
/// `level_threshold(level) <= points < level_threshold(level + 1)`.
pub fn level_for_points(cfg: &PointsConfig, points: u64) -> u32 {
    let completed = points.checked_div(cfg.base_level_points).unwrap_or(0);
    u32::try_from(completed)
        .unwrap_or(u32::MAX)
        .saturating_add(1)
}

/// Level of a user, derived from their lifetime total.
pub fn level_of(cfg: &PointsConfig, user: &UserProgress) -> u32 {
    level_for_points(cfg, user.total_points)
}

/// Describe where a point total sits within its level.
pub fn level_progress(cfg: &PointsConfig, points: u64) -> LevelProgress {
    let level = level_for_points(cfg, points);
    let start = level_threshold(cfg, level).unwrap_or(0);
    let next = level
        .checked_add(1)
        .and_then(|l| level_threshold(cfg, l))
        .unwrap_or(u64::MAX);

    LevelProgress {
        level,
        points_into_level: points.saturating_sub(start),
        points_to_next_level: next.saturating_sub(points),
    }
}

/// Credit points to a user and report any level-up.
///
/// Both the lifetime total and the spendable balance grow by `amount`. When
/// the award crosses several thresholds only the final level is reported.
///
/// # Errors
///
/// Returns [`ProgressionError::ArithmeticOverflow`] if either total would
/// overflow. The user is left unchanged in that case.
pub fn credit_points(
    cfg: &PointsConfig,
    user: &mut UserProgress,
    amount: u64,
) -> Result<PointsAward, ProgressionError> {
    let new_total = user
        .total_points
        .checked_add(amount)
        .ok_or_else(|| overflow("lifetime points"))?;
    let new_balance = user
        .balance
        .checked_add(amount)
        .ok_or_else(|| overflow("points balance"))?;

    let previous_level = level_for_points(cfg, user.total_points);
    let new_level = level_for_points(cfg, new_total);

    user.total_points = new_total;
    user.balance = new_balance;

    let level_up = (new_level > previous_level).then_some(LevelUp {
        previous_level,
        new_level,
    });

    if let Some(up) = level_up {
        tracing::info!(
            user_id = %user.user_id,
            previous_level = up.previous_level,
            new_level = up.new_level,
            total_points = new_total,
            "level up"
        );
    }

    Ok(PointsAward {
        points_awarded: amount,
        new_total,
        level_up,
    })
}

/// Score a task completion and credit it to the user.
///
/// # Errors
///
/// Returns the errors of [`points_for_completion`] and [`credit_points`].
/// Nothing is credited when the completion is rejected.
pub fn award_task_completion(
    cfg: &PointsConfig,
    user: &mut UserProgress,
    event: &TaskCompletion,
) -> Result<PointsAward, ProgressionError> {
    let points = points_for_completion(cfg, event)?;
    let award = credit_points(cfg, user, points)?;
    tracing::debug!(
        user_id = %user.user_id,
        task_id = %event.task_id,
        difficulty = event.difficulty,
        rating = ?event.rating,
        points,
        "task completion scored"
    );
    Ok(award)
}

fn overflow(context: &str) -> ProgressionError {
    ProgressionError::ArithmeticOverflow {
        context: format!("{context} overflow"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use grove_types::{TaskId, UserId};

    use super::*;

    fn completion(difficulty: u32, rating: Option<u32>) -> TaskCompletion {
        TaskCompletion {
            task_id: TaskId::new(),
            difficulty,
            rating,
            completed_at: Utc::now(),
            plant_id: None,
        }
    }

    fn fresh_user() -> UserProgress {
        UserProgress::new(UserId::new(), Utc::now())
    }

    // -----------------------------------------------------------------------
    // Scoring
    // -----------------------------------------------------------------------

    #[test]
    fn difficulty_and_rating_scoring() {
        // 2 * 50 + 4 * 10 = 140
        let cfg = PointsConfig::default();
        assert_eq!(points_for_completion(&cfg, &completion(2, Some(4))).ok(), Some(140));
    }

    #[test]
    fn unrated_completion_has_no_bonus() {
        let cfg = PointsConfig::default();
        assert_eq!(points_for_completion(&cfg, &completion(3, None)).ok(), Some(150));
    }

    #[test]
    fn difficulty_has_no_upper_bound() {
        let cfg = PointsConfig::default();
        assert_eq!(points_for_completion(&cfg, &completion(10, None)).ok(), Some(500));
    }

    #[test]
    fn custom_base_per_difficulty() {
        let cfg = PointsConfig {
            base_per_difficulty: 10,
            ..PointsConfig::default()
        };
        // 2 * 10 + 5 * 10 = 70
        assert_eq!(points_for_completion(&cfg, &completion(2, Some(5))).ok(), Some(70));
    }

    #[test]
    fn zero_difficulty_rejected() {
        let cfg = PointsConfig::default();
        assert!(matches!(
            points_for_completion(&cfg, &completion(0, None)),
            Err(ProgressionError::InvalidDifficulty { difficulty: 0 })
        ));
    }

    #[test]
    fn out_of_range_rating_rejected() {
        let cfg = PointsConfig::default();
        assert!(matches!(
            points_for_completion(&cfg, &completion(1, Some(0))),
            Err(ProgressionError::InvalidRating { rating: 0, .. })
        ));
        assert!(matches!(
            points_for_completion(&cfg, &completion(1, Some(6))),
            Err(ProgressionError::InvalidRating { rating: 6, max_rating: 5 })
        ));
    }

    #[test]
    fn scoring_overflow_is_an_error() {
        let cfg = PointsConfig {
            base_per_difficulty: u64::MAX,
            ..PointsConfig::default()
        };
        assert!(matches!(
            points_for_completion(&cfg, &completion(2, None)),
            Err(ProgressionError::ArithmeticOverflow { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // Levels
    // -----------------------------------------------------------------------

    #[test]
    fn level_thresholds() {
        let cfg = PointsConfig::default();
        assert_eq!(level_threshold(&cfg, 0), None);
        assert_eq!(level_threshold(&cfg, 1), Some(0));
        assert_eq!(level_threshold(&cfg, 2), Some(200));
        assert_eq!(level_threshold(&cfg, 5), Some(800));
    }

    #[test]
    fn level_from_points() {
        let cfg = PointsConfig::default();
        assert_eq!(level_for_points(&cfg, 0), 1);
        assert_eq!(level_for_points(&cfg, 199), 1);
        assert_eq!(level_for_points(&cfg, 200), 2);
        assert_eq!(level_for_points(&cfg, 399), 2);
        assert_eq!(level_for_points(&cfg, 400), 3);
    }

    #[test]
    fn level_always_matches_thresholds() {
        let cfg = PointsConfig::default();
        for points in (0..5_000).step_by(37) {
            let level = level_for_points(&cfg, points);
            let low = level_threshold(&cfg, level).unwrap_or(u64::MAX);
            let high = level_threshold(&cfg, level + 1).unwrap_or(0);
            assert!(low <= points && points < high, "points {points} level {level}");
        }
    }

    #[test]
    fn level_progress_within_level() {
        let cfg = PointsConfig::default();
        let progress = level_progress(&cfg, 450);
        assert_eq!(progress.level, 3);
        assert_eq!(progress.points_into_level, 50);
        assert_eq!(progress.points_to_next_level, 150);
    }

    // -----------------------------------------------------------------------
    // Awards
    // -----------------------------------------------------------------------

    #[test]
    fn award_without_level_up() {
        let cfg = PointsConfig::default();
        let mut user = fresh_user();
        let award = award_task_completion(&cfg, &mut user, &completion(2, Some(4)));
        let award = award.ok();
        assert_eq!(award.map(|a| a.points_awarded), Some(140));
        assert_eq!(award.map(|a| a.new_total), Some(140));
        assert_eq!(award.and_then(|a| a.level_up), None);
        assert_eq!(user.total_points, 140);
        assert_eq!(user.balance, 140);
    }

    #[test]
    fn award_crossing_one_threshold() {
        let cfg = PointsConfig::default();
        let mut user = fresh_user();
        user.total_points = 150;
        let award = credit_points(&cfg, &mut user, 60).ok();
        assert_eq!(
            award.and_then(|a| a.level_up),
            Some(LevelUp {
                previous_level: 1,
                new_level: 2
            })
        );
    }

    #[test]
    fn multi_level_jump_reports_final_level_once() {
        let cfg = PointsConfig::default();
        let mut user = fresh_user();
        user.total_points = 190;
        // 190 + 450 = 640 -> level 4, crossing 200, 400 and 600.
        let award = credit_points(&cfg, &mut user, 450).ok();
        assert_eq!(
            award.and_then(|a| a.level_up),
            Some(LevelUp {
                previous_level: 1,
                new_level: 4
            })
        );
        assert_eq!(level_of(&cfg, &user), 4);
    }

    #[test]
    fn rejected_completion_changes_nothing() {
        let cfg = PointsConfig::default();
        let mut user = fresh_user();
        let before = user.clone();
        assert!(award_task_completion(&cfg, &mut user, &completion(0, None)).is_err());
        assert_eq!(user, before);
    }

    #[test]
    fn awards_are_monotonic() {
        let cfg = PointsConfig::default();
        let mut user = fresh_user();
        let mut previous = 0;
        for difficulty in 1..=5 {
            for rating in [None, Some(1), Some(5)] {
                let award = award_task_completion(&cfg, &mut user, &completion(difficulty, rating));
                let total = award.map(|a| a.new_total).unwrap_or(0);
                assert!(total > previous);
                previous = total;
            }
        }
    }

    #[test]
    fn credit_overflow_leaves_user_unchanged() {
        let cfg = PointsConfig::default();
        let mut user = fresh_user();
        user.total_points = u64::MAX;
        let before = user.clone();
        assert!(credit_points(&cfg, &mut user, 1).is_err());
        assert_eq!(user, before);
    }
}
