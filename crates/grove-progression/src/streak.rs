//! Login Streak Tracker.
//!
//! Counts consecutive calendar days with a login and picks the day's bonus
//! from [`STREAK_BONUS_TIERS`](crate::rewards::STREAK_BONUS_TIERS).
//!
//! | Last login | Effect on streak |
//! |---|---|
//! | yesterday | +1 |
//! | today | rejected, already claimed |
//! | two or more days ago, or never | reset to 1 |
//!
//! The tracker does not credit the bonus itself; the caller passes
//! [`LoginOutcome::bonus_points`] to
//! [`credit_points`](crate::points::credit_points).

use chrono::NaiveDate;

use grove_types::{LoginOutcome, UserProgress};

use crate::error::ProgressionError;
use crate::rewards::streak_bonus;

/// Record that the user logged in on `today`.
///
/// Updates the streak, longest streak, last-login date, and login counter.
///
/// # Errors
///
/// Returns [`ProgressionError::AlreadyClaimedToday`] if the user already
/// logged in on `today`, and [`ProgressionError::LoginBeforeLastLogin`] if
/// `today` is earlier than the last login. The user is left unchanged on
/// error.
pub fn record_login(
    user: &mut UserProgress,
    today: NaiveDate,
) -> Result<LoginOutcome, ProgressionError> {
    let previous_streak = user.current_streak;

    let streak = match user.last_login {
        Some(last) if last == today => {
            tracing::debug!(user_id = %user.user_id, %today, "login bonus already claimed");
            return Err(ProgressionError::AlreadyClaimedToday { date: today });
        }
        Some(last) if last > today => {
            return Err(ProgressionError::LoginBeforeLastLogin {
                last_login: last,
                today,
            });
        }
        Some(last) if last.succ_opt() == Some(today) => previous_streak.saturating_add(1),
        _ => 1,
    };

    let total_logins = user.total_logins.checked_add(1).ok_or_else(|| {
        ProgressionError::ArithmeticOverflow {
            context: String::from("total logins overflow"),
        }
    })?;

    user.current_streak = streak;
    user.longest_streak = user.longest_streak.max(streak);
    user.last_login = Some(today);
    user.total_logins = total_logins;

    let bonus_points = streak_bonus(streak);
    tracing::debug!(
        user_id = %user.user_id,
        %today,
        previous_streak,
        streak,
        bonus_points,
        "login recorded"
    );

    Ok(LoginOutcome {
        streak,
        previous_streak,
        bonus_points,
    })
}

/// The streak to display on `today`.
///
/// A streak stays alive until the end of the day after the last login.
/// Once a day is missed the stored streak is stale and 0 is shown until the
/// next login resets it.
pub fn active_streak(user: &UserProgress, today: NaiveDate) -> u32 {
    match user.last_login {
        Some(last) if last == today || last.succ_opt() == Some(today) => user.current_streak,
        _ => 0,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
