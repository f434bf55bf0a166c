//! Error types for the grove-progression crate.
//!
//! Every rejected precondition is a typed variant so the caller can tell
//! them apart when choosing a user-facing message. None of them are
//! retryable.

use chrono::NaiveDate;

/// Errors that can occur during points, streak, and activity operations.
#[derive(Debug, thiserror::Error)]
pub enum ProgressionError {
    /// Task difficulty must be at least 1.
    #[error("invalid task difficulty {difficulty}: must be at least 1")]
    InvalidDifficulty {
        /// The rejected difficulty.
        difficulty: u32,
    },

    /// Rating is outside `1..=max_rating`.
    #[error("invalid rating {rating}: must be between 1 and {max_rating}")]
    InvalidRating {
        /// The rejected rating.
        rating: u32,
        /// The highest accepted rating.
        max_rating: u32,
    },

    /// The login bonus for this date was already claimed.
    #[error("login bonus already claimed for {date}")]
    AlreadyClaimedToday {
        /// The date that was already claimed.
        date: NaiveDate,
    },

    /// The login date is earlier than the last recorded login.
    #[error("login date {today} is before last login {last_login}")]
    LoginBeforeLastLogin {
        /// The last recorded login.
        last_login: NaiveDate,
        /// The date passed in as today.
        today: NaiveDate,
    },

    /// Activity range covers more days than one aggregation allows.
    #[error("activity range of {days} days exceeds the limit of {max_days}")]
    ActivityRangeTooLong {
        /// Days covered by the requested range.
        days: i64,
        /// Configured limit.
        max_days: u32,
    },

    /// Activity range starts after it ends.
    #[error("invalid date range: {start} is after {end}")]
    InvalidDateRange {
        /// First day requested.
        start: NaiveDate,
        /// Last day requested.
        end: NaiveDate,
    },

    /// An arithmetic overflow occurred.
    #[error("arithmetic overflow: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },
}
