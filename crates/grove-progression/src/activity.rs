//! Activity Aggregator.
//!
//! Buckets task completions by calendar day (UTC date of `completed_at`)
//! and classifies each day into a heatmap tier. Day points use the same
//! formula as [`points_for_completion`], so the heatmap can never disagree
//! with what the user was actually awarded.
//!
//! Buckets are recomputed from the event log on every call; nothing is
//! maintained incrementally.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use grove_types::{ActivityBucket, ActivitySummary, DateRange, TaskCompletion};

use crate::config::PointsConfig;
use crate::error::ProgressionError;
use crate::points::points_for_completion;
use crate::rewards::intensity_tier;

/// Produce one bucket per day in `range`, oldest first.
///
/// Days without completions get an all-zero bucket at the idle tier.
/// Completions outside the range are ignored.
///
/// # Errors
///
/// Returns [`ProgressionError::InvalidDateRange`] when `range.start` is
/// after `range.end`, [`ProgressionError::ActivityRangeTooLong`] when the
/// range spans more than `cfg.max_activity_days`, and any scoring error for a completion inside the
/// range (an invalid completion is reported, never skipped).
pub fn aggregate_activity(
    cfg: &PointsConfig,
    events: &[TaskCompletion],
    range: DateRange,
) -> Result<Vec<ActivityBucket>, ProgressionError> {
    if range.start > range.end {
        return Err(ProgressionError::InvalidDateRange {
            start: range.start,
            end: range.end,
        });
    }
    let days = range
        .end
        .signed_duration_since(range.start)
        .num_days()
        .saturating_add(1);
    if days > i64::from(cfg.max_activity_days) {
        return Err(ProgressionError::ActivityRangeTooLong {
            days,
            max_days: cfg.max_activity_days,
        });
    }

    let mut per_day: BTreeMap<NaiveDate, (u32, u64)> = BTreeMap::new();
    for event in events {
        let date = event.completed_at.date_naive();
        if !range.contains(date) {
            continue;
        }
        let points = points_for_completion(cfg, event)?;
        let (count, total) = per_day.entry(date).or_insert((0, 0));
        *count = count.checked_add(1).ok_or_else(|| overflow(date, "count"))?;
        *total = total.checked_add(points).ok_or_else(|| overflow(date, "points"))?;
    }

    let buckets: Vec<ActivityBucket> = range
        .start
        .iter_days()
        .take_while(|date| *date <= range.end)
        .map(|date| {
            let (count, points) = per_day.get(&date).copied().unwrap_or((0, 0));
            ActivityBucket {
                date,
                count,
                points,
                tier: intensity_tier(points),
            }
        })
        .collect();

    tracing::debug!(
        start = %range.start,
        end = %range.end,
        days = buckets.len(),
        active_days = per_day.len(),
        "activity aggregated"
    );

    Ok(buckets)
}

/// Summarize a run of consecutive day buckets.
pub fn summarize(buckets: &[ActivityBucket]) -> ActivitySummary {
    let mut summary = ActivitySummary::default();
    let mut run: u32 = 0;

    for bucket in buckets {
        summary.total_completions = summary
            .total_completions
            .saturating_add(u64::from(bucket.count));
        summary.total_points = summary.total_points.saturating_add(bucket.points);

        if bucket.count > 0 {
            summary.active_days = summary.active_days.saturating_add(1);
            run = run.saturating_add(1);
            summary.longest_active_run = summary.longest_active_run.max(run);
        } else {
            run = 0;
        }
    }

    summary
}

fn overflow(date: NaiveDate, what: &str) -> ProgressionError {
    ProgressionError::ArithmeticOverflow {
        context: format!("activity {what} overflow on {date}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
