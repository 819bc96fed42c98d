//! Weight-goal timeline
//!
//! A goal set with a time frame has a target date counted from when the
//! profile was first created.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: i64 = 86_400;

/// Target date and countdown for a weight goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalTimeline {
    pub target_date: DateTime<Utc>,
    pub days_remaining: i64,
}

/// Compute the goal timeline as of `now`
///
/// target = created_at + weeks × 7 days; days remaining rounds partial days
/// up and never goes below zero.
pub fn compute_goal_timeline(
    created_at: DateTime<Utc>,
    time_frame_weeks: i32,
    now: DateTime<Utc>,
) -> GoalTimeline {
    let target_date = created_at + Duration::days(time_frame_weeks as i64 * 7);
    let remaining_secs = (target_date - now).num_seconds();
    let days_remaining = if remaining_secs <= 0 {
        0
    } else {
        (remaining_secs + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
    };

    GoalTimeline {
        target_date,
        days_remaining,
    }
}
