//! Daily calorie statistics
//!
//! Net-calorie arithmetic and the over/under/on-target classification used
//! when daily stats are read back against a calorie goal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance band around the goal, in percent, before a day is off target
pub const ON_TARGET_TOLERANCE_PERCENT: i64 = 10;

/// How a day's net calories compare to the calorie goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Over,
    Under,
    OnTarget,
}

impl DayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatus::Over => "over",
            DayStatus::Under => "under",
            DayStatus::OnTarget => "on_target",
        }
    }
}

impl fmt::Display for DayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify net calories against a goal with a ±10% band
///
/// - `Over` if net > goal × 1.1
/// - `Under` if net < goal × 0.9
/// - `OnTarget` otherwise (both band edges are on target)
///
/// Compared in integer hundredths so the band edges are exact.
pub fn classify_day(net_calories: i32, calorie_goal: i32) -> DayStatus {
    let net_scaled = net_calories as i64 * 100;
    let upper = calorie_goal as i64 * (100 + ON_TARGET_TOLERANCE_PERCENT);
    let lower = calorie_goal as i64 * (100 - ON_TARGET_TOLERANCE_PERCENT);

    if net_scaled > upper {
        DayStatus::Over
    } else if net_scaled < lower {
        DayStatus::Under
    } else {
        DayStatus::OnTarget
    }
}

/// Consumed/burned/net totals for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DailyTotals {
    pub total_calories_consumed: i32,
    pub total_calories_burned: i32,
    pub net_calories: i32,
}

impl DailyTotals {
    /// Build totals from the day's sums; net is always consumed - burned
    pub fn new(consumed: i32, burned: i32) -> Self {
        Self {
            total_calories_consumed: consumed,
            total_calories_burned: burned,
            net_calories: consumed - burned,
        }
    }
}
