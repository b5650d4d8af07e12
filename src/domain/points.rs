//! Point rule evaluator for composite meeting-attendance events.
//!
//! Pure functions of the configured weights plus the flags collected by the
//! recording form; no store access.

use crate::domain::models::PointWeights;

/// Attendance criteria checked off for a single meeting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeetingFlags {
    pub bible: bool,
    pub scarf: bool,
    pub punctual: bool,
    pub notebook: bool,
}

/// Total point value of a meeting: the configured weight of each checked
/// criterion plus the bonus contribution.
pub fn meeting_points(weights: &PointWeights, flags: &MeetingFlags, bonus: &str) -> i64 {
    let mut total = 0;
    if flags.bible {
        total += weights.bible;
    }
    if flags.scarf {
        total += weights.scarf;
    }
    if flags.punctual {
        total += weights.punctual;
    }
    if flags.notebook {
        total += weights.notebook;
    }
    total + parse_bonus(bonus)
}

/// Parse a bonus selector into its point contribution.
///
/// Policy, not a parsing quirk: bonus inputs are loosely formatted. A value
/// that parses as a whole integer is taken as-is; otherwise the leading run
/// of digits is used and the alphanumeric suffix discarded ("5b" counts 5);
/// a value with no leading digits contributes nothing.
pub fn parse_bonus(raw: &str) -> i64 {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return n;
    }
    let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}
