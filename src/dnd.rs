//! Quiet-hours ("Do Not Disturb") window evaluation.
//!
//! A window is a pair of local wall-clock times with no date
//! component. Containment is half-open on both ends: the start
//! instant is inside, the end instant is outside. A window whose end
//! is numerically earlier than its start wraps past midnight
//! (22:00–07:00). `start == end` means "no window at all", not a
//! 24-hour window.
//!
//! All comparisons happen in the instant's own offset-local clock.
//! The offset attached to a timestamp is used to parse it correctly
//! and is then discarded — a 01:30+02:00 event at 23:30 UTC is
//! inside a 22:00–07:00 window because the *user's* clock says 01:30.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::TimeError;

/// HH:MM in 24h, zero-padded.
static HHMM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").unwrap());

/// Minutes in a day; local minutes-of-day values live in `[0, 1439]`.
const MINUTES_PER_DAY: u16 = 24 * 60;

// ── Time of day ─────────────────────────────────────────────────────

/// A wall-clock time of day, serialized as `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Parse a zero-padded 24h `"HH:MM"` string.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let caps = HHMM
            .captures(s)
            .ok_or_else(|| TimeError::MalformedTimeOfDay(s.to_string()))?;
        // Capture groups are two digits each, bounded by the pattern.
        let hour: u8 = caps[1].parse().unwrap();
        let minute: u8 = caps[2].parse().unwrap();
        Ok(Self { hour, minute })
    }

    /// Minutes since local midnight.
    pub fn minutes(&self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeError;

    fn try_from(s: String) -> Result<Self, TimeError> {
        Self::parse(&s)
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> String {
        t.to_string()
    }
}

// ── Window ──────────────────────────────────────────────────────────

/// A quiet-hours window bounded by two local times of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DndWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl DndWindow {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// `start == end` — a legal state meaning "no active window."
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Is a local minutes-of-day value inside this window?
    ///
    /// Half-open at both ends: `t == start` is inside, `t == end` is
    /// outside, in both the wrapping and non-wrapping cases.
    pub fn contains(&self, t: u16) -> bool {
        debug_assert!(t < MINUTES_PER_DAY);
        let start = self.start.minutes();
        let end = self.end.minutes();

        if start == end {
            return false;
        }
        if start < end {
            return t >= start && t < end;
        }
        // Window crosses midnight (e.g. 22:00–07:00).
        t >= start || t < end
    }

    /// Is the instant inside this window, by its own local clock?
    pub fn contains_instant(&self, instant: &DateTime<FixedOffset>) -> bool {
        self.contains(local_minutes(instant))
    }
}

// ── Local time extraction ───────────────────────────────────────────

/// Minutes since local midnight for an offset-carrying instant.
///
/// `DateTime<FixedOffset>` already reads its clock fields in its own
/// offset, so this never normalizes to UTC or any other zone.
pub fn local_minutes(instant: &DateTime<FixedOffset>) -> u16 {
    (instant.hour() * 60 + instant.minute()) as u16
}

/// Defensive string path: parse an RFC 3339 timestamp and extract
/// local minutes-of-day. Rejects anything without an explicit offset
/// (`Z` counts as UTC+00:00) instead of guessing one.
pub fn local_minutes_from_rfc3339(timestamp: &str) -> Result<u16, TimeError> {
    let instant = DateTime::parse_from_rfc3339(timestamp)
        .map_err(|_| TimeError::MalformedTimestamp(timestamp.to_string()))?;
    Ok(local_minutes(&instant))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: &str, end: &str) -> DndWindow {
        DndWindow::new(TimeOfDay::parse(start).unwrap(), TimeOfDay::parse(end).unwrap())
    }

    #[test]
    fn parses_valid_hhmm() {
        assert_eq!(TimeOfDay::parse("00:00").unwrap().minutes(), 0);
        assert_eq!(TimeOfDay::parse("07:30").unwrap().minutes(), 450);
        assert_eq!(TimeOfDay::parse("23:59").unwrap().minutes(), 23 * 60 + 59);
    }

    #[test]
    fn rejects_malformed_hhmm() {
        for bad in ["7:30", "24:00", "12:60", "aa:bb", "12:3", "", "12:34:56"] {
            assert!(
                matches!(TimeOfDay::parse(bad), Err(TimeError::MalformedTimeOfDay(_))),
                "should reject {bad:?}"
            );
        }
    }

    #[test]
    fn time_of_day_round_trips_through_serde() {
        let t: TimeOfDay = serde_json::from_str("\"09:05\"").unwrap();
        assert_eq!(t.minutes(), 9 * 60 + 5);
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"09:05\"");
    }

    #[test]
    fn local_minutes_ignores_offset() {
        assert_eq!(
            local_minutes_from_rfc3339("2025-08-28T01:30:00+02:00").unwrap(),
            90
        );
        assert_eq!(
            local_minutes_from_rfc3339("2025-08-28T23:00:00Z").unwrap(),
            23 * 60
        );
    }

    #[test]
    fn rejects_malformed_or_offsetless_timestamps() {
        for bad in [
            "2025-08-28T12:00:00", // no offset
            "2025-08-28",
            "12:00:00+02:00",
            "not a timestamp",
        ] {
            assert!(
                matches!(
                    local_minutes_from_rfc3339(bad),
                    Err(TimeError::MalformedTimestamp(_))
                ),
                "should reject {bad:?}"
            );
        }
    }

    #[test]
    fn non_wrapping_window_boundaries() {
        let w = window("22:00", "23:00");
        assert!(!w.contains(TimeOfDay::parse("21:59").unwrap().minutes()));
        assert!(w.contains(TimeOfDay::parse("22:00").unwrap().minutes()));
        // 22:59:59 truncates to 22:59 local minutes.
        assert!(w.contains(TimeOfDay::parse("22:59").unwrap().minutes()));
        assert!(!w.contains(TimeOfDay::parse("23:00").unwrap().minutes()));
    }

    #[test]
    fn wrapping_window_crosses_midnight() {
        let w = window("22:00", "07:00");
        assert!(!w.contains(TimeOfDay::parse("21:00").unwrap().minutes()));
        assert!(w.contains(TimeOfDay::parse("22:00").unwrap().minutes()));
        assert!(w.contains(TimeOfDay::parse("23:59").unwrap().minutes()));
        assert!(w.contains(0)); // midnight itself
        assert!(w.contains(TimeOfDay::parse("02:00").unwrap().minutes()));
        assert!(w.contains(TimeOfDay::parse("06:59").unwrap().minutes()));
        assert!(!w.contains(TimeOfDay::parse("07:00").unwrap().minutes()));
        assert!(!w.contains(TimeOfDay::parse("12:00").unwrap().minutes()));
    }

    #[test]
    fn equal_start_and_end_means_no_window() {
        let w = window("00:00", "00:00");
        for t in [0u16, 1, 450, 719, 720, 1439] {
            assert!(!w.contains(t));
        }
        assert!(w.is_empty());

        let noon = window("12:00", "12:00");
        assert!(!noon.contains(12 * 60));
    }

    #[test]
    fn boundary_exactness_over_all_shapes() {
        for (start, end) in [("08:00", "17:00"), ("22:00", "07:00")] {
            let w = window(start, end);
            assert!(w.contains(TimeOfDay::parse(start).unwrap().minutes()));
            assert!(!w.contains(TimeOfDay::parse(end).unwrap().minutes()));
        }
    }

    #[test]
    fn exhaustive_agreement_with_reference_predicate() {
        // Every minute of the day against one window of each shape.
        let plain = window("09:15", "18:45");
        let wrapped = window("18:45", "09:15");
        for t in 0..MINUTES_PER_DAY {
            let (s, e) = (plain.start.minutes(), plain.end.minutes());
            assert_eq!(plain.contains(t), t >= s && t < e);
            let (s, e) = (wrapped.start.minutes(), wrapped.end.minutes());
            assert_eq!(wrapped.contains(t), t >= s || t < e);
        }
    }

    #[test]
    fn contains_instant_uses_local_clock() {
        let w = window("22:00", "07:00");
        // 01:30 local, 23:30 UTC — the local clock decides.
        let inside = DateTime::parse_from_rfc3339("2025-08-28T01:30:00+02:00").unwrap();
        assert!(w.contains_instant(&inside));
        let outside = DateTime::parse_from_rfc3339("2025-08-28T08:15:00+02:00").unwrap();
        assert!(!w.contains_instant(&outside));
    }

    #[test]
    fn seconds_do_not_push_an_instant_past_the_end() {
        let w = window("22:00", "23:00");
        let last = DateTime::parse_from_rfc3339("2025-08-28T22:59:59+02:00").unwrap();
        assert!(w.contains_instant(&last));
        let end = DateTime::parse_from_rfc3339("2025-08-28T23:00:00+02:00").unwrap();
        assert!(!w.contains_instant(&end));
    }
}
