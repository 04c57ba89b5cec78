//! Opening-hours evaluation.
//!
//! A location is open when the supplied instant falls inside its daily
//! window. Windows whose closing time precedes the opening time wrap past
//! midnight. Missing or unparsable times are treated as closed.

use std::fmt;

use chrono::NaiveTime;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parse an `H:MM` or `HH:MM` time of day.
///
/// Surrounding whitespace is ignored. The input must contain exactly one
/// `:` separating an hour in `0..=23` and a minute in `0..=59`; anything
/// else, including seconds, yields `None`.
///
/// # Examples
/// ```
/// use chrono::NaiveTime;
/// use nearby_core::parse_time_of_day;
///
/// assert_eq!(parse_time_of_day(" 8:05 "), NaiveTime::from_hms_opt(8, 5, 0));
/// assert_eq!(parse_time_of_day("24:00"), None);
/// assert_eq!(parse_time_of_day("closed"), None);
/// ```
#[must_use]
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let (hour_part, minute_part) = raw.trim().split_once(':')?;
    if minute_part.contains(':') {
        return None;
    }
    let hour: u32 = hour_part.parse().ok()?;
    let minute: u32 = minute_part.parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Report whether a daily window contains `now`.
///
/// Both bounds are inclusive. When `close` precedes `open` the window wraps
/// past midnight and the location is closed only strictly between `close`
/// and `open`. A missing bound means closed.
///
/// # Examples
/// ```
/// use chrono::NaiveTime;
/// use nearby_core::is_open;
///
/// let at = |h, m| NaiveTime::from_hms_opt(h, m, 0);
/// let now = at(1, 0).unwrap_or_default();
///
/// assert!(is_open(at(22, 0), at(2, 0), now));
/// assert!(!is_open(at(8, 0), at(22, 0), now));
/// assert!(!is_open(None, at(22, 0), now));
/// ```
#[must_use]
pub fn is_open(open: Option<NaiveTime>, close: Option<NaiveTime>, now: NaiveTime) -> bool {
    let (Some(opens), Some(closes)) = (open, close) else {
        return false;
    };
    if closes < opens {
        now >= opens || now <= closes
    } else {
        now >= opens && now <= closes
    }
}

/// A location's opening window for the current day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OpeningHours {
    /// Opening time, if known.
    pub open: Option<NaiveTime>,
    /// Closing time, if known.
    pub close: Option<NaiveTime>,
}

impl OpeningHours {
    /// Hours for a location with no known window; it is never open.
    pub const CLOSED: Self = Self {
        open: None,
        close: None,
    };

    /// Construct hours from already-parsed bounds.
    #[must_use]
    pub const fn new(open: Option<NaiveTime>, close: Option<NaiveTime>) -> Self {
        Self { open, close }
    }

    /// Construct hours from raw `HH:MM` strings.
    ///
    /// Blank or malformed values become `None`, which keeps the location
    /// closed rather than guessing.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveTime;
    /// use nearby_core::OpeningHours;
    ///
    /// let hours = OpeningHours::parse(Some("08:00"), Some("late"));
    /// assert_eq!(hours.open, NaiveTime::from_hms_opt(8, 0, 0));
    /// assert_eq!(hours.close, None);
    /// ```
    #[must_use]
    pub fn parse(open: Option<&str>, close: Option<&str>) -> Self {
        Self {
            open: open.and_then(parse_time_of_day),
            close: close.and_then(parse_time_of_day),
        }
    }

    /// Whether both bounds are known.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        self.open.is_some() && self.close.is_some()
    }

    /// Whether the window wraps past midnight.
    #[must_use]
    pub fn is_overnight(&self) -> bool {
        matches!((self.open, self.close), (Some(opens), Some(closes)) if closes < opens)
    }

    /// Whether the location is open at `now`.
    #[must_use]
    pub fn is_open_at(&self, now: NaiveTime) -> bool {
        is_open(self.open, self.close, now)
    }
}

impl fmt::Display for OpeningHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.open, self.close) {
            (Some(opens), Some(closes)) => {
                write!(f, "{}-{}", opens.format("%H:%M"), closes.format("%H:%M"))
            }
            _ => f.write_str("closed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
    }

    #[rstest]
    #[case("08:00", Some(at(8, 0)))]
    #[case("8:5", Some(at(8, 5)))]
    #[case("  23:59\t", Some(at(23, 59)))]
    #[case("00:00", Some(at(0, 0)))]
    #[case("24:00", None)]
    #[case("12:60", None)]
    #[case("12", None)]
    #[case("12:", None)]
    #[case(":30", None)]
    #[case("12:30:00", None)]
    #[case("ab:cd", None)]
    #[case("-1:00", None)]
    #[case("", None)]
    #[case("   ", None)]
    fn parses_hour_minute_strings(#[case] raw: &str, #[case] expected: Option<NaiveTime>) {
        assert_eq!(parse_time_of_day(raw), expected);
    }

    #[rstest]
    #[case(at(8, 0), at(22, 0), at(14, 0), true)]
    #[case(at(15, 0), at(16, 0), at(14, 0), false)]
    #[case(at(8, 0), at(22, 0), at(8, 0), true)]
    #[case(at(8, 0), at(22, 0), at(22, 0), true)]
    #[case(at(8, 0), at(22, 0), at(22, 1), false)]
    #[case(at(8, 0), at(22, 0), at(7, 59), false)]
    #[case(at(9, 0), at(9, 0), at(9, 0), true)]
    #[case(at(9, 0), at(9, 0), at(9, 1), false)]
    fn same_day_window_is_inclusive(
        #[case] open: NaiveTime,
        #[case] close: NaiveTime,
        #[case] now: NaiveTime,
        #[case] expected: bool,
    ) {
        assert_eq!(is_open(Some(open), Some(close), now), expected);
    }

    #[rstest]
    #[case(at(23, 0), true)]
    #[case(at(1, 0), true)]
    #[case(at(10, 0), false)]
    #[case(at(22, 0), true)]
    #[case(at(2, 0), true)]
    #[case(at(2, 1), false)]
    #[case(at(21, 59), false)]
    #[case(at(0, 0), true)]
    fn overnight_window_wraps_past_midnight(#[case] now: NaiveTime, #[case] expected: bool) {
        assert_eq!(is_open(Some(at(22, 0)), Some(at(2, 0)), now), expected);
    }

    #[rstest]
    #[case(None, Some(at(22, 0)))]
    #[case(Some(at(8, 0)), None)]
    #[case(None, None)]
    fn missing_bounds_mean_closed(
        #[case] open: Option<NaiveTime>,
        #[case] close: Option<NaiveTime>,
    ) {
        assert!(!is_open(open, close, at(12, 0)));
    }

    #[rstest]
    fn unparsable_hours_fail_closed() {
        let hours = OpeningHours::parse(Some("open 24h"), Some("22:00"));
        assert!(!hours.is_known());
        assert!(!hours.is_open_at(at(12, 0)));
    }

    #[rstest]
    fn overnight_detection() {
        assert!(OpeningHours::parse(Some("22:00"), Some("03:00")).is_overnight());
        assert!(!OpeningHours::parse(Some("08:00"), Some("22:00")).is_overnight());
        assert!(!OpeningHours::CLOSED.is_overnight());
    }

    #[rstest]
    fn displays_window_or_closed() {
        let hours = OpeningHours::parse(Some("8:00"), Some("22:30"));
        assert_eq!(hours.to_string(), "08:00-22:30");
        assert_eq!(OpeningHours::CLOSED.to_string(), "closed");
    }
}
