//! Dates and day count conventions.
//!
//! Simulation time is measured in year fractions. When a run is anchored to
//! a calendar date, the horizon is derived from a [`DayCountConvention`]
//! applied between the evaluation date and the end date.
//!
//! # Examples
//!
//! ```
//! use shortrate_core::types::time::{Date, DayCountConvention};
//!
//! let start = Date::from_ymd(2025, 4, 26).unwrap();
//! let end = Date::from_ymd(2025, 10, 23).unwrap();
//!
//! // 180 days under ACT/360 is exactly half a year
//! let yf = DayCountConvention::Actual360.year_fraction(start, end);
//! assert!((yf - 0.5).abs() < 1e-12);
//! ```

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Serialises as an ISO 8601 string.
///
/// # Examples
///
/// ```
/// use shortrate_core::types::time::Date;
///
/// let date = Date::from_ymd(2025, 4, 26).unwrap();
/// let parsed: Date = "2025-04-26".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let later = Date::from_ymd(2025, 5, 6).unwrap();
/// assert_eq!(later - date, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Errors
    ///
    /// `DateError::InvalidDate` when the components do not form a calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(e.to_string()))
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl Sub for Date {
    type Output = i64;

    /// Number of calendar days from `other` to `self`.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Day count convention used to turn a pair of dates into a year fraction.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayCountConvention {
    /// Actual/360: actual_days / 360.0
    #[default]
    Actual360,

    /// Actual/365 Fixed: actual_days / 365.0
    Actual365Fixed,

    /// 30/360 US Bond Basis
    Thirty360,
}

impl DayCountConvention {
    /// Returns the standard convention name.
    ///
    /// ```
    /// use shortrate_core::types::time::DayCountConvention;
    ///
    /// assert_eq!(DayCountConvention::Actual360.name(), "ACT/360");
    /// assert_eq!(DayCountConvention::Actual365Fixed.name(), "ACT/365");
    /// assert_eq!(DayCountConvention::Thirty360.name(), "30/360");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Actual360 => "ACT/360",
            DayCountConvention::Actual365Fixed => "ACT/365",
            DayCountConvention::Thirty360 => "30/360",
        }
    }

    /// Year fraction between two dates.
    ///
    /// Negative when `start > end`; the sign encodes direction.
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        match self {
            DayCountConvention::Actual360 => (end - start) as f64 / 360.0,
            DayCountConvention::Actual365Fixed => (end - start) as f64 / 365.0,
            DayCountConvention::Thirty360 => {
                let (lo, hi, sign) = if start <= end {
                    (start, end, 1.0)
                } else {
                    (end, start, -1.0)
                };

                // US adjustments
                let d1 = if lo.day() == 31 { 30 } else { lo.day() };
                let d2 = if hi.day() == 31 && d1 == 30 {
                    30
                } else {
                    hi.day()
                };

                let days = 360 * (hi.year() - lo.year())
                    + 30 * (hi.month() as i32 - lo.month() as i32)
                    + (d2 as i32 - d1 as i32);
                sign * days as f64 / 360.0
            }
        }
    }
}

impl FromStr for DayCountConvention {
    type Err = String;

    /// Parses a convention name (case-insensitive, separators ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace(['/', ' '], "").as_str() {
            "ACT360" | "ACTUAL360" | "A360" => Ok(DayCountConvention::Actual360),
            "ACT365" | "ACT365F" | "ACTUAL365" | "ACTUAL365FIXED" | "A365" => {
                Ok(DayCountConvention::Actual365Fixed)
            }
            "30360" | "THIRTY360" => Ok(DayCountConvention::Thirty360),
            _ => Err(format!("Unknown day count convention: {}", s)),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::DayCountConvention;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for DayCountConvention {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for DayCountConvention {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            DayCountConvention::from_str(&s).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_date_from_ymd_invalid() {
        assert!(Date::from_ymd(2025, 2, 29).is_err());
        assert!(Date::from_ymd(2024, 2, 29).is_ok());
    }

    #[test]
    fn test_date_parse_and_display() {
        let date: Date = "2025-04-26".parse().unwrap();
        assert_eq!(date.to_string(), "2025-04-26");
        assert!(Date::parse("26/04/2025").is_err());
    }

    #[test]
    fn test_date_difference() {
        let start = Date::from_ymd(2025, 4, 26).unwrap();
        let end = Date::from_ymd(2025, 5, 26).unwrap();
        assert_eq!(end - start, 30);
        assert_eq!(start - end, -30);
    }

    #[test]
    fn test_actual_360() {
        let start = Date::from_ymd(2025, 4, 26).unwrap();
        let end = Date::from_ymd(2026, 4, 26).unwrap();
        assert_relative_eq!(
            DayCountConvention::Actual360.year_fraction(start, end),
            365.0 / 360.0
        );
    }

    #[test]
    fn test_actual_365_reversed_is_negative() {
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2026, 1, 1).unwrap();
        let yf = DayCountConvention::Actual365Fixed.year_fraction(end, start);
        assert_relative_eq!(yf, -1.0);
    }

    #[test]
    fn test_thirty_360_month_end() {
        let start = Date::from_ymd(2025, 1, 31).unwrap();
        let end = Date::from_ymd(2025, 3, 31).unwrap();
        assert_relative_eq!(
            DayCountConvention::Thirty360.year_fraction(start, end),
            60.0 / 360.0
        );
    }

    #[test]
    fn test_day_count_parsing() {
        assert_eq!(
            "act/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Actual360
        );
        assert_eq!(
            "Actual/365 Fixed".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Actual365Fixed
        );
        assert_eq!(
            "30/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Thirty360
        );
        assert!("BUS/252".parse::<DayCountConvention>().is_err());
    }

    #[test]
    fn test_default_is_actual_360() {
        assert_eq!(DayCountConvention::default(), DayCountConvention::Actual360);
    }
}
