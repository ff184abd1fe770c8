//! The processor's fixed 14-digit timestamp format.
//!
//! Request creation and settlement times travel as `YYYYMMDDHHmmss`
//! strings, e.g. `20260807143000`. [`CreateDate`] wraps a calendar
//! date-time and round-trips through that exact form.

use std::fmt::{Display, Formatter};

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const FORMAT: &str = "%Y%m%d%H%M%S";

/// A wall-clock timestamp in the gateway's `YYYYMMDDHHmmss` wire form.
///
/// The processor interprets timestamps in its own local zone; merchants
/// that need an explicit offset construct the value via [`Self::from_datetime`]
/// instead of [`Self::now`].
///
/// # Serialization
///
/// Serialized as the fixed 14-digit string, never as a number:
///
/// ```json
/// "20260807143000"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CreateDate(NaiveDateTime);

impl CreateDate {
    /// Wraps an explicit date-time.
    #[must_use]
    pub const fn from_datetime(dt: NaiveDateTime) -> Self {
        Self(dt)
    }

    /// Returns the current UTC time.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now().naive_utc())
    }

    /// Parses the 14-digit wire form.
    ///
    /// # Errors
    ///
    /// Returns a parse error if `s` is not a valid `YYYYMMDDHHmmss` string.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        NaiveDateTime::parse_from_str(s, FORMAT).map(Self)
    }

    /// Returns the wrapped date-time.
    #[must_use]
    pub const fn as_datetime(&self) -> NaiveDateTime {
        self.0
    }
}

impl Display for CreateDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl Serialize for CreateDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CreateDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn sample() -> CreateDate {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let time = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
        CreateDate::from_datetime(NaiveDateTime::new(date, time))
    }

    #[test]
    fn test_display_is_fixed_fourteen_digits() {
        assert_eq!(sample().to_string(), "20260807143000");
    }

    #[test]
    fn test_parse_round_trip() {
        let parsed = CreateDate::parse("20260807143000").unwrap();
        assert_eq!(parsed, sample());
        assert_eq!(parsed.to_string(), "20260807143000");
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(CreateDate::parse("2026-08-07 14:30:00").is_err());
        assert!(CreateDate::parse("20261307143000").is_err());
        assert!(CreateDate::parse("").is_err());
    }

    #[test]
    fn test_serde_uses_wire_form() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, "\"20260807143000\"");
        let back: CreateDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}
