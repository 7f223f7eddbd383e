use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat};
use serde::{Serialize, Serializer};
use std::{cmp::Ordering, hash::Hash};

/// Wall-clock time the binary was built, with the offset the build tooling wrote.
///
/// A parsed value renders exactly as it was injected. Equality, ordering and
/// hashing compare the instant only.
#[derive(Debug, Clone)]
pub struct BuildTime {
    time: DateTime<FixedOffset>,
    raw: Option<Box<str>>,
}

impl BuildTime {
    /// Timestamp of unstamped builds: `0001-01-01T00:00:00Z`.
    pub fn zero() -> Self {
        let date = NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN);
        date.and_time(NaiveTime::MIN).and_utc().fixed_offset().into()
    }

    /// Parse an injected RFC 3339 build time. Empty input yields [`BuildTime::zero`].
    pub fn parse_injected(value: &str) -> Result<Self, chrono::ParseError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(Self::zero());
        }
        let time = DateTime::parse_from_rfc3339(value)?;
        Ok(Self {
            time,
            raw: Some(value.into()),
        })
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.time
    }

    /// RFC 3339 rendering. Parsed values keep their injected text; others
    /// use `Z` for a zero offset and fractional seconds only when present.
    pub fn to_rfc3339(&self) -> String {
        match &self.raw {
            Some(raw) => raw.to_string(),
            None => self.time.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

impl Default for BuildTime {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<DateTime<FixedOffset>> for BuildTime {
    fn from(time: DateTime<FixedOffset>) -> Self {
        Self { time, raw: None }
    }
}

impl PartialEq for BuildTime {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time
    }
}

impl Eq for BuildTime {}

impl PartialOrd for BuildTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BuildTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time.cmp(&other.time)
    }
}

impl Hash for BuildTime {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.time.hash(state);
    }
}

impl std::fmt::Display for BuildTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for BuildTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::BuildTime;
    use chrono::DateTime;

    #[test]
    fn round_trip() {
        for value in [
            "2024-01-01T00:00:00Z",
            "2024-06-15T12:34:56+02:00",
            "1999-12-31T23:59:59-05:30",
            "2024-02-29T08:00:00.123Z",
            "2024-02-29T08:00:00.123456+09:00",
            "2024-02-29T08:00:00.123456789Z",
            "2024-02-29T08:00:00.1Z",
            "2024-02-29T08:00:00.1234Z",
            "2024-02-29T08:00:00.000Z",
            "2024-01-01T00:00:00+00:00",
            "2024-01-01t00:00:00z",
        ] {
            let parsed = BuildTime::parse_injected(value).unwrap();
            assert_eq!(parsed.to_string(), value);
        }
    }

    #[test]
    fn equal_instants_compare_equal() {
        let utc = BuildTime::parse_injected("2024-01-01T00:00:00Z").unwrap();
        let offset = BuildTime::parse_injected("2024-01-01T02:00:00+02:00").unwrap();
        assert_eq!(utc, offset);
        assert_ne!(utc.to_string(), offset.to_string());
    }

    #[test]
    fn keeps_offset() {
        let parsed = BuildTime::parse_injected("2024-06-15T12:34:56+02:00").unwrap();
        assert_eq!(parsed.as_datetime().offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn from_datetime_renders_rfc3339() {
        let time = DateTime::parse_from_rfc3339("2024-05-01T10:00:00.500+00:00").unwrap();
        assert_eq!(BuildTime::from(time).to_string(), "2024-05-01T10:00:00.500Z");
    }

    #[test]
    fn empty_is_zero() {
        let parsed = BuildTime::parse_injected("").unwrap();
        assert!(parsed.is_zero());
        assert_eq!(parsed, BuildTime::default());
        assert_eq!(parsed.to_string(), "0001-01-01T00:00:00Z");
    }

    #[test]
    fn malformed() {
        assert!(BuildTime::parse_injected("2024-01-01").is_err());
        assert!(BuildTime::parse_injected("yesterday").is_err());
        assert!(BuildTime::parse_injected("2024-13-01T00:00:00Z").is_err());
    }

    #[test]
    fn serializes_as_rfc3339() {
        let parsed = BuildTime::parse_injected("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            "\"2024-01-01T00:00:00Z\""
        );
    }
}
