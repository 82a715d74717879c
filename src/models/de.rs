use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer};

/// Custom deserializer for backend timestamps.
///
/// The backend emits RFC3339 instants for some records and naive
/// `YYYY-MM-DDTHH:MM:SS[.ffffff]` strings (no offset) for others; naive
/// values are taken as UTC.
pub fn deserialize_instant<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_instant(&s).map_err(Error::custom)
}

/// Optional variant of [`deserialize_instant`]; `null` and absent map to `None`.
pub fn deserialize_opt_instant<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) => parse_instant(&s).map(Some).map_err(Error::custom),
        None => Ok(None),
    }
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = s.parse::<DateTime<Utc>>() {
        return Ok(dt);
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid timestamp '{}': {}", s, e))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_parse_instant_rfc3339() {
        let dt = parse_instant("2024-01-01T10:00:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_instant_with_offset() {
        let dt = parse_instant("2024-01-01T15:30:00+05:30").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_instant_naive() {
        // Naive backend timestamps are treated as UTC
        let dt = parse_instant("2024-01-01T10:00:00.123456").unwrap();
        assert_eq!(dt.timestamp(), 1704103200);
    }

    #[test]
    fn test_parse_instant_invalid() {
        assert!(parse_instant("not a timestamp").is_err());
    }
}
