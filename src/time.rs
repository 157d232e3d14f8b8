//! Time range parsing for clip boundaries.

use crate::{ClipError, Result};

/// Parse a time specification into seconds.
///
/// Accepts raw seconds ("45", "12.5"), "MM:SS" ("2:00") and
/// "HH:MM:SS" ("1:02:03"). The seconds field may carry a fraction.
pub fn parse_time_spec(spec: &str) -> Result<f64> {
    let spec = spec.trim();

    if spec.contains(':') {
        let parts: Vec<&str> = spec.split(':').collect();
        return match parts.len() {
            2 => {
                let minutes: u64 = parse_component(parts[0], spec)?;
                let seconds: f64 = parse_seconds(parts[1], spec)?;
                Ok(minutes as f64 * 60.0 + seconds)
            }
            3 => {
                let hours: u64 = parse_component(parts[0], spec)?;
                let minutes: u64 = parse_component(parts[1], spec)?;
                let seconds: f64 = parse_seconds(parts[2], spec)?;
                Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds)
            }
            _ => Err(ClipError::InvalidTime(spec.to_string())),
        };
    }

    spec.parse::<f64>()
        .map_err(|_| ClipError::InvalidTime(spec.to_string()))
}

fn parse_component(part: &str, spec: &str) -> Result<u64> {
    part.parse::<u64>()
        .map_err(|_| ClipError::InvalidTime(spec.to_string()))
}

fn parse_seconds(part: &str, spec: &str) -> Result<f64> {
    part.parse::<f64>()
        .map_err(|_| ClipError::InvalidTime(spec.to_string()))
}

/// A start/end pair in seconds, as requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Build a range from two command-line time specifications.
    pub fn from_specs(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: parse_time_spec(start)?,
            end: parse_time_spec(end)?,
        })
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_raw_seconds() {
        assert_eq!(parse_time_spec("45").unwrap(), 45.0);
        assert_eq!(parse_time_spec("12.5").unwrap(), 12.5);
        assert_eq!(parse_time_spec("0").unwrap(), 0.0);
    }

    #[test]
    fn test_parse_minutes_seconds() {
        assert_eq!(parse_time_spec("2:00").unwrap(), 120.0);
        assert_eq!(parse_time_spec("1:30.5").unwrap(), 90.5);
    }

    #[test]
    fn test_parse_hours_minutes_seconds() {
        assert_eq!(parse_time_spec("1:02:03").unwrap(), 3723.0);
        assert_eq!(parse_time_spec("0:00:07").unwrap(), 7.0);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_time_spec("abc").is_err());
        assert!(parse_time_spec("1:2:3:4").is_err());
        assert!(parse_time_spec("x:30").is_err());
    }

    #[test]
    fn test_range_from_specs() {
        let range = TimeRange::from_specs("2:00", "2:30").unwrap();
        assert_eq!(range.start, 120.0);
        assert_eq!(range.end, 150.0);
        assert_eq!(range.duration(), 30.0);
    }
}
