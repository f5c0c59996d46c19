//! CF-convention time coordinate decoding.

use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone, Utc};

use crate::error::{NetCdfError, NetCdfResult};

/// Parsed `"<unit> since <epoch>"` attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeUnits {
    /// Seconds per unit step.
    pub seconds_per_unit: f64,
    pub epoch: DateTime<Utc>,
}

impl TimeUnits {
    /// Parse a CF `units` attribute such as `seconds since 2021-09-09 00:00:00`.
    pub fn parse(units: &str) -> NetCdfResult<Self> {
        let (unit, base) = units
            .split_once(" since ")
            .ok_or_else(|| NetCdfError::InvalidFormat(format!("time units '{}'", units)))?;

        let seconds_per_unit = match unit.trim().to_lowercase().as_str() {
            "seconds" | "second" | "secs" | "sec" | "s" => 1.0,
            "minutes" | "minute" | "mins" | "min" => 60.0,
            "hours" | "hour" | "hrs" | "hr" | "h" => 3600.0,
            "days" | "day" | "d" => 86400.0,
            other => {
                return Err(NetCdfError::InvalidFormat(format!(
                    "unsupported time unit '{}'",
                    other
                )))
            }
        };

        let epoch = parse_epoch(base.trim())
            .ok_or_else(|| NetCdfError::InvalidFormat(format!("time epoch '{}'", base)))?;

        Ok(Self {
            seconds_per_unit,
            epoch,
        })
    }

    /// Convert a raw offset into a UTC timestamp, at millisecond resolution.
    ///
    /// Returns `None` for non-finite offsets and for offsets that land
    /// outside the representable date range (e.g. an unmasked fill value).
    pub fn to_datetime(&self, value: f64) -> Option<DateTime<Utc>> {
        let millis = (value * self.seconds_per_unit * 1000.0).round();
        if !millis.is_finite() || millis < i64::MIN as f64 || millis >= i64::MAX as f64 {
            return None;
        }
        let delta = TimeDelta::try_milliseconds(millis as i64)?;
        self.epoch.checked_add_signed(delta)
    }
}

fn parse_epoch(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let s = s.trim_end_matches(" UTC").trim_end_matches('Z');
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&ndt));
        }
    }

    NaiveDateTime::parse_from_str(&format!("{} 00:00:00", s), "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|ndt| Utc.from_utc_datetime(&ndt))
}

/// Decode a whole time axis.
pub fn decode_times(values: &[f64], units: &str) -> NetCdfResult<Vec<DateTime<Utc>>> {
    let units = TimeUnits::parse(units)?;
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            units.to_datetime(v).ok_or_else(|| {
                NetCdfError::InvalidFormat(format!("time offset {} at index {} out of range", v, i))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_since() {
        let times = decode_times(&[0.0, 600.0, 3600.0], "seconds since 2021-09-09 00:00:00").unwrap();
        assert_eq!(times[0], Utc.with_ymd_and_hms(2021, 9, 9, 0, 0, 0).unwrap());
        assert_eq!(times[1], Utc.with_ymd_and_hms(2021, 9, 9, 0, 10, 0).unwrap());
        assert_eq!(times[2], Utc.with_ymd_and_hms(2021, 9, 9, 1, 0, 0).unwrap());
    }

    #[test]
    fn test_days_since_date_only() {
        let units = TimeUnits::parse("days since 2021-09-01").unwrap();
        assert_eq!(
            units.to_datetime(1.5).unwrap(),
            Utc.with_ymd_and_hms(2021, 9, 2, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_iso_epoch() {
        let units = TimeUnits::parse("hours since 2021-09-09T06:00:00Z").unwrap();
        assert_eq!(
            units.to_datetime(2.0).unwrap(),
            Utc.with_ymd_and_hms(2021, 9, 9, 8, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_rejects_malformed_units() {
        assert!(TimeUnits::parse("seconds").is_err());
        assert!(TimeUnits::parse("fortnights since 2021-09-09").is_err());
        assert!(TimeUnits::parse("seconds since yesterday").is_err());
    }

    #[test]
    fn test_rejects_out_of_range_offsets() {
        let units = "seconds since 2021-09-09 00:00:00";
        assert!(matches!(
            decode_times(&[0.0, f64::NAN], units),
            Err(NetCdfError::InvalidFormat(_))
        ));
        assert!(matches!(
            decode_times(&[0.0, 1e37], units),
            Err(NetCdfError::InvalidFormat(_))
        ));
        assert!(matches!(
            decode_times(&[9.96921e36], "days since 2021-09-01"),
            Err(NetCdfError::InvalidFormat(_))
        ));

        let parsed = TimeUnits::parse(units).unwrap();
        assert!(parsed.to_datetime(f64::INFINITY).is_none());
        assert!(parsed.to_datetime(-1e37).is_none());
    }
}
