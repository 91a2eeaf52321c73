//! Timestamp and sunrise/sunset normalization
//!
//! Combines the record's calendar date with the feed's local sunrise and
//! sunset clock strings and produces the three nanosecond epoch variants
//! the downstream charting schema selects among: a timezone-naive `utc`
//! value, a `local` value shifted by the station's UTC offset, and a
//! `corr` value shifted the opposite way.
//!
//! The UTC offset is resolved for the station timezone at the moment the
//! normalizer is constructed, not at the record's own date. Around DST
//! transitions the offset can therefore differ from the one in force at
//! the record's timestamp.

use crate::constants::{NANOS_PER_SECOND, TIMESTAMP_FORMAT};
use crate::{Error, Result};
use chrono::{NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Three epoch representations of one event, in nanoseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpochTriplet {
    /// Timezone-naive epoch seconds scaled to nanoseconds
    pub utc: i64,

    /// `utc` shifted forward by the UTC offset
    pub local: i64,

    /// `utc` shifted backward by the UTC offset, for charting
    pub corr: i64,
}

/// Normalized sunrise and sunset triplets for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunTimes {
    pub sunrise: EpochTriplet,
    pub sunset: EpochTriplet,
}

/// Converts local timestamps and clock strings into epoch variants
#[derive(Debug, Clone, Copy)]
pub struct TimeNormalizer {
    tz_diff: i64,
}

impl TimeNormalizer {
    /// Resolve the signed UTC offset of `timezone` at the current moment
    pub fn for_timezone(timezone: Tz) -> Self {
        let now = timezone.from_utc_datetime(&Utc::now().naive_utc());
        Self {
            tz_diff: now.offset().fix().local_minus_utc() as i64,
        }
    }

    /// Create a normalizer with a fixed offset in seconds
    pub fn with_offset_seconds(tz_diff: i64) -> Self {
        Self { tz_diff }
    }

    /// Signed UTC offset in seconds
    pub fn tz_diff(&self) -> i64 {
        self.tz_diff
    }

    /// Normalize the record's sunrise and sunset clock strings.
    ///
    /// `timestamp` must match `day.month.year hour:minute:second`; the
    /// clock strings must match `hour:minute`. The record's calendar date
    /// is combined with each clock string to build the local-naive instant.
    pub fn sun_times(&self, timestamp: &str, sunrise_lt: &str, sunset_lt: &str) -> Result<SunTimes> {
        let record_time = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
            .map_err(|e| Error::datetime_parsing(format!("invalid timestamp '{}'", timestamp), e))?;

        let date = record_time.date();

        Ok(SunTimes {
            sunrise: self.clock_triplet(date, sunrise_lt, "sunrise_lt")?,
            sunset: self.clock_triplet(date, sunset_lt, "sunset_lt")?,
        })
    }

    fn clock_triplet(
        &self,
        date: chrono::NaiveDate,
        clock: &str,
        field: &str,
    ) -> Result<EpochTriplet> {
        let time = NaiveTime::parse_from_str(clock, "%H:%M").map_err(|e| {
            Error::datetime_parsing(format!("invalid {} clock string '{}'", field, clock), e)
        })?;

        let epoch = date.and_time(time).and_utc().timestamp();

        Ok(EpochTriplet {
            utc: epoch * NANOS_PER_SECOND,
            local: (epoch + self.tz_diff) * NANOS_PER_SECOND,
            corr: (epoch - self.tz_diff) * NANOS_PER_SECOND,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-07-18 05:30:00 UTC
    const SUNRISE_EPOCH: i64 = 1_721_280_600;
    // 2024-07-18 20:15:00 UTC
    const SUNSET_EPOCH: i64 = 1_721_333_700;

    #[test]
    fn test_sun_times_triplets() {
        let normalizer = TimeNormalizer::with_offset_seconds(7200);
        let sun = normalizer
            .sun_times("18.07.2024 13:37:39", "05:30", "20:15")
            .unwrap();

        assert_eq!(sun.sunrise.utc, SUNRISE_EPOCH * 1_000_000_000);
        assert_eq!(sun.sunrise.local, (SUNRISE_EPOCH + 7200) * 1_000_000_000);
        assert_eq!(sun.sunrise.corr, (SUNRISE_EPOCH - 7200) * 1_000_000_000);

        assert_eq!(sun.sunset.utc, SUNSET_EPOCH * 1_000_000_000);
        assert_eq!(sun.sunset.local, (SUNSET_EPOCH + 7200) * 1_000_000_000);
        assert_eq!(sun.sunset.corr, (SUNSET_EPOCH - 7200) * 1_000_000_000);
    }

    #[test]
    fn test_negative_offset() {
        let normalizer = TimeNormalizer::with_offset_seconds(-18000);
        let sun = normalizer
            .sun_times("18.07.2024 13:37:39", "05:30", "20:15")
            .unwrap();

        assert_eq!(sun.sunrise.local, (SUNRISE_EPOCH - 18000) * 1_000_000_000);
        assert_eq!(sun.sunrise.corr, (SUNRISE_EPOCH + 18000) * 1_000_000_000);
    }

    #[test]
    fn test_invalid_timestamp_fails() {
        let normalizer = TimeNormalizer::with_offset_seconds(0);
        let result = normalizer.sun_times("2024-07-18 13:37:39", "05:30", "20:15");
        assert!(matches!(result, Err(Error::DateTimeParsing { .. })));
    }

    #[test]
    fn test_invalid_clock_string_fails() {
        let normalizer = TimeNormalizer::with_offset_seconds(0);
        let result = normalizer.sun_times("18.07.2024 13:37:39", "5:3x", "20:15");
        assert!(matches!(result, Err(Error::DateTimeParsing { .. })));
    }

    #[test]
    fn test_for_timezone_resolves_current_offset() {
        // UTC never observes DST, so the offset is always zero
        let normalizer = TimeNormalizer::for_timezone(chrono_tz::UTC);
        assert_eq!(normalizer.tz_diff(), 0);

        // Vienna is UTC+1 or UTC+2 depending on the season
        let vienna = TimeNormalizer::for_timezone(chrono_tz::Europe::Vienna);
        assert!(vienna.tz_diff() == 3600 || vienna.tz_diff() == 7200);
    }
}
