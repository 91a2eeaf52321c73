//! Application constants for the WOSPi exporter
//!
//! This module contains configuration fallbacks, source file names,
//! format strings and the static forecast-icon mapping used throughout
//! the exporter.

// =============================================================================
// Configuration Fallbacks
// =============================================================================

/// Environment variable selecting the publisher base URL
pub const ENV_BASE_URL: &str = "WXDATA_URL";

/// Environment variable selecting the reported country code
pub const ENV_COUNTRY: &str = "WXSTATION_COUNTRY";

/// Environment variable selecting the station timezone
pub const ENV_TIMEZONE: &str = "WXSTATION_TZ";

/// Fallback base URL if `WXDATA_URL` is unset
pub const DEFAULT_BASE_URL: &str = "http://www.lidauer.net/wetter";

/// Fallback country code if `WXSTATION_COUNTRY` is unset
pub const DEFAULT_COUNTRY: &str = "AT";

/// Fallback station timezone if `WXSTATION_TZ` is unset
pub const DEFAULT_TIMEZONE: &str = "Europe/Vienna";

// =============================================================================
// Source Files and Fetching
// =============================================================================

/// XML feed file name on the publisher (primary source)
pub const FEED_FILE: &str = "wxdata.xml";

/// Minmax report file name on the publisher (optional source)
pub const MINMAX_FILE: &str = "minmax.txt";

/// Forecast icon page file name on the publisher (optional source)
pub const ICON_FILE: &str = "icon.html";

/// User agent presented to the publisher
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_14_6) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0.3 Safari/605.1.15";

/// Per-request timeout in seconds
pub const FETCH_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Feed Field Names
// =============================================================================

/// Feed element excluded from classification, matched by tag name
pub const EXCLUDED_FIELD: &str = "bardata";

/// Feed field carrying the record's local timestamp
pub const FIELD_TIMESTAMP: &str = "timestamp";

/// Feed field carrying the local sunrise clock string
pub const FIELD_SUNRISE: &str = "sunrise_lt";

/// Feed field carrying the local sunset clock string
pub const FIELD_SUNSET: &str = "sunset_lt";

/// Feed field carrying the forecast icon code
pub const FIELD_FORECAST_ICON: &str = "fcicon";

// =============================================================================
// Time Formats and Scaling
// =============================================================================

/// Layout of the feed's local timestamp
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Nanoseconds per second, the downstream charting schema's epoch unit
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

// =============================================================================
// Forecast Icon Mapping
// =============================================================================

/// Map a forecast icon code to an approximate cloud coverage percentage.
///
/// The table is closed: an unmapped code indicates an upstream schema
/// change and must surface as an error at the call site, never as a
/// default value.
pub fn cloud_coverage_percent(code: i64) -> Option<u8> {
    match code {
        8 => Some(0),
        6 => Some(25),
        2 => Some(75),
        3 => Some(85),
        18 | 19 => Some(100),
        7 => Some(40),
        22 => Some(50),
        23 => Some(60),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_coverage_mapped_codes() {
        assert_eq!(cloud_coverage_percent(8), Some(0));
        assert_eq!(cloud_coverage_percent(6), Some(25));
        assert_eq!(cloud_coverage_percent(18), Some(100));
        assert_eq!(cloud_coverage_percent(19), Some(100));
        assert_eq!(cloud_coverage_percent(23), Some(60));
    }

    #[test]
    fn test_cloud_coverage_unmapped_code() {
        assert_eq!(cloud_coverage_percent(99), None);
        assert_eq!(cloud_coverage_percent(-1), None);
        assert_eq!(cloud_coverage_percent(0), None);
    }
}
