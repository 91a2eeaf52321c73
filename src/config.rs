//! Configuration management for the WOSPi exporter.
//!
//! Configuration is immutable after startup and passed explicitly into the
//! pipeline. Values are resolved with a layered approach: CLI flags override
//! environment variables, which override the hardcoded fallbacks.

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_COUNTRY, DEFAULT_TIMEZONE, ENV_BASE_URL, ENV_COUNTRY, ENV_TIMEZONE,
    FEED_FILE, ICON_FILE, MINMAX_FILE,
};
use crate::{Error, Result};
use chrono_tz::Tz;
use tracing::debug;

/// Immutable runtime configuration for one exporter run
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the WOSPi publisher, without a trailing slash
    pub base_url: String,

    /// Country code stamped on the output record
    pub country: String,

    /// Station timezone used to resolve the UTC offset
    pub timezone: Tz,
}

impl Config {
    /// Resolve configuration from explicit overrides, then environment
    /// variables, then hardcoded fallbacks.
    ///
    /// Absent values always fall back; only an explicitly provided but
    /// unparsable timezone is an error.
    pub fn resolve(
        base_url: Option<String>,
        country: Option<String>,
        timezone: Option<String>,
    ) -> Result<Self> {
        let base_url = base_url
            .or_else(|| std::env::var(ENV_BASE_URL).ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let country = country
            .or_else(|| std::env::var(ENV_COUNTRY).ok())
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_string());

        let tz_name = timezone
            .or_else(|| std::env::var(ENV_TIMEZONE).ok())
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());

        let timezone: Tz = tz_name
            .parse()
            .map_err(|_| Error::configuration(format!("Unknown timezone: {}", tz_name)))?;

        let config = Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            country,
            timezone,
        };

        debug!(
            "Resolved configuration: base_url={}, country={}, timezone={}",
            config.base_url, config.country, config.timezone
        );

        Ok(config)
    }

    /// URL of the primary XML feed
    pub fn feed_url(&self) -> String {
        format!("{}/{}", self.base_url, FEED_FILE)
    }

    /// URL of the optional minmax report
    pub fn minmax_url(&self) -> String {
        format!("{}/{}", self.base_url, MINMAX_FILE)
    }

    /// URL of the optional forecast icon page
    pub fn icon_url(&self) -> String {
        format!("{}/{}", self.base_url, ICON_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_overrides_win() {
        let config = Config::resolve(
            Some("http://station.example.org/wx/".to_string()),
            Some("DE".to_string()),
            Some("Europe/Berlin".to_string()),
        )
        .unwrap();

        assert_eq!(config.base_url, "http://station.example.org/wx");
        assert_eq!(config.country, "DE");
        assert_eq!(config.timezone, chrono_tz::Europe::Berlin);
    }

    #[test]
    fn test_source_urls() {
        let config = Config::resolve(
            Some("http://station.example.org/wx".to_string()),
            Some("AT".to_string()),
            Some("Europe/Vienna".to_string()),
        )
        .unwrap();

        assert_eq!(config.feed_url(), "http://station.example.org/wx/wxdata.xml");
        assert_eq!(
            config.minmax_url(),
            "http://station.example.org/wx/minmax.txt"
        );
        assert_eq!(config.icon_url(), "http://station.example.org/wx/icon.html");
    }

    #[test]
    fn test_invalid_timezone_is_rejected() {
        let result = Config::resolve(None, None, Some("Mars/Olympus_Mons".to_string()));
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }
}
