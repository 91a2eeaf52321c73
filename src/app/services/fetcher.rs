//! HTTP access to the publisher and forecast-icon extraction
//!
//! One client fetches all three sources with a fixed user agent and a
//! bounded per-request timeout. Whether a failed fetch is fatal or
//! degrades to a default is the caller's policy, not the client's.

use crate::constants::{FETCH_TIMEOUT_SECS, USER_AGENT};
use crate::{Error, Result};
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::debug;

/// HTTP client for the WOSPi publisher
pub struct WospiClient {
    client: reqwest::Client,
}

impl WospiClient {
    /// Build a client with the publisher's expected user agent and the
    /// per-request timeout applied to every fetch
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Fetch one source document as text.
    ///
    /// Network failures, timeouts and non-success HTTP statuses all
    /// surface as fetch errors carrying the offending URL.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::fetch(url, e))?
            .error_for_status()
            .map_err(|e| Error::fetch(url, e))?;

        response.text().await.map_err(|e| Error::fetch(url, e))
    }
}

/// Extract the forecast description from the icon page.
///
/// The page wraps the current condition icon in a `div.forecastIcon`
/// whose `img` carries the description in its `alt` attribute. When the
/// page repeats the block, the last occurrence wins. Returns `None` when
/// no such attribute exists.
pub fn extract_forecast_alt(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse("div.forecastIcon img[alt]").expect("CSS selector should be valid");

    document
        .select(&selector)
        .filter_map(|img| img.value().attr("alt"))
        .last()
        .map(str::to_string)
}
