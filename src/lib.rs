//! WOSPi Exporter Library
//!
//! A Rust library for polling a WOSPi weather station publisher and
//! normalizing its heterogeneous output into one canonical JSON record
//! suitable for a Telegraf/Influx metrics pipeline.
//!
//! This library provides tools for:
//! - Typed classification of the raw XML feed into an ordered field set
//! - Line-oriented extraction of station metadata and daily temperature
//!   extremes from the free-text minmax report
//! - Degrees/decimal-minutes to decimal-degrees coordinate conversion
//! - Local timestamp and sunrise/sunset reconciliation into epoch variants
//! - Assembly of the final record with forecast-icon cloud coverage mapping

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod assembler;
        pub mod coordinates;
        pub mod fetcher;
        pub mod field_classifier;
        pub mod minmax_report;
        pub mod time_normalizer;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{FieldSet, StationReply, StationReport, TypedValue};
pub use config::Config;

/// Result type alias for the WOSPi exporter
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for WOSPi polling and normalization
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Network, timeout or HTTP status failure on a source fetch
    #[error("Fetch error for '{url}': {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Primary XML feed could not be parsed
    #[error("XML format error: {message}")]
    XmlFormat { message: String },

    /// Pattern or number format failure on the required field path
    #[error("Format error in field '{field}': {message}")]
    Format { field: String, message: String },

    /// Timestamp or clock string did not match the expected layout
    #[error("Date/time parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A required feed field was absent; the whole record fails
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Forecast icon code not present in the static cloud coverage table
    #[error("Unknown forecast icon code: {code}")]
    ForecastCode { code: i64 },

    /// Invalid explicit configuration value
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Final record could not be serialized
    #[error("JSON serialization error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create a fetch error with the offending URL
    pub fn fetch(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Fetch {
            url: url.into(),
            source,
        }
    }

    /// Create an XML format error
    pub fn xml_format(message: impl Into<String>) -> Self {
        Self::XmlFormat {
            message: message.into(),
        }
    }

    /// Create a field format error
    pub fn format(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a date/time parsing error with context
    pub fn datetime_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an unknown forecast code error
    pub fn forecast_code(code: i64) -> Self {
        Self::ForecastCode { code }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date/time parsing failed".to_string(),
            source: error,
        }
    }
}
