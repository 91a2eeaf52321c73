//! Command-line argument definitions for the WOSPi exporter
//!
//! This module defines the CLI interface using the clap derive API. All
//! flags are optional overrides; unset values fall back to environment
//! variables and then to the hardcoded defaults.

use clap::Parser;

/// CLI arguments for the WOSPi exporter
///
/// Polls a WOSPi weather station publisher and prints one normalized
/// JSON record to standard output.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wospi-exporter",
    version,
    about = "Poll a WOSPi weather station and emit one normalized JSON record",
    long_about = "Fetches a WOSPi weather station's XML feed, minmax report and forecast \
                  icon page, normalizes them into one canonical JSON record and prints it \
                  to standard output wrapped in a one-element array, ready for a \
                  Telegraf/Influx metrics pipeline. Intended to be invoked repeatedly by \
                  an external scheduler."
)]
pub struct Args {
    /// Base URL of the WOSPi publisher
    ///
    /// Overrides the WXDATA_URL environment variable. The feed, report
    /// and icon file names are appended to this URL.
    #[arg(
        short = 'u',
        long = "url",
        value_name = "URL",
        help = "Base URL of the WOSPi publisher"
    )]
    pub base_url: Option<String>,

    /// Country code stamped on the output record
    ///
    /// Overrides the WXSTATION_COUNTRY environment variable.
    #[arg(
        short = 'c',
        long = "country",
        value_name = "CODE",
        help = "Country code stamped on the output record"
    )]
    pub country: Option<String>,

    /// IANA timezone of the station
    ///
    /// Overrides the WXSTATION_TZ environment variable. Used to resolve
    /// the UTC offset applied to the sunrise/sunset epoch variants.
    #[arg(
        long = "timezone",
        value_name = "TZ",
        help = "IANA timezone of the station, e.g. Europe/Vienna"
    )]
    pub timezone: Option<String>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Args {
    /// Get the effective log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
