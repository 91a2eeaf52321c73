//! Command execution for the WOSPi exporter CLI
//!
//! Orchestrates the single pull-transform-emit pass: fetch the XML feed,
//! the minmax report and the forecast icon page, normalize them and print
//! the reply envelope to standard output. A failed feed fetch is fatal; a
//! failed report or icon fetch degrades to empty defaults.

use crate::app::services::assembler;
use crate::app::services::fetcher::{self, WospiClient};
use crate::app::services::field_classifier::FieldClassifier;
use crate::app::services::minmax_report::ReportScanner;
use crate::app::services::time_normalizer::TimeNormalizer;
use crate::cli::args::Args;
use crate::config::Config;
use crate::{Result, StationReport};
use tracing::{debug, info, warn};

/// Run one exporter pass and print the result.
///
/// Sequential by design: feed, report, icon, assemble, emit. No retries;
/// the process is expected to be re-invoked by an external scheduler.
pub async fn run(args: Args) -> Result<()> {
    setup_logging(&args)?;

    info!("Starting WOSPi exporter");
    debug!("Command line arguments: {:?}", args);

    let config = Config::resolve(
        args.base_url.clone(),
        args.country.clone(),
        args.timezone.clone(),
    )?;

    let client = WospiClient::new()?;

    // The XML feed is the primary source; a fetch failure aborts the run.
    let feed_xml = client.fetch_text(&config.feed_url()).await?;
    let fields = FieldClassifier::new().parse_feed(&feed_xml)?;
    info!("Classified {} feed fields", fields.len());

    // The report and icon page are optional sources.
    let report = match client.fetch_text(&config.minmax_url()).await {
        Ok(body) => ReportScanner::new().scan(&body),
        Err(e) => {
            warn!("Minmax report unavailable, using defaults: {}", e);
            StationReport::default()
        }
    };

    let forecast = match client.fetch_text(&config.icon_url()).await {
        Ok(body) => fetcher::extract_forecast_alt(&body).unwrap_or_default(),
        Err(e) => {
            warn!("Forecast icon page unavailable, using empty forecast: {}", e);
            String::new()
        }
    };

    let normalizer = TimeNormalizer::for_timezone(config.timezone);
    let reply = assembler::build_reply(&fields, &report, &forecast, &normalizer, &config.country)?;

    // One-element array envelope for the consuming pipeline.
    println!("{}", serde_json::to_string_pretty(&[reply])?);

    Ok(())
}

/// Set up logging based on command-line arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wospi_exporter={}", log_level)));

    // Logs go to stderr; stdout carries only the JSON record.
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    Ok(())
}
