//! Final record assembly
//!
//! Merges the classified field set, the minmax report extract, the
//! forecast text, the converted coordinates and the normalized sun times
//! into the reply envelope. Derived keys follow the feed's own fields so
//! the emitted record keeps a stable key order for the metrics pipeline.

use crate::app::models::{FieldSet, StationReply, StationReport, TypedValue};
use crate::app::services::coordinates;
use crate::app::services::time_normalizer::TimeNormalizer;
use crate::constants::{
    cloud_coverage_percent, FIELD_FORECAST_ICON, FIELD_SUNRISE, FIELD_SUNSET, FIELD_TIMESTAMP,
};
use crate::{Error, Result};
use serde_json::{Map, Value};
use tracing::warn;

/// Assemble the reply envelope from all normalized inputs.
///
/// The report's min/max override the feed's own values, since the report
/// is authoritative for today's extremes. A missing required feed field
/// (`timestamp`, `sunrise_lt`, `sunset_lt`, `fcicon`) fails the whole
/// record; downstream consumers expect a fixed schema, so no derived key
/// may be silently omitted.
pub fn build_reply(
    fields: &FieldSet,
    report: &StationReport,
    forecast: &str,
    normalizer: &TimeNormalizer,
    country: &str,
) -> Result<StationReply> {
    let mut record = Map::new();

    for (name, value) in fields.iter() {
        record.insert(name.to_string(), value.to_json());
    }

    record.insert("forecast".to_string(), Value::from(forecast));
    record.insert("tz_diff".to_string(), Value::from(normalizer.tz_diff()));

    let timestamp = required_text(fields, FIELD_TIMESTAMP)?;
    let sunrise_lt = required_text(fields, FIELD_SUNRISE)?;
    let sunset_lt = required_text(fields, FIELD_SUNSET)?;
    let sun = normalizer.sun_times(timestamp, sunrise_lt, sunset_lt)?;

    record.insert("sunrise_utc".to_string(), Value::from(sun.sunrise.utc));
    record.insert("sunset_utc".to_string(), Value::from(sun.sunset.utc));
    record.insert("sunrise_local".to_string(), Value::from(sun.sunrise.local));
    record.insert("sunset_local".to_string(), Value::from(sun.sunset.local));
    record.insert("sunrise_corr".to_string(), Value::from(sun.sunrise.corr));
    record.insert("sunset_corr".to_string(), Value::from(sun.sunset.corr));

    record.insert(
        "today_outtemp_min_c".to_string(),
        Value::from(report.temp_min_c),
    );
    record.insert(
        "today_outtemp_max_c".to_string(),
        Value::from(report.temp_max_c),
    );

    let (lat, lon) = convert_coordinates(report)?;
    record.insert("lat".to_string(), Value::from(lat));
    record.insert("lon".to_string(), Value::from(lon));

    let code = forecast_code(fields)?;
    let cloudiness = cloud_coverage_percent(code).ok_or_else(|| Error::forecast_code(code))?;
    record.insert("cloudiness".to_string(), Value::from(cloudiness));

    Ok(StationReply {
        country: country.to_string(),
        city: report.location.clone(),
        v: record,
    })
}

/// Look up a field that must be present as an opaque string
fn required_text<'a>(fields: &'a FieldSet, name: &str) -> Result<&'a str> {
    fields
        .get(name)
        .and_then(TypedValue::as_text)
        .ok_or_else(|| Error::missing_field(name))
}

/// Convert the report's captured DMS pair, substituting unsigned zero
/// when the degraded report left the strings empty
fn convert_coordinates(report: &StationReport) -> Result<(f64, f64)> {
    if report.latitude_dms.is_empty() || report.longitude_dms.is_empty() {
        warn!("Coordinate strings missing from report, emitting 0.0/0.0");
        return Ok((0.0, 0.0));
    }

    let lat = coordinates::report_coordinate_to_decimal(&report.latitude_dms)?;
    let lon = coordinates::report_coordinate_to_decimal(&report.longitude_dms)?;
    Ok((lat, lon))
}

/// Extract the forecast icon code as an integer.
///
/// The feed usually delivers the code as a bare integer, but an opaque
/// string that parses as one is accepted too. A fractional value is a
/// contract violation.
fn forecast_code(fields: &FieldSet) -> Result<i64> {
    let value = fields
        .get(FIELD_FORECAST_ICON)
        .ok_or_else(|| Error::missing_field(FIELD_FORECAST_ICON))?;

    match value {
        TypedValue::Integer(code) => Ok(*code),
        TypedValue::Text(raw) => raw.parse::<i64>().map_err(|_| {
            Error::format(
                FIELD_FORECAST_ICON,
                format!("not an integer forecast code: '{}'", raw),
            )
        }),
        TypedValue::Float(f) => Err(Error::format(
            FIELD_FORECAST_ICON,
            format!("fractional forecast code: {}", f),
        )),
    }
}
