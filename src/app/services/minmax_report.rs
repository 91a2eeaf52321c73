//! Line-oriented extraction from the minmax report
//!
//! The report is a loosely structured HTML/text page. A single boolean flag
//! tracks whether the scanner is inside the TEMPERATURE section; today's
//! MIN/MAX line is only captured while the flag is set. Location, coordinate
//! and software version lines are captured independently of the flag. Every
//! line is processed exactly once and the last matching line wins for each
//! field.

use crate::app::models::StationReport;
use regex::Regex;

/// Scans the minmax report body into a [`StationReport`]
pub struct ReportScanner {
    version_re: Regex,
    temp_header_re: Regex,
    dew_header_re: Regex,
    temp_re: Regex,
    location_re: Regex,
}

impl ReportScanner {
    /// Create a scanner with the report's line patterns compiled once
    pub fn new() -> Self {
        Self {
            // Software Version .... : 20151108-RPi
            version_re: Regex::new(r"Software\s+Version\s+\.\..*:\s+(\w+)").unwrap(),
            temp_header_re: Regex::new(r"<b>TEMPERATURE</b>").unwrap(),
            dew_header_re: Regex::new(r"<b>DEW POINT</b>").unwrap(),
            //  Today       MIN  15.4&deg;C / 59.8&deg;F          MAX  29.1&deg;C / 84.4&deg;F
            temp_re: Regex::new(
                r"Today\s+MIN\s+(-?\d+(?:\.\d+)?)(?:&deg;|°)C.*MAX\s+(-?\d+(?:\.\d+)?)(?:&deg;|°)C",
            )
            .unwrap(),
            //     LOCATION: Hollabrunn, Austria (N 48&deg;33.82'  E 016&deg;05.504')</b>
            location_re: Regex::new(
                r"LOCATION:\s+(\w+),\s+.*\(([NS]\s+[0-9]+(?:&deg;|°)[0-9]+\.[0-9]+).*([EW]\s+[0-9]+(?:&deg;|°)[0-9]+\.[0-9]+)",
            )
            .unwrap(),
        }
    }

    /// Scan a report body line by line.
    ///
    /// Never fails: fields whose pattern does not match keep their
    /// empty/zero defaults, which is also the degraded result the caller
    /// substitutes when the report fetch fails.
    pub fn scan(&self, body: &str) -> StationReport {
        let mut report = StationReport::default();
        let mut in_temperature_section = false;

        for line in body.lines() {
            if self.temp_header_re.is_match(line) {
                in_temperature_section = true;
            }

            if self.dew_header_re.is_match(line) {
                in_temperature_section = false;
            }

            if in_temperature_section {
                if let Some(captures) = self.temp_re.captures(line) {
                    if let Ok(min) = captures[1].parse::<f64>() {
                        report.temp_min_c = min;
                    }
                    if let Ok(max) = captures[2].parse::<f64>() {
                        report.temp_max_c = max;
                    }
                }
            }

            if let Some(captures) = self.location_re.captures(line) {
                report.location = captures[1].to_string();
                report.latitude_dms = normalize_degree_marks(&captures[2]);
                report.longitude_dms = normalize_degree_marks(&captures[3]);
            }

            if let Some(captures) = self.version_re.captures(line) {
                report.software_version = captures[1].to_string();
            }
        }

        report
    }
}

impl Default for ReportScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace the report's degree mark variants with the `*` separator the
/// coordinate converter expects
fn normalize_degree_marks(raw: &str) -> String {
    raw.replace("&deg;", "*").replace('°', "*")
}
