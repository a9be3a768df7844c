// ============================================================================
// Feed Parsing Functions
// ============================================================================
//
// These functions ingest the two delimited feeds the dashboard consumes: the
// upstream space-weather forecast export and operator-uploaded mission error
// logs. The forecast feed is parsed leniently, skipping and logging malformed
// rows; mission uploads are validated strictly with row-numbered errors so
// the operator can fix the file.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};

use crate::models::mission::MissionErrorSample;
use crate::models::profile::GeoPoint;
use crate::models::time::TimestampMs;

use super::forecast::{ForecastSample, ForecastSeries};

/// Column names of the upstream forecast export. `kp10` carries the Kp index
/// scaled by ten and is divided back down on ingest.
const COL_DATETIME: &str = "datetime";
const COL_PREDICTED: &str = "fore_gnss";
const COL_OBSERVED: &str = "real_gnss";
const COL_TEC: &str = "tec_value";
const COL_XRAY: &str = "xrsb";
const COL_KP10: &str = "kp10";
const COL_DST: &str = "dst";

/// Parse the upstream forecast CSV into a [`ForecastSeries`].
///
/// Columns are located by header name so upstream column reordering and
/// trailing extra columns are tolerated. Rows whose datetime or predicted
/// error cannot be parsed are skipped with a warning; auxiliary indices are
/// optional per row. The returned series is sorted, de-duplicated, and
/// carries a SHA-256 checksum of the raw text so an unchanged refresh can be
/// detected.
pub fn parse_forecast_csv(csv_text: &str) -> Result<ForecastSeries> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());

    let headers = reader
        .headers()
        .context("Failed to read forecast CSV header")?
        .clone();

    let col = |name: &str| headers.iter().position(|h| h == name);

    let datetime_idx = col(COL_DATETIME)
        .with_context(|| format!("Forecast CSV is missing the '{}' column", COL_DATETIME))?;
    let predicted_idx = col(COL_PREDICTED)
        .with_context(|| format!("Forecast CSV is missing the '{}' column", COL_PREDICTED))?;
    let observed_idx = col(COL_OBSERVED);
    let tec_idx = col(COL_TEC);
    let xray_idx = col(COL_XRAY);
    let kp10_idx = col(COL_KP10);
    let dst_idx = col(COL_DST);

    let mut samples = Vec::new();

    for (row, record) in reader.records().enumerate() {
        // Header is line 1, first record line 2.
        let line = row + 2;
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping malformed forecast row at line {}: {}", line, e);
                continue;
            }
        };

        let timestamp = match record.get(datetime_idx).and_then(parse_feed_datetime) {
            Some(t) => t,
            None => {
                log::warn!("Skipping forecast row at line {}: unparseable datetime", line);
                continue;
            }
        };

        let predicted_error = match record.get(predicted_idx).and_then(parse_field) {
            Some(v) => v,
            None => {
                log::warn!(
                    "Skipping forecast row at line {}: unparseable predicted error",
                    line
                );
                continue;
            }
        };

        samples.push(ForecastSample {
            timestamp,
            predicted_error,
            observed_error: observed_idx.and_then(|i| record.get(i)).and_then(parse_field),
            tec: tec_idx.and_then(|i| record.get(i)).and_then(parse_field),
            kp_index: kp10_idx
                .and_then(|i| record.get(i))
                .and_then(parse_field)
                .map(|kp10| kp10 / 10.0),
            xray_flux: xray_idx.and_then(|i| record.get(i)).and_then(parse_field),
            dst: dst_idx.and_then(|i| record.get(i)).and_then(parse_field),
        });
    }

    if samples.is_empty() {
        bail!("Forecast CSV contained no usable rows");
    }

    Ok(ForecastSeries::with_checksum(
        samples,
        compute_feed_checksum(csv_text),
    ))
}

/// Parse an operator-uploaded mission error log.
///
/// The header must start with `date,error_rate`; `lat`/`lon` columns are
/// optional and must both be present to record positions. Every data row is
/// validated and the first defect aborts the parse with its line number.
pub fn parse_mission_csv(csv_text: &str) -> Result<Vec<MissionErrorSample>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());

    let headers = reader
        .headers()
        .context("Failed to read mission CSV header")?
        .clone();

    if headers.get(0) != Some("date") || headers.get(1) != Some("error_rate") {
        bail!("Mission CSV header must start with 'date,error_rate'");
    }

    let lat_idx = headers.iter().position(|h| h == "lat");
    let lon_idx = headers.iter().position(|h| h == "lon");
    let has_geo = lat_idx.is_some() && lon_idx.is_some();

    let mut samples = Vec::new();

    for (row, record) in reader.records().enumerate() {
        let line = row + 2;
        let record = record.with_context(|| format!("Malformed mission CSV row at line {}", line))?;

        let time = record
            .get(0)
            .and_then(parse_feed_datetime)
            .with_context(|| format!("Line {}: unparseable date", line))?;

        let error_rate = record
            .get(1)
            .and_then(parse_field)
            .with_context(|| format!("Line {}: error_rate is not a number", line))?;

        let position = if has_geo {
            let lat = record
                .get(lat_idx.unwrap())
                .and_then(parse_field)
                .with_context(|| format!("Line {}: lat is not a number", line))?;
            let lon = record
                .get(lon_idx.unwrap())
                .and_then(parse_field)
                .with_context(|| format!("Line {}: lon is not a number", line))?;
            Some(
                GeoPoint::new(lat, lon)
                    .map_err(|e| anyhow::anyhow!("Line {}: {}", line, e))?,
            )
        } else {
            None
        };

        samples.push(MissionErrorSample {
            time,
            error_rate,
            position,
        });
    }

    if samples.is_empty() {
        bail!("Mission CSV contained no data rows");
    }

    Ok(samples)
}

/// Accepts RFC 3339 as well as the space- and T-separated naive forms the
/// upstream export emits; naive times are taken as UTC.
fn parse_feed_datetime(raw: &str) -> Option<TimestampMs> {
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(TimestampMs::from_datetime(dt.with_timezone(&Utc)));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(TimestampMs::from_datetime(naive.and_utc()));
        }
    }

    None
}

fn parse_field(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok()
}

/// Compute a checksum for the raw feed text.
fn compute_feed_checksum(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

// ============================================================================
// Tests
// ============================================================================
