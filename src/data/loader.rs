use std::io::Read;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::error::DataFormatError;
use super::model::{MetricRow, MetricTable};
use crate::config::DataSource;

/// Columns every metrics CSV must carry. Any other column is ignored.
pub const REQUIRED_COLUMNS: [&str; 6] = ["Label", "EV", "MSLL", "Skew", "Kurtosis", "IMG_URL"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the metric table from any supported source.
///
/// * `Url`   – fetched synchronously over HTTP(S), bounded by `timeout`
/// * `Bytes` – already in memory (uploads)
///
/// The [`DataFormatError`] raised by parsing stays reachable through
/// `anyhow::Error::downcast_ref`.
pub fn load(source: &DataSource, timeout: Duration) -> Result<MetricTable> {
    let parsed = match source {
        DataSource::Url(url) => parse_csv(fetch_url(url, timeout)?.as_slice()),
        DataSource::Bytes { bytes, .. } => parse_csv(bytes.as_slice()),
    };
    parsed.with_context(|| format!("parsing CSV from {source}"))
}

fn fetch_url(url: &str, timeout: Duration) -> Result<Vec<u8>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .context("building HTTP client")?;
    let response = client
        .get(url)
        .send()
        .with_context(|| format!("fetching {url}"))?
        .error_for_status()
        .with_context(|| format!("fetching {url}"))?;
    let body = response
        .bytes()
        .with_context(|| format!("reading response body from {url}"))?;
    Ok(body.to_vec())
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Cell contents read as a missing value (the usual spreadsheet / dataframe
/// spellings of "not available").
const NA_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Raw CSV record. Metric cells stay text until [`CsvRecord::into_row`] so a
/// bad value can be reported with its column and line.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(rename = "Label")]
    label: String,
    #[serde(rename = "EV")]
    ev: String,
    #[serde(rename = "MSLL")]
    msll: String,
    #[serde(rename = "Skew")]
    skew: String,
    #[serde(rename = "Kurtosis")]
    kurtosis: String,
    #[serde(rename = "IMG_URL")]
    img_url: String,
}

impl CsvRecord {
    fn into_row(self, line: u64) -> Result<MetricRow, DataFormatError> {
        Ok(MetricRow {
            ev: parse_metric(&self.ev, "EV", line)?,
            msll: parse_metric(&self.msll, "MSLL", line)?,
            skew: parse_metric(&self.skew, "Skew", line)?,
            kurtosis: parse_metric(&self.kurtosis, "Kurtosis", line)?,
            label: self.label,
            img_url: self.img_url,
        })
    }
}

/// Missing markers become NaN; anything else must be a float literal.
fn parse_metric(cell: &str, column: &str, line: u64) -> Result<f64, DataFormatError> {
    if NA_MARKERS.contains(&cell) {
        return Ok(f64::NAN);
    }
    cell.parse::<f64>()
        .map_err(|e| DataFormatError::InvalidValue {
            line,
            column: column.to_string(),
            message: format!("'{cell}': {e}"),
        })
}

/// Parse a header-first CSV stream into a table sorted by `Label`.
/// Surrounding whitespace in headers and cells is ignored.
pub fn parse_csv<R: Read>(input: R) -> Result<MetricTable, DataFormatError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    let headers = reader.headers()?.clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataFormatError::MissingColumn {
                column: column.to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    let mut raw = csv::StringRecord::new();
    while reader.read_record(&mut raw)? {
        let line = raw.position().map_or(0, |p| p.line());
        let record: CsvRecord = raw.deserialize(Some(&headers))?;
        rows.push(record.into_row(line)?);
    }

    Ok(MetricTable::from_rows(rows))
}
