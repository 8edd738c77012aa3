//! CSV Bar Loader
//!
//! Reads OHLC history from a headered CSV file, oldest bar first:
//!
//! ```text
//! time,open,high,low,close,volume
//! 2024-01-02T10:00:00Z,1.1012,1.1030,1.1005,1.1021,1532
//! ```
//!
//! `time` accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY.MM.DD HH:MM`
//! (terminal exports) or unix seconds. `volume` is optional.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

use crate::domain::Bar;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open bar file: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Line {line}: unrecognized time '{value}'")]
    InvalidTime { line: usize, value: String },
    #[error("Line {line}: invalid OHLC values")]
    InvalidBar { line: usize },
    #[error("Line {line}: bar time goes backwards")]
    OutOfOrder { line: usize },
}

#[derive(Debug, Deserialize)]
struct BarRow {
    #[serde(alias = "open_time", alias = "timestamp", alias = "date", alias = "datetime")]
    time: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: Option<f64>,
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%Y.%m.%d %H:%M",
];

/// Parse a bar time in any of the supported layouts (UTC assumed)
pub fn parse_time(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(value) {
        return Some(t.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(value, format) {
            return Some(t.and_utc());
        }
    }
    value
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

/// Load bars from a CSV file
pub fn load_bars<P: AsRef<Path>>(path: P) -> Result<Vec<Bar>, LoadError> {
    let file = File::open(path)?;
    read_bars(BufReader::new(file))
}

/// Parse bars from any CSV reader
pub fn read_bars<R: Read>(reader: R) -> Result<Vec<Bar>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut bars: Vec<Bar> = Vec::new();
    for (idx, row) in reader.deserialize::<BarRow>().enumerate() {
        let row = row?;
        // Header is line 1
        let line = idx + 2;

        let open_time = parse_time(&row.time).ok_or_else(|| LoadError::InvalidTime {
            line,
            value: row.time.clone(),
        })?;

        let bar = Bar {
            open_time,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume.unwrap_or(0.0),
        };
        if !bar.is_valid() {
            return Err(LoadError::InvalidBar { line });
        }
        if bars.last().is_some_and(|prev| prev.open_time > bar.open_time) {
            return Err(LoadError::OutOfOrder { line });
        }
        bars.push(bar);
    }

    tracing::debug!(bars = bars.len(), "Loaded bar history");
    Ok(bars)
}
