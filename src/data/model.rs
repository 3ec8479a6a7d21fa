use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::DateTime;
use chrono_tz::Tz;

// ---------------------------------------------------------------------------
// RawRow / RawTable – string fields as they appear in the log files
// ---------------------------------------------------------------------------

/// One retained log line split into its tab-separated fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// File the row was read from.
    pub source: Arc<Path>,
    /// 1-based line number in `source`.
    pub line: usize,
    pub fields: Vec<String>,
}

/// Untyped table of string fields with a generated header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// `timestamp`, `val_1`, `val_2`, ... (empty when the table has no rows).
    pub header: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Build a table from rows that all share the same width.
    pub fn from_rows(rows: Vec<RawRow>) -> Self {
        let width = rows.first().map_or(0, |r| r.fields.len());
        RawTable {
            header: generated_header(width),
            rows,
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Positional header: `timestamp` followed by `val_1..val_{width-1}`.
pub fn generated_header(width: usize) -> Vec<String> {
    (0..width)
        .map(|i| {
            if i == 0 {
                "timestamp".to_string()
            } else {
                format!("val_{i}")
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// SensorSeries / SensorDataset – the typed, assembled dataset
// ---------------------------------------------------------------------------

/// One sensor column. `None` marks a value that was not numeric.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl SensorSeries {
    /// Number of values that parsed as numbers.
    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// A log file that was left out of the assembled dataset.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// All log files merged into one time-ordered table.
#[derive(Debug, Clone)]
pub struct SensorDataset {
    /// Name of the timestamp column.
    pub timestamp_column: String,
    /// Timestamps in the display zone, one per row.
    pub timestamps: Vec<DateTime<Tz>>,
    /// Sensor columns in schema order.
    pub series: Vec<SensorSeries>,
    /// Files that contributed rows, in merge order.
    pub sources: Vec<PathBuf>,
    /// Files that failed to parse.
    pub skipped: Vec<SkippedFile>,
}

impl SensorDataset {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Look up a sensor column by name.
    pub fn series(&self, name: &str) -> Option<&SensorSeries> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Newest timestamp in the dataset.
    pub fn latest(&self) -> Option<&DateTime<Tz>> {
        self.timestamps.iter().max()
    }

    /// Oldest timestamp in the dataset.
    pub fn earliest(&self) -> Option<&DateTime<Tz>> {
        self.timestamps.iter().min()
    }
}
