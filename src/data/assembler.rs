use std::path::PathBuf;

use glob::MatchOptions;

use super::error::{DataError, Result};
use super::model::{RawRow, RawTable, SensorDataset, SensorSeries, SkippedFile};
use super::parser::parse_log_file;
use super::schema::ExperimentSchema;
use super::timestamp::convert_timestamp;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load every log file matching `pattern` and merge them into one dataset.
///
/// Files that cannot be read or contain ragged rows are skipped and listed in
/// [`SensorDataset::skipped`]. Width, schema and timestamp problems abort the
/// whole load.
pub fn assemble(pattern: &str, schema: &ExperimentSchema) -> Result<SensorDataset> {
    let files = resolve_log_files(pattern)?;

    let mut tables = Vec::with_capacity(files.len());
    let mut sources = Vec::new();
    let mut skipped = Vec::new();

    for path in files {
        match parse_log_file(&path) {
            Ok(table) if table.is_empty() => {
                log::warn!("{}: no data rows", path.display());
            }
            Ok(table) => {
                sources.push(path);
                tables.push(table);
            }
            Err(e) => {
                log::error!("Skipping {}: {e}", path.display());
                skipped.push(SkippedFile {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    let merged = concat_tables(tables)?;
    if merged.is_empty() {
        return Err(DataError::NoRows(pattern.to_string()));
    }

    let mut dataset = SensorDataset::from_table(merged, schema)?;
    dataset.sources = sources;
    dataset.skipped = skipped;

    log::info!(
        "Loaded {} rows from {} files ({} skipped) for {}",
        dataset.len(),
        dataset.sources.len(),
        dataset.skipped.len(),
        schema.name
    );

    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// Expand a glob pattern to regular files, sorted by path text.
///
/// Wildcards never match a leading `.`, so hidden files such as `._x.txt`
/// are left out. Paths are ordered by their full string, not component by
/// component. The sort order is the merge order, so file names are expected
/// to carry a zero-padded date or sequence number.
pub fn resolve_log_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..Default::default()
    };
    let paths = glob::glob_with(pattern, options).map_err(|source| DataError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files: Vec<PathBuf> = paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("Cannot read {}: {}", e.path().display(), e.error());
                None
            }
        })
        .filter(|p| p.is_file())
        .collect();
    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

    if files.is_empty() {
        return Err(DataError::NoLogFiles(pattern.to_string()));
    }
    Ok(files)
}

/// Concatenate per-file tables, keeping file order then row order.
///
/// Empty tables are ignored; all other tables must share one width.
pub fn concat_tables(tables: Vec<RawTable>) -> Result<RawTable> {
    let mut width: Option<usize> = None;
    let mut rows: Vec<RawRow> = Vec::new();

    for table in tables.into_iter().filter(|t| !t.is_empty()) {
        match width {
            None => width = Some(table.width()),
            Some(expected) if expected != table.width() => {
                return Err(DataError::WidthMismatch {
                    path: table.rows[0].source.to_path_buf(),
                    expected,
                    found: table.width(),
                });
            }
            Some(_) => {}
        }
        rows.extend(table.rows);
    }

    Ok(RawTable::from_rows(rows))
}

/// Interpret a field as a number. Blank, non-numeric and NaN become `None`.
pub fn coerce_numeric(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

impl SensorDataset {
    /// Name the columns after `schema`, coerce sensor values and convert timestamps.
    pub fn from_table(table: RawTable, schema: &ExperimentSchema) -> Result<Self> {
        if table.width() != schema.width() {
            return Err(DataError::SchemaMismatch {
                schema: schema.name,
                expected: schema.width(),
                found: table.width(),
            });
        }

        let mut series: Vec<SensorSeries> = schema
            .sensor_columns()
            .iter()
            .map(|name| SensorSeries {
                name: name.to_string(),
                values: Vec::with_capacity(table.len()),
            })
            .collect();
        let mut timestamps = Vec::with_capacity(table.len());

        for row in &table.rows {
            timestamps.push(convert_timestamp(&row.fields[0], &row.source, row.line)?);
            for (column, field) in series.iter_mut().zip(&row.fields[1..]) {
                column.values.push(coerce_numeric(field));
            }
        }

        Ok(SensorDataset {
            timestamp_column: schema.timestamp_column().to_string(),
            timestamps,
            series,
            sources: Vec::new(),
            skipped: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parser::parse_log_str;
    use crate::data::schema::onokoro57;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// A 20-field onokoro57 line with `value` in every sensor column.
    fn log_line(stamp: &str, value: &str) -> String {
        let mut fields = vec![stamp.to_string()];
        fields.extend((1..20).map(|_| value.to_string()));
        fields.join("\t")
    }

    fn write_log(dir: &TempDir, name: &str, lines: &[String]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, lines.join("\n")).unwrap();
        path
    }

    fn pattern(dir: &TempDir) -> String {
        format!("{}/*.txt", dir.path().display())
    }

    #[test]
    fn test_coerce_numeric() {
        assert_eq!(coerce_numeric("12.5"), Some(12.5));
        assert_eq!(coerce_numeric(" -3 "), Some(-3.0));
        assert_eq!(coerce_numeric("1e-3"), Some(0.001));
        assert_eq!(coerce_numeric("N/A"), None);
        assert_eq!(coerce_numeric(""), None);
        assert_eq!(coerce_numeric("nan"), None);
    }

    #[test]
    fn test_concat_preserves_file_and_row_order() -> Result<()> {
        let a = parse_log_str(Path::new("a.txt"), "r1\t1\nr2\t2\n")?;
        let b = parse_log_str(Path::new("b.txt"), "r3\t3\n")?;

        let merged = concat_tables(vec![a, RawTable::default(), b])?;
        let stamps: Vec<&str> = merged.rows.iter().map(|r| r.fields[0].as_str()).collect();
        assert_eq!(stamps, vec!["r1", "r2", "r3"]);
        assert_eq!(merged.header, vec!["timestamp", "val_1"]);

        Ok(())
    }

    #[test]
    fn test_concat_width_mismatch() -> Result<()> {
        let a = parse_log_str(Path::new("a.txt"), "r1\t1\t2\n")?;
        let b = parse_log_str(Path::new("b.txt"), "r2\t3\n")?;

        let err = concat_tables(vec![a, b]).unwrap_err();
        assert!(matches!(err, DataError::WidthMismatch { expected: 3, found: 2, .. }));

        Ok(())
    }

    #[test]
    fn test_schema_mismatch_with_18_columns() -> Result<()> {
        let line: Vec<String> = (0..18).map(|i| i.to_string()).collect();
        let table = parse_log_str(Path::new("short.txt"), &line.join("\t"))?;
        assert_eq!(table.width(), 18);

        let err = SensorDataset::from_table(table, &onokoro57()).unwrap_err();
        assert!(matches!(
            err,
            DataError::SchemaMismatch { expected: 20, found: 18, .. }
        ));

        Ok(())
    }

    #[test]
    fn test_from_table_names_and_coerces() -> Result<()> {
        let mut text = log_line("2025/06/28_18h50m58s", "12.5");
        text.push('\n');
        text.push_str(&log_line("2025/06/28_18h51m58s", "N/A"));
        let table = parse_log_str(Path::new("a.txt"), &text)?;

        let schema = onokoro57();
        let dataset = SensorDataset::from_table(table, &schema)?;

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.series.len(), 19);
        assert_eq!(dataset.timestamp_column, "Timestamp");

        let chamber = dataset.series("Target Chamber").unwrap();
        assert_eq!(chamber.values, vec![Some(12.5), None]);
        assert_eq!(
            dataset.timestamps[0].format("%Y-%m-%d %H:%M:%S").to_string(),
            "2025-06-29 01:50:58"
        );

        Ok(())
    }

    #[test]
    fn test_assemble_sorted_files() -> Result<()> {
        let dir = TempDir::new().unwrap();
        // Written out of order on purpose.
        write_log(
            &dir,
            "log_20250629.txt",
            &[log_line("2025/06/29_00h00m00s", "3")],
        );
        write_log(
            &dir,
            "log_20250628.txt",
            &[
                "///".to_string(),
                "run notes".to_string(),
                "///".to_string(),
                log_line("2025/06/28_10h00m00s", "1"),
                log_line("2025/06/28_11h00m00s", "2"),
            ],
        );

        let dataset = assemble(&pattern(&dir), &onokoro57())?;

        assert_eq!(dataset.len(), 3);
        let values = &dataset.series[0].values;
        assert_eq!(values, &vec![Some(1.0), Some(2.0), Some(3.0)]);
        assert_eq!(dataset.sources.len(), 2);
        assert!(dataset.sources[0].ends_with("log_20250628.txt"));
        assert!(dataset.skipped.is_empty());

        Ok(())
    }

    #[test]
    fn test_assemble_skips_ragged_file() -> Result<()> {
        let dir = TempDir::new().unwrap();
        write_log(&dir, "a.txt", &[log_line("2025/06/28_10h00m00s", "1")]);
        write_log(
            &dir,
            "b.txt",
            &[log_line("2025/06/28_11h00m00s", "2"), "broken\t1".to_string()],
        );

        let dataset = assemble(&pattern(&dir), &onokoro57())?;

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.skipped.len(), 1);
        assert!(dataset.skipped[0].path.ends_with("b.txt"));
        assert!(dataset.skipped[0].reason.contains("expected 20"));

        Ok(())
    }

    #[test]
    fn test_assemble_no_files() {
        let dir = TempDir::new().unwrap();
        let err = assemble(&pattern(&dir), &onokoro57()).unwrap_err();
        assert!(matches!(err, DataError::NoLogFiles(_)));
    }

    #[test]
    fn test_assemble_only_comments() {
        let dir = TempDir::new().unwrap();
        write_log(&dir, "a.txt", &["///".to_string(), "notes".to_string()]);

        let err = assemble(&pattern(&dir), &onokoro57()).unwrap_err();
        assert!(matches!(err, DataError::NoRows(_)));
    }

    #[test]
    fn test_assemble_bad_timestamp_aborts() {
        let dir = TempDir::new().unwrap();
        write_log(&dir, "a.txt", &[log_line("2025-06-28 10:00:00", "1")]);

        let err = assemble(&pattern(&dir), &onokoro57()).unwrap_err();
        match err {
            DataError::Timestamp { path, line, .. } => {
                assert!(path.ends_with("a.txt"));
                assert_eq!(line, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_skips_hidden_files() -> Result<()> {
        let dir = TempDir::new().unwrap();
        write_log(&dir, "log_a.txt", &[log_line("2025/06/28_10h00m00s", "1")]);
        write_log(&dir, "._log_a.txt", &["resource fork".to_string()]);
        write_log(&dir, ".log_b.txt", &["editor backup".to_string()]);

        let files = resolve_log_files(&pattern(&dir))?;

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("log_a.txt"));

        Ok(())
    }

    #[test]
    fn test_resolve_sorts_by_path_text() -> Result<()> {
        let dir = TempDir::new().unwrap();
        for sub in ["a", "a-b"] {
            let sub_dir = dir.path().join(sub);
            fs::create_dir(&sub_dir).unwrap();
            fs::write(sub_dir.join("x.txt"), "").unwrap();
        }

        let files = resolve_log_files(&format!("{}/*/x.txt", dir.path().display()))?;

        // '-' (0x2d) sorts before '/' (0x2f).
        assert_eq!(files, vec![dir.path().join("a-b/x.txt"), dir.path().join("a/x.txt")]);

        Ok(())
    }

    #[test]
    fn test_invalid_pattern() {
        let err = resolve_log_files("logs/[*.txt").unwrap_err();
        assert!(matches!(err, DataError::Pattern { .. }));
    }
}
