use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use csv::ReaderBuilder;

use super::error::{DataError, Result};
use super::model::{RawRow, RawTable};

/// Lines starting with this marker open or close a comment block.
pub const COMMENT_MARKER: &str = "///";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Parse one STRASSE log file into a table of string fields.
///
/// The whole file is read up front; the handle is closed before scanning.
pub fn parse_log_file(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_log_str(path, &text)?;
    log::debug!(
        "{}: {} rows, {} columns",
        path.display(),
        table.len(),
        table.width()
    );
    Ok(table)
}

/// Parse log text. `source` is only used for row provenance and errors.
///
/// Layout:
///
/// ```text
/// ///
/// free-form notes, skipped
/// ///
/// 2025/06/28_18h50m58s<TAB>4.21<TAB>4.30<TAB>...
/// ```
pub fn parse_log_str(source: &Path, text: &str) -> Result<RawTable> {
    let source: Arc<Path> = Arc::from(source);
    let text = normalize_line_endings(text);
    let kept = scan_lines(&text);

    // Retained lines are non-empty and free of '\r', so the reader yields
    // exactly one record per line.
    let joined = kept
        .iter()
        .map(|(_, content)| *content)
        .collect::<Vec<_>>()
        .join("\n");
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(joined.as_bytes());

    let mut rows: Vec<RawRow> = Vec::with_capacity(kept.len());
    for (&(line, _), record) in kept.iter().zip(reader.records()) {
        let record = record.map_err(|source_err| DataError::Csv {
            path: source.to_path_buf(),
            source: source_err,
        })?;
        let fields: Vec<String> = record.iter().map(|f| f.to_string()).collect();

        if let Some(first) = rows.first() {
            if first.fields.len() != fields.len() {
                return Err(DataError::RaggedRow {
                    path: source.to_path_buf(),
                    line,
                    expected: first.fields.len(),
                    found: fields.len(),
                });
            }
        }

        rows.push(RawRow {
            source: Arc::clone(&source),
            line,
            fields,
        });
    }

    Ok(RawTable::from_rows(rows))
}

// ---------------------------------------------------------------------------
// Line scan
// ---------------------------------------------------------------------------

/// Turn `\r\n` and lone `\r` line endings into `\n`.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Return `(1-based line number, trimmed line)` for every data line.
///
/// A line starting with [`COMMENT_MARKER`] flips the comment toggle and is
/// dropped; lines inside a comment block and blank lines are dropped too.
/// An unmatched marker hides everything up to the end of the text.
///
/// Only `\n` and `\r\n` end a line here; run [`normalize_line_endings`]
/// first for files written with bare `\r`.
pub fn scan_lines(text: &str) -> Vec<(usize, &str)> {
    let mut in_comment = false;
    let mut kept = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.starts_with(COMMENT_MARKER) {
            in_comment = !in_comment;
            continue;
        }
        if in_comment || line.is_empty() {
            continue;
        }
        kept.push((idx + 1, line));
    }

    kept
}
