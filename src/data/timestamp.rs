use std::path::Path;

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use super::error::{DataError, Result};

/// Wall-clock zone the logging PC writes timestamps in.
pub const SOURCE_TZ: Tz = chrono_tz::Europe::Berlin;

/// Zone timestamps are displayed in.
pub const DISPLAY_TZ: Tz = chrono_tz::Asia::Tokyo;

/// Format of a rewritten timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d_%H:%M:%S";

/// Rewrite `2025/06/28_18h50m58s` (or `18h/50m/58s`) to `2025/06/28_18:50:58`.
pub fn rewrite_timestamp(raw: &str) -> String {
    let raw = raw.trim();
    let (date, time) = match raw.split_once('_') {
        Some(parts) => parts,
        None => return raw.to_string(),
    };

    let time = time.strip_suffix('s').unwrap_or(time);
    let time = time
        .replace("h/", ":")
        .replace("m/", ":")
        .replacen('h', ":", 1)
        .replacen('m', ":", 1);

    format!("{date}_{time}")
}

/// Parse a raw log timestamp into a naive wall-clock time.
pub fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&rewrite_timestamp(raw), TIMESTAMP_FORMAT).ok()
}

/// Parse a raw log timestamp, attach [`SOURCE_TZ`] and convert to [`DISPLAY_TZ`].
///
/// `path` and `line` only feed error messages. Local times that fall into a
/// daylight-saving fold or gap are rejected.
pub fn convert_timestamp(raw: &str, path: &Path, line: usize) -> Result<DateTime<Tz>> {
    let naive = parse_naive(raw).ok_or_else(|| DataError::Timestamp {
        path: path.to_path_buf(),
        line,
        raw: raw.to_string(),
    })?;

    let local = match SOURCE_TZ.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(_, _) => {
            return Err(DataError::AmbiguousTime {
                path: path.to_path_buf(),
                line,
                local: naive.to_string(),
                zone: SOURCE_TZ.name(),
            })
        }
        LocalResult::None => {
            return Err(DataError::NonexistentTime {
                path: path.to_path_buf(),
                line,
                local: naive.to_string(),
                zone: SOURCE_TZ.name(),
            })
        }
    };

    Ok(local.with_timezone(&DISPLAY_TZ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn convert(raw: &str) -> Result<DateTime<Tz>> {
        convert_timestamp(raw, Path::new("log.txt"), 1)
    }

    #[test]
    fn test_rewrite() {
        assert_eq!(rewrite_timestamp("2025/06/28_18h50m58s"), "2025/06/28_18:50:58");
        assert_eq!(rewrite_timestamp("2025/06/28_18h/50m/58s"), "2025/06/28_18:50:58");
        assert_eq!(rewrite_timestamp(" 2025/06/28_18:50:58 "), "2025/06/28_18:50:58");
    }

    #[test]
    fn test_summer_time_to_jst() -> Result<()> {
        let jst = convert("2025/06/28_18h50m58s")?;

        assert_eq!(jst.timezone(), DISPLAY_TZ);
        assert_eq!((jst.year(), jst.month(), jst.day()), (2025, 6, 29));
        assert_eq!((jst.hour(), jst.minute(), jst.second()), (1, 50, 58));

        Ok(())
    }

    #[test]
    fn test_winter_time_to_jst() -> Result<()> {
        let jst = convert("2025/01/10_08h00m00s")?;
        assert_eq!(jst.format("%Y-%m-%d %H:%M:%S").to_string(), "2025-01-10 16:00:00");
        Ok(())
    }

    #[test]
    fn test_bad_timestamp() {
        let err = convert("yesterday").unwrap_err();
        assert!(matches!(err, DataError::Timestamp { .. }));

        let err = convert("2025/13/01_00h00m00s").unwrap_err();
        assert!(matches!(err, DataError::Timestamp { .. }));
    }

    #[test]
    fn test_dst_fold_is_ambiguous() {
        // 2025-10-26 02:30 happens twice in Berlin.
        let err = convert("2025/10/26_02h30m00s").unwrap_err();
        assert!(matches!(err, DataError::AmbiguousTime { .. }));
    }

    #[test]
    fn test_dst_gap_is_nonexistent() {
        // 2025-03-30 02:30 is skipped in Berlin.
        let err = convert("2025/03/30_02h30m00s").unwrap_err();
        assert!(matches!(err, DataError::NonexistentTime { .. }));
    }
}
