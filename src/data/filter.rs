use std::fmt;

use chrono::Duration;

use super::model::SensorDataset;

// ---------------------------------------------------------------------------
// Time window: which rows are plotted
// ---------------------------------------------------------------------------

/// Span of data shown, measured back from the newest sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    #[default]
    All,
    LastHours(u32),
}

impl TimeWindow {
    /// Choices offered in the top bar.
    pub const PRESETS: [TimeWindow; 4] = [
        TimeWindow::All,
        TimeWindow::LastHours(1),
        TimeWindow::LastHours(6),
        TimeWindow::LastHours(24),
    ];
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeWindow::All => write!(f, "All"),
            TimeWindow::LastHours(h) => write!(f, "Last {h} h"),
        }
    }
}

/// Return indices of rows inside `window`, in dataset order.
///
/// A row passes when its timestamp is no older than `window` before the
/// newest timestamp. [`TimeWindow::All`] keeps every row.
pub fn rows_in_window(dataset: &SensorDataset, window: TimeWindow) -> Vec<usize> {
    let hours = match window {
        TimeWindow::All => return (0..dataset.len()).collect(),
        TimeWindow::LastHours(h) => h,
    };
    let Some(latest) = dataset.latest() else {
        return Vec::new();
    };
    let cutoff = *latest - Duration::hours(i64::from(hours));

    dataset
        .timestamps
        .iter()
        .enumerate()
        .filter(|(_, ts)| **ts >= cutoff)
        .map(|(i, _)| i)
        .collect()
}
