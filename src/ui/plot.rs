use chrono::DateTime;
use eframe::egui::{ScrollArea, Ui};
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoint, PlotPoints};

use crate::data::model::{SensorDataset, SensorSeries};
use crate::data::timestamp::DISPLAY_TZ;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Panel plots (central panel)
// ---------------------------------------------------------------------------

/// Render one stacked plot per schema panel.
pub fn panel_plots(ui: &mut Ui, state: &AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("No log data loaded  (File → Open log folder…)");
            });
            return;
        }
    };

    let x_label = time_axis_label(dataset);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (i, panel) in state.schema.panels.iter().enumerate() {
                let names = state.schema.panel_columns(panel);

                Plot::new(format!("panel_{i}"))
                    .height(state.panel_height)
                    .legend(Legend::default())
                    .x_axis_label(x_label.as_str())
                    .y_axis_label(panel.label)
                    .x_axis_formatter(|mark: GridMark, _range| format_time(mark.value, "%m/%d %H:%M"))
                    .label_formatter(|name: &str, value: &PlotPoint| {
                        let time = format_time(value.x, "%Y-%m-%d %H:%M:%S");
                        if name.is_empty() {
                            time
                        } else {
                            format!("{name}\n{time}\n{:.4}", value.y)
                        }
                    })
                    .allow_boxed_zoom(true)
                    .allow_drag(true)
                    .allow_scroll(true)
                    .allow_zoom(true)
                    .show(ui, |plot_ui| {
                        for name in names.iter().filter(|n| state.is_visible(n)) {
                            let Some(series) = dataset.series(name) else {
                                continue;
                            };
                            let color = state.colors.color_for(name);

                            for segment in line_segments(dataset, series, &state.visible_rows) {
                                let points: PlotPoints = segment.into_iter().collect();
                                plot_ui.line(Line::new(points).name(*name).color(color).width(1.5));
                            }
                        }
                    });

                ui.add_space(8.0);
            }
        });
}

/// Split a series into runs of consecutive present values.
///
/// Missing values end a run so the chart shows a gap instead of bridging it.
pub fn line_segments(
    dataset: &SensorDataset,
    series: &SensorSeries,
    rows: &[usize],
) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();

    for &row in rows {
        match series.values.get(row).copied().flatten() {
            Some(y) => {
                let x = dataset.timestamps[row].timestamp() as f64;
                current.push([x, y]);
            }
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// X-axis label: the timestamp column name and the display zone.
pub fn time_axis_label(dataset: &SensorDataset) -> String {
    format!("{} ({})", dataset.timestamp_column, DISPLAY_TZ.name())
}

/// Format seconds since the epoch in the display zone.
fn format_time(seconds: f64, fmt: &str) -> String {
    DateTime::from_timestamp(seconds.round() as i64, 0)
        .map(|utc| utc.with_timezone(&DISPLAY_TZ).format(fmt).to_string())
        .unwrap_or_default()
}
