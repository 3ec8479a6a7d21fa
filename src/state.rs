use std::collections::BTreeSet;

use crate::color::SeriesColors;
use crate::data::assembler::assemble;
use crate::data::filter::{rows_in_window, TimeWindow};
use crate::data::model::SensorDataset;
use crate::data::schema::ExperimentSchema;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Column names and panel layout of the selected experiment.
    pub schema: ExperimentSchema,

    /// Glob pattern the dataset is loaded from.
    pub input_pattern: String,

    /// Loaded dataset.
    pub dataset: Option<SensorDataset>,

    /// Sensors the user switched off.
    pub hidden_series: BTreeSet<String>,

    /// Active time window.
    pub window: TimeWindow,

    /// Indices of rows inside the time window (cached).
    pub visible_rows: Vec<usize>,

    pub colors: SeriesColors,

    /// Height of each plot panel in points.
    pub panel_height: f32,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(schema: ExperimentSchema, input_pattern: String) -> Self {
        let colors = SeriesColors::for_schema(&schema);
        Self {
            schema,
            input_pattern,
            dataset: None,
            hidden_series: BTreeSet::new(),
            window: TimeWindow::default(),
            visible_rows: Vec::new(),
            colors,
            panel_height: 300.0,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset.
    pub fn set_dataset(&mut self, dataset: SensorDataset) {
        self.status_message = if dataset.skipped.is_empty() {
            None
        } else {
            Some(format!("{} file(s) skipped", dataset.skipped.len()))
        };
        self.visible_rows = rows_in_window(&dataset, self.window);
        self.dataset = Some(dataset);
    }

    /// Re-read every file matching the current pattern.
    ///
    /// On failure the previous dataset stays on screen.
    pub fn reload(&mut self) {
        match assemble(&self.input_pattern, &self.schema) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", self.input_pattern);
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Switch to a new pattern and load it.
    pub fn set_input_pattern(&mut self, pattern: String) {
        self.input_pattern = pattern;
        self.reload();
    }

    /// Change the time window and recompute visible rows.
    pub fn set_window(&mut self, window: TimeWindow) {
        self.window = window;
        if let Some(ds) = &self.dataset {
            self.visible_rows = rows_in_window(ds, window);
        }
    }

    pub fn is_visible(&self, series: &str) -> bool {
        !self.hidden_series.contains(series)
    }

    /// Toggle a single sensor on or off.
    pub fn toggle_series(&mut self, series: &str) {
        if !self.hidden_series.remove(series) {
            self.hidden_series.insert(series.to_string());
        }
    }

    /// Show or hide every sensor of one panel.
    pub fn set_panel_visible(&mut self, panel: usize, visible: bool) {
        let Some(spec) = self.schema.panels.get(panel) else {
            return;
        };
        for name in self.schema.panel_columns(spec) {
            if visible {
                self.hidden_series.remove(name);
            } else {
                self.hidden_series.insert(name.to_string());
            }
        }
    }
}
