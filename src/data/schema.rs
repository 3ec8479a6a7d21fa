use std::ops::RangeInclusive;

use super::error::{DataError, Result};

/// Number of columns every onokoro log row carries (timestamp + 19 sensors).
pub const COLUMN_COUNT: usize = 20;

// ---------------------------------------------------------------------------
// Panel layout
// ---------------------------------------------------------------------------

/// A chart panel: a y-axis label and the schema columns drawn in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSpec {
    pub label: &'static str,
    /// Column positions in the schema (1-based sensor positions, 0 is the timestamp).
    pub columns: RangeInclusive<usize>,
}

// ---------------------------------------------------------------------------
// Experiment schema
// ---------------------------------------------------------------------------

/// Ordered column names and panel grouping for one experiment's log format.
#[derive(Debug, Clone)]
pub struct ExperimentSchema {
    pub number: u32,
    pub name: &'static str,
    pub title: &'static str,
    pub columns: [&'static str; COLUMN_COUNT],
    pub panels: Vec<PanelSpec>,
}

impl ExperimentSchema {
    /// Name of the timestamp column.
    pub fn timestamp_column(&self) -> &'static str {
        self.columns[0]
    }

    /// Sensor column names (everything but the timestamp), in order.
    pub fn sensor_columns(&self) -> &[&'static str] {
        &self.columns[1..]
    }

    /// Number of columns a log row must have.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Column names for a panel.
    pub fn panel_columns(&self, panel: &PanelSpec) -> Vec<&'static str> {
        panel.columns.clone().map(|i| self.columns[i]).collect()
    }
}

/// Onokoro experiment 57.
pub fn onokoro57() -> ExperimentSchema {
    ExperimentSchema {
        number: 57,
        name: "onokoro57",
        title: "STRASSE log viewer",
        columns: [
            "Timestamp",
            "Target Holder (bottom)",
            "Target Holder (1/3)",
            "Target Holder (top)",
            "Cold Head (stage 1)",
            "Feed-Through (Supply)",
            "Feed-Through (Return)",
            "2nd stage CH (SD)",
            "2nd stage CH (PT)",
            "Setpoint(1)",
            "PT02 (Cryostat filling line)",
            "PT01 (Buffer Tank)",
            "Target Chamber",
            "Cryostat Chamber",
            "Gas System Pump",
            "heater output 1",
            "heater output 2",
            "Cold Valve (ON=100%/OFF=0%)",
            "Compressor (ON=100%/OFF=0%)",
            "H2 Filling (ON=100%/OFF=0%)",
        ],
        panels: vec![
            PanelSpec {
                label: "Temperatures [K]",
                columns: 1..=9,
            },
            PanelSpec {
                label: "Pressures [bar]",
                columns: 10..=14,
            },
            PanelSpec {
                label: "Status / heater output [%]",
                columns: 15..=19,
            },
        ],
    }
}

/// Look up the schema registered for an experiment number.
pub fn experiment(number: u32) -> Result<ExperimentSchema> {
    match number {
        57 => Ok(onokoro57()),
        other => Err(DataError::UnknownExperiment(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_onokoro57_panels_cover_every_sensor_once() {
        let schema = onokoro57();
        let mut plotted: Vec<&str> = schema
            .panels
            .iter()
            .flat_map(|p| schema.panel_columns(p))
            .collect();
        plotted.sort_unstable();

        let mut sensors = schema.sensor_columns().to_vec();
        sensors.sort_unstable();

        assert_eq!(plotted, sensors);
        assert_eq!(schema.sensor_columns().len(), 19);
    }

    #[test]
    fn test_experiment_lookup() {
        let schema = experiment(57).unwrap();
        assert_eq!(schema.name, "onokoro57");
        assert_eq!(schema.timestamp_column(), "Timestamp");

        let err = experiment(58).unwrap_err();
        assert!(matches!(err, DataError::UnknownExperiment(58)));
        assert!(err.to_string().contains("experiment number does not exist"));
    }
}
