mod app;
mod color;
mod data;
mod state;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use app::StrasseApp;
use data::assembler::assemble;
use data::schema::experiment;
use state::AppState;

/// STRASSE log viewer - plot cryogenic target sensor logs
#[derive(Parser, Debug)]
#[command(name = "strasse-log-viewer")]
#[command(about = "Plot STRASSE cryogenic target sensor logs", long_about = None)]
#[command(version)]
struct Args {
    /// Glob pattern of the log files to load
    #[arg(short, long, value_name = "GLOB", default_value = "./data/onokoro57/logs/*.txt")]
    input: String,

    /// Experiment number selecting the column layout
    #[arg(short, long, value_name = "N", default_value_t = 57)]
    experiment_number: u32,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    let schema = experiment(args.experiment_number)?;
    let dataset = assemble(&args.input, &schema)
        .with_context(|| format!("loading {} logs from {}", schema.name, args.input))?;

    let title = schema.title;
    let mut state = AppState::new(schema, args.input);
    state.set_dataset(dataset);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 1000.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        title,
        options,
        Box::new(|_cc| Ok(Box::new(StrasseApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}

/// Default `info`, raised by `-v`, lowered by `-q`; `RUST_LOG` still wins.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Error
    } else {
        match verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["strasse-log-viewer"]).unwrap();
        assert_eq!(args.input, "./data/onokoro57/logs/*.txt");
        assert_eq!(args.experiment_number, 57);
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_args_flags() {
        let args = Args::try_parse_from([
            "strasse-log-viewer",
            "-i",
            "logs/*.txt",
            "-e",
            "57",
            "-vv",
            "-q",
        ])
        .unwrap();
        assert_eq!(args.input, "logs/*.txt");
        assert_eq!(args.verbose, 2);
        assert!(args.quiet);
    }

    #[test]
    fn test_unknown_experiment_is_rejected() {
        let args = Args::try_parse_from(["strasse-log-viewer", "-e", "58"]).unwrap();
        let err = experiment(args.experiment_number).unwrap_err();
        assert!(err.to_string().contains("experiment number does not exist"));
    }
}
