//! drawdeck CLI entry point.

use std::{fmt::Write as _, process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use drawdeck_cli::{Args, error_adapter::to_reportable};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting drawdeck");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = drawdeck_cli::run(&args) {
        let reporter = miette::GraphicalReportHandler::new();
        let reportable = to_reportable(&err);

        let mut writer = String::new();
        if reporter.render_report(&mut writer, &reportable).is_err() {
            // Fall back to the plain message if the report cannot be rendered.
            writer.clear();
            let _ = write!(writer, "{err}");
        }
        error!("{writer}");

        process::exit(1);
    }

    info!("Completed successfully");
}
