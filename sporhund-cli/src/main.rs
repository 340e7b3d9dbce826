//! ## sporhund-cli
//! **Unified operational interface**
//!
//! Sporhund main entrypoint: interactive scanning prompt, fixed-workload
//! benchmark pass, and the canned scenario list.

use clap::Parser;
use sporhund_telemetry::logging::EventLogger;
use sporhund_telemetry::metrics::MetricsRecorder;

mod commands;

use commands::Cli;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    EventLogger::init();
    let metrics = MetricsRecorder::new();
    let cli = Cli::parse();

    commands::run(cli, metrics)
}
