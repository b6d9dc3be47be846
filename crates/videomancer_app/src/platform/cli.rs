use std::path::PathBuf;

use clap::Parser;
use videomancer_core::Style;

use super::logging::LogDestination;

/// Scenario-to-video generation demo.
///
/// Without `--scenario` the app reads commands from stdin; type `help` for a list.
#[derive(Debug, Clone, Parser)]
#[command(name = "videomancer", version)]
pub struct Cli {
    /// RON config file with sample videos, seed and log destination.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for the sample video choice; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where log output goes.
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,

    /// Generate a single video for this scenario, print the result and exit.
    #[arg(long)]
    pub scenario: Option<String>,

    /// Style for `--scenario` (cinematic, clips, timelapse, explainer).
    #[arg(long, requires = "scenario")]
    pub style: Option<Style>,
}
