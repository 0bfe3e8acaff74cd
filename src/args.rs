use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gitcontrib",
    about = "Export a GitHub user's contribution history to CSV and hand it to a visualizer",
    version,
    long_about = None
)]
pub struct Args {
    /// GitHub username to export contributions for
    #[arg(short, long)]
    pub username: String,

    /// Path of the CSV file to write
    #[arg(short, long, default_value = "contributions.csv")]
    pub output: PathBuf,

    /// Skip the external visualization step
    #[arg(long)]
    pub no_visualize: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
