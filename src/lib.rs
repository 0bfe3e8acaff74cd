pub mod args;
pub mod calendar;
pub mod contributions;
pub mod export;
pub mod github;
pub mod pipeline;
pub mod utils;
pub mod visualize;

pub use args::Args;
pub use contributions::{ContributionDay, ContributionMap};
pub use github::GithubClient;
pub use pipeline::{run_export, ExportSummary};
pub use visualize::{PythonVisualizer, Visualizer};
