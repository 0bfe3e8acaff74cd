use anyhow::Result;
use clap::Parser;
use std::env;
use tracing::{error, warn};

use gitcontrib::{pipeline, utils, Args, GithubClient, PythonVisualizer};

const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);
    utils::validate_args(&args)?;

    // A missing token is not an error here; the API rejects the
    // unauthenticated request instead.
    let token = env::var(TOKEN_ENV_VAR).unwrap_or_default();
    if token.is_empty() {
        warn!(
            action = "configure",
            component = "github",
            "GITHUB_TOKEN is not set; requests will be unauthenticated"
        );
    }

    let client = GithubClient::new(token);
    let visualizer = PythonVisualizer;

    match pipeline::run_export(&args, &client, &visualizer) {
        Ok(summary) => {
            pipeline::print_export_summary(&summary, &args);
            Ok(())
        }
        Err(e) => {
            error!(
                action = "abort",
                component = "pipeline",
                "Contribution export failed: {:#}",
                e
            );
            std::process::exit(1);
        }
    }
}
