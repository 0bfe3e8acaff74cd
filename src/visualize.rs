use anyhow::{bail, Context, Result};
use std::process::{Command, Stdio};
use tracing::info;

const PYTHON_INTERPRETER: &str = "python3";
const VISUALIZE_SCRIPT: &str = "visualize_contributions.py";

/// The visualization step is an external collaborator; the trait keeps it
/// stubbable in tests.
pub trait Visualizer {
    fn run(&self) -> Result<()>;
}

/// Runs the bundled matplotlib script. The script picks up
/// `contributions.csv` from the working directory by convention, so no
/// argument is passed.
#[derive(Debug, Default)]
pub struct PythonVisualizer;

impl Visualizer for PythonVisualizer {
    fn run(&self) -> Result<()> {
        info!(
            action = "start",
            component = "visualizer",
            script = VISUALIZE_SCRIPT,
            "Launching visualization script"
        );

        let status = Command::new(PYTHON_INTERPRETER)
            .arg(VISUALIZE_SCRIPT)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| {
                format!("Failed to launch {} {}", PYTHON_INTERPRETER, VISUALIZE_SCRIPT)
            })?;

        if !status.success() {
            bail!("Visualization script exited with status {}", status);
        }

        info!(
            action = "complete",
            component = "visualizer",
            "Visualization script finished"
        );
        Ok(())
    }
}
