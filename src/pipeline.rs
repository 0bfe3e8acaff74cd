use anyhow::{Context, Result};
use chrono::Utc;
use std::time::Instant;
use tracing::info;

use crate::args::Args;
use crate::calendar;
use crate::contributions::{self, ContributionMap};
use crate::export;
use crate::github::GithubClient;
use crate::utils;
use crate::visualize::Visualizer;

/// The export always covers five one-year windows back from now.
pub const WINDOW_COUNT: u32 = 5;

#[derive(Debug)]
pub struct ExportSummary {
    pub fetched_days: usize,
    pub distinct_dates: usize,
    pub rows_written: usize,
    pub rows_skipped: usize,
    pub date_range: Option<(String, String)>,
}

/// Runs the whole pipeline: window the last five years, fetch each window
/// sequentially, merge by date, write and verify the CSV, then hand off to
/// the visualizer. Any phase error aborts the run.
pub fn run_export(
    args: &Args,
    client: &GithubClient,
    visualizer: &dyn Visualizer,
) -> Result<ExportSummary> {
    let total_start = Instant::now();
    info!(
        action = "start",
        component = "pipeline",
        username = %args.username,
        "Starting contribution export"
    );

    let windows = calendar::year_windows(Utc::now(), WINDOW_COUNT);

    let mut map = ContributionMap::new();
    let mut fetched_days = 0;
    for window in &windows {
        let days = client
            .fetch_window(&args.username, window)
            .with_context(|| {
                format!(
                    "Failed to fetch contributions for window {} to {}",
                    window.rfc3339_from(),
                    window.rfc3339_to()
                )
            })?;
        fetched_days += days.len();
        contributions::merge_days(&mut map, days);
    }

    info!(
        action = "aggregated",
        component = "pipeline",
        fetched_days,
        distinct_dates = map.len(),
        "Merged contribution windows"
    );

    let stats = export::write_contributions(&map, &args.output)?;
    let _data_rows = export::verify_contributions(&args.output)?;

    if args.no_visualize {
        info!(
            action = "skip",
            component = "pipeline",
            "Visualization step disabled"
        );
    } else {
        visualizer.run()?;
    }

    let date_range = {
        let mut dates: Vec<&String> = map.keys().filter(|date| !date.is_empty()).collect();
        dates.sort();
        match (dates.first(), dates.last()) {
            (Some(first), Some(last)) => Some(((*first).clone(), (*last).clone())),
            _ => None,
        }
    };

    let total_time = total_start.elapsed();
    info!(
        action = "complete",
        component = "pipeline",
        duration_ms = total_time.as_millis(),
        "Contribution export completed"
    );

    Ok(ExportSummary {
        fetched_days,
        distinct_dates: map.len(),
        rows_written: stats.written,
        rows_skipped: stats.skipped,
        date_range,
    })
}

pub fn print_export_summary(summary: &ExportSummary, args: &Args) {
    println!("\n--- GitHub Contribution Export: {} ---", args.username);

    if let Some((first, last)) = &summary.date_range {
        println!("Date range: {} to {}", first, last);
    }

    println!(
        "Days fetched: {}",
        utils::format_number(summary.fetched_days)
    );
    println!(
        "Distinct dates: {}",
        utils::format_number(summary.distinct_dates)
    );
    println!(
        "Rows written: {} ({} skipped)",
        utils::format_number(summary.rows_written),
        utils::format_number(summary.rows_skipped)
    );
    println!("Contribution data written to {}", args.output.display());
}
