use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::path::Path;
use tracing::{info, warn};

use crate::contributions::ContributionMap;

pub const CSV_HEADER: [&str; 2] = ["Date", "Contributions"];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WriteStats {
    pub written: usize,
    pub skipped: usize,
}

/// Writes the contribution map to `path` as `Date,Contributions` rows,
/// sorted by date for deterministic output. Entries with an empty date or a
/// zero count are skipped and logged rather than aborting the export.
pub fn write_contributions(map: &ContributionMap, path: &Path) -> Result<WriteStats> {
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("Failed to create CSV file at {}", path.display()))?;

    writer
        .write_record(CSV_HEADER)
        .context("Failed to write CSV header")?;

    let mut entries: Vec<(&String, &u32)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut stats = WriteStats::default();
    for (date, count) in entries {
        if date.is_empty() || *count == 0 {
            warn!(
                action = "skip",
                component = "csv_export",
                date = %date,
                contributions = count,
                "Skipping invalid record"
            );
            stats.skipped += 1;
            continue;
        }

        info!(
            action = "write",
            component = "csv_export",
            date = %date,
            contributions = count,
            "Writing record"
        );
        writer
            .write_record([date.as_str(), count.to_string().as_str()])
            .with_context(|| format!("Failed to write record for {}", date))?;
        stats.written += 1;
    }

    writer.flush().context("Failed to flush CSV writer")?;

    info!(
        action = "complete",
        component = "csv_export",
        written = stats.written,
        skipped = stats.skipped,
        path = %path.display(),
        "CSV export completed"
    );
    Ok(stats)
}

/// Post-write sanity check: reopens the file and validates that it is
/// non-empty and starts with the exact expected header. Returns the number
/// of data rows. Row contents are not validated.
pub fn verify_contributions(path: &Path) -> Result<usize> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file at {}", path.display()))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record.context("Failed to parse CSV record")?);
    }

    if rows.is_empty() {
        bail!("CSV file {} is empty", path.display());
    }

    let header = &rows[0];
    if header.len() != 2 || &header[0] != CSV_HEADER[0] || &header[1] != CSV_HEADER[1] {
        bail!(
            "CSV file {} has an incorrect header (expected {})",
            path.display(),
            CSV_HEADER.join(",")
        );
    }

    info!(
        action = "verified",
        component = "csv_export",
        data_rows = rows.len() - 1,
        path = %path.display(),
        "CSV file verification passed"
    );
    Ok(rows.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn map_of(entries: &[(&str, u32)]) -> ContributionMap {
        entries
            .iter()
            .map(|(date, count)| (date.to_string(), *count))
            .collect()
    }

    #[test]
    fn test_writes_sorted_rows_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contributions.csv");
        let map = map_of(&[("2023-01-02", 5), ("2023-01-01", 3)]);

        let stats = write_contributions(&map, &path).unwrap();

        assert_eq!(stats.written, 2);
        assert_eq!(stats.skipped, 0);

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec!["Date,Contributions", "2023-01-01,3", "2023-01-02,5"]
        );
    }

    #[test]
    fn test_skips_empty_dates_and_zero_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contributions.csv");
        let map = map_of(&[("2023-01-01", 3), ("2023-01-02", 0), ("", 5)]);

        let stats = write_contributions(&map, &path).unwrap();

        assert_eq!(stats.written, 1);
        assert_eq!(stats.skipped, 2);

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["Date,Contributions", "2023-01-01,3"]);
    }

    #[test]
    fn test_write_then_verify_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contributions.csv");
        let map = map_of(&[("2023-01-01", 3), ("2023-01-02", 0), ("2023-01-03", 7)]);

        let stats = write_contributions(&map, &path).unwrap();
        let data_rows = verify_contributions(&path).unwrap();

        assert_eq!(data_rows, stats.written);
        assert_eq!(data_rows, 2);
    }

    #[test]
    fn test_verify_rejects_fully_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contributions.csv");
        fs::write(&path, "").unwrap();

        let err = verify_contributions(&path).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_verify_accepts_header_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contributions.csv");
        fs::write(&path, "Date,Contributions\n").unwrap();

        assert_eq!(verify_contributions(&path).unwrap(), 0);
    }

    #[test]
    fn test_verify_rejects_wrong_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contributions.csv");
        fs::write(&path, "Date,Count\n2023-01-01,3\n").unwrap();

        let err = verify_contributions(&path).unwrap_err();
        assert!(err.to_string().contains("incorrect header"));
    }
}
