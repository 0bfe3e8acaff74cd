use serde::Deserialize;
use std::collections::HashMap;

/// A single day's contribution count as reported by the GitHub API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContributionDay {
    pub date: String,
    #[serde(rename = "contributionCount")]
    pub count: u32,
}

/// Contribution counts keyed by calendar date string.
pub type ContributionMap = HashMap<String, u32>;

/// Folds a window's days into the map. Later windows overwrite earlier ones
/// for the same date; windows are disjoint by construction so this only
/// matters if the server reports a date twice.
pub fn merge_days(map: &mut ContributionMap, days: Vec<ContributionDay>) {
    for day in days {
        map.insert(day.date, day.count);
    }
}
