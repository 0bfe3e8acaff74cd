use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::calendar::TimeWindow;
use crate::contributions::ContributionDay;

const GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

const CONTRIBUTIONS_QUERY: &str = r#"
query ($username: String!, $from: DateTime!, $to: DateTime!) {
    user(login: $username) {
        contributionsCollection(from: $from, to: $to) {
            contributionCalendar {
                weeks {
                    contributionDays {
                        date
                        contributionCount
                    }
                }
            }
        }
    }
}
"#;

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    user: Option<User>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct User {
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Deserialize)]
struct ContributionCalendar {
    weeks: Vec<Week>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Week {
    contribution_days: Vec<ContributionDay>,
}

/// Client for the GitHub GraphQL API. The bearer token is plain constructor
/// state so callers decide where it comes from and tests can inject a fake.
#[derive(Debug, Clone)]
pub struct GithubClient {
    token: String,
    endpoint: String,
}

impl GithubClient {
    pub fn new(token: String) -> Self {
        Self {
            token,
            endpoint: GRAPHQL_ENDPOINT.to_string(),
        }
    }

    /// Point the client at a different endpoint, e.g. a local test server.
    pub fn with_endpoint(token: String, endpoint: String) -> Self {
        Self { token, endpoint }
    }

    /// Fetches all contribution days for `username` within `window`,
    /// flattened across weeks in the order the server returned them.
    pub fn fetch_window(
        &self,
        username: &str,
        window: &TimeWindow,
    ) -> Result<Vec<ContributionDay>> {
        let payload = json!({
            "query": CONTRIBUTIONS_QUERY,
            "variables": {
                "username": username,
                "from": window.rfc3339_from(),
                "to": window.rfc3339_to(),
            }
        });

        info!(
            action = "fetch",
            component = "github",
            username,
            from = %window.from,
            to = %window.to,
            "Requesting contribution window"
        );

        let response = ureq::post(&self.endpoint)
            .set("Authorization", &format!("Bearer {}", self.token))
            .send_json(payload)
            .with_context(|| format!("GraphQL request to {} failed", self.endpoint))?;

        let parsed: GraphQlResponse = response
            .into_json()
            .context("Failed to deserialize GraphQL response")?;

        let days = flatten_days(parsed, username)?;

        info!(
            action = "fetched",
            component = "github",
            username,
            day_count = days.len(),
            "Contribution window fetched"
        );
        Ok(days)
    }
}

fn flatten_days(response: GraphQlResponse, username: &str) -> Result<Vec<ContributionDay>> {
    if !response.errors.is_empty() {
        let messages: Vec<&str> = response
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect();
        bail!("GraphQL query returned errors: {}", messages.join("; "));
    }

    let user = response
        .data
        .and_then(|data| data.user)
        .with_context(|| format!("GraphQL response contains no user '{}'", username))?;

    Ok(user
        .contributions_collection
        .contribution_calendar
        .weeks
        .into_iter()
        .flat_map(|week| week.contribution_days)
        .collect())
}
