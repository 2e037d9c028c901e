//! Live adapter for the `TaskSource` port using the ClickUp v2 API.

use std::env;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::ports::tasks::{FetchOutcome, TaskFuture, TaskSource};

const CLICKUP_API_URL: &str = "https://api.clickup.com/api/v2";

/// Live task source that calls the ClickUp API.
///
/// Tasks are gathered in two steps: list all lists in the space, then
/// fetch the tasks of each list and concatenate them. A list that fails
/// mid-walk is skipped and reported in the outcome.
pub struct LiveTaskSource {
    client: Client,
}

impl LiveTaskSource {
    /// Creates a new live task source.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for LiveTaskSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Response from the space lists endpoint.
#[derive(Deserialize)]
struct ListsResponse {
    #[serde(default)]
    lists: Vec<ListEntry>,
}

/// One list entry in a space.
#[derive(Deserialize)]
struct ListEntry {
    id: String,
    #[serde(default)]
    name: String,
}

/// Response from the list tasks endpoint.
#[derive(Deserialize)]
struct TasksResponse {
    #[serde(default)]
    tasks: Vec<Value>,
}

impl TaskSource for LiveTaskSource {
    fn fetch_space_tasks(&self, space_id: &str) -> TaskFuture<'_> {
        let space_id = space_id.to_string();

        Box::pin(async move {
            let token = env::var("CLICKUP_TOKEN").map_err(|_| {
                Box::<dyn std::error::Error + Send + Sync>::from(
                    "CLICKUP_TOKEN environment variable not set",
                )
            })?;

            let lists_url = format!("{CLICKUP_API_URL}/space/{space_id}/list");
            let response = self
                .client
                .get(&lists_url)
                .header("Authorization", &token)
                .send()
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("ClickUp lists request failed: {e}").into()
                })?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(
                    format!("ClickUp lists request failed ({}): {body}", status.as_u16()).into()
                );
            }

            let lists: ListsResponse = response.json().await.map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to parse ClickUp lists response: {e}").into()
                },
            )?;

            // One broken list must not discard the tasks already gathered
            // from the others; only the space-level listing above aborts.
            let mut outcome = FetchOutcome::default();
            for list in lists.lists {
                let tasks_url = format!("{CLICKUP_API_URL}/list/{}/task", list.id);
                let response = match self
                    .client
                    .get(&tasks_url)
                    .header("Authorization", &token)
                    .send()
                    .await
                {
                    Ok(response) => response,
                    Err(e) => {
                        outcome
                            .failures
                            .push(format!("tasks request failed for list {}: {e}", list.name));
                        continue;
                    }
                };

                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    outcome.failures.push(format!(
                        "tasks request failed for list {} ({}): {body}",
                        list.name,
                        status.as_u16()
                    ));
                    continue;
                }

                match response.json::<TasksResponse>().await {
                    Ok(tasks) => outcome.tasks.extend(tasks.tasks),
                    Err(e) => outcome.failures.push(format!(
                        "failed to parse tasks response for list {}: {e}",
                        list.name
                    )),
                }
            }

            Ok(outcome)
        })
    }
}
