//! Notion database as a task store.
//!
//! The database is expected to have these properties: Activity (title),
//! Date (date), Time (rich text, "hh:mm AM/PM"), Duration (number, minutes),
//! Energy (select), Status (select), Category (select).

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde_json::{json, Value};
use url::Url;

use super::traits::TaskStore;
use crate::clock;
use crate::error::StoreError;
use crate::task::{ExistingTask, NewTask, PLANNED_STATUS};

const NOTION_VERSION: &str = "2022-06-28";
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com";

pub struct NotionTaskStore {
    api_token: String,
    database_id: String,
    base_url: Url,
    client: Client,
}

/// Database ids are accepted with or without hyphens.
pub fn normalize_database_id(raw: &str) -> String {
    raw.trim().replace('-', "")
}

impl NotionTaskStore {
    pub fn new(
        api_token: impl Into<String>,
        database_id: &str,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let api_token = api_token.into();
        let database_id = normalize_database_id(database_id);
        if api_token.trim().is_empty() || database_id.is_empty() {
            return Err(StoreError::NotConfigured {
                store: "Notion".into(),
                message: "both an integration token and a database ID are required".into(),
            });
        }
        let base_url = Url::parse(base_url).map_err(|e| StoreError::NotConfigured {
            store: "Notion".into(),
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_token,
            database_id,
            base_url,
            client,
        })
    }

    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    fn endpoint(&self, path: &str) -> Result<Url, StoreError> {
        self.base_url
            .join(path)
            .map_err(|e| StoreError::Request(format!("invalid endpoint '{path}': {e}")))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.api_token)
            .header("Notion-Version", NOTION_VERSION)
    }

    fn query_page(&self, body: &Value) -> Result<Value, StoreError> {
        let url = self.endpoint(&format!("v1/databases/{}/query", self.database_id))?;
        let resp = self.authorized(self.client.post(url)).json(body).send()?;
        if !resp.status().is_success() {
            return Err(error_from_response(resp));
        }
        Ok(resp.json()?)
    }
}

impl TaskStore for NotionTaskStore {
    fn name(&self) -> &str {
        "notion"
    }

    fn display_name(&self) -> &str {
        "Notion"
    }

    fn test_connection(&self) -> Result<(), StoreError> {
        let url = self.endpoint(&format!("v1/databases/{}", self.database_id))?;
        let resp = self.authorized(self.client.get(url)).send()?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(resp))
        }
    }

    fn fetch_tasks(&self, date: Option<NaiveDate>) -> Result<Vec<ExistingTask>, StoreError> {
        let mut tasks = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut body = json!({});
            if let Some(date) = date {
                body["filter"] = json!({
                    "property": "Date",
                    "date": { "equals": clock::format_date(date) }
                });
            }
            if let Some(cursor) = &cursor {
                body["start_cursor"] = json!(cursor);
            }

            let page = self.query_page(&body)?;
            let results = page["results"]
                .as_array()
                .ok_or_else(|| StoreError::Malformed("query response has no results".into()))?;
            tasks.extend(results.iter().map(task_from_page));

            cursor = match (page["has_more"].as_bool(), page["next_cursor"].as_str()) {
                (Some(true), Some(next)) => Some(next.to_string()),
                _ => break,
            };
        }

        tracing::debug!(count = tasks.len(), ?date, "fetched tasks from Notion");
        Ok(tasks)
    }

    fn create_task(&self, task: &NewTask) -> Result<(), StoreError> {
        let body = json!({
            "parent": { "database_id": self.database_id },
            "properties": {
                "Activity": {
                    "title": [{ "text": { "content": task.activity } }]
                },
                "Date": {
                    "date": { "start": task.date_string() }
                },
                "Time": {
                    "rich_text": [{ "text": { "content": task.time_string() } }]
                },
                "Duration": {
                    "number": task.duration_minutes
                },
                "Energy": {
                    "select": { "name": task.energy.as_str() }
                },
                "Status": {
                    "select": { "name": PLANNED_STATUS }
                },
                "Category": {
                    "select": { "name": task.category.as_str() }
                }
            }
        });

        let url = self.endpoint("v1/pages")?;
        let resp = self.authorized(self.client.post(url)).json(&body).send()?;
        if resp.status().is_success() {
            tracing::info!(activity = %task.activity, time = %task.time_string(), "task added to Notion");
            Ok(())
        } else {
            Err(error_from_response(resp))
        }
    }
}

fn error_from_response(resp: Response) -> StoreError {
    let status = resp.status().as_u16();
    let message = resp
        .json::<Value>()
        .ok()
        .and_then(|v| v["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| "Unknown error".to_string());
    match status {
        401 => StoreError::Unauthorized,
        404 => StoreError::NotFound { message },
        _ => StoreError::Api { status, message },
    }
}

/// Read one database page into a task, defaulting every missing field.
fn task_from_page(page: &Value) -> ExistingTask {
    let props = &page["properties"];

    let activity = first_text(&props["Activity"]["title"]).unwrap_or_else(|| "Untitled".into());
    let time = first_text(&props["Time"]["rich_text"]).filter(|t| !t.trim().is_empty());
    let duration_minutes = props["Duration"]["number"]
        .as_f64()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.round() as u32)
        .unwrap_or(0);
    let energy = select_name(&props["Energy"]).unwrap_or_else(|| "Medium".into());
    let status = select_name(&props["Status"]).unwrap_or_else(|| PLANNED_STATUS.into());
    let date = props["Date"]["date"]["start"]
        .as_str()
        .and_then(|s| clock::parse_date(s.get(..10).unwrap_or(s)));

    ExistingTask {
        activity,
        date,
        time,
        duration_minutes,
        energy,
        status,
    }
}

fn first_text(rich: &Value) -> Option<String> {
    let first = rich.as_array()?.first()?;
    first["text"]["content"]
        .as_str()
        .or_else(|| first["plain_text"].as_str())
        .map(str::to_string)
}

fn select_name(prop: &Value) -> Option<String> {
    prop["select"]["name"].as_str().map(str::to_string)
}
