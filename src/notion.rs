//! Notion REST client for the tracking database.
//!
//! Three calls: query the database by `No`, create a page, patch a page's
//! `Level`. Calls are instrumented with ids and sizes; the integration token
//! is never logged.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::{NewTrackingRecord, TrackingRecord};
use crate::error::SyncError;
use crate::sync::TrackingStore;
use crate::util::trunc_for_log;

#[derive(Clone)]
pub struct Notion {
  pub client: reqwest::Client,
  token: String,
  pub base_url: String,
  pub version: String,
  pub database_id: String,
}

impl Notion {
  pub fn new(
    token: &str,
    database_id: &str,
    base_url: &str,
    version: &str,
    timeout: Duration,
  ) -> Result<Self, SyncError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    Ok(Self {
      client,
      token: token.to_string(),
      base_url: base_url.trim_end_matches('/').to_string(),
      version: version.to_string(),
      database_id: database_id.to_string(),
    })
  }

  async fn send(&self, req: reqwest::RequestBuilder, body: &Value) -> Result<String, SyncError> {
    let res = req
      .header(USER_AGENT, "leetcode-notion-sync/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.token))
      .header("Notion-Version", &self.version)
      .json(body).send().await?;

    let status = res.status();
    let text = ensure_success(status, res.text().await?)?;
    debug!(%status, body_len = text.len(), "Notion response received");
    Ok(text)
  }
}

/// Non-2xx answers become `SyncError::Api`, using Notion's `code: message` when present.
fn ensure_success(status: StatusCode, text: String) -> Result<String, SyncError> {
  if status.is_success() {
    return Ok(text);
  }
  let message = extract_notion_error(&text).unwrap_or_else(|| trunc_for_log(&text, 300));
  Err(SyncError::Api { service: "Notion", status: status.as_u16(), message })
}

#[async_trait]
impl TrackingStore for Notion {
  #[instrument(level = "info", skip(self))]
  async fn find_by_number(&self, number: u32) -> Result<Option<TrackingRecord>, SyncError> {
    let url = format!("{}/databases/{}/query", self.base_url, self.database_id);
    let body = number_filter_body(number);
    let text = self.send(self.client.post(&url), &body).await?;
    first_record(&text)
  }

  #[instrument(level = "info", skip(self, record), fields(number = record.number))]
  async fn create(&self, record: &NewTrackingRecord) -> Result<(), SyncError> {
    let url = format!("{}/pages", self.base_url);
    let body = create_page_body(&self.database_id, record);
    self.send(self.client.post(&url), &body).await?;
    Ok(())
  }

  #[instrument(level = "info", skip(self))]
  async fn update_level(&self, page_id: Uuid, level: &str) -> Result<(), SyncError> {
    let url = format!("{}/pages/{}", self.base_url, page_id);
    let body = level_update_body(level);
    self.send(self.client.patch(&url), &body).await?;
    Ok(())
  }
}

// --- Request bodies ---

pub fn number_filter_body(number: u32) -> Value {
  json!({
    "filter": {
      "property": "No",
      "number": { "equals": number }
    }
  })
}

pub fn create_page_body(database_id: &str, r: &NewTrackingRecord) -> Value {
  let topics: Vec<Value> = r.topics.iter().map(|name| json!({ "name": name })).collect();
  json!({
    "parent": { "database_id": database_id },
    "properties": {
      "Solved": { "checkbox": r.solved },
      "Note": { "rich_text": [] },
      "Level": { "select": { "name": r.level } },
      "Difficulty": { "select": { "name": r.difficulty.as_str() } },
      "Topics": { "multi_select": topics },
      "URL": { "url": r.url },
      "No": { "number": r.number },
      "Name": {
        "title": [
          { "text": { "content": r.name, "link": null } }
        ]
      }
    }
  })
}

/// Only `Level` is sent; every other property stays as it is.
pub fn level_update_body(level: &str) -> Value {
  json!({
    "properties": {
      "Level": { "select": { "name": level } }
    }
  })
}

// --- Response DTOs ---

#[derive(Deserialize)]
struct QueryResponse {
  results: Vec<PageDto>,
}

#[derive(Deserialize)]
struct PageDto {
  id: Uuid,
  #[serde(default)]
  properties: PageProperties,
}

#[derive(Deserialize, Default)]
struct PageProperties {
  #[serde(rename = "No", default)]
  no: Option<NumberProp>,
  #[serde(rename = "Level", default)]
  level: Option<SelectProp>,
}

#[derive(Deserialize)]
struct NumberProp {
  number: Option<f64>,
}

#[derive(Deserialize)]
struct SelectProp {
  select: Option<SelectOption>,
}

#[derive(Deserialize)]
struct SelectOption {
  name: String,
}

impl From<PageDto> for TrackingRecord {
  fn from(p: PageDto) -> Self {
    let number = p.properties.no
      .and_then(|n| n.number)
      .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= u32::MAX as f64)
      .map(|n| n as u32);
    let level = p.properties.level.and_then(|l| l.select).map(|s| s.name);
    TrackingRecord { page_id: p.id, number, level }
  }
}

/// First page of a database query result; extra matches are ignored.
fn first_record(body: &str) -> Result<Option<TrackingRecord>, SyncError> {
  let res: QueryResponse = serde_json::from_str(body)?;
  if res.results.len() > 1 {
    debug!(matches = res.results.len(), "Several pages share a number; using the first");
  }
  Ok(res.results.into_iter().next().map(TrackingRecord::from))
}

/// Try to extract a clean error message from a Notion error body.
fn extract_notion_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct NotionErr { code: Option<String>, message: String }
  let e = serde_json::from_str::<NotionErr>(body).ok()?;
  Some(match e.code {
    Some(code) => format!("{}: {}", code, e.message),
    None => e.message,
  })
}
