//! Minimal LeetCode GraphQL client.
//!
//! Two read-only queries: the user's recent accepted submissions and the
//! metadata of a single question. No auth; LeetCode only wants a JSON body
//! and a Referer header.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, REFERER, USER_AGENT};
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

use crate::domain::{QuestionDetails, Submission};
use crate::error::SyncError;
use crate::sync::ProblemSource;
use crate::util::trunc_for_log;

const RECENT_AC_SUBMISSIONS_QUERY: &str = r#"
query recentAcSubmissions($username: String!, $limit: Int!) {
  recentAcSubmissionList(username: $username, limit: $limit) {
    id
    title
    titleSlug
    timestamp
    time
  }
}
"#;

const QUESTION_QUERY: &str = r#"
query questionTitle($titleSlug: String!) {
  question(titleSlug: $titleSlug) {
    questionId
    questionFrontendId
    title
    titleSlug
    difficulty
    topicTags {
      name
    }
  }
}
"#;

const REFERER_VALUE: &str = "https://leetcode.com";

#[derive(Clone)]
pub struct LeetCode {
  pub client: reqwest::Client,
  pub graphql_url: String,
}

impl LeetCode {
  pub fn new(graphql_url: &str, timeout: Duration) -> Result<Self, SyncError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    Ok(Self { client, graphql_url: graphql_url.to_string() })
  }

  /// POST one operation and return its `data` object.
  #[instrument(level = "debug", skip(self, query, variables))]
  async fn post_graphql<T: DeserializeOwned>(
    &self,
    operation: &str,
    query: &str,
    variables: serde_json::Value,
  ) -> Result<T, SyncError> {
    let req = GraphQlRequest { operation_name: operation, query, variables };

    let res = self.client.post(&self.graphql_url)
      .header(USER_AGENT, "leetcode-notion-sync/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(REFERER, REFERER_VALUE)
      .json(&req).send().await?;

    let status = res.status();
    let body = ensure_success(status, res.text().await?)?;
    debug!(body_len = body.len(), "GraphQL response received");
    parse_graphql_data(&body)
  }
}

/// Non-2xx answers become `SyncError::Api` with a truncated body.
fn ensure_success(status: StatusCode, body: String) -> Result<String, SyncError> {
  if status.is_success() {
    return Ok(body);
  }
  Err(SyncError::Api {
    service: "LeetCode",
    status: status.as_u16(),
    message: trunc_for_log(&body, 300),
  })
}

#[async_trait]
impl ProblemSource for LeetCode {
  #[instrument(level = "info", skip(self))]
  async fn recent_accepted(&self, username: &str, limit: u32) -> Result<Vec<Submission>, SyncError> {
    let data: RecentAcData = self
      .post_graphql(
        "recentAcSubmissions",
        RECENT_AC_SUBMISSIONS_QUERY,
        json!({ "username": username, "limit": limit }),
      )
      .await?;
    Ok(data.recent_ac_submission_list)
  }

  #[instrument(level = "info", skip(self))]
  async fn question(&self, title_slug: &str) -> Result<QuestionDetails, SyncError> {
    let data: QuestionData = self
      .post_graphql("questionTitle", QUESTION_QUERY, json!({ "titleSlug": title_slug }))
      .await?;
    data.question.ok_or_else(|| SyncError::QuestionNotFound(title_slug.to_string()))
  }
}

// --- GraphQL DTOs ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlRequest<'a> {
  operation_name: &'a str,
  query: &'a str,
  variables: serde_json::Value,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
  data: Option<T>,
  #[serde(default)]
  errors: Vec<GraphQlErrorItem>,
}

#[derive(Deserialize)]
struct GraphQlErrorItem {
  message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecentAcData {
  recent_ac_submission_list: Vec<Submission>,
}

#[derive(Deserialize)]
struct QuestionData {
  question: Option<QuestionDetails>,
}

/// Pull `data` out of a GraphQL envelope, surfacing `errors` when `data` is absent.
fn parse_graphql_data<T: DeserializeOwned>(body: &str) -> Result<T, SyncError> {
  let envelope: GraphQlResponse<T> = serde_json::from_str(body)?;
  match envelope.data {
    Some(data) => Ok(data),
    None if !envelope.errors.is_empty() => {
      let msgs: Vec<_> = envelope.errors.into_iter().map(|e| e.message).collect();
      Err(SyncError::GraphQl(msgs.join("; ")))
    }
    None => Err(SyncError::GraphQl("response has no data".into())),
  }
}
