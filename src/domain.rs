//! Domain models: LeetCode submissions/questions and Notion tracking records.

use serde::Deserialize;
use uuid::Uuid;

use crate::error::SyncError;

/// Level written to a freshly created tracking record.
pub const INITIAL_LEVEL: &str = "2";

/// One accepted submission from `recentAcSubmissionList`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
  #[allow(dead_code)]
  pub id: String,
  #[allow(dead_code)]
  pub title: String,
  pub title_slug: String,
  #[allow(dead_code)]
  pub timestamp: String,
  /// Relative label, e.g. "5 minutes", "2 hours", "1 day".
  pub time: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
  /// Anything LeetCode may add later; passed to the select verbatim.
  Other(String),
}

impl Difficulty {
  pub fn as_str(&self) -> &str {
    match self {
      Difficulty::Easy => "Easy",
      Difficulty::Medium => "Medium",
      Difficulty::Hard => "Hard",
      Difficulty::Other(s) => s,
    }
  }
}

impl From<String> for Difficulty {
  fn from(s: String) -> Self {
    match s.as_str() {
      "Easy" => Difficulty::Easy,
      "Medium" => Difficulty::Medium,
      "Hard" => Difficulty::Hard,
      _ => Difficulty::Other(s),
    }
  }
}

impl<'de> Deserialize<'de> for Difficulty {
  fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    String::deserialize(deserializer).map(Difficulty::from)
  }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TopicTag {
  pub name: String,
}

/// Canonical question metadata from the `questionTitle` query.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetails {
  #[allow(dead_code)]
  pub question_id: String,
  pub question_frontend_id: String,
  pub title: String,
  pub title_slug: String,
  pub difficulty: Difficulty,
  #[serde(default)]
  pub topic_tags: Vec<TopicTag>,
}

impl QuestionDetails {
  /// The numeric id the tracking database is keyed by.
  pub fn frontend_number(&self) -> Result<u32, SyncError> {
    self.question_frontend_id
      .trim()
      .parse::<u32>()
      .map_err(|_| SyncError::InvalidFrontendId(self.question_frontend_id.clone()))
  }
}

/// An existing row of the tracking database, reduced to what the sync reads.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackingRecord {
  pub page_id: Uuid,
  pub number: Option<u32>,
  /// Name of the `Level` select, if one is set.
  pub level: Option<String>,
}

impl TrackingRecord {
  pub fn next_level(&self) -> Result<String, SyncError> {
    match &self.level {
      Some(name) => next_level(name),
      None => Err(SyncError::InvalidLevel(String::new())),
    }
  }
}

/// Everything written when a problem is solved for the first time.
#[derive(Clone, Debug, PartialEq)]
pub struct NewTrackingRecord {
  pub number: u32,
  pub name: String,
  pub url: String,
  pub difficulty: Difficulty,
  pub topics: Vec<String>,
  pub level: String,
  pub solved: bool,
}

impl NewTrackingRecord {
  pub fn from_question(q: &QuestionDetails) -> Result<Self, SyncError> {
    Ok(Self {
      number: q.frontend_number()?,
      name: q.title.clone(),
      url: problem_url(&q.title_slug),
      difficulty: q.difficulty.clone(),
      topics: q.topic_tags.iter().map(|t| t.name.clone()).collect(),
      level: INITIAL_LEVEL.to_string(),
      solved: true,
    })
  }
}

/// `leetcode.com/problems/<slug>`, scheme-less as the tracking table stores it.
pub fn problem_url(title_slug: &str) -> String {
  format!("leetcode.com/problems/{}", title_slug)
}

/// Increment a string-encoded level by one.
pub fn next_level(current: &str) -> Result<String, SyncError> {
  let invalid = || SyncError::InvalidLevel(current.to_string());
  let n = current.trim().parse::<u32>().map_err(|_| invalid())?;
  n.checked_add(1).map(|next| next.to_string()).ok_or_else(invalid)
}

/// What the writer did for one problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
  Added { number: u32 },
  Updated { number: u32, level: String },
}

#[cfg(test)]
mod tests {
  use super::*;

  fn two_sum() -> QuestionDetails {
    serde_json::from_str(
      r#"{
        "questionId": "1",
        "questionFrontendId": "1",
        "title": "Two Sum",
        "titleSlug": "two-sum",
        "difficulty": "Easy",
        "topicTags": [{"name": "Array"}, {"name": "Hash Table"}]
      }"#,
    )
    .unwrap()
  }

  #[test]
  fn new_record_starts_solved_at_level_two() {
    let rec = NewTrackingRecord::from_question(&two_sum()).unwrap();
    assert_eq!(rec.number, 1);
    assert_eq!(rec.level, "2");
    assert!(rec.solved);
    assert_eq!(rec.url, "leetcode.com/problems/two-sum");
    assert_eq!(rec.topics, vec!["Array".to_string(), "Hash Table".to_string()]);
    assert_eq!(rec.difficulty, Difficulty::Easy);
  }

  #[test]
  fn non_numeric_frontend_id_is_rejected() {
    let mut q = two_sum();
    q.question_frontend_id = "LCP 01".into();
    assert!(matches!(
      NewTrackingRecord::from_question(&q),
      Err(SyncError::InvalidFrontendId(id)) if id == "LCP 01"
    ));
  }

  #[test]
  fn level_increments_by_one() {
    assert_eq!(next_level("4").unwrap(), "5");
    assert_eq!(next_level(" 9 ").unwrap(), "10");
    assert!(next_level("hard").is_err());
  }

  #[test]
  fn level_at_the_ceiling_is_rejected() {
    assert_eq!(next_level("4294967294").unwrap(), "4294967295");
    assert!(matches!(
      next_level("4294967295"),
      Err(SyncError::InvalidLevel(l)) if l == "4294967295"
    ));
  }

  #[test]
  fn record_without_level_cannot_be_bumped() {
    let rec = TrackingRecord { page_id: Uuid::nil(), number: Some(3), level: None };
    assert!(matches!(rec.next_level(), Err(SyncError::InvalidLevel(_))));
  }

  #[test]
  fn unknown_difficulty_is_kept_verbatim() {
    let d: Difficulty = serde_json::from_str("\"Extreme\"").unwrap();
    assert_eq!(d, Difficulty::Other("Extreme".into()));
    assert_eq!(d.as_str(), "Extreme");
  }
}
