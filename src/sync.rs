//! The sync pipeline: recent submissions → today's window → question details
//! → tracking lookup → create or bump.
//!
//! Everything is awaited in order. Read failures abort the run; a failed
//! write is logged, counted, and the next submission is processed.

use async_trait::async_trait;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::{NewTrackingRecord, QuestionDetails, Submission, TrackingRecord, WriteOutcome};
use crate::error::SyncError;
use crate::window::todays_unique;

/// Read side: the coding platform.
#[async_trait]
pub trait ProblemSource {
  /// Most recent accepted submissions, newest first.
  async fn recent_accepted(&self, username: &str, limit: u32) -> Result<Vec<Submission>, SyncError>;
  async fn question(&self, title_slug: &str) -> Result<QuestionDetails, SyncError>;
}

/// The tracking database.
#[async_trait]
pub trait TrackingStore {
  /// First record whose `No` equals `number`.
  async fn find_by_number(&self, number: u32) -> Result<Option<TrackingRecord>, SyncError>;
  async fn create(&self, record: &NewTrackingRecord) -> Result<(), SyncError>;
  async fn update_level(&self, page_id: Uuid, level: &str) -> Result<(), SyncError>;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
  pub fetched: usize,
  pub duplicates: usize,
  pub stale_at: Option<usize>,
  pub added: usize,
  pub updated: usize,
  pub failed: usize,
}

/// Create a record for a first solve, or bump the level of an existing one.
pub async fn write_record<T: TrackingStore + ?Sized>(
  store: &T,
  question: &QuestionDetails,
  existing: Option<TrackingRecord>,
) -> Result<WriteOutcome, SyncError> {
  match existing {
    None => {
      let record = NewTrackingRecord::from_question(question)?;
      store.create(&record).await?;
      Ok(WriteOutcome::Added { number: record.number })
    }
    Some(rec) => {
      let level = rec.next_level()?;
      store.update_level(rec.page_id, &level).await?;
      let number = match rec.number {
        Some(n) => n,
        None => question.frontend_number()?,
      };
      Ok(WriteOutcome::Updated { number, level })
    }
  }
}

#[instrument(level = "info", skip(source, store))]
pub async fn run<S, T>(source: &S, store: &T, username: &str, limit: u32) -> Result<SyncReport, SyncError>
where
  S: ProblemSource + ?Sized,
  T: TrackingStore + ?Sized,
{
  let submissions = source.recent_accepted(username, limit).await?;
  let mut report = SyncReport { fetched: submissions.len(), ..SyncReport::default() };

  let window = todays_unique(submissions);
  report.duplicates = window.duplicates;
  report.stale_at = window.stale_at;
  info!(
    target: "leetcode_notion_sync",
    fetched = report.fetched,
    fresh = window.fresh.len(),
    duplicates = window.duplicates,
    stale_at = ?window.stale_at,
    "Submissions from today selected"
  );

  for sub in &window.fresh {
    let question = source.question(&sub.title_slug).await?;
    let number = question.frontend_number()?;
    let existing = store.find_by_number(number).await?;

    match write_record(store, &question, existing).await {
      Ok(WriteOutcome::Added { number }) => {
        report.added += 1;
        info!(target: "leetcode_notion_sync", number, slug = %sub.title_slug, "Success! Entry No.{} added.", number);
      }
      Ok(WriteOutcome::Updated { number, level }) => {
        report.updated += 1;
        info!(target: "leetcode_notion_sync", number, %level, slug = %sub.title_slug, "Success! Entry No.{} updated.", number);
      }
      Err(e) => {
        report.failed += 1;
        error!(target: "leetcode_notion_sync", number, slug = %sub.title_slug, error = %e, "Failed to write entry No.{}", number);
      }
    }
  }

  if report.failed > 0 {
    warn!(target: "leetcode_notion_sync", failed = report.failed, "Some entries were not written");
  }
  Ok(report)
}
