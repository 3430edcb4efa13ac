//! Today's window over the recent-submissions list.
//!
//! LeetCode only gives a relative label ("3 hours", "1 day", "2 months").
//! Anything whose label mentions a day, month or year is treated as older
//! than today, and so is everything after it in the newest-first list.
//! The `timestamp` field is not consulted.

use std::collections::HashSet;

use crate::domain::Submission;

const STALE_UNITS: [&str; 3] = ["day", "month", "year"];

/// Substring match, false positives included ("in a day" is stale too).
pub fn is_stale(time_label: &str) -> bool {
  STALE_UNITS.iter().any(|unit| time_label.contains(unit))
}

#[derive(Debug, Default)]
pub struct Window {
  /// Unique submissions from today, newest first.
  pub fresh: Vec<Submission>,
  pub duplicates: usize,
  /// Index of the first stale entry, if the list reached one.
  pub stale_at: Option<usize>,
}

pub fn todays_unique(submissions: Vec<Submission>) -> Window {
  let mut seen = HashSet::new();
  let mut window = Window::default();

  for (idx, sub) in submissions.into_iter().enumerate() {
    if is_stale(&sub.time) {
      window.stale_at = Some(idx);
      break;
    }
    if !seen.insert(sub.title_slug.clone()) {
      window.duplicates += 1;
      continue;
    }
    window.fresh.push(sub);
  }
  window
}
