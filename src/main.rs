//! LeetCode → Notion sync
//!
//! One-shot job: takes today's accepted LeetCode submissions and records them
//! in a Notion database, adding new problems at level 2 and bumping the level
//! of problems solved again.
//!
//! Important env variables (also read from `.env`):
//!   NOTION_KEY        : Notion integration token (required)
//!   DATABASE_ID       : id of the tracking database (required)
//!   SYNC_CONFIG_PATH  : optional TOML (username, limit, endpoints, timeout)
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "pretty" (default) or "json"

mod config;
mod domain;
mod error;
mod leetcode;
mod notion;
mod sync;
mod telemetry;
mod util;
mod window;

use std::time::Duration;

use tracing::info;

use crate::config::SyncConfig;
use crate::leetcode::LeetCode;
use crate::notion::Notion;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let cfg = SyncConfig::from_env()?;
  let timeout = Duration::from_secs(cfg.file.http_timeout_secs);

  let leetcode = LeetCode::new(&cfg.file.leetcode_graphql_url, timeout)?;
  let notion = Notion::new(
    &cfg.notion_token,
    &cfg.database_id,
    &cfg.file.notion_base_url,
    &cfg.file.notion_version,
    timeout,
  )?;
  info!(target: "leetcode_notion_sync", username = %cfg.file.username, limit = cfg.file.limit, database_id = %cfg.database_id, "Starting sync");

  let report = sync::run(&leetcode, &notion, &cfg.file.username, cfg.file.limit).await?;
  info!(
    target: "leetcode_notion_sync",
    added = report.added,
    updated = report.updated,
    failed = report.failed,
    duplicates = report.duplicates,
    stale_at = ?report.stale_at,
    "Sync finished"
  );
  Ok(())
}
