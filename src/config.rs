//! Run configuration: Notion credentials from the environment (or `.env`),
//! plus optional tuning from a TOML file at SYNC_CONFIG_PATH.
//!
//! See `FileConfig` for the accepted TOML keys; all of them are optional.

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::SyncError;

pub const DEFAULT_USERNAME: &str = "JafarJuneidi";
pub const DEFAULT_LIMIT: u32 = 15;
pub const DEFAULT_LEETCODE_GRAPHQL_URL: &str = "https://leetcode.com/graphql";
pub const DEFAULT_NOTION_BASE_URL: &str = "https://api.notion.com/v1";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 20;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileConfig {
  pub username: String,
  pub limit: u32,
  pub leetcode_graphql_url: String,
  pub notion_base_url: String,
  pub notion_version: String,
  pub http_timeout_secs: u64,
}

impl Default for FileConfig {
  fn default() -> Self {
    Self {
      username: DEFAULT_USERNAME.into(),
      limit: DEFAULT_LIMIT,
      leetcode_graphql_url: DEFAULT_LEETCODE_GRAPHQL_URL.into(),
      notion_base_url: DEFAULT_NOTION_BASE_URL.into(),
      notion_version: DEFAULT_NOTION_VERSION.into(),
      http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
    }
  }
}

/// Parse the optional TOML file. Missing keys keep their defaults.
pub fn parse_file_config(text: &str) -> Result<FileConfig, SyncError> {
  toml::from_str(text).map_err(|e| SyncError::Config(format!("invalid TOML: {}", e)))
}

pub fn read_file_config(path: &Path) -> Result<FileConfig, SyncError> {
  let text = std::fs::read_to_string(path)
    .map_err(|e| SyncError::Config(format!("cannot read {}: {}", path.display(), e)))?;
  parse_file_config(&text)
}

#[derive(Clone)]
pub struct SyncConfig {
  pub notion_token: String,
  pub database_id: String,
  pub file: FileConfig,
}

impl SyncConfig {
  /// Read NOTION_KEY and DATABASE_ID (after loading `.env`), then layer the optional TOML file.
  pub fn from_env() -> Result<Self, SyncError> {
    // A missing .env is normal when the variables come from the shell.
    let _ = dotenv::dotenv();
    let file = match std::env::var_os("SYNC_CONFIG_PATH") {
      None => FileConfig::default(),
      Some(path) => {
        let path = Path::new(&path);
        match read_file_config(path) {
          Ok(cfg) => {
            info!(target: "leetcode_notion_sync", path = %path.display(), "Loaded sync config (TOML)");
            cfg
          }
          Err(e) => {
            warn!(target: "leetcode_notion_sync", path = %path.display(), error = %e, "Ignoring sync config, using defaults");
            FileConfig::default()
          }
        }
      }
    };
    Self::from_parts(
      std::env::var("NOTION_KEY").ok(),
      std::env::var("DATABASE_ID").ok(),
      file,
    )
  }

  fn from_parts(
    notion_token: Option<String>,
    database_id: Option<String>,
    file: FileConfig,
  ) -> Result<Self, SyncError> {
    let notion_token = required("NOTION_KEY", notion_token)?;
    let database_id = required("DATABASE_ID", database_id)?;
    if file.limit == 0 {
      return Err(SyncError::Config("limit must be at least 1".into()));
    }
    if file.http_timeout_secs == 0 {
      return Err(SyncError::Config("http_timeout_secs must be at least 1".into()));
    }
    Ok(Self { notion_token, database_id, file })
  }
}

fn required(name: &str, value: Option<String>) -> Result<String, SyncError> {
  match value.map(|v| v.trim().to_string()) {
    Some(v) if !v.is_empty() => Ok(v),
    _ => Err(SyncError::Config(format!("{} must be set", name))),
  }
}

// Never print the token.
impl fmt::Debug for SyncConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SyncConfig")
      .field("notion_token", &"<redacted>")
      .field("database_id", &self.database_id)
      .field("file", &self.file)
      .finish()
  }
}
