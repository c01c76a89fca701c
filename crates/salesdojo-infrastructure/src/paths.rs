//! On-disk layout of salesdojo data.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Returns the default data directory (`~/.salesdojo`), falling back to the
/// current directory when no home directory can be determined.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".salesdojo"))
        .unwrap_or_else(|| PathBuf::from(".salesdojo"))
}

/// Transcript file path namespaced by username and session start time:
/// `<base>/chat_logs/<user>/<user>_<YYYY-MM-DD_HH-MM-SS>.csv`.
pub fn transcript_path(base_dir: &Path, user: &str, started_at: DateTime<Utc>) -> PathBuf {
    let filename = format!("{}_{}.csv", user, started_at.format("%Y-%m-%d_%H-%M-%S"));
    base_dir.join("chat_logs").join(user).join(filename)
}

/// Directory holding one JSON file per conversation.
pub fn conversations_dir(base_dir: &Path) -> PathBuf {
    base_dir.join("conversations")
}

/// The admin-edited prompts file.
pub fn prompts_file(base_dir: &Path) -> PathBuf {
    base_dir.join("prompts.toml")
}

/// The admin-edited settings file.
pub fn settings_file(base_dir: &Path) -> PathBuf {
    base_dir.join("settings.toml")
}
