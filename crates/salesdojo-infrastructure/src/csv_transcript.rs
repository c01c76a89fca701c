//! File-backed CSV transcript log.
//!
//! One file per conversation. The header row is written exactly once at
//! creation; data rows are appended and never rewritten. The csv crate
//! handles quoting, since messages routinely contain commas and newlines.

use chrono::{DateTime, Utc};
use salesdojo_core::error::{DojoError, Result};
use salesdojo_core::transcript::{TranscriptRow, CSV_HEADER};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// Append-only writer for one conversation's transcript file.
#[derive(Debug, Clone)]
pub struct CsvTranscript {
    path: PathBuf,
}

impl CsvTranscript {
    /// Creates the transcript file with its header row, truncating any
    /// previous content at that path. Parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories or the file cannot be written.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .write_record(CSV_HEADER)
            .map_err(|e| DojoError::data_access(format!("csv header write failed: {}", e)))?;
        writer
            .flush()
            .map_err(|e| DojoError::io(format!("csv flush failed: {}", e)))?;

        Ok(Self { path })
    }

    /// Wraps an existing transcript file without touching it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The transcript file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one row to the end of the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the row cannot be
    /// written. Callers on the request path log and swallow this; a lost
    /// row is an accepted degradation.
    pub fn append_row(&self, row: &TranscriptRow) -> Result<()> {
        self.append_rows(std::slice::from_ref(row))
    }

    /// Appends rows in order to the end of the file.
    pub fn append_rows(&self, rows: &[TranscriptRow]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        for row in rows {
            writer
                .write_record(row.fields())
                .map_err(|e| DojoError::data_access(format!("csv row write failed: {}", e)))?;
        }
        writer
            .flush()
            .map_err(|e| DojoError::io(format!("csv flush failed: {}", e)))?;
        Ok(())
    }

    /// Reads the file back as records, header included. Used by tests and
    /// operator tooling; the session flow never reads the transcript.
    pub fn read_records(&self) -> Result<Vec<Vec<String>>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| DojoError::io(format!("csv open failed: {}", e)))?;

        let mut records = Vec::new();
        for record in reader.records() {
            let record =
                record.map_err(|e| DojoError::data_access(format!("csv read failed: {}", e)))?;
            records.push(record.iter().map(|f| f.to_string()).collect());
        }
        Ok(records)
    }
}

/// Creates the transcript file for a new conversation and returns both the
/// writer and the timestamped path.
pub fn create_for_session(
    base_dir: &Path,
    user: &str,
    started_at: DateTime<Utc>,
) -> Result<CsvTranscript> {
    let path = crate::paths::transcript_path(base_dir, user, started_at);
    CsvTranscript::create(path)
}
