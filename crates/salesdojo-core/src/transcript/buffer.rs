//! In-memory buffer for transcript rows whose final field may still change.

use super::row::TranscriptRow;
use crate::error::{DojoError, Result};
use serde::{Deserialize, Serialize};

/// Holds coach rows in memory until they are flushed to disk.
///
/// Finalized exchange rows are written through to the transcript file
/// immediately; coach rows wait here because their `clicked` flag may still
/// flip. Deferring the on-disk append avoids a read-modify-write of the
/// file tail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowBuffer {
    rows: Vec<TranscriptRow>,
}

impl RowBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no row is buffered.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of buffered rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Buffers a row for a later flush.
    pub fn push(&mut self, row: TranscriptRow) {
        self.rows.push(row);
    }

    /// The buffered rows in append order.
    pub fn rows(&self) -> &[TranscriptRow] {
        &self.rows
    }

    /// Sets the `clicked` flag on the most recently buffered row.
    ///
    /// Already-flushed disk rows are never touched.
    ///
    /// # Errors
    ///
    /// Returns `NoBufferedAdvice` if the buffer is empty; nothing changes.
    pub fn mark_last_acknowledged(&mut self) -> Result<()> {
        match self.rows.last_mut() {
            Some(row) => {
                row.clicked = true;
                Ok(())
            }
            None => Err(DojoError::NoBufferedAdvice),
        }
    }

    /// Removes and returns all buffered rows, oldest first.
    pub fn drain(&mut self) -> Vec<TranscriptRow> {
        std::mem::take(&mut self.rows)
    }

    /// Drops everything, used when a new session starts.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
