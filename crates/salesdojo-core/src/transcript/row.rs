//! One logged transcript event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Column header written once when a transcript file is created.
pub const CSV_HEADER: [&str; 5] = [
    "timestamp",
    "sales person",
    "AI customer",
    "AI assistant coach",
    "clicked",
];

/// One row of the per-conversation transcript file.
///
/// Rows are append-only on disk. Only the most recently buffered row may
/// have its `clicked` flag amended (false to true) before it is flushed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptRow {
    /// When the logged event happened.
    pub timestamp: DateTime<Utc>,
    /// The salesperson's message, empty on coach rows.
    pub sales_person: String,
    /// The AI customer's reply, empty on coach rows.
    pub ai_customer: String,
    /// The AI coach's advice, empty on exchange rows.
    pub ai_coach: String,
    /// Whether the salesperson acknowledged the coach advice.
    pub clicked: bool,
}

impl TranscriptRow {
    /// A finalized salesperson/customer exchange row.
    pub fn exchange(
        timestamp: DateTime<Utc>,
        sales_person: impl Into<String>,
        ai_customer: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sales_person: sales_person.into(),
            ai_customer: ai_customer.into(),
            ai_coach: String::new(),
            clicked: false,
        }
    }

    /// A coach advice row, initially unacknowledged.
    pub fn coach(timestamp: DateTime<Utc>, advice: impl Into<String>) -> Self {
        Self {
            timestamp,
            sales_person: String::new(),
            ai_customer: String::new(),
            ai_coach: advice.into(),
            clicked: false,
        }
    }

    /// The five CSV fields in column order.
    pub fn fields(&self) -> [String; 5] {
        [
            self.timestamp.to_rfc3339(),
            self.sales_person.clone(),
            self.ai_customer.clone(),
            self.ai_coach.clone(),
            self.clicked.to_string(),
        ]
    }
}
