//! Prompt keys, stored prompt text, and compiled-in fallbacks.

use serde::{Deserialize, Serialize};

/// Fallback customer persona, used when no stored prompt exists.
pub const DEFAULT_CUSTOMER_PROMPT: &str = "\
You are playing the role of a potential customer.
- Act like a real person evaluating a product or service the salesperson proposes.
- Ask questions, raise objections, or show interest naturally.
- Keep replies around 1-3 short paragraphs so the chat flows quickly.
";

/// Fallback coach persona, used when no stored prompt exists.
pub const DEFAULT_COACH_PROMPT: &str = "\
You are a silent sales coach observing the whole dialogue between a salesperson (the USER)
and a customer (the ASSISTANT). Give concise, actionable advice ONLY IF it will materially
improve the next sales move. If the salesperson is doing well, answer exactly: NO_ADVICE
";

/// Logical key of a stored system prompt. At most one prompt exists per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromptKey {
    /// The AI customer persona.
    #[serde(rename = "CUSTOMER_PROMPT")]
    Customer,
    /// The AI coach persona.
    #[serde(rename = "COACH_PROMPT")]
    Coach,
}

impl PromptKey {
    /// The compiled-in fallback text for this key.
    pub fn fallback(self) -> &'static str {
        match self {
            PromptKey::Customer => DEFAULT_CUSTOMER_PROMPT,
            PromptKey::Coach => DEFAULT_COACH_PROMPT,
        }
    }

    /// Stable string form of the key, as stored by administrators.
    pub fn as_str(self) -> &'static str {
        match self {
            PromptKey::Customer => "CUSTOMER_PROMPT",
            PromptKey::Coach => "COACH_PROMPT",
        }
    }
}

/// One admin-editable prompt row. The key is immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// Which persona this prompt configures.
    pub key: PromptKey,
    /// The system prompt text.
    pub content: String,
}
