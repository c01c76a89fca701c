//! Tunables of the dialogue orchestrator.

use serde::{Deserialize, Serialize};

/// Model and sampling configuration for the two personas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Model used for the customer persona.
    pub customer_model: String,
    /// Model used for the coach persona.
    pub coach_model: String,
    /// Sampling temperature for customer replies.
    pub customer_temperature: f32,
    /// Sampling temperature for coach advice; lower for steadier feedback.
    pub coach_temperature: f32,
    /// Output bound for coach advice.
    pub coach_max_tokens: u32,
    /// Whether to sleep the simulated typing delay before returning a
    /// customer reply. Tests switch this off.
    pub simulate_typing: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            customer_model: "gpt-4o-mini".to_string(),
            coach_model: "gpt-4o-mini".to_string(),
            customer_temperature: 0.7,
            coach_temperature: 0.35,
            coach_max_tokens: 180,
            simulate_typing: true,
        }
    }
}
