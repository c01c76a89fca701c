//! Prompt repository trait.

use super::model::{Prompt, PromptKey};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for admin-edited prompt rows.
///
/// The store holds at most two rows, one per [`PromptKey`]. Creation is
/// administrative; the session flow only reads.
#[async_trait]
pub trait PromptRepository: Send + Sync {
    /// Finds the stored prompt for `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Prompt))`: a stored prompt exists
    /// - `Ok(None)`: no prompt stored for that key
    /// - `Err(_)`: storage failure
    async fn find_by_key(&self, key: PromptKey) -> Result<Option<Prompt>>;

    /// Creates or replaces the prompt content for `key`.
    async fn save(&self, prompt: &Prompt) -> Result<()>;
}
