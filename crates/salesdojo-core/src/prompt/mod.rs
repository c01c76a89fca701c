//! Persona prompts: keys, stored text, repository trait, and the cached
//! resolver.

pub mod model;
pub mod repository;
pub mod resolver;

pub use model::{Prompt, PromptKey, DEFAULT_COACH_PROMPT, DEFAULT_CUSTOMER_PROMPT};
pub use repository::PromptRepository;
pub use resolver::PromptResolver;
