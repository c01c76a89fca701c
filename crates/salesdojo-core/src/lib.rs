//! Domain layer of salesdojo: session lifecycle, dialogue history,
//! transcript rows, prompt resolution, and the traits that decouple the
//! application from storage and from the completion collaborator.

pub mod completion;
pub mod conversation;
pub mod dialogue;
pub mod error;
pub mod prompt;
pub mod session;
pub mod settings;
pub mod transcript;

// Re-export the common error type
pub use error::{DojoError, Result};
