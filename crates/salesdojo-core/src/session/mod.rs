//! Session domain: lifecycle state machine, the per-token session record,
//! and the server-side session store.

pub mod model;
pub mod state;
pub mod store;

pub use model::{ConversationBinding, TrainingSession};
pub use state::{Liveness, SessionPhase, SessionState};
pub use store::SessionStore;
