//! Application layer: the training use case orchestrating sessions,
//! dialogue, coaching, and transcript logging.

pub mod config;
pub mod training_usecase;
pub mod typing;

pub use config::TrainingConfig;
pub use training_usecase::TrainingUseCase;
