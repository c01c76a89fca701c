//! File-backed storage implementations for salesdojo: the CSV transcript
//! log, the JSON conversation store, and the TOML prompt/settings stores.

pub mod csv_transcript;
pub mod json_conversation_repository;
pub mod paths;
pub mod toml_prompt_repository;
pub mod toml_settings_repository;

pub use csv_transcript::CsvTranscript;
pub use json_conversation_repository::JsonConversationRepository;
pub use toml_prompt_repository::TomlPromptRepository;
pub use toml_settings_repository::TomlSettingsRepository;
