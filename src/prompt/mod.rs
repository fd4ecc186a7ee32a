pub mod assemble;
pub mod engine;
pub mod layout;

pub use assemble::{assemble, clauses, tidy_sentence, EMPTY_PROMPT};
pub use engine::{normalize_param_key, EngineConfig, EngineMode};
pub use layout::{CategoryConnector, PromptLayout, DEFAULT_CATEGORY_CONNECTORS};
