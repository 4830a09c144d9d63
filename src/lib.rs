pub mod analytics;
pub mod api_router;
pub mod chat;
pub mod config;
pub mod llm;
pub mod policies;
pub mod prompts;
pub mod retrieval;
pub mod shared;
pub mod tickets;
