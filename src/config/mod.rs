use log::warn;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub tickets_path: PathBuf,
    pub triage_log_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_key = std::env::var("GROQ_API_KEY")
            .unwrap_or_else(|_| "your-groq-api-key-here".to_string());
        if api_key == "your-groq-api-key-here" {
            warn!("GROQ_API_KEY is not set; LLM calls will be rejected upstream");
        }

        AppConfig {
            server: ServerConfig {
                host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: std::env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            llm: LlmConfig {
                api_key,
                api_url: std::env::var("GROQ_API_URL")
                    .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string()),
                model: std::env::var("LLM_MODEL")
                    .unwrap_or_else(|_| "llama-3.1-8b-instant".to_string()),
            },
            storage: StorageConfig {
                tickets_path: std::env::var("TICKETS_PATH")
                    .unwrap_or_else(|_| "tickets.json".to_string())
                    .into(),
                triage_log_path: std::env::var("TRIAGE_LOG_PATH")
                    .unwrap_or_else(|_| "triage_log.json".to_string())
                    .into(),
            },
        }
    }
}
