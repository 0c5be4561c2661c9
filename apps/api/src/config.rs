use anyhow::{Context, Result};

const DEFAULT_GENERATION_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const DEFAULT_GENERATION_MODEL: &str = "openai/gpt-oss-20b:free";
const DEFAULT_OCR_API_URL: &str = "https://api.ocr.space/parse/image";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub generation_api_key: String,
    pub generation_api_url: String,
    pub generation_model: String,
    /// Unset means the generation call never times out.
    pub generation_timeout_secs: Option<u64>,
    pub ocr_api_key: String,
    pub ocr_api_url: String,
    pub profile_store_path: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            generation_api_key: require_env("OPENROUTER_API_KEY")?,
            generation_api_url: env_or("GENERATION_API_URL", DEFAULT_GENERATION_API_URL),
            generation_model: env_or("GENERATION_MODEL", DEFAULT_GENERATION_MODEL),
            generation_timeout_secs: std::env::var("GENERATION_TIMEOUT_SECS")
                .ok()
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("GENERATION_TIMEOUT_SECS must be a number of seconds")?,
            ocr_api_key: env_or("OCR_API_KEY", ""),
            ocr_api_url: env_or("OCR_API_URL", DEFAULT_OCR_API_URL),
            profile_store_path: env_or("PROFILE_STORE_PATH", "data/profile.json"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
