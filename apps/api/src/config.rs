use anyhow::{Context, Result};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    /// Model used when a request does not name one.
    pub default_model: String,
    pub port: u16,
    pub rust_log: String,
    /// Directory served for non-API paths (the upload page).
    pub static_dir: String,
    /// Leading characters of extracted document text kept as the summary.
    pub max_summary_chars: usize,
    pub max_upload_bytes: usize,
    pub request_timeout_secs: u64,
    pub llm_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: env_or("OPENAI_BASE_URL", DEFAULT_BASE_URL),
            default_model: env_or("DEFAULT_MODEL", DEFAULT_MODEL),
            port: parse_env("PORT", 3000)?,
            rust_log: env_or("RUST_LOG", "info"),
            static_dir: env_or("STATIC_DIR", "public"),
            max_summary_chars: parse_env("MAX_SUMMARY_CHARS", 3000)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 120)?,
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
