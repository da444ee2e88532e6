use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_API_URL;

/// Application configuration loaded from environment variables.
/// The process refuses to start if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub ai_api_key: String,
    pub ai_api_endpoint: String,
    /// Scratch directory for uploaded PDFs. Files live here only while text
    /// extraction is in flight.
    pub upload_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            ai_api_key: require_env("AI_API_KEY")?,
            ai_api_endpoint: std::env::var("AI_API_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            upload_dir: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".to_string())
                .into(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8070".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
