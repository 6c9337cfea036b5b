use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::{ApiFlavor, LlmSettings};
use crate::recommendation::profile::ReportProfile;

const DEFAULT_API_BASE: &str = "https://api.openai.com";
const DEFAULT_API_VERSION: &str = "2023-07-01-preview";
const DEFAULT_MODEL: &str = "gpt-4";
const DEFAULT_FONT_DIR: &str = "fonts/Nanum_Gothic";
const DEFAULT_REPORT_FILENAME: &str = "report.pdf";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openai_api_key: String,
    pub openai_api_base: String,
    pub openai_api_type: ApiFlavor,
    pub openai_api_version: String,
    pub openai_model: String,
    pub llm_max_attempts: u32,
    pub llm_timeout_secs: u64,
    pub report_profile: ReportProfile,
    pub report_font_dir: PathBuf,
    pub report_filename: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_api_base: optional_env("OPENAI_API_BASE", DEFAULT_API_BASE),
            openai_api_type: optional_env("OPENAI_API_TYPE", "openai")
                .parse()
                .context("OPENAI_API_TYPE must be 'openai' or 'azure'")?,
            openai_api_version: optional_env("OPENAI_API_VERSION", DEFAULT_API_VERSION),
            openai_model: optional_env("OPENAI_MODEL", DEFAULT_MODEL),
            llm_max_attempts: optional_env("LLM_MAX_ATTEMPTS", "3")
                .parse::<u32>()
                .context("LLM_MAX_ATTEMPTS must be a positive integer")?
                .max(1),
            llm_timeout_secs: optional_env("LLM_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a number of seconds")?,
            report_profile: optional_env("REPORT_PROFILE", "extended")
                .parse()
                .context("REPORT_PROFILE must be 'extended' or 'compact'")?,
            report_font_dir: PathBuf::from(optional_env("REPORT_FONT_DIR", DEFAULT_FONT_DIR)),
            report_filename: optional_env("REPORT_FILENAME", DEFAULT_REPORT_FILENAME),
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }

    /// Settings for the chat-completion client, sampling parameters taken from the profile.
    pub fn llm_settings(&self) -> LlmSettings {
        let sampling = self.report_profile.sampling();
        LlmSettings {
            flavor: self.openai_api_type,
            api_base: self.openai_api_base.trim_end_matches('/').to_string(),
            api_key: self.openai_api_key.clone(),
            api_version: self.openai_api_version.clone(),
            model: self.openai_model.clone(),
            temperature: sampling.temperature,
            top_p: sampling.top_p,
            max_tokens: sampling.max_tokens,
            max_attempts: self.llm_max_attempts,
            timeout: Duration::from_secs(self.llm_timeout_secs),
            retry_base_delay: Duration::from_secs(1),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/careerpath_test".to_string(),
        openai_api_key: "test-key".to_string(),
        openai_api_base: DEFAULT_API_BASE.to_string(),
        openai_api_type: ApiFlavor::OpenAi,
        openai_api_version: DEFAULT_API_VERSION.to_string(),
        openai_model: DEFAULT_MODEL.to_string(),
        llm_max_attempts: 3,
        llm_timeout_secs: 120,
        report_profile: ReportProfile::Extended,
        report_font_dir: PathBuf::from(DEFAULT_FONT_DIR),
        report_filename: DEFAULT_REPORT_FILENAME.to_string(),
        port: 8080,
        rust_log: "info".to_string(),
    }
}
