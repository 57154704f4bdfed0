use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_ANALYSIS_SERVICE_URL: &str = "http://localhost:8000/analyze";

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub analysis_service_url: String,
    pub port: u16,
    pub rust_log: String,
    pub request_timeout_secs: u64,
    pub max_upload_mb: usize,
    /// When set, exports are mirrored into this directory as well as downloaded.
    pub export_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            analysis_service_url: std::env::var("ANALYSIS_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_ANALYSIS_SERVICE_URL.to_string()),
            port: parse_env("PORT", 3000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 300)?,
            max_upload_mb: parse_env("MAX_UPLOAD_MB", 50)?,
            export_dir: std::env::var("EXPORT_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
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

#[cfg(test)]
impl Config {
    /// Config pointing at an arbitrary service URL, with no export mirror.
    pub fn for_service(url: &str) -> Self {
        Config {
            analysis_service_url: url.to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            request_timeout_secs: 5,
            max_upload_mb: 1,
            export_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_upload_bytes() {
        let config = Config::for_service("http://localhost");
        assert_eq!(config.max_upload_bytes(), 1024 * 1024);
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u16 = parse_env("SCORECARD_TEST_UNSET_VARIABLE", 4242).unwrap();
        assert_eq!(value, 4242);
    }
}
