use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::screening::ranking::{clamp_top_n, DEFAULT_TOP_N};

const MIB: usize = 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every key is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Default shortlist size when a request does not send `top_n`. 1-50.
    pub shortlist_top_n: usize,
    /// Per-file limit for uploaded resumes.
    pub max_upload_bytes: usize,
    /// Whole-request limit for the multipart analyze endpoint.
    pub max_request_bytes: usize,
    pub batch_concurrency: usize,
    /// JSON vocabulary replacing the built-in skills and degrees.
    pub vocabulary_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            shortlist_top_n: DEFAULT_TOP_N,
            max_upload_bytes: 10 * MIB,
            max_request_bytes: 50 * MIB,
            batch_concurrency: 4,
            vocabulary_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            shortlist_top_n: clamp_top_n(parse_env("SHORTLIST_TOP_N", defaults.shortlist_top_n)?),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            max_request_bytes: parse_env("MAX_REQUEST_BYTES", defaults.max_request_bytes)?,
            batch_concurrency: parse_env("BATCH_CONCURRENCY", defaults.batch_concurrency)?.max(1),
            vocabulary_path: std::env::var("VOCABULARY_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
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
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.shortlist_top_n, 3);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.batch_concurrency, 4);
        assert!(config.vocabulary_path.is_none());
    }

    #[test]
    fn test_parse_env_reads_and_rejects_values() {
        std::env::set_var("SCREENER_TEST_LIMIT", " 42 ");
        assert_eq!(parse_env("SCREENER_TEST_LIMIT", 7usize).unwrap(), 42);

        std::env::set_var("SCREENER_TEST_LIMIT", "lots");
        let err = parse_env("SCREENER_TEST_LIMIT", 7usize).unwrap_err();
        assert!(err.to_string().contains("SCREENER_TEST_LIMIT"));

        std::env::remove_var("SCREENER_TEST_LIMIT");
        assert_eq!(parse_env("SCREENER_TEST_LIMIT", 7usize).unwrap(), 7);
    }
}
