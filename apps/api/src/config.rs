use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_TEMPLATE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates/template.tex");
const DEFAULT_EXAMPLE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/example_cv.json");
const DEFAULT_LATEX_BIN: &str = "pdflatex";
const DEFAULT_LATEX_TIMEOUT_SECS: u64 = 60;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// LaTeX template holding the `{{HEADER}}` and `{{SECTIONS}}` placeholders.
    pub template_path: PathBuf,
    /// Sample résumé served by `GET /api/example-cv`.
    pub example_cv_path: PathBuf,
    pub latex_bin: String,
    pub latex_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            template_path: env_or("CV_TEMPLATE_PATH", DEFAULT_TEMPLATE_PATH).into(),
            example_cv_path: env_or("CV_EXAMPLE_PATH", DEFAULT_EXAMPLE_PATH).into(),
            latex_bin: env_or("LATEX_BIN", DEFAULT_LATEX_BIN),
            latex_timeout: Duration::from_secs(
                std::env::var("LATEX_TIMEOUT_SECS")
                    .map(|raw| raw.parse::<u64>())
                    .unwrap_or(Ok(DEFAULT_LATEX_TIMEOUT_SECS))
                    .context("LATEX_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_on_missing_or_blank() {
        assert_eq!(env_or("CVPRESS_TEST_SURELY_UNSET", "dflt"), "dflt");
    }

    #[test]
    fn test_default_assets_exist() {
        assert!(PathBuf::from(DEFAULT_TEMPLATE_PATH).is_file());
        assert!(PathBuf::from(DEFAULT_EXAMPLE_PATH).is_file());
    }
}
