use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::embedding::{EmbeddingBackend, DEFAULT_DIMENSION};
use crate::matching::DEFAULT_MATCH_THRESHOLD;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Absent → explanations always use the deterministic fallback.
    pub gemini_api_key: Option<String>,
    pub audit_log_path: PathBuf,
    pub skill_match_threshold: f32,
    pub embedding_backend: EmbeddingBackend,
    /// Vector size for the hash backend; MiniLM is fixed at 384.
    pub embedding_dimension: usize,
    /// Extra taxonomy terms, from the comma-separated CUSTOM_SKILLS.
    pub custom_skills: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let skill_match_threshold = match var("SKILL_MATCH_THRESHOLD") {
            Some(v) => v
                .trim()
                .parse::<f32>()
                .context("SKILL_MATCH_THRESHOLD must be a number")?,
            None => DEFAULT_MATCH_THRESHOLD,
        };
        if !(skill_match_threshold > 0.0 && skill_match_threshold <= 1.0) {
            bail!("SKILL_MATCH_THRESHOLD must be in (0, 1], got {skill_match_threshold}");
        }

        let embedding_backend = match var("EMBEDDING_BACKEND") {
            Some(v) => v.parse::<EmbeddingBackend>()?,
            None => EmbeddingBackend::MiniLm,
        };

        Ok(Config {
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .trim()
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            gemini_api_key: var("GEMINI_API_KEY"),
            audit_log_path: var("AUDIT_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("logs/audit_log.jsonl")),
            skill_match_threshold,
            embedding_backend,
            embedding_dimension: match var("EMBEDDING_DIMENSION") {
                Some(v) => v
                    .trim()
                    .parse::<usize>()
                    .context("EMBEDDING_DIMENSION must be a positive integer")?,
                None => DEFAULT_DIMENSION,
            },
            custom_skills: var("CUSTOM_SKILLS")
                .map(|v| split_list(&v))
                .unwrap_or_default(),
        })
    }
}

/// Splits a comma-separated list, trimming entries and dropping blanks.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
