use anyhow::{bail, Context, Result};

use crate::screening::thresholds::ScreeningThresholds;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Where uploaded resumes are kept.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentStoreConfig {
    Local {
        upload_dir: String,
    },
    S3 {
        bucket: String,
        endpoint: String,
        access_key_id: String,
        secret_access_key: String,
    },
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    pub document_store: DocumentStoreConfig,
    pub allowed_extensions: Vec<String>,
    pub max_upload_bytes: usize,
    pub thresholds: ScreeningThresholds,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| -> Result<String> {
            lookup(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let document_store = match lookup("DOCUMENT_STORE").as_deref().unwrap_or("local") {
            "local" => DocumentStoreConfig::Local {
                upload_dir: lookup("UPLOAD_DIR").unwrap_or_else(|| "uploads".to_string()),
            },
            "s3" => DocumentStoreConfig::S3 {
                bucket: require("S3_BUCKET")?,
                endpoint: require("S3_ENDPOINT")?,
                access_key_id: require("AWS_ACCESS_KEY_ID")?,
                secret_access_key: require("AWS_SECRET_ACCESS_KEY")?,
            },
            other => bail!("DOCUMENT_STORE must be 'local' or 's3', got '{other}'"),
        };

        let allowed_extensions: Vec<String> = lookup("ALLOWED_EXTENSIONS")
            .unwrap_or_else(|| "pdf".to_string())
            .split(',')
            .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        if allowed_extensions.is_empty() {
            bail!("ALLOWED_EXTENSIONS must list at least one extension");
        }

        let defaults = ScreeningThresholds::default();
        let thresholds = ScreeningThresholds {
            shortlist_min_score: parse_or(&lookup, "SHORTLIST_MIN_SCORE", defaults.shortlist_min_score)?,
            high_quality_min_sections: parse_or(
                &lookup,
                "HIGH_QUALITY_MIN_SECTIONS",
                defaults.high_quality_min_sections,
            )?,
            medium_quality_min_sections: parse_or(
                &lookup,
                "MEDIUM_QUALITY_MIN_SECTIONS",
                defaults.medium_quality_min_sections,
            )?,
            missing_keyword_limit: parse_or(
                &lookup,
                "MISSING_KEYWORD_LIMIT",
                defaults.missing_keyword_limit,
            )?,
        };
        if let Err(msg) = thresholds.validate() {
            bail!("Invalid screening thresholds: {msg}");
        }

        Ok(Config {
            database_url: require("DATABASE_URL")?,
            port: parse_or(&lookup, "PORT", 8080u16).context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            document_store,
            allowed_extensions,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            thresholds,
        })
    }

    pub fn is_allowed_extension(&self, extension: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Environment variable '{key}' is invalid ('{raw}'): {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_only_database_url() {
        let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x")])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.allowed_extensions, vec!["pdf"]);
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.thresholds, ScreeningThresholds::default());
        assert_eq!(
            config.document_store,
            DocumentStoreConfig::Local {
                upload_dir: "uploads".to_string()
            }
        );
    }

    #[test]
    fn test_missing_database_url_fails() {
        assert!(Config::from_lookup(lookup_from(&[])).is_err());
    }

    #[test]
    fn test_threshold_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("SHORTLIST_MIN_SCORE", "65.5"),
            ("MISSING_KEYWORD_LIMIT", "10"),
        ]))
        .unwrap();
        assert_eq!(config.thresholds.shortlist_min_score, 65.5);
        assert_eq!(config.thresholds.missing_keyword_limit, 10);
    }

    #[test]
    fn test_invalid_threshold_fails() {
        assert!(Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("SHORTLIST_MIN_SCORE", "abc"),
        ]))
        .is_err());
        assert!(Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("SHORTLIST_MIN_SCORE", "101"),
        ]))
        .is_err());
    }

    #[test]
    fn test_s3_store_requires_credentials() {
        assert!(Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("DOCUMENT_STORE", "s3"),
        ]))
        .is_err());
    }

    #[test]
    fn test_unknown_store_fails() {
        assert!(Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("DOCUMENT_STORE", "ftp"),
        ]))
        .is_err());
    }

    #[test]
    fn test_allowed_extensions_normalized() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("ALLOWED_EXTENSIONS", " .PDF, txt ,"),
        ]))
        .unwrap();
        assert_eq!(config.allowed_extensions, vec!["pdf", "txt"]);
        assert!(config.is_allowed_extension("PDF"));
        assert!(!config.is_allowed_extension("docx"));
    }
}
