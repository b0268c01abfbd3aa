//! Configuration handling for the TUI

use crate::schema::SAMPLE_SCHEMA;
use crate::sink::{JsonLinesSink, LogSink, SubmissionSink};
use crate::state::RetentionPolicy;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Drop the last valid preview when the editor text stops validating
    pub clear_preview_on_error: Option<bool>,
    /// Schema file loaded into the editor at startup
    pub initial_schema_path: Option<String>,
    /// Where submissions are appended as JSON lines
    pub submission_log_path: Option<String>,
    /// Only log submissions instead of writing them to a file
    pub log_submissions_only: Option<bool>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "schemaform", "schemaform")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Log file for tracing output (the terminal itself is in raw mode)
    pub fn log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().join("schemaform.log"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)
                    .with_context(|| format!("parsing {}", path.display()))?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    pub fn retention_policy(&self) -> RetentionPolicy {
        if self.clear_preview_on_error.unwrap_or(false) {
            RetentionPolicy::Clear
        } else {
            RetentionPolicy::Retain
        }
    }

    /// Text the editor starts with: the configured file or the sample schema
    pub fn initial_schema(&self) -> Result<String> {
        match &self.initial_schema_path {
            Some(path) => {
                fs::read_to_string(path).with_context(|| format!("reading schema file {path}"))
            }
            None => Ok(SAMPLE_SCHEMA.to_string()),
        }
    }

    /// Resolved submission file, defaulting to the data directory
    pub fn submission_path(&self) -> Option<PathBuf> {
        self.submission_log_path.as_ref().map(PathBuf::from).or_else(|| {
            Self::project_dirs().map(|dirs| dirs.data_dir().join("submissions.jsonl"))
        })
    }

    /// Build the configured submission sink
    pub fn build_sink(&self) -> Box<dyn SubmissionSink> {
        if self.log_submissions_only.unwrap_or(false) {
            return Box::new(LogSink);
        }
        match self.submission_path() {
            Some(path) => Box::new(JsonLinesSink::new(path)),
            None => Box::new(LogSink),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.clear_preview_on_error.is_none());
        assert!(config.initial_schema_path.is_none());
        assert!(config.submission_log_path.is_none());
        assert!(config.log_submissions_only.is_none());
        assert_eq!(config.retention_policy(), RetentionPolicy::Retain);
    }

    #[test]
    fn test_clear_policy_from_config() {
        let config = TuiConfig {
            clear_preview_on_error: Some(true),
            ..Default::default()
        };
        assert_eq!(config.retention_policy(), RetentionPolicy::Clear);
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            clear_preview_on_error: Some(false),
            initial_schema_path: Some("/tmp/form.json".to_string()),
            submission_log_path: Some("/tmp/out.jsonl".to_string()),
            log_submissions_only: Some(true),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.clear_preview_on_error, Some(false));
        assert_eq!(parsed.initial_schema_path, Some("/tmp/form.json".to_string()));
        assert_eq!(parsed.submission_log_path, Some("/tmp/out.jsonl".to_string()));
        assert_eq!(parsed.log_submissions_only, Some(true));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.initial_schema_path.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"clear_preview_on_error": true, "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.clear_preview_on_error, Some(true));
    }

    #[test]
    fn test_initial_schema_defaults_to_sample() {
        let config = TuiConfig::default();
        assert_eq!(config.initial_schema().unwrap(), SAMPLE_SCHEMA);
    }

    #[test]
    fn test_initial_schema_reads_file() {
        let path = std::env::temp_dir().join(format!("schemaform-{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, r#"{"formTitle":"File","fields":[]}"#).unwrap();
        let config = TuiConfig {
            initial_schema_path: Some(path.display().to_string()),
            ..Default::default()
        };
        assert!(config.initial_schema().unwrap().contains("File"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_schema_file_is_error() {
        let config = TuiConfig {
            initial_schema_path: Some("/nonexistent/schemaform/form.json".to_string()),
            ..Default::default()
        };
        assert!(config.initial_schema().is_err());
    }

    #[test]
    fn test_explicit_submission_path_wins() {
        let config = TuiConfig {
            submission_log_path: Some("/tmp/custom.jsonl".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.submission_path(),
            Some(PathBuf::from("/tmp/custom.jsonl"))
        );
        assert_eq!(config.build_sink().describe(), "file /tmp/custom.jsonl");
    }

    #[test]
    fn test_log_only_builds_log_sink() {
        let config = TuiConfig {
            log_submissions_only: Some(true),
            submission_log_path: Some("/tmp/custom.jsonl".to_string()),
            ..Default::default()
        };
        assert_eq!(config.build_sink().describe(), "log");
    }

    #[test]
    fn test_load_returns_ok_without_file() {
        // Load should return default config when file doesn't exist
        let result = TuiConfig::load();
        assert!(result.is_ok());
    }
}
