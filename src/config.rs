//! Configuration management for the resume tailor

use crate::error::{Result, ResumeTailorError};
use crate::llm::analyzer::{DEFAULT_CALL_TIMEOUT, DEFAULT_MODEL};
use crate::processing::document::ToneStyle;
use crate::processing::pipeline::OrchestratorOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub default_style: ToneStyle,
    pub call_timeout_secs: u64,
    pub max_concurrent_rewrites: usize,
    /// Model name sent with every completion request
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            default_style: ToneStyle::Concise,
            call_timeout_secs: DEFAULT_CALL_TIMEOUT.as_secs(),
            max_concurrent_rewrites: 4,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first use
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load from `path` when given, else from the default location
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                ResumeTailorError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeTailorError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-tailor")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.pipeline.call_timeout_secs == 0 {
            return Err(ResumeTailorError::Configuration(
                "pipeline.call_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.pipeline.max_concurrent_rewrites == 0 {
            return Err(ResumeTailorError::Configuration(
                "pipeline.max_concurrent_rewrites must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.pipeline.call_timeout_secs)
    }

    /// Pipeline options for this configuration; `style` overrides the default style
    pub fn orchestrator_options(&self, style: Option<ToneStyle>) -> OrchestratorOptions {
        OrchestratorOptions {
            style: style.unwrap_or(self.pipeline.default_style),
            model: None,
            model_name: self.pipeline.model.clone(),
            call_timeout: self.call_timeout(),
            max_concurrent_rewrites: self.pipeline.max_concurrent_rewrites,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let reloaded = Config::load_from(Some(&path)).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[pipeline]\ndefault_style = \"executive\"\n\n[output]\nformat = \"Json\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.pipeline.default_style, ToneStyle::Executive);
        assert_eq!(config.pipeline.max_concurrent_rewrites, 4);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.color_output);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[pipeline]\ncall_timeout_secs = 0\n").unwrap();

        let err = Config::load_from(Some(&path)).unwrap_err();
        assert!(matches!(err, ResumeTailorError::Configuration(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "pipeline = [").unwrap();
        assert!(Config::load_from(Some(&path)).is_err());
    }

    #[test]
    fn test_orchestrator_options() {
        let config = Config::default();
        let options = config.orchestrator_options(Some(ToneStyle::Technical));
        assert_eq!(options.style, ToneStyle::Technical);
        assert_eq!(options.call_timeout, Duration::from_secs(30));
        assert_eq!(options.model_name, "gpt-4o-mini");

        assert_eq!(config.orchestrator_options(None).style, ToneStyle::Concise);
    }
}
