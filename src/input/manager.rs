//! Input manager for loading profiles and job postings from disk

use crate::error::{Result, ResumeTailorError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use crate::processing::document::{JobPosting, Profile};
use log::info;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Load a candidate profile from a JSON or TOML file
    pub async fn load_profile(&mut self, path: &Path) -> Result<Profile> {
        let file_type = self.detect_file_type(path)?;
        if !file_type.is_structured() {
            return Err(ResumeTailorError::UnsupportedFormat(format!(
                "Profiles must be JSON or TOML: {}",
                path.display()
            )));
        }

        let content = self.extract_text(path).await?;
        let profile: Profile = parse_structured(&content, file_type)?;
        info!(
            "Loaded profile '{}' with {} skills and {} experiences",
            profile.id,
            profile.skills.len(),
            profile.work_history.len()
        );
        Ok(profile)
    }

    /// Load a job posting. JSON and TOML map onto the posting directly; any
    /// other supported format becomes the posting's raw text.
    pub async fn load_job(&mut self, path: &Path) -> Result<JobPosting> {
        let file_type = self.detect_file_type(path)?;
        let content = self.extract_text(path).await?;

        if file_type.is_structured() {
            return parse_structured(&content, file_type);
        }

        if content.trim().is_empty() {
            return Err(ResumeTailorError::InvalidInput(format!(
                "Job posting is empty: {}",
                path.display()
            )));
        }

        let title = content
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default()
            .trim_start_matches('#')
            .trim()
            .to_string();
        let id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "job".to_string());

        Ok(JobPosting {
            id,
            title,
            raw_text: content,
            ..Default::default()
        })
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(ResumeTailorError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match self.detect_file_type(path)? {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Text | FileType::Json | FileType::Toml => {
                info!("Reading file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(ResumeTailorError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ResumeTailorError::InvalidInput(format!(
                    "File has no extension: {}",
                    path.display()
                ))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

fn parse_structured<T: DeserializeOwned>(content: &str, file_type: FileType) -> Result<T> {
    match file_type {
        FileType::Toml => Ok(toml::from_str(content)?),
        _ => Ok(serde_json::from_str(content)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_profile_json_and_toml() {
        let dir = TempDir::new().unwrap();
        let json = dir.path().join("profile.json");
        let toml_path = dir.path().join("profile.toml");
        std::fs::write(&json, r#"{"id":"u1","name":"Pat","skills":[{"name":"Go"}]}"#).unwrap();
        std::fs::write(
            &toml_path,
            "id = \"u2\"\nname = \"Sam\"\n\n[[skills]]\nname = \"Rust\"\nyears = 3\n",
        )
        .unwrap();

        let mut manager = InputManager::new();
        assert_eq!(manager.load_profile(&json).await.unwrap().skills[0].name, "Go");
        let from_toml = manager.load_profile(&toml_path).await.unwrap();
        assert_eq!(from_toml.id, "u2");
        assert_eq!(from_toml.skills[0].years, Some(3.0));
        assert_eq!(manager.cache_size(), 2);
    }

    #[tokio::test]
    async fn test_profile_from_text_is_rejected() {
        let dir = TempDir::new().unwrap();
        let txt = dir.path().join("profile.txt");
        std::fs::write(&txt, "Pat").unwrap();

        let err = InputManager::new().load_profile(&txt).await.unwrap_err();
        assert!(matches!(err, ResumeTailorError::UnsupportedFormat(_)));
    }

    #[tokio::test]
    async fn test_job_from_text() {
        let dir = TempDir::new().unwrap();
        let txt = dir.path().join("backend-role.txt");
        std::fs::write(&txt, "\n  Senior Backend Engineer\nGo and Postgres required.").unwrap();

        let job = InputManager::new().load_job(&txt).await.unwrap();
        assert_eq!(job.id, "backend-role");
        assert_eq!(job.title, "Senior Backend Engineer");
        assert!(job.raw_text.contains("Go and Postgres"));
    }

    #[tokio::test]
    async fn test_missing_and_unknown_files() {
        let dir = TempDir::new().unwrap();
        let mut manager = InputManager::new().with_cache(false);

        let missing = manager.load_job(&dir.path().join("nope.md")).await.unwrap_err();
        assert!(matches!(missing, ResumeTailorError::InvalidInput(_)));

        let docx = dir.path().join("job.docx");
        std::fs::write(&docx, "x").unwrap();
        let unknown = manager.load_job(&docx).await.unwrap_err();
        assert!(matches!(unknown, ResumeTailorError::UnsupportedFormat(_)));
        assert_eq!(manager.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_job() {
        let dir = TempDir::new().unwrap();
        let json = dir.path().join("job.json");
        std::fs::write(&json, "{\"id\": ").unwrap();

        let err = InputManager::new().load_job(&json).await.unwrap_err();
        assert!(matches!(err, ResumeTailorError::Serialization(_)));
    }
}
