//! Job description analysis through the language model capability

use crate::error::{Result, ResumeTailorError};
use crate::llm::client::{
    complete_with_timeout, extract_json_payload, CompletionConfig, LanguageModel, Message,
};
use crate::llm::prompts::{PromptTemplates, GUARDRAILS};
use crate::processing::document::{Analysis, JobPosting};
use log::{debug, info};
use std::collections::HashSet;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Extracts structured requirements from a posting.
///
/// A completion that is not valid JSON is a hard failure: every later stage
/// reads the analysis, so there is no local fallback.
pub struct JdAnalyzer {
    prompt_templates: PromptTemplates,
    completion_config: CompletionConfig,
    timeout: Duration,
}

impl Default for JdAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL, DEFAULT_CALL_TIMEOUT)
    }
}

impl JdAnalyzer {
    pub fn new(model: &str, timeout: Duration) -> Self {
        Self {
            prompt_templates: PromptTemplates::default(),
            completion_config: CompletionConfig::new(model).with_temperature(0.0),
            timeout,
        }
    }

    pub async fn analyze(
        &self,
        job: &JobPosting,
        resume_skills: &[String],
        model: &dyn LanguageModel,
    ) -> Result<Analysis> {
        info!("Analyzing job description '{}' with '{}'", job.title, model.id());

        let messages = vec![
            Message::system(GUARDRAILS),
            Message::user(self.prompt_templates.render_jd_analysis(job, resume_skills)),
        ];

        // Timeouts are fatal here, same as parse failures
        let response =
            complete_with_timeout(model, &messages, Some(&self.completion_config), self.timeout)
                .await?;

        let mut analysis = parse_analysis(&response.text)?;
        analysis.missing_skills = missing_skills(&analysis.required_skills, resume_skills);

        debug!(
            "Analysis: {} required, {} preferred, {} missing, {} signals",
            analysis.required_skills.len(),
            analysis.preferred_skills.len(),
            analysis.missing_skills.len(),
            analysis.hidden_signals.len()
        );

        Ok(analysis)
    }
}

/// Analyze a posting with default prompt settings
pub async fn analyze_jd(
    job: &JobPosting,
    resume_skills: &[String],
    model: &dyn LanguageModel,
) -> Result<Analysis> {
    JdAnalyzer::default().analyze(job, resume_skills, model).await
}

fn parse_analysis(text: &str) -> Result<Analysis> {
    serde_json::from_str(extract_json_payload(text)).map_err(|e| {
        ResumeTailorError::AnalysisParse {
            message: e.to_string(),
            raw: text.to_string(),
        }
    })
}

/// Required skills the candidate does not list, compared case-insensitively.
///
/// Keeps the order of `required`, drops duplicates.
pub fn missing_skills(required: &[String], resume_skills: &[String]) -> Vec<String> {
    let held: HashSet<String> = resume_skills.iter().map(|s| s.to_lowercase()).collect();
    let mut seen = HashSet::new();

    required
        .iter()
        .filter(|skill| {
            let key = skill.to_lowercase();
            !held.contains(&key) && seen.insert(key)
        })
        .cloned()
        .collect()
}
