//! Integration tests for the resume tailor

use async_trait::async_trait;
use resume_tailor::config::OutputFormat;
use resume_tailor::input::InputManager;
use resume_tailor::llm::prompts::JD_ANALYZER_MARKER;
use resume_tailor::llm::{Completion, CompletionConfig, LanguageModel, Message};
use resume_tailor::output::{save_report_to_file, ReportGenerator, ReportMetadata, TailoringReport};
use resume_tailor::processing::cache::CachedOrchestrator;
use resume_tailor::processing::document::Skill;
use resume_tailor::{orchestrate, OrchestratorOptions, Profile, Result, ResumeTailorError, ToneStyle};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const ANALYSIS: &str = r#"{
    "required_skills": ["Go", "Kubernetes", "Postgres", "Terraform"],
    "preferred_skills": ["Kafka"],
    "missing_skills": [],
    "hidden_signals": [{"type": "domain", "signal": "fintech", "evidence": "payments"}],
    "risks": [],
    "suggested_keywords": ["Golang"],
    "seniority_cues": ["Senior"]
}"#;

/// Returns a fixed analysis and non-JSON text for every rewrite request
struct ScriptedModel {
    calls: AtomicUsize,
}

impl ScriptedModel {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, messages: &[Message], _config: Option<&CompletionConfig>) -> Result<Completion> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let prompt = messages.last().map(|m| m.content.as_str()).unwrap_or_default();
        if prompt.contains(JD_ANALYZER_MARKER) {
            Ok(Completion::new(ANALYSIS))
        } else {
            Ok(Completion::new("I would rather not answer in JSON."))
        }
    }
}

struct BrokenModel;

#[async_trait]
impl LanguageModel for BrokenModel {
    fn id(&self) -> &str {
        "broken"
    }

    async fn complete(&self, _messages: &[Message], _config: Option<&CompletionConfig>) -> Result<Completion> {
        Ok(Completion::new("Sure! Here is the analysis you asked for."))
    }
}

async fn fixture_profile() -> Profile {
    InputManager::new()
        .load_profile(Path::new("tests/fixtures/profile.json"))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_profile_fixtures_agree() {
    let mut manager = InputManager::new();
    let from_json = manager.load_profile(Path::new("tests/fixtures/profile.json")).await.unwrap();
    let from_toml = manager.load_profile(Path::new("tests/fixtures/profile.toml")).await.unwrap();

    assert_eq!(from_json.id, from_toml.id);
    assert_eq!(from_json.work_history[0].bullets[0], from_toml.work_history[0].bullets[0]);
    assert_eq!(from_toml.skills[0].years, Some(4.0));
}

#[tokio::test]
async fn test_missing_skill_lowers_score() {
    let model = Arc::new(ScriptedModel::new());
    let options = OrchestratorOptions::default().with_model(model.clone());
    let job = InputManager::new()
        .load_job(Path::new("tests/fixtures/job.json"))
        .await
        .unwrap();

    let without_terraform = fixture_profile().await;
    let mut with_terraform = without_terraform.clone();
    with_terraform.skills.push(Skill::new("Terraform"));

    let missing = orchestrate(&without_terraform, &job, options.clone()).await.unwrap();
    let matched = orchestrate(&with_terraform, &job, options).await.unwrap();

    assert_eq!(missing.analysis.missing_skills, vec!["Terraform"]);
    assert!(missing
        .tailored
        .warnings
        .contains(&"Missing required skill: Terraform".to_string()));
    assert!(matched.analysis.missing_skills.is_empty());
    assert!(missing.score.score < matched.score.score);
    assert_eq!(missing.gaps.missing_experience.len(), 1);

    // one analysis call plus one call per bullet, per run
    assert_eq!(model.calls.load(Ordering::SeqCst), 2 * (1 + 3));
}

#[tokio::test]
async fn test_unparseable_rewrites_keep_originals() {
    let options = OrchestratorOptions::default().with_model(Arc::new(ScriptedModel::new()));
    let profile = fixture_profile().await;
    let job = InputManager::new()
        .load_job(Path::new("tests/fixtures/job.json"))
        .await
        .unwrap();

    let result = orchestrate(&profile, &job, options).await.unwrap();
    let originals: Vec<&str> = result.tailored.bullets.iter().map(|b| b.original.as_str()).collect();
    assert_eq!(
        originals,
        vec![
            "Built API services in Go serving 10k users",
            "Responsible for Kubernetes cluster upgrades",
            "Tuned Postgres queries for the billing service",
        ]
    );
    assert!(result.tailored.bullets[0]
        .text()
        .starts_with("Built API services in Go serving 10k users"));
    assert!(result.tailored.bullets[1]
        .text()
        .starts_with("Led Responsible for Kubernetes"));
}

#[tokio::test]
async fn test_unparseable_analysis_is_fatal() {
    let options = OrchestratorOptions::default().with_model(Arc::new(BrokenModel));
    let profile = fixture_profile().await;
    let job = InputManager::new()
        .load_job(Path::new("tests/fixtures/job.json"))
        .await
        .unwrap();

    let err = orchestrate(&profile, &job, options).await.unwrap_err();
    match err {
        ResumeTailorError::AnalysisParse { raw, .. } => {
            assert!(raw.contains("Here is the analysis"));
        }
        other => panic!("expected an analysis parse error, got {other}"),
    }
}

#[tokio::test]
async fn test_markdown_job_with_stub_model() {
    let mut manager = InputManager::new();
    let profile = fixture_profile().await;
    let job = manager.load_job(Path::new("tests/fixtures/job.md")).await.unwrap();
    assert_eq!(job.id, "job");
    assert_eq!(job.title, "Senior Platform Engineer");
    assert!(!job.raw_text.contains("**"));

    let result = orchestrate(&profile, &job, OrchestratorOptions::default().with_style(ToneStyle::Executive))
        .await
        .unwrap();

    assert!(result.analysis.missing_skills.contains(&"Terraform".to_string()));
    assert!(!result.analysis.missing_skills.contains(&"Go".to_string()));
    assert!(result.analysis.preferred_skills.contains(&"Kafka".to_string()));
    assert!(result.tailored.bullets.iter().all(|b| b.text().contains("Drove ")));
    assert!(result.score.score <= 100);
}

#[tokio::test]
async fn test_cached_run_and_saved_report() {
    let profile = fixture_profile().await;
    let job = InputManager::new()
        .load_job(Path::new("tests/fixtures/job.json"))
        .await
        .unwrap();

    let mut orchestrator =
        CachedOrchestrator::new(OrchestratorOptions::default(), 4, Duration::from_secs(60));
    let first = orchestrator.run(&profile, &job).await.unwrap();
    let second = orchestrator.run(&profile, &job).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(orchestrator.stats().hits, 1);

    let metadata = ReportMetadata::new("profile.json", "job.json", "stub-deterministic", ToneStyle::Concise);
    let report = TailoringReport::build(&profile, &job, first, metadata);
    let markdown = ReportGenerator::new()
        .generate_report(&report, OutputFormat::Markdown)
        .unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out").join("report.md");
    save_report_to_file(&markdown, &path).unwrap();

    let saved = std::fs::read_to_string(&path).unwrap();
    assert!(saved.contains("Senior Platform Engineer"));
    assert!(saved.contains("## Match Summary"));
}
