//! End-to-end tailoring pipeline

use crate::error::Result;
use crate::llm::analyzer::{JdAnalyzer, DEFAULT_CALL_TIMEOUT, DEFAULT_MODEL};
use crate::llm::client::LanguageModel;
use crate::llm::rewriter::{BulletRewriter, RewriteOptions};
use crate::llm::stub::StubLanguageModel;
use crate::processing::ats_optimizer::ats_optimize;
use crate::processing::document::{JobPosting, PipelineResult, Profile, ToneStyle};
use crate::processing::draft::build_draft;
use crate::processing::gap_analyzer::gap_analyze;
use crate::processing::scorer::score_match;
use crate::processing::tailoring::tailor_resume;
use crate::processing::tone::normalize_tone;
use log::{debug, info};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct OrchestratorOptions {
    pub style: ToneStyle,
    /// Completion capability; the deterministic stub when `None`
    pub model: Option<Arc<dyn LanguageModel>>,
    /// Model name passed along in completion configs
    pub model_name: String,
    pub call_timeout: Duration,
    pub max_concurrent_rewrites: usize,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            style: ToneStyle::default(),
            model: None,
            model_name: DEFAULT_MODEL.to_string(),
            call_timeout: DEFAULT_CALL_TIMEOUT,
            max_concurrent_rewrites: 4,
        }
    }
}

impl OrchestratorOptions {
    pub fn with_style(mut self, style: ToneStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_model(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.model = Some(model);
        self
    }

    fn rewrite_options(&self) -> RewriteOptions {
        RewriteOptions {
            model: self.model_name.clone(),
            timeout: self.call_timeout,
            max_concurrent: self.max_concurrent_rewrites,
        }
    }
}

impl std::fmt::Debug for OrchestratorOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrchestratorOptions")
            .field("style", &self.style)
            .field("model", &self.model.as_ref().map(|m| m.id().to_string()))
            .field("model_name", &self.model_name)
            .field("call_timeout", &self.call_timeout)
            .field("max_concurrent_rewrites", &self.max_concurrent_rewrites)
            .finish()
    }
}

/// Run every stage in order: draft, JD analysis, bullet rewriting, tone,
/// ATS optimization, tailoring, gap analysis, scoring.
pub async fn orchestrate(
    profile: &Profile,
    job: &JobPosting,
    options: OrchestratorOptions,
) -> Result<PipelineResult> {
    let start_time = Instant::now();
    let model: Arc<dyn LanguageModel> = match options.model.clone() {
        Some(model) => model,
        None => Arc::new(StubLanguageModel::new()?),
    };
    info!(
        "Tailoring profile '{}' for '{}' ({} style, model '{}')",
        profile.id,
        job.title,
        options.style,
        model.id()
    );

    let draft = build_draft(profile);
    debug!("Draft built: {} skills, {} bullets", draft.skills.len(), draft.bullets().count());

    let analyzer = JdAnalyzer::new(&options.model_name, options.call_timeout);
    let analysis = analyzer.analyze(job, &draft.skills, model.as_ref()).await?;
    debug!(
        "JD analyzed: {} required, {} missing",
        analysis.required_skills.len(),
        analysis.missing_skills.len()
    );

    let rewritten = BulletRewriter::new(options.rewrite_options())
        .rewrite(&draft, model.as_ref())
        .await?;
    debug!("Bullets rewritten");

    let toned = normalize_tone(&rewritten, options.style);
    debug!("Tone normalized to {}", options.style);

    let optimized = ats_optimize(&toned, &analysis);
    debug!("ATS optimized: {} skills", optimized.skills.len());

    let tailored = tailor_resume(&optimized, &analysis, options.style);
    debug!("Tailored: {} warnings", tailored.warnings.len());

    let gaps = gap_analyze(&analysis);
    debug!("Gap report: {} items", gaps.missing_experience.len());

    let score = score_match(&tailored, &analysis);
    info!(
        "Pipeline finished in {}ms with score {}",
        start_time.elapsed().as_millis(),
        score.score
    );

    Ok(PipelineResult {
        tailored,
        gaps,
        score,
        analysis,
    })
}
