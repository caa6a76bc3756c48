//! Report structures assembled from a pipeline run

use crate::processing::document::{JobPosting, PipelineResult, Profile, ToneStyle};
use crate::processing::scorer::held_skills;
use crate::processing::skills::group_names_by_category;
use crate::processing::strength::{
    analyze_bullet_strength, overall_strength, OverallStrength, StrengthRating,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the formatters render for one tailoring run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoringReport {
    /// Headline numbers and verdict
    pub summary: ReportSummary,

    /// Full pipeline output
    pub result: PipelineResult,

    /// Bullet strength before and after tailoring
    pub strength: StrengthComparison,

    /// Held skills grouped for display, in category order
    pub skills_by_category: Vec<SkillGroup>,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub score: u8,
    pub verdict: String,
    pub candidate: String,
    pub job_title: String,
    pub company: Option<String>,
    pub required_matched: usize,
    pub required_total: usize,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrengthComparison {
    pub before: OverallStrength,
    pub after: OverallStrength,
    pub bullets: Vec<BulletComparison>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletComparison {
    pub original: String,
    pub tailored: String,
    pub score_before: u8,
    pub score_after: u8,
    pub rating_after: StrengthRating,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    pub profile_file: String,
    pub job_file: String,
    pub processing_time_ms: u64,
    pub model: String,
    pub style: ToneStyle,
}

impl ReportMetadata {
    pub fn new(profile_file: &str, job_file: &str, model: &str, style: ToneStyle) -> Self {
        Self {
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            profile_file: profile_file.to_string(),
            job_file: job_file.to_string(),
            processing_time_ms: 0,
            model: model.to_string(),
            style,
        }
    }

    pub fn with_processing_time(mut self, processing_time_ms: u64) -> Self {
        self.processing_time_ms = processing_time_ms;
        self
    }
}

impl TailoringReport {
    pub fn build(
        profile: &Profile,
        job: &JobPosting,
        result: PipelineResult,
        metadata: ReportMetadata,
    ) -> Self {
        let held = held_skills(&result.tailored);
        let required_total = result.analysis.required_skills.len();
        let summary = ReportSummary {
            score: result.score.score,
            verdict: verdict(result.score.score).to_string(),
            candidate: profile.name.clone(),
            job_title: job.title.clone(),
            company: job.company.clone(),
            required_matched: result
                .analysis
                .required_skills
                .iter()
                .filter(|s| held.contains(&s.to_lowercase()))
                .count(),
            required_total,
            missing_skills: result.analysis.missing_skills.clone(),
        };

        let strength = compare_strength(&result);
        let skills_by_category = group_names_by_category(
            result
                .tailored
                .skills_ranked
                .iter()
                .filter(|r| r.user_has)
                .map(|r| r.skill.as_str()),
        )
        .into_iter()
        .map(|(category, skills)| SkillGroup {
            category: category.display_name().to_string(),
            skills,
        })
        .collect();

        Self {
            summary,
            result,
            strength,
            skills_by_category,
            metadata,
        }
    }
}

fn compare_strength(result: &PipelineResult) -> StrengthComparison {
    let bullets: Vec<BulletComparison> = result
        .tailored
        .bullets
        .iter()
        .map(|bullet| {
            let after = analyze_bullet_strength(bullet.text());
            BulletComparison {
                original: bullet.original.clone(),
                tailored: bullet.text().to_string(),
                score_before: analyze_bullet_strength(&bullet.original).overall,
                score_after: after.overall,
                rating_after: after.rating,
            }
        })
        .collect();

    let originals: Vec<&str> = bullets.iter().map(|b| b.original.as_str()).collect();
    let tailored: Vec<&str> = bullets.iter().map(|b| b.tailored.as_str()).collect();

    StrengthComparison {
        before: overall_strength(&originals),
        after: overall_strength(&tailored),
        bullets,
    }
}

/// One-line verdict for a match score
pub fn verdict(score: u8) -> &'static str {
    match score {
        85..=100 => "Excellent match: apply with confidence",
        70..=84 => "Strong match: close the listed gaps in your cover letter",
        55..=69 => "Moderate match: address missing required skills first",
        40..=54 => "Weak match: significant gaps against the requirements",
        _ => "Poor match: this role needs skills the profile does not show",
    }
}
