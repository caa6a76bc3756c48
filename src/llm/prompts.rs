//! Prompt templates for the LLM-facing pipeline stages

use crate::processing::document::{Bullet, JobPosting};
use log::debug;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// System message sent verbatim with every model call
pub const GUARDRAILS: &str = r#"
- Do not fabricate employment, dates, education, or certifications.
- Preserve truthfulness; only use skills that appear in the provided resume/profile.
- Keep output ATS-safe: plain text, no tables or graphics, no emojis.
- Keep bullets under 30 words, start with strong action verbs, include metrics when present.
- Avoid demographic or personal data not supplied by the user.
- Do not claim clearance/eligibility unless explicitly provided."#;

/// First line of the analysis prompt; also how the stub model recognizes it
pub const JD_ANALYZER_MARKER: &str = "You are a resume-to-JD analyzer.";

/// First line of the bullet prompt; also how the stub model recognizes it
pub const BULLET_REWRITE_MARKER: &str =
    "Rewrite the bullet with the CAR framework (Context, Action, Result).";

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub jd_analysis: String,
    pub bullet_rewrite: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            jd_analysis: JD_ANALYSIS_TEMPLATE.to_string(),
            bullet_rewrite: BULLET_REWRITE_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Analysis prompt embedding the posting and the candidate's flattened skills
    pub fn render_jd_analysis(&self, job: &JobPosting, resume_skills: &[String]) -> String {
        let hints = Self::structured_hints(job);
        let skills = resume_skills.join(", ");

        let prompt = fill(
            &self.jd_analysis,
            &[
                ("marker", JD_ANALYZER_MARKER),
                ("title", &job.title),
                ("company", job.company.as_deref().unwrap_or("unknown")),
                ("raw_text", &job.raw_text),
                ("hints", &hints),
                ("skills", &skills),
            ],
        );

        debug!("JD analysis prompt length: {}", prompt.len());
        prompt
    }

    /// CAR rewrite prompt for a single bullet
    pub fn render_bullet_rewrite(&self, bullet: &Bullet) -> String {
        fill(
            &self.bullet_rewrite,
            &[("marker", BULLET_REWRITE_MARKER), ("bullet", &bullet.original)],
        )
    }

    fn structured_hints(job: &JobPosting) -> String {
        let mut hints = String::new();
        let sections = [
            ("Listed requirements", &job.requirements),
            ("Listed nice-to-haves", &job.nice_to_haves),
            ("Responsibilities", &job.responsibilities),
            ("Domains", &job.domains),
        ];

        for (label, values) in sections {
            if let Some(values) = values.as_ref().filter(|v| !v.is_empty()) {
                hints.push_str(&format!("{}: {}\n", label, values.join("; ")));
            }
        }
        if let Some(level) = &job.level {
            hints.push_str(&format!("Level: {}\n", level));
        }

        hints
    }
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{([a-z_]+)\}").expect("valid placeholder pattern"))
}

/// Substitutes `{name}` placeholders in one pass. Inserted values are never
/// rescanned, and unknown names are left as written.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    placeholder_pattern()
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map_or_else(|| caps[0].to_string(), |(_, value)| value.to_string())
        })
        .into_owned()
}

const JD_ANALYSIS_TEMPLATE: &str = r#"
{marker} Extract:
- required_skills: hard requirements from JD text.
- preferred_skills: nice to haves.
- missing_skills: required that are absent from resume skills.
- hidden_signals: ATS tags, seniority cues, domain hints, tone/format requests.
- risks: blockers or compliance notes (work auth, clearance, travel, on-call).
- suggested_keywords: synonyms/variants of required skills.
- seniority_cues: words indicating level/leadership.

JD title: {title}
Company: {company}
Raw JD:
{raw_text}
{hints}
Resume skills: {skills}
Return JSON only."#;

const BULLET_REWRITE_TEMPLATE: &str = r#"
{marker}
Rules: start with a strong action verb, under 30 words, keep metrics, ATS-safe, do not fabricate.
Input bullet: "{bullet}"
Return JSON: { "rewritten": "...", "skills_used": [] }"#;
