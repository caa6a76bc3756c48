//! Document structures shared by every pipeline stage

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Technical,
    Soft,
    Tools,
    Languages,
    Frameworks,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<SkillLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<SkillCategory>,
}

impl Skill {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
            years: None,
            category: None,
        }
    }

    pub fn with_years(mut self, years: f64) -> Self {
        self.years = Some(years);
        self
    }
}

/// Metric values attached to bullets and experiences ("latency": "20%", "users": 10000)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

/// Writing style applied by the tone normalizer and recorded on tailored bullets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneStyle {
    #[default]
    Concise,
    Executive,
    Technical,
}

impl ToneStyle {
    /// Literal prefix the tone normalizer puts in front of each bullet
    pub fn prefix(&self) -> &'static str {
        match self {
            ToneStyle::Concise => "",
            ToneStyle::Executive => "Drove ",
            ToneStyle::Technical => "Engineered ",
        }
    }
}

impl fmt::Display for ToneStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToneStyle::Concise => write!(f, "concise"),
            ToneStyle::Executive => write!(f, "executive"),
            ToneStyle::Technical => write!(f, "technical"),
        }
    }
}

impl FromStr for ToneStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "concise" => Ok(ToneStyle::Concise),
            "executive" => Ok(ToneStyle::Executive),
            "technical" => Ok(ToneStyle::Technical),
            _ => Err(format!(
                "Invalid style: {}. Supported: concise, executive, technical",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Bullet {
    /// Source text as written by the candidate; never changed by the pipeline
    pub original: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewritten: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<BTreeMap<String, MetricValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ToneStyle>,
}

impl Bullet {
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            ..Default::default()
        }
    }

    /// The most recent text for this bullet: rewritten if any stage set it, else the original
    pub fn text(&self) -> &str {
        self.rewritten.as_deref().unwrap_or(&self.original)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default)]
    pub bullets: Vec<Bullet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<BTreeMap<String, MetricValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seniority: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub bullets: Vec<Bullet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Preference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seniority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domains: Option<Vec<String>>,
}

/// Candidate profile; the immutable input of a pipeline run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub work_history: Vec<Experience>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<Education>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certs: Option<Vec<Certification>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Vec<Preference>>,
}

/// Job posting; `raw_text` is the primary analysis input, the lists are hints
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domains: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nice_to_haves: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<Vec<String>>,
    pub raw_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    AtsTag,
    Seniority,
    Domain,
    Tone,
    Format,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiddenSignal {
    #[serde(rename = "type")]
    pub kind: SignalKind,
    pub signal: String,
    #[serde(default)]
    pub evidence: String,
}

/// Structured requirements extracted from a job posting
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    /// Always a subset of `required_skills`
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub hidden_signals: Vec<HiddenSignal>,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub suggested_keywords: Vec<String>,
    #[serde(default)]
    pub seniority_cues: Vec<String>,
}

impl Analysis {
    pub fn signals_of(&self, kind: SignalKind) -> impl Iterator<Item = &HiddenSignal> {
        self.hidden_signals.iter().filter(move |s| s.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResumeDraft {
    pub summary: String,
    pub skills: Vec<String>,
    /// Skills from the profile itself; `skills` may also hold merged job keywords
    #[serde(default)]
    pub candidate_skills: Vec<String>,
    pub experiences: Vec<Experience>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<Education>>,
    #[serde(default)]
    pub extras: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl ResumeDraft {
    /// All experience bullets in source order
    pub fn bullets(&self) -> impl Iterator<Item = &Bullet> {
        self.experiences.iter().flat_map(|exp| exp.bullets.iter())
    }

    /// Returns a new draft whose experience bullets are produced by `f`
    pub fn map_bullets<F>(&self, mut f: F) -> ResumeDraft
    where
        F: FnMut(&Bullet) -> Bullet,
    {
        let experiences = self
            .experiences
            .iter()
            .map(|exp| Experience {
                bullets: exp.bullets.iter().map(&mut f).collect(),
                ..exp.clone()
            })
            .collect();

        ResumeDraft {
            experiences,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillSource {
    WorkHistory,
    Project,
    Education,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSkill {
    pub skill: String,
    pub source: SkillSource,
    pub user_has: bool,
    pub missing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailoredResume {
    pub summary: String,
    pub skills_ranked: Vec<RankedSkill>,
    pub bullets: Vec<Bullet>,
    pub ats_keywords_added: Vec<String>,
    pub style: ToneStyle,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapItem {
    pub area: String,
    pub example_tasks: Vec<String>,
    pub proof_ideas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicroProject {
    pub title: String,
    pub goal: String,
    pub steps: Vec<String>,
    pub deliverables: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GapReport {
    pub missing_experience: Vec<GapItem>,
    pub micro_projects: Vec<MicroProject>,
    #[serde(rename = "filler_bullets_suggestions")]
    pub filler_bullets: Vec<Bullet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    #[serde(rename = "score_0_100")]
    pub score: u8,
    pub rationale: Vec<String>,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub keyword_coverage: f64,
    pub seniority_alignment: f64,
    pub domain_alignment: f64,
}

/// Aggregate output of one orchestrated run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub tailored: TailoredResume,
    pub gaps: GapReport,
    pub score: MatchScore,
    pub analysis: Analysis,
}
