//! Deterministic stand-in for a hosted language model
//!
//! Recognizes the analysis and bullet prompts and answers them with heuristic
//! JSON built from the prompt text alone. Same input, same output.

use crate::error::Result;
use crate::llm::client::{Completion, CompletionConfig, LanguageModel, Message, Role};
use crate::llm::prompts::{BULLET_REWRITE_MARKER, JD_ANALYZER_MARKER};
use crate::processing::ats_matcher::SkillMatcher;
use crate::processing::document::{Analysis, HiddenSignal, SignalKind};
use async_trait::async_trait;
use regex::Regex;
use serde_json::json;
use std::collections::HashSet;

pub const STUB_MODEL_ID: &str = "stub-deterministic";

const PREFERRED_MARKERS: &[&str] = &[
    "nice to have", "nice-to-have", "preferred", "bonus", "a plus", "desirable",
];

const SENIORITY_CUES: &[&str] = &[
    "senior", "staff", "principal", "lead", "mentor", "manage", "architect", "ownership",
];

const DOMAIN_TERMS: &[&str] = &[
    "fintech", "payments", "banking", "insurance", "healthcare", "e-commerce",
    "ecommerce", "saas", "gaming", "edtech", "logistics", "adtech", "cybersecurity",
];

const TONE_TERMS: &[&str] = &[
    "fast-paced", "collaborative", "startup", "mission-driven", "customer-obsessed",
    "remote-first", "self-starter",
];

const FORMAT_TERMS: &[&str] = &["cover letter", "portfolio", "one page", "one-page", "pdf"];

const RISK_TERMS: &[(&str, &str)] = &[
    ("clearance", "Security clearance required"),
    ("travel", "Travel expected"),
    ("on-call", "On-call rotation"),
    ("on call", "On-call rotation"),
    ("work authorization", "Work authorization required"),
    ("sponsorship", "Visa sponsorship constraints"),
    ("relocation", "Relocation expected"),
];

const SYNONYMS: &[(&str, &str)] = &[
    ("go", "Golang"),
    ("postgres", "PostgreSQL"),
    ("postgresql", "Postgres"),
    ("kubernetes", "K8s"),
    ("javascript", "JS"),
    ("typescript", "TS"),
    ("aws", "Amazon Web Services"),
    ("gcp", "Google Cloud"),
    ("terraform", "Infrastructure as Code"),
    ("ci/cd", "Continuous Delivery"),
    ("react", "React.js"),
    ("node.js", "Node"),
    ("machine learning", "ML"),
    ("soc2", "SOC 2"),
];

const ACTION_VERBS: &[&str] = &[
    "Led", "Built", "Shipped", "Reduced", "Accelerated", "Automated", "Designed",
    "Improved", "Deployed", "Secured", "Developed", "Implemented", "Engineered",
    "Drove", "Optimized", "Architected", "Delivered", "Launched", "Migrated", "Scaled",
];

pub struct StubLanguageModel {
    skill_matcher: SkillMatcher,
    segment_splitter: Regex,
    weak_opening: Regex,
}

impl StubLanguageModel {
    pub fn new() -> Result<Self> {
        Ok(Self {
            skill_matcher: SkillMatcher::new()?,
            segment_splitter: Regex::new(r"[.;!?](?:\s+|$)|\n").expect("Invalid segment regex"),
            weak_opening: Regex::new(
                r"(?i)^(?:developed|implemented|created|made|worked on|helped(?: to)?|responsible for|assisted(?: with)?|participated in)\s+",
            )
            .expect("Invalid opening regex"),
        })
    }

    fn respond(&self, messages: &[Message]) -> String {
        let prompt = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        if prompt.contains(JD_ANALYZER_MARKER) {
            self.analyze_posting(prompt)
        } else if prompt.contains(BULLET_REWRITE_MARKER) {
            self.rewrite_bullet(prompt)
        } else if prompt.len() < 50 {
            "Please provide more detailed information for better analysis.".to_string()
        } else {
            format!(
                "Analysis complete. Based on the provided content ({} characters), recommendations have been generated to optimize for ATS compatibility and job match alignment.",
                prompt.len()
            )
        }
    }

    fn analyze_posting(&self, prompt: &str) -> String {
        let posting = section(prompt, "Raw JD:\n", "\nResume skills:");
        let resume_skills: Vec<String> = section(prompt, "Resume skills:", "\n")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let mut required: Vec<String> = Vec::new();
        let mut preferred: Vec<String> = Vec::new();
        let mut seen = HashSet::new();

        for segment in self.segment_splitter.split(posting) {
            let lower = segment.to_lowercase();
            let is_preferred = PREFERRED_MARKERS.iter().any(|m| lower.contains(m));
            for found in self.skill_matcher.find_skills(segment) {
                if !seen.insert(found.skill.to_lowercase()) {
                    continue;
                }
                if is_preferred {
                    preferred.push(found.skill);
                } else {
                    required.push(found.skill);
                }
            }
        }

        let mut analysis = Analysis {
            missing_skills: crate::llm::analyzer::missing_skills(&required, &resume_skills),
            suggested_keywords: required
                .iter()
                .filter_map(|skill| {
                    let key = skill.to_lowercase();
                    SYNONYMS
                        .iter()
                        .find(|(name, _)| *name == key)
                        .map(|(_, synonym)| synonym.to_string())
                })
                .collect(),
            required_skills: required,
            preferred_skills: preferred,
            ..Default::default()
        };

        self.collect_signals(posting, &mut analysis);

        json!(analysis).to_string()
    }

    fn collect_signals(&self, posting: &str, analysis: &mut Analysis) {
        let segments: Vec<&str> = self
            .segment_splitter
            .split(posting)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        let evidence_for = |term: &str| -> String {
            segments
                .iter()
                .find(|s| s.to_lowercase().contains(term))
                .map(|s| s.to_string())
                .unwrap_or_default()
        };
        let lower = posting.to_lowercase();

        for &cue in SENIORITY_CUES {
            if contains_word_prefix(&lower, cue) {
                analysis.seniority_cues.push(cue.to_string());
                analysis.hidden_signals.push(HiddenSignal {
                    kind: SignalKind::Seniority,
                    signal: cue.to_string(),
                    evidence: evidence_for(cue),
                });
            }
        }

        for (terms, kind) in [
            (DOMAIN_TERMS, SignalKind::Domain),
            (TONE_TERMS, SignalKind::Tone),
            (FORMAT_TERMS, SignalKind::Format),
        ] {
            for &term in terms {
                if contains_word_prefix(&lower, term) {
                    analysis.hidden_signals.push(HiddenSignal {
                        kind,
                        signal: term.to_string(),
                        evidence: evidence_for(term),
                    });
                }
            }
        }

        for skill in &analysis.required_skills {
            let mentions = self.skill_matcher.count_mentions(posting, skill);
            if mentions >= 2 {
                analysis.hidden_signals.push(HiddenSignal {
                    kind: SignalKind::AtsTag,
                    signal: skill.clone(),
                    evidence: format!("mentioned {} times", mentions),
                });
            }
        }

        for (term, risk) in RISK_TERMS {
            if lower.contains(term) && !analysis.risks.iter().any(|r| r == risk) {
                analysis.risks.push(risk.to_string());
            }
        }
    }

    fn rewrite_bullet(&self, prompt: &str) -> String {
        let original = section(prompt, "Input bullet: \"", "\"\n").trim();
        let stripped = self.weak_opening.replace(original, "");
        let starts_with_verb = ACTION_VERBS
            .iter()
            .any(|v| stripped.split_whitespace().next() == Some(*v));

        let rewritten = if starts_with_verb {
            stripped.to_string()
        } else {
            let verb = ACTION_VERBS[byte_sum(original) % ACTION_VERBS.len()];
            format!("{} {}", verb, lowercase_first(&stripped))
        };
        let rewritten = rewritten
            .split_whitespace()
            .take(30)
            .collect::<Vec<_>>()
            .join(" ");

        let skills_used: Vec<String> = self
            .skill_matcher
            .find_skills(original)
            .into_iter()
            .map(|m| m.skill)
            .collect();

        json!({ "rewritten": rewritten, "skills_used": skills_used }).to_string()
    }
}

#[async_trait]
impl LanguageModel for StubLanguageModel {
    fn id(&self) -> &str {
        STUB_MODEL_ID
    }

    async fn complete(
        &self,
        messages: &[Message],
        _config: Option<&CompletionConfig>,
    ) -> Result<Completion> {
        Ok(Completion::new(self.respond(messages)))
    }
}

/// Text between `start` and the next `end` (or the end of the prompt)
fn section<'a>(prompt: &'a str, start: &str, end: &str) -> &'a str {
    let Some(begin) = prompt.find(start).map(|i| i + start.len()) else {
        return "";
    };
    let rest = &prompt[begin..];
    rest.find(end).map_or(rest, |i| &rest[..i])
}

/// Whether `term` starts a word in `text` ("mentor" matches "mentoring")
fn contains_word_prefix(text: &str, term: &str) -> bool {
    text.match_indices(term).any(|(i, _)| {
        text[..i]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric())
    })
}

fn byte_sum(text: &str) -> usize {
    text.bytes().map(usize::from).sum()
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        // keep acronyms like "API" intact
        Some(first) if chars.clone().next().map_or(true, |c| c.is_lowercase()) => {
            first.to_lowercase().chain(chars).collect()
        }
        Some(first) => std::iter::once(first).chain(chars).collect(),
        None => String::new(),
    }
}
