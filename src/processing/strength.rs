//! Heuristic strength scoring for individual resume bullets

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

const ACTION_VERBS: &[&str] = &[
    "achieved", "accelerated", "accomplished", "administered", "analyzed", "architected",
    "automated", "built", "championed", "collaborated", "created", "delivered", "designed",
    "developed", "drove", "engineered", "enhanced", "established", "executed", "expanded",
    "generated", "grew", "implemented", "improved", "increased", "initiated", "launched", "led",
    "managed", "optimized", "orchestrated", "pioneered", "reduced", "resolved", "scaled",
    "spearheaded", "streamlined", "strengthened", "transformed", "unified",
];

const WEAK_VERBS: &[&str] = &[
    "helped", "worked", "did", "made", "was", "were", "responsible", "duties", "assisted",
    "contributed", "participated", "involved", "handled",
];

const ENHANCEMENT_VERBS: &[&str] = &["Developed", "Implemented", "Led", "Built", "Improved"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthRating {
    Weak,
    Fair,
    Good,
    Strong,
    Excellent,
}

impl StrengthRating {
    fn from_score(score: u8) -> Self {
        if score >= 85 {
            StrengthRating::Excellent
        } else if score >= 70 {
            StrengthRating::Strong
        } else if score >= 55 {
            StrengthRating::Good
        } else if score >= 35 {
            StrengthRating::Fair
        } else {
            StrengthRating::Weak
        }
    }
}

impl fmt::Display for StrengthRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StrengthRating::Weak => "weak",
            StrengthRating::Fair => "fair",
            StrengthRating::Good => "good",
            StrengthRating::Strong => "strong",
            StrengthRating::Excellent => "excellent",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthScore {
    /// 0-100
    pub overall: u8,
    pub has_action_verb: bool,
    pub has_metrics: bool,
    pub has_impact: bool,
    pub has_context: bool,
    pub word_count: usize,
    pub is_optimal_length: bool,
    pub suggestions: Vec<String>,
    pub rating: StrengthRating,
}

/// Aggregate over a set of bullets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallStrength {
    pub average_score: u8,
    pub total_bullets: usize,
    pub strong_bullets: usize,
    pub weak_bullets: usize,
    pub improvement_potential: u8,
}

struct Patterns {
    metrics: Regex,
    impact: Regex,
    tech: Regex,
    method: Regex,
    outcome: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        metrics: Regex::new(r"(?i)\d+%|\$\d+|\d+x|\d+\+|by \d+|over \d+|under \d+")
            .expect("Invalid metrics regex"),
        impact: Regex::new(
            r"(?i)improve|increase|reduce|save|enhance|optimize|boost|accelerate|streamline|scale",
        )
        .expect("Invalid impact regex"),
        tech: Regex::new(
            r"(?i)React|Node|Python|Java|AWS|Azure|API|database|machine learning|AI|cloud",
        )
        .expect("Invalid tech regex"),
        method: Regex::new(r"(?i)agile|scrum|CI/CD|TDD|microservices|REST|GraphQL")
            .expect("Invalid method regex"),
        outcome: Regex::new(
            r"(?i)revenue|cost|efficiency|performance|customer|user|engagement|conversion",
        )
        .expect("Invalid outcome regex"),
    })
}

/// First word, lowercased, without surrounding punctuation
fn opening_word(text: &str) -> String {
    text.split_whitespace()
        .next()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .unwrap_or_default()
}

pub fn analyze_bullet_strength(bullet: &str) -> StrengthScore {
    let trimmed = bullet.trim();
    let patterns = patterns();

    let first_word = opening_word(trimmed);
    let word_count = trimmed.unicode_words().count();

    let has_action_verb = ACTION_VERBS.contains(&first_word.as_str());
    let has_weak_verb = WEAK_VERBS.contains(&first_word.as_str());
    let has_metrics = trimmed.chars().any(|c| c.is_ascii_digit()) && patterns.metrics.is_match(trimmed);
    let has_impact = patterns.impact.is_match(trimmed);
    let has_context = patterns.tech.is_match(trimmed)
        || patterns.method.is_match(trimmed)
        || patterns.outcome.is_match(trimmed);
    let is_optimal_length = (15..=25).contains(&word_count);

    let mut suggestions = Vec::new();
    if !has_action_verb {
        if has_weak_verb {
            suggestions.push(format!(
                "Replace weak verb \"{}\" with a strong action verb like: achieved, developed, led",
                first_word
            ));
        } else {
            suggestions.push("Start with a strong action verb (e.g., built, improved, led)".to_string());
        }
    }
    if !has_metrics {
        suggestions.push(
            "Add quantifiable metrics (e.g., \"by 40%\", \"$2M revenue\", \"500+ users\")".to_string(),
        );
    }
    if !has_impact {
        suggestions.push(
            "Emphasize impact with words like improved, increased, reduced, or optimized".to_string(),
        );
    }
    if !has_context {
        suggestions.push("Add technical context or business outcome for clarity".to_string());
    }
    if word_count < 10 {
        suggestions.push("Expand with more detail - aim for 15-25 words".to_string());
    } else if word_count > 30 {
        suggestions.push("Simplify - keep bullets concise (15-25 words)".to_string());
    }

    let mut score: i32 = 0;
    if has_action_verb {
        score += 30;
    }
    if has_metrics {
        score += 30;
    }
    if has_impact {
        score += 20;
    }
    if has_context {
        score += 15;
    }
    if is_optimal_length {
        score += 5;
    }
    if has_weak_verb {
        score -= 15;
    }
    if word_count < 10 {
        score -= 10;
    }
    if word_count > 30 {
        score -= 5;
    }
    let overall = score.clamp(0, 100) as u8;

    StrengthScore {
        overall,
        has_action_verb,
        has_metrics,
        has_impact,
        has_context,
        word_count,
        is_optimal_length,
        suggestions,
        rating: StrengthRating::from_score(overall),
    }
}

pub fn overall_strength<S: AsRef<str>>(bullets: &[S]) -> OverallStrength {
    if bullets.is_empty() {
        return OverallStrength::default();
    }

    let scores: Vec<u8> = bullets
        .iter()
        .map(|b| analyze_bullet_strength(b.as_ref()).overall)
        .collect();
    let average = scores.iter().map(|s| f64::from(*s)).sum::<f64>() / scores.len() as f64;

    OverallStrength {
        average_score: average.round() as u8,
        total_bullets: bullets.len(),
        strong_bullets: scores.iter().filter(|s| **s >= 70).count(),
        weak_bullets: scores.iter().filter(|s| **s < 55).count(),
        improvement_potential: (100.0 - average).round() as u8,
    }
}

/// Mechanical improvement hint: add an opening verb and a metrics placeholder
/// where the analysis found them missing
pub fn enhance_bullet(bullet: &str, strength: &StrengthScore) -> String {
    let mut enhanced = bullet.trim().to_string();

    if !strength.has_action_verb {
        let verb = ENHANCEMENT_VERBS[strength.word_count % ENHANCEMENT_VERBS.len()];
        enhanced = format!("{} {}", verb, enhanced);
    }
    if !strength.has_metrics {
        enhanced = format!("{} (add specific metrics here)", enhanced.trim_end_matches('.'));
    }

    enhanced
}
