//! Weighted 0-100 fit score between a tailored resume and the analysis

use crate::processing::document::{Analysis, MatchScore, SignalKind, TailoredResume};
use std::collections::HashSet;

const REQUIRED_WEIGHT: f64 = 0.40;
const PREFERRED_WEIGHT: f64 = 0.20;
const DOMAIN_WEIGHT: f64 = 0.18;
const SENIORITY_WEIGHT: f64 = 0.17;
const COMPREHENSIVE_BONUS: f64 = 0.05;

/// Score a tailored resume. Pure: equal inputs give equal scores and
/// identical rationale.
///
/// Only ranked skills the candidate holds count toward coverage, so keywords
/// injected into the skill list do not cover their own gaps.
pub fn score_match(tailored: &TailoredResume, analysis: &Analysis) -> MatchScore {
    let held = held_skills(tailored);
    let matches = |skills: &[String]| -> Vec<String> {
        skills
            .iter()
            .filter(|s| held.contains(&s.to_lowercase()))
            .cloned()
            .collect()
    };

    let required_matches = matches(analysis.required_skills.as_slice());
    let preferred_matches = matches(analysis.preferred_skills.as_slice());
    let required_coverage = coverage(required_matches.len(), analysis.required_skills.len());
    let preferred_coverage = coverage(preferred_matches.len(), analysis.preferred_skills.len());

    let keyword_coverage = (0.7 * required_coverage + 0.3 * preferred_coverage).clamp(0.0, 1.0);

    let seniority_alignment = match analysis.seniority_cues.len() {
        n if n >= 3 => 1.0,
        2 => 0.85,
        1 => 0.75,
        _ => 0.7,
    };

    let domain_signals = analysis.signals_of(SignalKind::Domain).count();
    let mut domain_alignment = 0.6;
    if domain_signals >= 2 {
        domain_alignment += 0.2;
    } else if domain_signals >= 1 {
        domain_alignment += 0.1;
    }
    if analysis.signals_of(SignalKind::AtsTag).next().is_some() {
        domain_alignment += 0.05;
    }
    if analysis.signals_of(SignalKind::Tone).next().is_some() {
        domain_alignment += 0.05;
    }
    let domain_alignment: f64 = f64::clamp(domain_alignment, 0.0, 1.0);

    let bonus = if required_coverage >= 0.8 && preferred_coverage >= 0.5 {
        COMPREHENSIVE_BONUS
    } else {
        0.0
    };

    let stuffing_penalty: u8 = match tailored.ats_keywords_added.len() {
        n if n > 15 => 15,
        n if n > 10 => 8,
        n if n > 7 => 3,
        _ => 0,
    };

    let raw = 100.0
        * (REQUIRED_WEIGHT * required_coverage
            + PREFERRED_WEIGHT * preferred_coverage
            + DOMAIN_WEIGHT * domain_alignment
            + SENIORITY_WEIGHT * seniority_alignment
            + bonus)
        - f64::from(stuffing_penalty);
    let score = raw.clamp(0.0, 100.0).round() as u8;

    let mut rationale = vec![
        format!(
            "✓ Required skills: {} ({}/{})",
            percent(required_coverage),
            required_matches.len(),
            analysis.required_skills.len()
        ),
        format!(
            "✓ Preferred skills: {} ({}/{})",
            percent(preferred_coverage),
            preferred_matches.len(),
            analysis.preferred_skills.len()
        ),
        format!(
            "✓ Domain alignment: {} ({} signals)",
            percent(domain_alignment),
            domain_signals
        ),
        format!(
            "✓ Seniority match: {} ({})",
            percent(seniority_alignment),
            if analysis.seniority_cues.is_empty() {
                "entry-level".to_string()
            } else {
                analysis.seniority_cues.join(", ")
            }
        ),
    ];
    if bonus > 0.0 {
        rationale.push(format!("✓ Comprehensive match bonus: +{}", percent(bonus)));
    }
    rationale.push(if stuffing_penalty > 0 {
        format!("⚠ Keyword stuffing penalty: -{}", stuffing_penalty)
    } else {
        "✓ Natural keyword integration".to_string()
    });

    let strengths = required_matches
        .iter()
        .take(5)
        .map(|s| format!("Strong: {}", s))
        .chain(preferred_matches.iter().take(3).map(|s| format!("Nice-to-have: {}", s)))
        .collect();

    MatchScore {
        score,
        rationale,
        strengths,
        gaps: analysis.missing_skills.clone(),
        keyword_coverage,
        seniority_alignment,
        domain_alignment,
    }
}

/// Lowercased names of the ranked skills the candidate holds
pub fn held_skills(tailored: &TailoredResume) -> HashSet<String> {
    tailored
        .skills_ranked
        .iter()
        .filter(|r| r.user_has && !r.missing)
        .map(|r| r.skill.to_lowercase())
        .collect()
}

fn coverage(matched: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        matched as f64 / total as f64
    }
}

/// Whole percent, halves rounded up
fn percent(ratio: f64) -> String {
    format!("{}%", (ratio * 100.0).round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::document::{HiddenSignal, RankedSkill, SkillSource, ToneStyle};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn tailored(skills: &[(&str, bool)], keywords_added: usize) -> TailoredResume {
        TailoredResume {
            summary: "s".to_string(),
            skills_ranked: skills
                .iter()
                .map(|(name, missing)| RankedSkill {
                    skill: name.to_string(),
                    source: SkillSource::Other,
                    user_has: !missing,
                    missing: *missing,
                    evidence: None,
                })
                .collect(),
            bullets: vec![],
            ats_keywords_added: (0..keywords_added).map(|i| format!("kw{}", i)).collect(),
            style: ToneStyle::Concise,
            warnings: vec![],
        }
    }

    fn analysis() -> Analysis {
        Analysis {
            required_skills: strings(&["Go", "Postgres"]),
            preferred_skills: strings(&["Kubernetes"]),
            ..Default::default()
        }
    }

    #[test]
    fn test_all_matched_scores_88() {
        let resume = tailored(&[("Go", false), ("Postgres", false), ("Kubernetes", false)], 0);
        let score = score_match(&resume, &analysis());

        assert_eq!(score.score, 88);
        assert!((score.keyword_coverage - 1.0).abs() < 1e-9);
        assert_eq!(score.domain_alignment, 0.6);
        assert_eq!(score.seniority_alignment, 0.7);
        assert_eq!(
            score.rationale,
            vec![
                "✓ Required skills: 100% (2/2)",
                "✓ Preferred skills: 100% (1/1)",
                "✓ Domain alignment: 60% (0 signals)",
                "✓ Seniority match: 70% (entry-level)",
                "✓ Comprehensive match bonus: +5%",
                "✓ Natural keyword integration",
            ]
        );
        assert_eq!(score.strengths, vec!["Strong: Go", "Strong: Postgres", "Nice-to-have: Kubernetes"]);
        assert!(score.gaps.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let resume = tailored(&[("Go", false), ("postgres", false)], 9);
        let first = score_match(&resume, &analysis());
        let second = score_match(&resume, &analysis());
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_flag_excludes_skill() {
        let mut a = analysis();
        a.missing_skills = strings(&["Postgres"]);
        let resume = tailored(&[("Go", false), ("Postgres", true), ("Kubernetes", false)], 0);
        let score = score_match(&resume, &a);

        // req 0.5, no bonus: 100 * (0.2 + 0.2 + 0.108 + 0.119) = 62.7
        assert_eq!(score.score, 63);
        assert_eq!(score.gaps, vec!["Postgres"]);
        assert_eq!(score.rationale[0], "✓ Required skills: 50% (1/2)");
        assert_eq!(score.rationale.len(), 5);
    }

    #[test]
    fn test_unheld_preferred_keywords_do_not_count() {
        let mut resume = tailored(&[("Go", false), ("Postgres", false)], 2);
        for keyword in ["Kubernetes", "Kafka"] {
            resume.skills_ranked.push(RankedSkill {
                skill: keyword.to_string(),
                source: SkillSource::Other,
                user_has: false,
                missing: false,
                evidence: None,
            });
        }
        let mut a = analysis();
        a.preferred_skills = strings(&["Kubernetes", "Kafka"]);

        let score = score_match(&resume, &a);
        assert_eq!(score.rationale[1], "✓ Preferred skills: 0% (0/2)");
        assert_eq!(score.strengths, vec!["Strong: Go", "Strong: Postgres"]);
        // req 1.0, pref 0.0, no bonus: 100 * (0.4 + 0.108 + 0.119) = 62.7
        assert_eq!(score.score, 63);
    }

    #[test]
    fn test_rationale_rounds_halves_up() {
        let required = ["Go", "Rust", "Java", "Python", "Scala", "Ruby", "Swift", "Kotlin"];
        let a = Analysis {
            required_skills: strings(&required),
            ..Default::default()
        };
        let score = score_match(&tailored(&[("Go", false)], 0), &a);
        assert_eq!(score.rationale[0], "✓ Required skills: 13% (1/8)");

        assert_eq!(percent(0.125), "13%");
        assert_eq!(percent(0.375), "38%");
        assert_eq!(percent(0.0), "0%");
    }

    #[test]
    fn test_stuffing_penalties() {
        let skills = [("Go", false), ("Postgres", false), ("Kubernetes", false)];
        let expect = [(7, 88), (8, 85), (11, 80), (16, 73)];
        for (added, expected) in expect {
            let score = score_match(&tailored(&skills, added), &analysis());
            assert_eq!(score.score, expected, "{} keywords added", added);
        }
        let penalized = score_match(&tailored(&skills, 16), &analysis());
        assert_eq!(penalized.rationale.last().unwrap(), "⚠ Keyword stuffing penalty: -15");
    }

    #[test]
    fn test_signals_and_cues() {
        let mut a = analysis();
        a.seniority_cues = strings(&["senior", "lead", "mentor"]);
        a.hidden_signals = vec![
            HiddenSignal { kind: SignalKind::Domain, signal: "fintech".into(), evidence: String::new() },
            HiddenSignal { kind: SignalKind::Domain, signal: "payments".into(), evidence: String::new() },
            HiddenSignal { kind: SignalKind::AtsTag, signal: "Go".into(), evidence: String::new() },
            HiddenSignal { kind: SignalKind::Tone, signal: "remote".into(), evidence: String::new() },
        ];
        let resume = tailored(&[("Go", false), ("Postgres", false), ("Kubernetes", false)], 0);
        let score = score_match(&resume, &a);

        assert_eq!(score.seniority_alignment, 1.0);
        assert!((score.domain_alignment - 0.9).abs() < 1e-9);
        // 100 * (0.4 + 0.2 + 0.162 + 0.17 + 0.05) = 98.2
        assert_eq!(score.score, 98);
        assert_eq!(score.rationale[2], "✓ Domain alignment: 90% (2 signals)");
        assert_eq!(score.rationale[3], "✓ Seniority match: 100% (senior, lead, mentor)");
    }

    #[test]
    fn test_empty_lists_count_as_covered() {
        let score = score_match(&tailored(&[], 0), &Analysis::default());
        assert!((score.keyword_coverage - 1.0).abs() < 1e-9);
        assert_eq!(score.score, 88);
    }
}
