//! Final tailoring pass: skill ranking, action verbs, second keyword pass

use crate::processing::ats_matcher::closest_match;
use crate::processing::ats_optimizer::inject_keywords;
use crate::processing::document::{
    Analysis, Bullet, RankedSkill, ResumeDraft, SkillSource, TailoredResume, ToneStyle,
};
use log::debug;
use std::collections::HashSet;

/// Cap for the required-only keyword pass run here
pub const MAX_TAILORING_KEYWORDS: usize = 6;

pub const ACTION_VERBS: &[&str] = &[
    "Led", "Built", "Shipped", "Reduced", "Accelerated", "Automated", "Designed", "Improved",
    "Deployed", "Secured",
];

const EVIDENCE_SIMILARITY: f64 = 0.9;

/// Prepend "Led " unless the bullet already opens with one of `ACTION_VERBS`
pub fn enhance_action_verbs(text: &str) -> String {
    if ACTION_VERBS.iter().any(|verb| text.starts_with(verb)) {
        text.to_string()
    } else {
        format!("{} {}", ACTION_VERBS[0], text)
    }
}

pub fn tailor_resume(draft: &ResumeDraft, analysis: &Analysis, style: ToneStyle) -> TailoredResume {
    let skills_ranked = rank_skills(draft, analysis);

    let mut ats_keywords_added = Vec::new();
    let bullets: Vec<Bullet> = draft
        .bullets()
        .map(|bullet| {
            let verb_led = enhance_action_verbs(bullet.text());
            let rewritten = inject_keywords(
                &verb_led,
                &analysis.required_skills,
                &mut ats_keywords_added,
                MAX_TAILORING_KEYWORDS,
            );
            Bullet {
                rewritten: Some(rewritten),
                style: Some(style),
                ..bullet.clone()
            }
        })
        .collect();

    let warnings = draft
        .warnings
        .iter()
        .cloned()
        .chain(
            analysis
                .missing_skills
                .iter()
                .map(|skill| format!("Missing required skill: {}", skill)),
        )
        .collect();

    let cues = if analysis.seniority_cues.is_empty() {
        "role".to_string()
    } else {
        analysis.seniority_cues.join(", ")
    };
    let summary = format!(
        "{} | Tailored for {} with focus on {}",
        draft.summary,
        cues,
        analysis.required_skills.join(", ")
    );

    debug!(
        "Tailoring ranked {} skills, added {} keywords",
        skills_ranked.len(),
        ats_keywords_added.len()
    );

    TailoredResume {
        summary,
        skills_ranked,
        bullets,
        ats_keywords_added,
        style,
        warnings,
    }
}

/// One entry per draft skill: held required skills, other held skills, then
/// keywords the candidate does not hold.
///
/// Only skills from the profile count as held. Job keywords merged into the
/// skill list by the optimizer stay `user_has = false`.
fn rank_skills(draft: &ResumeDraft, analysis: &Analysis) -> Vec<RankedSkill> {
    let held = lowercase_set(&draft.candidate_skills);
    let missing = lowercase_set(&analysis.missing_skills);
    let required = lowercase_set(&analysis.required_skills);

    let bullet_skills: HashSet<String> = draft
        .bullets()
        .flat_map(|b| b.skills.iter().flatten())
        .map(|s| s.to_lowercase())
        .collect();
    let project_tech: HashSet<String> = draft
        .projects
        .iter()
        .flatten()
        .flat_map(|p| p.tech.iter().flatten())
        .map(|s| s.to_lowercase())
        .collect();

    let mut ranked: Vec<RankedSkill> = draft
        .skills
        .iter()
        .map(|skill| {
            let key = skill.to_lowercase();
            let is_missing = missing.contains(&key);
            let source = if bullet_skills.contains(&key) {
                SkillSource::WorkHistory
            } else if project_tech.contains(&key) {
                SkillSource::Project
            } else {
                SkillSource::Other
            };
            let evidence = if required.contains(&key) {
                None
            } else {
                closest_match(skill, &analysis.required_skills, EVIDENCE_SIMILARITY)
                    .map(|close| format!("Close to required skill: {}", close))
            };

            RankedSkill {
                skill: skill.clone(),
                source,
                user_has: held.contains(&key) && !is_missing,
                missing: is_missing,
                evidence,
            }
        })
        .collect();

    ranked.sort_by_key(|r| match (r.user_has, required.contains(&r.skill.to_lowercase())) {
        (true, true) => 0,
        (true, false) => 1,
        (false, _) => 2,
    });
    ranked
}

fn lowercase_set(items: &[String]) -> HashSet<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::document::{Experience, Project};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn draft() -> ResumeDraft {
        ResumeDraft {
            summary: "Backend Engineer".to_string(),
            skills: strings(&["Leadership", "Go", "Terraform", "Postgres", "Docker"]),
            candidate_skills: strings(&["Leadership", "Go", "Postgres", "Docker"]),
            experiences: vec![Experience {
                company: "Acme".to_string(),
                title: "Engineer".to_string(),
                start: "2020".to_string(),
                bullets: vec![
                    Bullet {
                        skills: Some(strings(&["Go"])),
                        ..Bullet::new("Built payment APIs in Go")
                    },
                    Bullet::new("Mentored two engineers"),
                ],
                ..Default::default()
            }],
            projects: Some(vec![Project {
                name: "infra".to_string(),
                tech: Some(strings(&["Docker"])),
                ..Default::default()
            }]),
            warnings: strings(&["Profile has no certifications"]),
            ..Default::default()
        }
    }

    fn analysis() -> Analysis {
        Analysis {
            required_skills: strings(&["Go", "PostgreSQL", "Terraform"]),
            missing_skills: strings(&["Terraform"]),
            seniority_cues: strings(&["senior"]),
            ..Default::default()
        }
    }

    #[test]
    fn test_action_verbs() {
        assert_eq!(enhance_action_verbs("Shipped v2"), "Shipped v2");
        assert_eq!(enhance_action_verbs("Mentored juniors"), "Led Mentored juniors");
        assert_eq!(enhance_action_verbs("Drove adoption"), "Led Drove adoption");
    }

    #[test]
    fn test_ranking_order_and_flags() {
        let tailored = tailor_resume(&draft(), &analysis(), ToneStyle::Concise);
        let order: Vec<&str> = tailored.skills_ranked.iter().map(|r| r.skill.as_str()).collect();
        assert_eq!(order, vec!["Go", "Leadership", "Postgres", "Docker", "Terraform"]);

        let terraform = &tailored.skills_ranked[4];
        assert!(terraform.missing && !terraform.user_has);

        let go = &tailored.skills_ranked[0];
        assert_eq!(go.source, SkillSource::WorkHistory);
        assert_eq!(tailored.skills_ranked[3].source, SkillSource::Project);
        assert_eq!(tailored.skills_ranked[1].source, SkillSource::Other);
        assert_eq!(
            tailored.skills_ranked[2].evidence.as_deref(),
            Some("Close to required skill: PostgreSQL")
        );
        assert!(go.evidence.is_none());
    }

    #[test]
    fn test_merged_preferred_keywords_are_not_held() {
        let mut source = draft();
        source.skills.extend(strings(&["Redis", "Kafka"]));
        let mut a = analysis();
        a.preferred_skills = strings(&["Redis", "Kafka"]);

        let tailored = tailor_resume(&source, &a, ToneStyle::Concise);
        let redis = tailored.skills_ranked.iter().find(|r| r.skill == "Redis").unwrap();
        assert!(!redis.user_has && !redis.missing);

        let order: Vec<&str> = tailored.skills_ranked.iter().map(|r| r.skill.as_str()).collect();
        assert_eq!(order, vec!["Go", "Leadership", "Postgres", "Docker", "Terraform", "Redis", "Kafka"]);
    }

    #[test]
    fn test_bullets_warnings_summary() {
        let tailored = tailor_resume(&draft(), &analysis(), ToneStyle::Executive);
        assert_eq!(
            tailored.bullets[0].text(),
            "Built payment APIs in Go (PostgreSQL) (Terraform)"
        );
        assert_eq!(
            tailored.bullets[1].text(),
            "Led Mentored two engineers (Go) (PostgreSQL) (Terraform)"
        );
        assert_eq!(tailored.ats_keywords_added.len(), 5);
        assert!(tailored.bullets.iter().all(|b| b.style == Some(ToneStyle::Executive)));

        assert_eq!(
            tailored.warnings,
            vec!["Profile has no certifications", "Missing required skill: Terraform"]
        );
        assert_eq!(
            tailored.summary,
            "Backend Engineer | Tailored for senior with focus on Go, PostgreSQL, Terraform"
        );
    }

    #[test]
    fn test_cap_of_six() {
        let mut source = draft();
        source.experiences[0].bullets = (0..4).map(|i| Bullet::new(format!("Shipped item {}", i))).collect();
        let analysis = Analysis {
            required_skills: strings(&["Alpha", "Bravo", "Charlie", "Delta"]),
            ..Default::default()
        };

        let tailored = tailor_resume(&source, &analysis, ToneStyle::Concise);
        assert_eq!(tailored.ats_keywords_added.len(), MAX_TAILORING_KEYWORDS);
        let total: usize = tailored.bullets.iter().map(|b| b.text().matches(" (").count()).sum();
        assert_eq!(total, MAX_TAILORING_KEYWORDS);
    }

    #[test]
    fn test_summary_without_cues() {
        let mut a = analysis();
        a.seniority_cues.clear();
        let tailored = tailor_resume(&draft(), &a, ToneStyle::Concise);
        assert!(tailored.summary.contains("Tailored for role with focus on"));
    }
}
