//! Baseline resume draft built straight from the candidate profile

use crate::processing::document::{Profile, ResumeDraft};

const MAX_SUMMARY_SKILLS: usize = 5;

/// Build the untailored draft: summary (synthesized when absent), flattened
/// skill names, and the profile's experiences, projects and education.
pub fn build_draft(profile: &Profile) -> ResumeDraft {
    let summary = profile
        .summary
        .clone()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| synthesize_summary(profile));

    let skills: Vec<String> = profile.skills.iter().map(|s| s.name.clone()).collect();
    ResumeDraft {
        summary,
        candidate_skills: skills.clone(),
        skills,
        experiences: profile.work_history.clone(),
        projects: profile.projects.clone(),
        education: profile.education.clone(),
        extras: Vec::new(),
        warnings: Vec::new(),
    }
}

fn synthesize_summary(profile: &Profile) -> String {
    let headline = profile
        .preferences
        .as_ref()
        .and_then(|prefs| prefs.first())
        .and_then(|p| p.role.clone())
        .or_else(|| profile.work_history.first().map(|exp| exp.title.clone()))
        .unwrap_or_else(|| "Professional".to_string());

    let years: f64 = profile
        .skills
        .iter()
        .filter_map(|s| s.years)
        .filter(|y| *y > 0.0)
        .sum();
    let years_text = if years > 0.0 {
        format!("{}+ years", years)
    } else {
        "multi-year".to_string()
    };

    let top_skills = profile
        .skills
        .iter()
        .take(MAX_SUMMARY_SKILLS)
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{} with {} across {}. Focused on shipping reliable outcomes with measurable impact.",
        headline, years_text, top_skills
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::document::{Experience, Preference, Skill};

    fn profile() -> Profile {
        Profile {
            id: "u1".to_string(),
            name: "Pat".to_string(),
            work_history: vec![Experience {
                company: "Acme".to_string(),
                title: "Backend Engineer".to_string(),
                start: "2021".to_string(),
                ..Default::default()
            }],
            skills: vec![
                Skill::new("Go").with_years(4.0),
                Skill::new("Kubernetes").with_years(2.5),
                Skill::new("Postgres"),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_summary_synthesis() {
        let draft = build_draft(&profile());
        assert_eq!(
            draft.summary,
            "Backend Engineer with 6.5+ years across Go, Kubernetes, Postgres. \
             Focused on shipping reliable outcomes with measurable impact."
        );
        assert_eq!(draft.skills, vec!["Go", "Kubernetes", "Postgres"]);
        assert_eq!(draft.candidate_skills, draft.skills);
        assert!(draft.extras.is_empty() && draft.warnings.is_empty());
    }

    #[test]
    fn test_summary_mentions_a_profile_skill() {
        let mut p = profile();
        p.skills = vec![Skill::new("Rust")];
        let draft = build_draft(&p);
        assert!(!draft.summary.is_empty());
        assert!(draft.summary.contains("Rust"));
        assert!(draft.summary.contains("multi-year"));
    }

    #[test]
    fn test_headline_precedence() {
        let mut p = profile();
        p.preferences = Some(vec![Preference {
            role: Some("Staff Engineer".to_string()),
            ..Default::default()
        }]);
        assert!(build_draft(&p).summary.starts_with("Staff Engineer with"));

        p.preferences = None;
        p.work_history.clear();
        assert!(build_draft(&p).summary.starts_with("Professional with"));
    }

    #[test]
    fn test_explicit_summary_kept() {
        let mut p = profile();
        p.summary = Some("Builder of reliable systems.".to_string());
        assert_eq!(build_draft(&p).summary, "Builder of reliable systems.");
    }

    #[test]
    fn test_only_first_five_skills() {
        let mut p = profile();
        p.skills = ["A1", "B2", "C3", "D4", "E5", "F6"].iter().map(|s| Skill::new(*s)).collect();
        let summary = build_draft(&p).summary;
        assert!(summary.contains("E5"));
        assert!(!summary.contains("F6"));
    }
}
