//! Learning plan for the required skills the candidate lacks

use crate::processing::document::{Analysis, Bullet, GapItem, GapReport, MicroProject};

const MAX_MICRO_PROJECTS: usize = 3;

const DELIVERABLES: &[&str] = &["Git repo link", "Short blog/README", "Demo screenshot or CLI output"];

pub fn gap_analyze(analysis: &Analysis) -> GapReport {
    let missing = &analysis.missing_skills;

    GapReport {
        missing_experience: missing.iter().map(|skill| gap_item(skill)).collect(),
        micro_projects: missing
            .iter()
            .take(MAX_MICRO_PROJECTS)
            .map(|skill| micro_project(skill))
            .collect(),
        filler_bullets: missing.iter().map(|skill| filler_bullet(skill)).collect(),
    }
}

fn gap_item(skill: &str) -> GapItem {
    GapItem {
        area: skill.to_string(),
        example_tasks: vec![
            format!("Ship a feature using {}", skill),
            format!("Pair with a peer to review {} usage", skill),
        ],
        proof_ideas: vec![
            format!("Open-source snippet using {}", skill),
            format!("Write retrospective on learning {}", skill),
        ],
    }
}

fn micro_project(skill: &str) -> MicroProject {
    MicroProject {
        title: format!("Build a {} mini-project", skill),
        goal: format!("Demonstrate proficiency with {}", skill),
        steps: vec![
            format!("Design a small scope where {} is central", skill),
            "Implement with clear README and tests".to_string(),
            "Add metrics (latency, accuracy, cost)".to_string(),
            "Publish code and short writeup".to_string(),
        ],
        deliverables: DELIVERABLES.iter().map(|d| d.to_string()).collect(),
    }
}

fn filler_bullet(skill: &str) -> Bullet {
    Bullet {
        rewritten: Some(format!(
            "Prototyped a small {} demo to validate feasibility and documented learnings.",
            skill
        )),
        skills: Some(vec![skill.to_string()]),
        ..Bullet::new("")
    }
}
