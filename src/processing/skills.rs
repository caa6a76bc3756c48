//! Skill categorization and the built-in skill vocabulary

use crate::processing::document::{Skill, SkillCategory};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

const TECHNICAL_SKILLS: &[&str] = &[
    "Algorithm", "Data Structures", "System Design", "API Design", "Database Design",
    "Microservices", "Distributed Systems", "Cloud Architecture", "DevOps", "CI/CD",
    "Testing", "Debugging", "Performance Optimization", "Security", "Scalability",
];

const PROGRAMMING_LANGUAGES: &[&str] = &[
    "JavaScript", "TypeScript", "Python", "Java", "C++", "C#", "Go", "Rust", "Ruby",
    "PHP", "Swift", "Kotlin", "Scala", "R", "MATLAB", "SQL", "HTML", "CSS",
];

const FRAMEWORKS: &[&str] = &[
    "React", "Angular", "Vue", "Svelte", "Next.js", "Nuxt", "Express", "FastAPI",
    "Django", "Flask", "Spring", "Spring Boot", ".NET", "Rails", "Laravel",
    "Tailwind", "Bootstrap", "Material-UI", "Chakra UI",
];

const TOOLS: &[&str] = &[
    "Git", "GitHub", "GitLab", "Bitbucket", "Docker", "Kubernetes", "Jenkins",
    "CircleCI", "Travis CI", "AWS", "Azure", "GCP", "Terraform", "Ansible",
    "Jira", "Confluence", "Slack", "Figma", "Postman", "Webpack", "Vite",
    "VS Code", "IntelliJ", "Eclipse", "Vim", "Emacs",
];

const SOFT_SKILLS: &[&str] = &[
    "Leadership", "Communication", "Teamwork", "Problem Solving", "Critical Thinking",
    "Collaboration", "Mentoring", "Project Management", "Agile", "Scrum",
    "Stakeholder Management", "Presentation", "Documentation", "Time Management",
    "Adaptability", "Creativity", "Decision Making", "Conflict Resolution",
];

/// Data stores, platforms and compliance frameworks that postings ask for
/// but that have no category of their own
const ADDITIONAL_SKILLS: &[&str] = &[
    "Node.js", "Postgres", "PostgreSQL", "MySQL", "MongoDB", "Redis", "Elasticsearch",
    "DynamoDB", "Cassandra", "Kafka", "RabbitMQ", "GraphQL", "gRPC", "REST", "Linux",
    "Nginx", "Spark", "Airflow", "TensorFlow", "PyTorch", "Machine Learning", "SOC2",
    "HIPAA", "PCI DSS", "OpenTelemetry", "Prometheus", "Grafana", "Snowflake",
];

impl SkillCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            SkillCategory::Technical => "Technical Skills",
            SkillCategory::Soft => "Soft Skills",
            SkillCategory::Tools => "Tools & Platforms",
            SkillCategory::Languages => "Programming Languages",
            SkillCategory::Frameworks => "Frameworks & Libraries",
            SkillCategory::Other => "Other Skills",
        }
    }
}

fn in_list(list: &[&str], normalized: &str) -> bool {
    list.iter().any(|s| s.to_lowercase() == normalized)
}

struct SuffixPatterns {
    languages: Regex,
    frameworks: Regex,
    tools: Regex,
    soft: Regex,
}

fn suffix_patterns() -> &'static SuffixPatterns {
    static PATTERNS: OnceLock<SuffixPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| SuffixPatterns {
        languages: Regex::new(r"(?i)(js|script|lang|language)$").expect("Invalid language regex"),
        frameworks: Regex::new(r"(?i)(framework|lib|library)$").expect("Invalid framework regex"),
        tools: Regex::new(r"(?i)(tool|software|platform|service)$").expect("Invalid tool regex"),
        soft: Regex::new(r"(?i)(soft skill|people|team|manage)$").expect("Invalid soft skill regex"),
    })
}

/// Categorize a skill by name: known vocabularies first, then suffix patterns
pub fn categorize_skill(name: &str) -> SkillCategory {
    let normalized = name.trim().to_lowercase();

    if in_list(SOFT_SKILLS, &normalized) {
        return SkillCategory::Soft;
    }
    if in_list(PROGRAMMING_LANGUAGES, &normalized) {
        return SkillCategory::Languages;
    }
    if in_list(FRAMEWORKS, &normalized) {
        return SkillCategory::Frameworks;
    }
    if in_list(TOOLS, &normalized) {
        return SkillCategory::Tools;
    }
    if in_list(TECHNICAL_SKILLS, &normalized) {
        return SkillCategory::Technical;
    }

    let patterns = suffix_patterns();
    if patterns.languages.is_match(name) {
        SkillCategory::Languages
    } else if patterns.frameworks.is_match(name) {
        SkillCategory::Frameworks
    } else if patterns.tools.is_match(name) {
        SkillCategory::Tools
    } else if patterns.soft.is_match(name) {
        SkillCategory::Soft
    } else {
        SkillCategory::Other
    }
}

/// A copy of the skill with its category filled in when the caller left it empty
pub fn with_category(skill: &Skill) -> Skill {
    Skill {
        category: Some(skill.category.unwrap_or_else(|| categorize_skill(&skill.name))),
        ..skill.clone()
    }
}

/// Group skills by category, in category order
pub fn group_skills_by_category(skills: &[Skill]) -> BTreeMap<SkillCategory, Vec<Skill>> {
    let mut grouped: BTreeMap<SkillCategory, Vec<Skill>> = BTreeMap::new();
    for skill in skills.iter().map(with_category) {
        let category = skill.category.unwrap_or(SkillCategory::Other);
        grouped.entry(category).or_default().push(skill);
    }
    grouped
}

/// Group plain skill names, as found on drafts and tailored resumes
pub fn group_names_by_category<'a, I>(names: I) -> BTreeMap<SkillCategory, Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut grouped: BTreeMap<SkillCategory, Vec<String>> = BTreeMap::new();
    for name in names {
        grouped
            .entry(categorize_skill(name))
            .or_default()
            .push(name.to_string());
    }
    grouped
}

/// Every skill name the built-in matcher recognizes, in canonical spelling
pub fn known_skills() -> Vec<&'static str> {
    let mut skills: Vec<&'static str> = TECHNICAL_SKILLS
        .iter()
        .chain(PROGRAMMING_LANGUAGES)
        .chain(FRAMEWORKS)
        .chain(TOOLS)
        .chain(SOFT_SKILLS)
        .chain(ADDITIONAL_SKILLS)
        .copied()
        .collect();
    skills.sort_unstable();
    skills.dedup();
    skills
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vocabularies() {
        assert_eq!(categorize_skill("rust"), SkillCategory::Languages);
        assert_eq!(categorize_skill("Spring Boot"), SkillCategory::Frameworks);
        assert_eq!(categorize_skill(" Kubernetes "), SkillCategory::Tools);
        assert_eq!(categorize_skill("mentoring"), SkillCategory::Soft);
        assert_eq!(categorize_skill("CI/CD"), SkillCategory::Technical);
    }

    #[test]
    fn test_suffix_fallbacks() {
        assert_eq!(categorize_skill("Alpine.js"), SkillCategory::Languages);
        assert_eq!(categorize_skill("Some UI library"), SkillCategory::Frameworks);
        assert_eq!(categorize_skill("Billing platform"), SkillCategory::Tools);
        assert_eq!(categorize_skill("Underwater basket weaving"), SkillCategory::Other);
    }

    #[test]
    fn test_explicit_category_is_kept() {
        let mut skill = Skill::new("Go");
        skill.category = Some(SkillCategory::Other);
        assert_eq!(with_category(&skill).category, Some(SkillCategory::Other));
        assert_eq!(
            with_category(&Skill::new("Go")).category,
            Some(SkillCategory::Languages)
        );
    }

    #[test]
    fn test_grouping() {
        let skills = vec![Skill::new("Go"), Skill::new("Docker"), Skill::new("Rust")];
        let grouped = group_skills_by_category(&skills);
        assert_eq!(grouped[&SkillCategory::Languages].len(), 2);
        assert_eq!(grouped[&SkillCategory::Tools][0].name, "Docker");
        assert!(!grouped.contains_key(&SkillCategory::Soft));

        let names = group_names_by_category(["Terraform", "Leadership"]);
        assert_eq!(names[&SkillCategory::Tools], vec!["Terraform"]);
        assert_eq!(SkillCategory::Tools.display_name(), "Tools & Platforms");
    }

    #[test]
    fn test_known_skills_sorted_unique() {
        let skills = known_skills();
        assert!(skills.contains(&"Postgres"));
        assert!(skills.contains(&"SOC2"));
        let mut sorted = skills.clone();
        sorted.dedup();
        assert_eq!(sorted.len(), skills.len());
    }
}
