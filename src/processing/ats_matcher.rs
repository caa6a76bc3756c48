//! Keyword matching shared by the ATS stages and the stub language model

use crate::error::{Result, ResumeTailorError};
use crate::processing::skills::known_skills;
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

/// Exact skill matcher over a vocabulary of canonical skill names
pub struct SkillMatcher {
    exact_matcher: AhoCorasick,
    skill_database: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    /// Canonical spelling from the vocabulary
    pub skill: String,
    pub position: usize,
}

impl SkillMatcher {
    /// Matcher over the built-in vocabulary
    pub fn new() -> Result<Self> {
        Self::with_custom_skills(Vec::new())
    }

    pub fn with_custom_skills(additional_skills: Vec<String>) -> Result<Self> {
        let mut skill_database: Vec<String> = known_skills()
            .into_iter()
            .map(str::to_string)
            .chain(additional_skills)
            // single letters ("R") match inside too many words
            .filter(|s| s.chars().count() > 1)
            .collect();
        skill_database.sort();
        skill_database.dedup();

        let exact_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&skill_database)
            .map_err(|e| ResumeTailorError::Processing(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self {
            exact_matcher,
            skill_database,
        })
    }

    /// Skills mentioned in `text`, in order of first appearance, without repeats.
    ///
    /// Matches must sit on word boundaries. Names of three characters or fewer
    /// ("Go", "AWS") must also match case, so "go" the verb is not a skill.
    pub fn find_skills(&self, text: &str) -> Vec<SkillMatch> {
        let mut found: Vec<SkillMatch> = Vec::new();

        for mat in self.find_all(text) {
            if !found.iter().any(|f| f.skill == mat.skill) {
                found.push(mat);
            }
        }

        found
    }

    /// Number of boundary-respecting mentions of `skill` in `text`
    pub fn count_mentions(&self, text: &str, skill: &str) -> usize {
        self.find_all(text)
            .iter()
            .filter(|m| m.skill.eq_ignore_ascii_case(skill))
            .count()
    }

    fn find_all(&self, text: &str) -> Vec<SkillMatch> {
        self.exact_matcher
            .find_iter(text)
            .filter_map(|mat| {
                let skill = &self.skill_database[mat.pattern().as_usize()];
                let matched = &text[mat.start()..mat.end()];

                if skill.len() <= 3 && matched != skill {
                    return None;
                }
                if !is_word_boundary(text, mat.start(), mat.end()) {
                    return None;
                }

                Some(SkillMatch {
                    skill: skill.clone(),
                    position: mat.start(),
                })
            })
            .collect()
    }

    pub fn skill_count(&self) -> usize {
        self.skill_database.len()
    }
}

fn is_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    let is_word = |c: char| c.is_alphanumeric() || c == '_';

    !before.map_or(false, is_word) && !after.map_or(false, is_word)
}

/// Case-insensitive substring test used by both keyword injection passes
pub fn contains_keyword(text: &str, keyword: &str) -> bool {
    text.to_lowercase().contains(&keyword.to_lowercase())
}

/// The candidate most similar to `skill` (Jaro-Winkler), when at least `threshold`
pub fn closest_match<'a>(skill: &str, candidates: &'a [String], threshold: f64) -> Option<&'a str> {
    let skill_lower = skill.to_lowercase();

    candidates
        .iter()
        .map(|c| (c, jaro_winkler(&skill_lower, &c.to_lowercase())))
        .filter(|(_, similarity)| *similarity >= threshold)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c.as_str())
}
