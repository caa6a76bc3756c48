//! First ATS keyword pass over the draft

use crate::processing::ats_matcher::contains_keyword;
use crate::processing::document::{Analysis, Bullet, ResumeDraft};
use log::debug;
use std::collections::HashSet;

/// Global cap on parentheticals this pass appends
pub const MAX_OPTIMIZER_KEYWORDS: usize = 10;

/// Append `" (kw)"` for each keyword the text lacks, while the running total
/// in `added` stays below `cap`.
pub(crate) fn inject_keywords(
    text: &str,
    keywords: &[String],
    added: &mut Vec<String>,
    cap: usize,
) -> String {
    let mut text = text.to_string();
    for keyword in keywords {
        if added.len() >= cap {
            break;
        }
        if !contains_keyword(&text, keyword) {
            text = format!("{} ({})", text, keyword);
            added.push(keyword.clone());
        }
    }
    text
}

/// Required then preferred skills, first occurrence wins (case-insensitive)
pub(crate) fn analysis_keywords(analysis: &Analysis) -> Vec<String> {
    dedup_case_insensitive(
        analysis
            .required_skills
            .iter()
            .chain(&analysis.preferred_skills)
            .cloned(),
    )
}

pub(crate) fn dedup_case_insensitive<I: IntoIterator<Item = String>>(items: I) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}

/// Inject required and preferred keywords into experience bullets (at most
/// `MAX_OPTIMIZER_KEYWORDS` across the draft) and merge them into the skill list.
pub fn ats_optimize(draft: &ResumeDraft, analysis: &Analysis) -> ResumeDraft {
    let keywords = analysis_keywords(analysis);
    let mut added: Vec<String> = Vec::new();

    let optimized = draft.map_bullets(|bullet| {
        let rewritten = inject_keywords(bullet.text(), &keywords, &mut added, MAX_OPTIMIZER_KEYWORDS);
        Bullet {
            rewritten: Some(rewritten),
            ..bullet.clone()
        }
    });

    debug!("ATS optimizer added {} keywords: {:?}", added.len(), added);

    ResumeDraft {
        skills: dedup_case_insensitive(draft.skills.iter().chain(&keywords).cloned()),
        ..optimized
    }
}
