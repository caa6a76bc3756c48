//! Style-specific bullet prefixes

use crate::processing::document::{Bullet, ResumeDraft, ToneStyle};

/// Prefix every experience bullet with the style's lead-in unless it already
/// starts with it. Applying the same style twice changes nothing.
pub fn normalize_tone(draft: &ResumeDraft, style: ToneStyle) -> ResumeDraft {
    let prefix = style.prefix();

    draft.map_bullets(|bullet| {
        let text = bullet.text();
        let normalized = if text.starts_with(prefix) {
            text.to_string()
        } else {
            format!("{}{}", prefix, text)
        };

        Bullet {
            rewritten: Some(normalized),
            style: Some(style),
            ..bullet.clone()
        }
    })
}
