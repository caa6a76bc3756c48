//! CAR (Context-Action-Result) bullet rewriting
//!
//! Rewriting is best-effort. A completion that cannot be parsed, or a call that
//! times out, leaves that bullet with its original text and an empty skill
//! list; the rest of the draft is still rewritten. Any other capability error
//! aborts the stage.

use crate::error::Result;
use crate::llm::analyzer::{DEFAULT_CALL_TIMEOUT, DEFAULT_MODEL};
use crate::llm::client::{
    complete_with_timeout, extract_json_payload, CompletionConfig, LanguageModel, Message,
};
use crate::llm::prompts::{PromptTemplates, GUARDRAILS};
use crate::processing::document::{Bullet, ResumeDraft};
use futures::stream::{self, StreamExt, TryStreamExt};
use log::{debug, info, warn};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RewriteOptions {
    pub model: String,
    pub timeout: Duration,
    /// Upper bound on in-flight completions
    pub max_concurrent: usize,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_CALL_TIMEOUT,
            max_concurrent: 4,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RewriteResponse {
    rewritten: String,
    #[serde(default)]
    skills_used: Option<Vec<String>>,
}

pub struct BulletRewriter {
    prompt_templates: PromptTemplates,
    completion_config: CompletionConfig,
    options: RewriteOptions,
}

impl BulletRewriter {
    pub fn new(options: RewriteOptions) -> Self {
        Self {
            prompt_templates: PromptTemplates::default(),
            completion_config: CompletionConfig::new(&options.model).with_temperature(0.2),
            options,
        }
    }

    /// Rewrite every experience bullet, keeping source order within each experience
    pub async fn rewrite(
        &self,
        draft: &ResumeDraft,
        model: &dyn LanguageModel,
    ) -> Result<ResumeDraft> {
        let total = draft.bullets().count();
        info!(
            "Rewriting {} bullets (up to {} concurrent calls)",
            total, self.options.max_concurrent
        );

        // `buffered` yields results in submission order, whatever order the
        // calls complete in
        let rewritten: Vec<Bullet> = stream::iter(draft.bullets())
            .map(|bullet| self.rewrite_one(bullet, model))
            .buffered(self.options.max_concurrent.max(1))
            .try_collect()
            .await?;

        let mut rewritten = rewritten.into_iter();
        Ok(draft.map_bullets(|bullet| rewritten.next().unwrap_or_else(|| bullet.clone())))
    }

    async fn rewrite_one(&self, bullet: &Bullet, model: &dyn LanguageModel) -> Result<Bullet> {
        let messages = vec![
            Message::system(GUARDRAILS),
            Message::user(self.prompt_templates.render_bullet_rewrite(bullet)),
        ];

        let response = match complete_with_timeout(
            model,
            &messages,
            Some(&self.completion_config),
            self.options.timeout,
        )
        .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                warn!("Bullet rewrite timed out, keeping original: {}", bullet.original);
                return Ok(fallback(bullet));
            }
            Err(e) => return Err(e),
        };

        match serde_json::from_str::<RewriteResponse>(extract_json_payload(&response.text)) {
            Ok(parsed) if !parsed.rewritten.trim().is_empty() => {
                debug!("Rewrote bullet: {} -> {}", bullet.original, parsed.rewritten);
                let skills = parsed
                    .skills_used
                    .or_else(|| bullet.skills.clone())
                    .unwrap_or_default();
                Ok(Bullet {
                    rewritten: Some(parsed.rewritten),
                    skills: Some(skills),
                    ..bullet.clone()
                })
            }
            Ok(_) => {
                warn!("Empty rewrite returned, keeping original: {}", bullet.original);
                Ok(fallback(bullet))
            }
            Err(e) => {
                warn!("Unparseable rewrite ({}), keeping original: {}", e, bullet.original);
                Ok(fallback(bullet))
            }
        }
    }
}

fn fallback(bullet: &Bullet) -> Bullet {
    Bullet {
        rewritten: Some(bullet.original.clone()),
        skills: Some(Vec::new()),
        ..bullet.clone()
    }
}

/// Rewrite all bullets of a draft with the given options
pub async fn rewrite_bullets(
    draft: &ResumeDraft,
    model: &dyn LanguageModel,
    options: &RewriteOptions,
) -> Result<ResumeDraft> {
    BulletRewriter::new(options.clone()).rewrite(draft, model).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResumeTailorError;
    use crate::llm::client::Completion;
    use crate::processing::document::Experience;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn draft(bullets: &[&[&str]]) -> ResumeDraft {
        ResumeDraft {
            summary: "Engineer".to_string(),
            experiences: bullets
                .iter()
                .enumerate()
                .map(|(i, texts)| Experience {
                    company: format!("Company {}", i),
                    title: "Engineer".to_string(),
                    start: "2020".to_string(),
                    bullets: texts.iter().map(|t| Bullet::new(*t)).collect(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn quoted_bullet(messages: &[Message]) -> String {
        let prompt = &messages[1].content;
        let start = prompt.find("Input bullet: \"").map(|i| i + 15).unwrap_or(0);
        let end = prompt[start..].find("\"\n").map(|i| start + i).unwrap_or(prompt.len());
        prompt[start..end].to_string()
    }

    struct InvalidJsonModel {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LanguageModel for InvalidJsonModel {
        fn id(&self) -> &str {
            "invalid"
        }

        async fn complete(
            &self,
            _messages: &[Message],
            _config: Option<&CompletionConfig>,
        ) -> crate::error::Result<Completion> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Completion::new("I rewrote it nicely!"))
        }
    }

    /// Answers later bullets faster so completion order differs from source order
    struct ReversingModel;

    #[async_trait]
    impl LanguageModel for ReversingModel {
        fn id(&self) -> &str {
            "reversing"
        }

        async fn complete(
            &self,
            messages: &[Message],
            _config: Option<&CompletionConfig>,
        ) -> crate::error::Result<Completion> {
            let bullet = quoted_bullet(messages);
            let index: u64 = bullet.trim_start_matches("bullet ").parse().unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(50 - index * 10)).await;
            Ok(Completion::new(format!(
                r#"{{"rewritten":"Led {}","skills_used":["Go"]}}"#,
                bullet
            )))
        }
    }

    /// Stalls on bullets that mention "slow", answers the rest at once
    struct StallingModel;

    #[async_trait]
    impl LanguageModel for StallingModel {
        fn id(&self) -> &str {
            "stalling"
        }

        async fn complete(
            &self,
            messages: &[Message],
            _config: Option<&CompletionConfig>,
        ) -> crate::error::Result<Completion> {
            let bullet = quoted_bullet(messages);
            if bullet.contains("slow") {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            Ok(Completion::new(format!(
                r#"{{"rewritten":"Led {}","skills_used":["Go"]}}"#,
                bullet
            )))
        }
    }

    struct FailingModel;

    #[async_trait]
    impl LanguageModel for FailingModel {
        fn id(&self) -> &str {
            "failing"
        }

        async fn complete(
            &self,
            _messages: &[Message],
            _config: Option<&CompletionConfig>,
        ) -> crate::error::Result<Completion> {
            Err(ResumeTailorError::LanguageModel("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_invalid_json_falls_back_to_original() {
        let source = draft(&[&["Built API services in Go", "Led migration"], &["Shipped v2"]]);
        let model = InvalidJsonModel {
            calls: AtomicUsize::new(0),
        };

        let result = rewrite_bullets(&source, &model, &RewriteOptions::default())
            .await
            .unwrap();

        assert_eq!(model.calls.load(Ordering::SeqCst), 3);
        let before: Vec<&str> = source.bullets().map(|b| b.text()).collect();
        let after: Vec<&str> = result.bullets().map(|b| b.text()).collect();
        assert_eq!(before, after);
        assert!(result
            .bullets()
            .all(|b| b.skills.as_ref().map_or(false, |s| s.is_empty())));
    }

    #[tokio::test]
    async fn test_order_preserved_under_concurrency() {
        let source = draft(&[&["bullet 0", "bullet 1", "bullet 2"], &["bullet 3", "bullet 4"]]);
        let options = RewriteOptions {
            max_concurrent: 5,
            ..Default::default()
        };

        let result = rewrite_bullets(&source, &ReversingModel, &options).await.unwrap();

        assert_eq!(result.experiences[0].bullets.len(), 3);
        assert_eq!(result.experiences[1].bullets.len(), 2);
        let texts: Vec<&str> = result.bullets().map(|b| b.text()).collect();
        assert_eq!(
            texts,
            vec!["Led bullet 0", "Led bullet 1", "Led bullet 2", "Led bullet 3", "Led bullet 4"]
        );
        // originals never change
        assert_eq!(result.experiences[1].bullets[1].original, "bullet 4");
        assert_eq!(result.experiences[0].bullets[0].skills, Some(vec!["Go".to_string()]));
    }

    #[tokio::test]
    async fn test_timed_out_bullet_keeps_original() {
        let source = draft(&[&["fast bullet", "slow bullet"]]);
        let options = RewriteOptions {
            timeout: Duration::from_millis(50),
            ..Default::default()
        };

        let result = rewrite_bullets(&source, &StallingModel, &options).await.unwrap();

        let fast = &result.experiences[0].bullets[0];
        assert_eq!(fast.text(), "Led fast bullet");
        assert_eq!(fast.skills, Some(vec!["Go".to_string()]));

        let slow = &result.experiences[0].bullets[1];
        assert_eq!(slow.text(), "slow bullet");
        assert_eq!(slow.rewritten.as_deref(), Some("slow bullet"));
        assert_eq!(slow.skills, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_capability_errors_propagate() {
        let source = draft(&[&["Built things"]]);
        let result = rewrite_bullets(&source, &FailingModel, &RewriteOptions::default()).await;
        assert!(matches!(result, Err(ResumeTailorError::LanguageModel(_))));
    }

    #[tokio::test]
    async fn test_empty_draft_makes_no_calls() {
        let source = draft(&[]);
        let model = InvalidJsonModel {
            calls: AtomicUsize::new(0),
        };
        let result = rewrite_bullets(&source, &model, &RewriteOptions::default())
            .await
            .unwrap();
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
        assert_eq!(result, source);
    }
}
