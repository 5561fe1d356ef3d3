//! Narrative generation backed by a chat-completion model.

mod client;
mod prompt;

use std::sync::Arc;

use tracing::error;

use super::domain::DiagnosticRequest;
use super::narrative;
use super::report::Narrative;
use super::scoring::ScoreProfile;

pub use client::{CompletionClient, CompletionError, OpenAiCompletionClient};
pub use prompt::CompletionPrompt;

/// Keeps the body of a leading Markdown code fence, dropping the `json` tag
/// and anything after the closing fence.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        let rest = rest.strip_prefix("json").unwrap_or(rest);
        text = rest.split_once("```").map_or(rest, |(body, _)| body);
    }
    text.trim()
}

fn has_blank_block(narrative: &Narrative) -> bool {
    [
        &narrative.diag_summary,
        &narrative.main_blocker,
        &narrative.priority,
        &narrative.goodtime_recommendation,
    ]
    .iter()
    .any(|block| block.trim().is_empty())
}

pub fn parse_narrative(raw: &str) -> Result<Narrative, serde_json::Error> {
    serde_json::from_str(strip_code_fence(raw))
}

/// Asks the model for the four narrative blocks.
#[derive(Clone)]
pub struct LanguageModelAnalyst {
    client: Arc<dyn CompletionClient>,
}

impl LanguageModelAnalyst {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Transport failures propagate; unusable output degrades to the segment copy.
    pub async fn narrate(
        &self,
        request: &DiagnosticRequest,
        profile: &ScoreProfile,
    ) -> Result<Narrative, CompletionError> {
        let prompt = prompt::build(request, profile);
        let raw = self.client.complete(&prompt).await?;

        match parse_narrative(&raw) {
            Ok(narrative) if !has_blank_block(&narrative) => Ok(narrative),
            Ok(_) => {
                error!(
                    segment = profile.segment.as_str(),
                    "model left a narrative block blank, using segment copy"
                );
                Ok(narrative::segment_fallback(&request.user_info, profile))
            }
            Err(err) => {
                error!(
                    error = %err,
                    segment = profile.segment.as_str(),
                    "model output was not a narrative object, using segment copy"
                );
                Ok(narrative::segment_fallback(&request.user_info, profile))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fenced_json() {
        let raw = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fence(raw), "{\"a\": 1}");
    }

    #[test]
    fn strips_bare_fence() {
        assert_eq!(strip_code_fence("```\n{}\n```  "), "{}");
    }

    #[test]
    fn ignores_commentary_after_closing_fence() {
        let raw = "```json\n{\"a\": 1}\n```\nJ'espère que cela t'aide.";
        assert_eq!(strip_code_fence(raw), "{\"a\": 1}");
    }

    #[test]
    fn unterminated_fence_keeps_the_rest() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn blank_blocks_are_detected() {
        let raw = r#"{"diagSummary": " ", "mainBlocker": "b", "priority": "p", "goodtimeRecommendation": "r"}"#;
        assert!(has_blank_block(&parse_narrative(raw).expect("parses")));
    }

    #[test]
    fn leaves_plain_json_alone() {
        assert_eq!(strip_code_fence("  {\"a\": \"json\"} "), "{\"a\": \"json\"}");
    }

    #[test]
    fn parse_requires_all_four_blocks() {
        let raw = r#"{"diagSummary": "s", "mainBlocker": "b", "priority": "p"}"#;
        assert!(parse_narrative(raw).is_err());

        let raw = r#"```json
{"diagSummary": "s", "mainBlocker": "b", "priority": "p", "goodtimeRecommendation": "r"}
```"#;
        let narrative = parse_narrative(raw).expect("parses");
        assert_eq!(narrative.goodtime_recommendation, "r");
    }
}
