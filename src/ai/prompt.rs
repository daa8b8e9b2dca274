//! Reusable prompts using Handlebars for templating. Handlebars adds
//! additional security controls since it can't do much out of the box
//! without registering your own helpers. Retrieved passages and user
//! questions are untrusted, so nothing beyond plain substitution is
//! available to them.

use std::fmt;

use handlebars::{Handlebars, RenderError};
use serde_json::json;

use crate::search::RetrievedPassage;

/// Separator placed between passages in the context block
pub const CONTEXT_DELIMITER: &str = "\n\n---\n\n";

#[derive(Debug)]
pub enum Prompt {
    AnswerFromContext,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

const ANSWER_FROM_CONTEXT_PROMPT: &str = r"
Answer the question based only on the following context:

{{context}}

---

Answer the question based on the above context: {{question}}
";

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    // Prompts are plain text, HTML escaping would mangle quotes and
    // ampersands in the passages
    registry.register_escape_fn(handlebars::no_escape);
    registry
        .register_template_string(
            &Prompt::AnswerFromContext.to_string(),
            ANSWER_FROM_CONTEXT_PROMPT,
        )
        .expect("Failed to register template");
    registry
}

/// Join passage contents in retrieval order
pub fn build_context(passages: &[RetrievedPassage]) -> String {
    passages
        .iter()
        .map(|p| p.content.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_DELIMITER)
}

pub fn answer_prompt(context: &str, question: &str) -> Result<String, RenderError> {
    templates().render(
        &Prompt::AnswerFromContext.to_string(),
        &json!({
            "context": context,
            "question": question,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passage(content: &str) -> RetrievedPassage {
        RetrievedPassage {
            content: content.to_string(),
            id: None,
            score: 0.0,
        }
    }

    #[test]
    fn test_context_uses_delimiter_in_order() {
        let passages = vec![passage("first"), passage("second"), passage("third")];
        assert_eq!(
            build_context(&passages),
            "first\n\n---\n\nsecond\n\n---\n\nthird"
        );
        assert_eq!(build_context(&[]), "");
    }

    #[test]
    fn test_answer_prompt_layout() {
        let prompt = answer_prompt("Hotels in Paris", "Where should I stay?").unwrap();
        assert_eq!(
            prompt,
            "\nAnswer the question based only on the following context:\n\nHotels in Paris\n\n---\n\nAnswer the question based on the above context: Where should I stay?\n"
        );
    }

    #[test]
    fn test_answer_prompt_is_deterministic() {
        let context = "Flight <DL123> & \"Emirates\"";
        let first = answer_prompt(context, "What's cheapest?").unwrap();
        let second = answer_prompt(context, "What's cheapest?").unwrap();
        assert_eq!(first, second);
        // No HTML escaping of untrusted text
        assert!(first.contains("Flight <DL123> & \"Emirates\""));
        assert!(first.contains("What's cheapest?"));
    }
}
