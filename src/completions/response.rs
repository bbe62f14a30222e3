use serde::Deserialize;

use crate::core::{Completion, LanguageModelUsage, LlmError};

#[derive(Debug, Deserialize)]
pub struct Response {
    #[allow(dead_code)]
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[allow(dead_code)]
    /// This is always `assistant`
    pub role: Option<String>,

    /// `null` when the provider filtered or truncated the output.
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Take the first choice (lowest index) as the completion.
pub fn into_completion(response: Response, requested_model: &str) -> Result<Completion, LlmError> {
    let Response {
        model,
        choices,
        usage,
        ..
    } = response;

    let choice = choices
        .into_iter()
        .min_by_key(|choice| choice.index)
        .ok_or(LlmError::EmptyResponse)?;

    Ok(Completion {
        text: choice.message.content.unwrap_or_default(),
        model: if model.is_empty() {
            requested_model.to_string()
        } else {
            model
        },
        finish_reason: choice.finish_reason,
        usage: usage.map(|u| LanguageModelUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Response {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_first_choice_text_is_verbatim() {
        let response = parse(json!({
            "id": "chatcmpl-1",
            "model": "gpt-4o-mini-2024-07-18",
            "choices": [
                { "index": 1, "message": { "role": "assistant", "content": "second" }, "finish_reason": "stop" },
                { "index": 0, "message": { "role": "assistant", "content": "  Energy conserved.\n" }, "finish_reason": "stop" }
            ],
            "usage": { "prompt_tokens": 60, "completion_tokens": 5, "total_tokens": 65 }
        }));

        let completion = into_completion(response, "gpt-4o-mini").unwrap();

        assert_eq!(completion.text, "  Energy conserved.\n");
        assert_eq!(completion.model, "gpt-4o-mini-2024-07-18");
        assert_eq!(completion.finish_reason.as_deref(), Some("stop"));
        assert_eq!(completion.usage.map(|u| u.total_tokens), Some(65));
    }

    #[test]
    fn test_null_content_becomes_empty_text() {
        let response = parse(json!({
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": null }, "finish_reason": "content_filter" }
            ]
        }));

        let completion = into_completion(response, "my-deployment").unwrap();

        assert_eq!(completion.text, "");
        assert_eq!(completion.model, "my-deployment");
        assert!(completion.usage.is_none());
    }

    #[test]
    fn test_no_choices_is_empty_response() {
        let response = parse(json!({ "id": "x", "model": "m", "choices": [] }));

        let err = into_completion(response, "m").unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }
}
