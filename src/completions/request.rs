use serde::Serialize;

use crate::core::{ChatRole, CompletionRequest};

#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// Omitted for deployment-scoped endpoints, where the URL selects the model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    pub messages: Vec<RequestMessage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

impl From<ChatRole> for Role {
    fn from(value: ChatRole) -> Self {
        match value {
            ChatRole::User => Role::User,
        }
    }
}

pub fn build_request(request: &CompletionRequest, include_model: bool) -> Request {
    Request {
        model: include_model.then(|| request.model.clone()),
        messages: request
            .messages
            .iter()
            .map(|m| RequestMessage {
                role: m.role.into(),
                content: m.content.clone(),
            })
            .collect(),
        max_tokens: request.generation_config.max_tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GenerationConfig, Message};
    use serde_json::json;

    fn request(max_tokens: Option<u32>) -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![Message::user("Summarize this")],
            generation_config: GenerationConfig { max_tokens },
        }
    }

    #[test]
    fn test_serializes_model_and_max_tokens() {
        let body = serde_json::to_value(build_request(&request(Some(100)), true)).unwrap();

        assert_eq!(
            body,
            json!({
                "model": "gpt-4o-mini",
                "messages": [{ "role": "user", "content": "Summarize this" }],
                "max_tokens": 100
            })
        );
    }

    #[test]
    fn test_omits_unset_fields() {
        let body = serde_json::to_value(build_request(&request(None), false)).unwrap();

        assert!(body.get("model").is_none());
        assert!(body.get("max_tokens").is_none());
        assert_eq!(body["messages"][0]["role"], "user");
    }
}
