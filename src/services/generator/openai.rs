//! OpenAI-compatible chat completions provider
//!
//! Sends the composed prompt as a single user message and returns the first
//! choice's content. Any server exposing `/chat/completions` with the OpenAI
//! request and response shapes works (the base URL is configurable).

use std::time::{Duration, Instant};

use reqwest::{Client as HttpClient, StatusCode};
use serde::{Deserialize, Serialize};

use super::{GenerationError, RecommendationGenerator};
use crate::models::{Prompt, Recommendation};

#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct OpenAiGenerator {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiGenerator {
    pub fn new(settings: GeneratorSettings) -> Result<Self, GenerationError> {
        let http_client = HttpClient::builder().timeout(settings.timeout).build()?;

        Ok(Self {
            http_client,
            api_key: settings.api_key,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            model: settings.model,
            temperature: settings.temperature,
        })
    }

    fn classify_failure(status: StatusCode, body: String) -> GenerationError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GenerationError::Authentication {
                status: status.as_u16(),
                body,
            },
            StatusCode::TOO_MANY_REQUESTS => GenerationError::RateLimited(body),
            _ => GenerationError::Api {
                status: status.as_u16(),
                body,
            },
        }
    }

    fn extract_completion(response_text: &str) -> Result<String, GenerationError> {
        let response: ChatResponse = serde_json::from_str(response_text)
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(GenerationError::MalformedResponse(
                "response contained no completion text".to_string(),
            ));
        }

        Ok(content)
    }
}

#[async_trait::async_trait]
impl RecommendationGenerator for OpenAiGenerator {
    async fn generate(&self, prompt: &Prompt) -> Result<Recommendation, GenerationError> {
        let start = Instant::now();
        let url = format!("{}/chat/completions", self.api_url);

        let request = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: [ChatMessage {
                role: "user",
                content: prompt.as_str(),
            }],
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                provider = self.name(),
                "Model API returned an error"
            );
            return Err(Self::classify_failure(status, response_text));
        }

        let content = Self::extract_completion(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                "Failed to parse model response"
            );
            e
        })?;

        tracing::info!(
            model = %self.model,
            provider = self.name(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Recommendation generated"
        );

        Ok(Recommendation::new(content))
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_completion_first_choice() {
        let json = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "  Travel card. 70%  "}},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ]
        }"#;

        assert_eq!(
            OpenAiGenerator::extract_completion(json).unwrap(),
            "Travel card. 70%"
        );
    }

    #[test]
    fn test_extract_completion_no_choices() {
        let result = OpenAiGenerator::extract_completion(r#"{"choices": []}"#);
        assert!(matches!(result, Err(GenerationError::MalformedResponse(_))));
    }

    #[test]
    fn test_extract_completion_null_content() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let result = OpenAiGenerator::extract_completion(json);
        assert!(matches!(result, Err(GenerationError::MalformedResponse(_))));
    }

    #[test]
    fn test_extract_completion_not_json() {
        let result = OpenAiGenerator::extract_completion("<html>Bad Gateway</html>");
        assert!(matches!(result, Err(GenerationError::MalformedResponse(_))));
    }

    #[test]
    fn test_classify_failure() {
        assert!(matches!(
            OpenAiGenerator::classify_failure(StatusCode::UNAUTHORIZED, String::new()),
            GenerationError::Authentication { status: 401, .. }
        ));
        assert!(matches!(
            OpenAiGenerator::classify_failure(StatusCode::TOO_MANY_REQUESTS, String::new()),
            GenerationError::RateLimited(_)
        ));
        assert!(matches!(
            OpenAiGenerator::classify_failure(StatusCode::INTERNAL_SERVER_ERROR, String::new()),
            GenerationError::Api { status: 500, .. }
        ));
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "gpt-4o",
            temperature: 0.2,
            messages: [ChatMessage {
                role: "user",
                content: "Given the following customer data:",
            }],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(
            value["messages"][0]["content"],
            "Given the following customer data:"
        );
        assert!((value["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }
}
