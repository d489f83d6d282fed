//! Google Gemini API client.
//!
//! Implements the `ChatClient` trait against the Generative Language API.
//! The model identifier is opaque at this layer; an invalid model surfaces
//! at call time as an API error.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::streaming::{read_sse_stream, SseEvent};
use crate::{ChatClient, ChatError, Role, Turn};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Bound on a single remote call. A timeout surfaces as an ordinary
/// failure, so the session rollback rule applies.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Gemini API client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "gemini-2.0-flash".to_string(),
            max_tokens: 4096,
            temperature: 0.7,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Gemini API client.
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { config, http }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn api_url(&self, stream: bool) -> String {
        let method = if stream {
            "streamGenerateContent"
        } else {
            "generateContent"
        };
        format!(
            "{}/{}:{}?key={}",
            GEMINI_API_BASE, self.config.model, method, self.config.api_key
        )
    }

    /// Build the JSON request body. The system turn becomes
    /// `systemInstruction`; user and assistant turns become `contents`.
    fn build_request_body(&self, turns: &[Turn]) -> serde_json::Value {
        let contents: Vec<serde_json::Value> = turns
            .iter()
            .filter_map(|turn| {
                let role = match turn.role {
                    Role::User => "user",
                    Role::Assistant => "model",
                    Role::System => return None,
                };
                Some(serde_json::json!({
                    "role": role,
                    "parts": [{ "text": turn.content }]
                }))
            })
            .collect();

        let mut body = serde_json::json!({
            "contents": contents,
            "generationConfig": {
                "maxOutputTokens": self.config.max_tokens,
                "temperature": self.config.temperature,
            }
        });

        if let Some(system) = turns.iter().find(|turn| turn.role == Role::System) {
            body["systemInstruction"] = serde_json::json!({
                "parts": [{ "text": system.content }]
            });
        }

        body
    }

    /// Extract the reply text from a non-streaming response.
    fn parse_response(&self, json: serde_json::Value) -> Result<String, ChatError> {
        let candidates = json["candidates"]
            .as_array()
            .ok_or_else(|| ChatError::Parse("no candidates in response".to_string()))?;

        let first = candidates
            .first()
            .ok_or_else(|| ChatError::Parse("empty candidates".to_string()))?;

        let parts = first["content"]["parts"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        let mut content = String::new();
        for part in &parts {
            if let Some(text) = part["text"].as_str() {
                content.push_str(text);
            }
        }
        Ok(content)
    }

    fn map_transport_error(e: reqwest::Error) -> ChatError {
        if e.is_timeout() {
            ChatError::Timeout
        } else {
            ChatError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl ChatClient for GeminiClient {
    async fn send_message(&self, turns: &[Turn]) -> Result<String, ChatError> {
        let body = self.build_request_body(turns);
        let url = self.api_url(false);

        debug!(model = %self.config.model, turns = turns.len(), "Gemini API request");

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ChatError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ChatError::Api(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ChatError::Parse(e.to_string()))?;

        self.parse_response(json)
    }

    async fn send_message_streaming(
        &self,
        turns: &[Turn],
        on_chunk: Box<dyn Fn(String) + Send + Sync>,
    ) -> Result<String, ChatError> {
        let body = self.build_request_body(turns);
        let url = format!("{}&alt=sse", self.api_url(true));

        debug!(model = %self.config.model, turns = turns.len(), "Gemini API streaming request");

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ChatError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ChatError::Api(format!("HTTP {status}: {text}")));
        }

        let mut full_content = String::new();

        read_sse_stream(response, |event: SseEvent| {
            let Ok(data) = serde_json::from_str::<serde_json::Value>(&event.data) else {
                return;
            };
            let mut chunk = String::new();
            if let Some(candidates) = data["candidates"].as_array() {
                for candidate in candidates {
                    if let Some(parts) = candidate["content"]["parts"].as_array() {
                        for part in parts {
                            if let Some(text) = part["text"].as_str() {
                                if !text.is_empty() {
                                    chunk.push_str(text);
                                    full_content.push_str(text);
                                }
                            }
                        }
                    }
                }
            }
            if !chunk.is_empty() {
                on_chunk(chunk);
            }
        })
        .await?;

        Ok(full_content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GeminiClient {
        GeminiClient::new(GeminiConfig::new("test-key").with_model("gemini-2.0-flash"))
    }

    #[test]
    fn request_body_maps_roles_and_system_instruction() {
        let turns = vec![
            Turn::system("You are Evo."),
            Turn::user("Hi"),
            Turn::assistant("Hello!"),
            Turn::user("How are you?"),
        ];
        let body = client().build_request_body(&turns);

        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[2]["parts"][0]["text"], "How are you?");

        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            "You are Evo."
        );
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 4096);
    }

    #[test]
    fn request_body_without_system_turn_has_no_instruction() {
        let body = client().build_request_body(&[Turn::user("Hi")]);
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn parse_response_concatenates_text_parts() {
        let json = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hel" }, { "text": "lo!" }] }
            }]
        });
        assert_eq!(client().parse_response(json).unwrap(), "Hello!");
    }

    #[test]
    fn parse_response_without_candidates_is_a_parse_error() {
        let err = client()
            .parse_response(serde_json::json!({ "error": "boom" }))
            .unwrap_err();
        assert!(matches!(err, ChatError::Parse(_)));
    }

    #[test]
    fn parse_response_with_no_parts_yields_empty_text() {
        // The session layer turns this into the "(no response)" placeholder.
        let json = serde_json::json!({ "candidates": [{ "content": {} }] });
        assert_eq!(client().parse_response(json).unwrap(), "");
    }

    #[test]
    fn api_url_selects_method_per_mode() {
        let c = client();
        assert!(c.api_url(false).contains(":generateContent?"));
        assert!(c.api_url(true).contains(":streamGenerateContent?"));
        assert!(c.api_url(false).starts_with(GEMINI_API_BASE));
    }
}
