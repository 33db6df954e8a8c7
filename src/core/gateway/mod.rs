//! Model gateway: build the correction prompt and call the chat-completion endpoint.

mod error;
mod prompt;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use serde_json::{Value, json};

use crate::core::config::GatewayConfig;

pub use error::{GatewayError, map_api_error};
pub use prompt::GrammarPrompt;

const TEMPERATURE: f64 = 0.7;

/// Source of raw chat-completion responses for a grammar check.
pub trait CompletionGateway: Send + Sync {
    /// Send the prompt and return the gateway's raw JSON response.
    fn check_grammar(
        &self,
        prompt: &GrammarPrompt<'_>,
    ) -> impl Future<Output = Result<Value, GatewayError>> + Send;
}

/// OpenRouter chat-completion client.
pub struct OpenRouterGateway {
    client: Option<Client<OpenAIConfig>>,
    model: String,
}

impl OpenRouterGateway {
    pub fn new(config: &GatewayConfig) -> Self {
        let client = config.api_key.as_ref().map(|key| {
            Client::with_config(
                OpenAIConfig::new()
                    .with_api_base(config.base_url.clone())
                    .with_api_key(key.clone()),
            )
        });
        Self {
            client,
            model: config.model_id.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request body: a single user message, JSON-object response format.
    pub fn request_body(&self, prompt: &GrammarPrompt<'_>) -> Value {
        json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": prompt.render(),
                }
            ],
            "temperature": TEMPERATURE,
            "response_format": { "type": "json_object" },
        })
    }
}

impl CompletionGateway for OpenRouterGateway {
    async fn check_grammar(&self, prompt: &GrammarPrompt<'_>) -> Result<Value, GatewayError> {
        let client = self.client.as_ref().ok_or(GatewayError::MissingApiKey)?;
        log::debug!("Calling model {}", self.model);
        client
            .chat()
            .create_byot::<_, Value>(self.request_body(prompt))
            .await
            .map_err(map_api_error)
    }
}

/// Extract the completion text from a chat-completion response.
///
/// Reads `choices[0].message.content`, either a string or an array of text blocks.
/// Returns `None` when absent or empty.
pub fn extract_content(response: &Value) -> Option<String> {
    let message = response.get("choices")?.as_array()?.first()?.get("message")?;
    let content = message.get("content")?;
    let text = if let Some(s) = content.as_str() {
        s.to_string()
    } else {
        content
            .as_array()?
            .iter()
            .find_map(|block| block.get("text").and_then(|t| t.as_str()))?
            .to_string()
    };
    if text.is_empty() { None } else { Some(text) }
}
