use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{config::Config, errors::AppResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmCategory {
    HarmCategoryDangerousContent,
    HarmCategoryHateSpeech,
    HarmCategoryHarassment,
    HarmCategorySexuallyExplicit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    BlockLowAndAbove,
    BlockMediumAndAbove,
    BlockOnlyHigh,
    BlockNone,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

/// One outbound call to the model: prompt, optional inline image and the schema the
/// reply must follow.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationRequest {
    pub flow: &'static str,
    pub model: String,
    pub prompt: String,
    pub image: Option<String>,
    pub output_schema: Value,
    pub safety_settings: Vec<SafetySetting>,
    pub temperature: Option<f32>,
}

/// Boundary to the hosted model. Returns the raw text of the first choice, `None`
/// when the provider produced nothing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelProvider: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> AppResult<Option<String>>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody {
    model: String,
    messages: Vec<Value>,
    response_format: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extra_body: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionReply {
    #[serde(default)]
    choices: Vec<ReplyChoice>,
}

#[derive(Debug, Deserialize)]
struct ReplyChoice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

impl ChatCompletionBody {
    fn from_request(request: GenerationRequest) -> Self {
        let content = match request.image {
            Some(image) => json!([
                { "type": "text", "text": request.prompt },
                { "type": "image_url", "image_url": { "url": image } },
            ]),
            None => Value::String(request.prompt),
        };

        let extra_body = if request.safety_settings.is_empty() {
            None
        } else {
            Some(json!({ "google": { "safety_settings": request.safety_settings } }))
        };

        Self {
            model: request.model,
            messages: vec![json!({ "role": "user", "content": content })],
            response_format: json!({
                "type": "json_schema",
                "json_schema": {
                    "name": request.flow,
                    "schema": request.output_schema,
                },
            }),
            temperature: request.temperature,
            extra_body,
        }
    }
}

/// Chat-completions client for any OpenAI-compatible endpoint (Gemini's by default).
pub struct OpenAiCompatibleProvider {
    client: Client<OpenAIConfig>,
}

impl OpenAiCompatibleProvider {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.llm_api_key.expose_secret())
            .with_api_base(&config.llm_api_base);

        Self {
            client: Client::with_config(openai_config),
        }
    }
}

#[async_trait]
impl ModelProvider for OpenAiCompatibleProvider {
    async fn generate(&self, request: GenerationRequest) -> AppResult<Option<String>> {
        let flow = request.flow;
        log::debug!(
            "Sending {} request to model {} (image attached: {})",
            flow,
            request.model,
            request.image.is_some()
        );

        let body = ChatCompletionBody::from_request(request);
        let reply: ChatCompletionReply = self.client.chat().create_byot(body).await.map_err(|e| {
            log::error!("Model call for {} failed: {}", flow, e);
            e
        })?;

        Ok(reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}
