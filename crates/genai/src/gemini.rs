use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::client::GenerationClient;
use crate::config::GeminiConfig;
use crate::error::GenerationError;
use crate::request::{GenerationRequest, RequestPart};
use crate::response::{InlinePayload, ModelResponse, Part};

/// [`GenerationClient`] backed by the Gemini `generateContent` REST API.
#[derive(Debug)]
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| GenerationError::Configuration(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn url_for(&self, model: &str) -> String {
        let model = model.trim();
        let path = if model.starts_with("models/") {
            model.to_owned()
        } else {
            format!("models/{model}")
        };
        format!("{}/{path}:generateContent", self.config.endpoint)
    }

    /// Parse a `generateContent` response body into ordered parts.
    fn parse_response(body: &Value) -> Result<ModelResponse, GenerationError> {
        let Some(candidates) = body.get("candidates").and_then(Value::as_array) else {
            // A blocked prompt comes back without candidates.
            if let Some(reason) = body
                .get("promptFeedback")
                .and_then(|f| f.get("blockReason"))
                .and_then(Value::as_str)
            {
                return Ok(ModelResponse::text(format!("prompt blocked: {reason}")));
            }
            return Err(GenerationError::Parse(format!(
                "response has no candidates: {body}"
            )));
        };

        let mut parts = Vec::new();
        for candidate in candidates {
            let Some(raw_parts) = candidate
                .get("content")
                .and_then(|c| c.get("parts"))
                .and_then(Value::as_array)
            else {
                continue;
            };
            for part in raw_parts {
                if let Some(inline) = part.get("inlineData").or_else(|| part.get("inline_data")) {
                    let data = inline.get("data").and_then(Value::as_str).unwrap_or_default();
                    let mime_type = inline
                        .get("mimeType")
                        .or_else(|| inline.get("mime_type"))
                        .and_then(Value::as_str)
                        .map(str::to_owned);
                    parts.push(Part::InlineData {
                        mime_type,
                        data: InlinePayload::Base64(data.to_owned()),
                    });
                } else if let Some(text) = part.get("text").and_then(Value::as_str) {
                    parts.push(Part::Text(text.to_owned()));
                }
            }
        }

        Ok(ModelResponse::new(parts))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest<'a> {
    contents: [WireContent<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireInstruction<'a>>,
    generation_config: WireGenerationConfig,
}

#[derive(Serialize)]
struct WireContent<'a> {
    role: &'static str,
    parts: Vec<WirePart<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum WirePart<'a> {
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: WireInline,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireInline {
    mime_type: &'static str,
    data: String,
}

#[derive(Serialize)]
struct WireInstruction<'a> {
    parts: [WirePart<'a>; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    response_modalities: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<WireImageConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireImageConfig {
    aspect_ratio: &'static str,
}

fn wire_request(request: &GenerationRequest) -> WireRequest<'_> {
    let parts = request
        .parts
        .iter()
        .map(|part| match part {
            RequestPart::Image { mime_type, data } => WirePart::Inline {
                inline_data: WireInline {
                    mime_type: *mime_type,
                    data: STANDARD.encode(data),
                },
            },
            RequestPart::Text(text) => WirePart::Text {
                text: text.as_str(),
            },
        })
        .collect();

    WireRequest {
        contents: [WireContent {
            role: "user",
            parts,
        }],
        system_instruction: request
            .system_instruction
            .as_deref()
            .map(|text| WireInstruction {
                parts: [WirePart::Text { text }],
            }),
        generation_config: WireGenerationConfig {
            response_modalities: request
                .config
                .modalities
                .iter()
                .map(|m| m.wire_name())
                .collect(),
            image_config: request.config.aspect_ratio.map(|aspect| WireImageConfig {
                aspect_ratio: aspect.as_str(),
            }),
        },
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    #[instrument(skip_all, fields(model = %request.model))]
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<ModelResponse, GenerationError> {
        let url = self.url_for(&request.model);
        let body = wire_request(request);

        debug!(
            url = %url,
            aspect_ratio = ?request.config.aspect_ratio,
            "sending generation request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout(self.config.timeout_seconds)
                } else {
                    GenerationError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "generation API returned error");
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout(self.config.timeout_seconds)
            } else {
                GenerationError::Parse(format!("failed to parse API response: {e}"))
            }
        })?;

        let parsed = Self::parse_response(&json)?;
        debug!(parts = parsed.parts.len(), "received generation response");
        Ok(parsed)
    }
}
