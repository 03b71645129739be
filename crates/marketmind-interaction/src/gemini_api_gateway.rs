//! GeminiApiGateway - Direct REST API implementation of the campaign gateway.
//!
//! Issues one `generateContent` call per strategy or image request. The API key
//! comes from the secret service; models and endpoint come from `config.toml`.

use std::time::Duration;

use async_trait::async_trait;
use marketmind_core::campaign::{
    DEFAULT_IMAGE_MIME_TYPE, GeneratedImage, StrategyRequest, StrategyResponse,
};
use marketmind_core::config::GeminiSettings;
use marketmind_core::error::{GenerationStage, MarketmindError, Result};
use marketmind_core::gateway::{CampaignGateway, decorate_image_prompt};
use marketmind_core::secret::SecretService;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::prompt::{render_strategy_prompt, strategy_response_schema};

/// Gateway implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiGateway {
    client: Client,
    api_key: String,
    base_url: String,
    text_model: String,
    image_model: String,
}

impl GeminiApiGateway {
    /// Creates a gateway with the provided API key and settings.
    pub fn new(api_key: impl Into<String>, settings: &GeminiSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| MarketmindError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            text_model: settings.text_model.clone(),
            image_model: settings.image_model.clone(),
        })
    }

    /// Loads the API key from the secret service.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if no Gemini API key is configured.
    pub async fn from_secrets(
        secrets: &dyn SecretService,
        settings: &GeminiSettings,
    ) -> Result<Self> {
        let secret_config = secrets.load_secrets().await?;
        let api_key = secret_config.gemini_api_key().ok_or_else(|| {
            MarketmindError::config(
                "Gemini API key not found; set GEMINI_API_KEY or add it to secret.json",
            )
        })?;

        Self::new(api_key, settings)
    }

    async fn send_request(
        &self,
        stage: GenerationStage,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = format!("{}/{model}:generateContent", self.base_url);

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|err| {
                // The request URL carries the API key.
                let err = err.without_url();
                MarketmindError::generation_failed(stage, format!("Gemini API request failed: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(stage, status, &body_text));
        }

        response.json().await.map_err(|err| {
            let message = format!("Failed to parse Gemini response: {}", err.without_url());
            match stage {
                GenerationStage::Strategy => MarketmindError::malformed(stage, message),
                // Schema errors belong to the strategy call only.
                GenerationStage::Image => MarketmindError::generation_failed(stage, message),
            }
        })
    }
}

#[async_trait]
impl CampaignGateway for GeminiApiGateway {
    async fn generate_strategy(&self, request: &StrategyRequest) -> Result<StrategyResponse> {
        if request.topic.trim().is_empty() {
            return Err(MarketmindError::invalid_input("topic must not be empty"));
        }

        tracing::info!(
            "[GeminiApiGateway] Requesting strategy: model={}, platform={}",
            self.text_model,
            request.platform
        );

        let body = GenerateContentRequest {
            contents: vec![Content::user_text(render_strategy_prompt(request)?)],
            generation_config: GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(strategy_response_schema()),
                response_modalities: None,
            },
        };

        let response = self
            .send_request(GenerationStage::Strategy, &self.text_model, &body)
            .await?;
        let strategy = StrategyResponse::parse(&extract_text_response(response)?)?;

        tracing::info!(
            "[GeminiApiGateway] Strategy '{}' with {} posts",
            strategy.campaign_title,
            strategy.posts.len()
        );
        Ok(strategy)
    }

    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage> {
        if prompt.trim().is_empty() {
            return Err(MarketmindError::invalid_input("image prompt must not be empty"));
        }

        tracing::debug!(
            "[GeminiApiGateway] Requesting image: model={}",
            self.image_model
        );

        let body = GenerateContentRequest {
            contents: vec![Content::user_text(decorate_image_prompt(prompt))],
            generation_config: GenerationConfig {
                response_mime_type: None,
                response_schema: None,
                response_modalities: Some(vec!["IMAGE".to_string()]),
            },
        };

        let response = self
            .send_request(GenerationStage::Image, &self.image_model, &body)
            .await?;
        extract_image_response(response)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

impl Content {
    fn user_text(text: String) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part { text }],
        }
    }
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartResponse {
    text: Option<String>,
    inline_data: Option<InlineDataResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataResponse {
    mime_type: Option<String>,
    data: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn first_candidate_parts(response: GenerateContentResponse) -> Vec<PartResponse> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .unwrap_or_default()
}

/// Joins the text parts of the first candidate.
fn extract_text_response(response: GenerateContentResponse) -> Result<String> {
    let text: String = first_candidate_parts(response)
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.trim().is_empty() {
        return Err(MarketmindError::malformed(
            GenerationStage::Strategy,
            "Gemini API returned no text in the response candidates",
        ));
    }
    Ok(text)
}

/// Takes the first inline image part of the first candidate.
fn extract_image_response(response: GenerateContentResponse) -> Result<GeneratedImage> {
    first_candidate_parts(response)
        .into_iter()
        .filter_map(|part| part.inline_data)
        .find_map(|inline| {
            let data = inline.data.filter(|data| !data.is_empty())?;
            let mime_type = inline
                .mime_type
                .filter(|mime| !mime.is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE_MIME_TYPE.to_string());
            Some(GeneratedImage::new(mime_type, data))
        })
        .ok_or(MarketmindError::NoImageReturned)
}

fn map_http_error(stage: GenerationStage, status: StatusCode, body: &str) -> MarketmindError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.to_string());

    MarketmindError::GenerationFailed {
        stage,
        status_code: Some(status.as_u16()),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let parsed = response(
            r#"{"candidates": [{"content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}]}}]}"#,
        );
        assert_eq!(extract_text_response(parsed).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_extract_text_without_candidates() {
        let err = extract_text_response(response(r#"{}"#)).unwrap_err();
        assert!(err.is_malformed_response());
    }

    #[test]
    fn test_extract_image_skips_text_parts() {
        let parsed = response(
            r#"{"candidates": [{"content": {"parts": [
                {"text": "Here is your image"},
                {"inlineData": {"mimeType": "image/jpeg", "data": "QUJD"}},
                {"inlineData": {"mimeType": "image/png", "data": "REVG"}}
            ]}}]}"#,
        );
        let image = extract_image_response(parsed).unwrap();
        assert_eq!(image, GeneratedImage::new("image/jpeg", "QUJD"));
    }

    #[test]
    fn test_extract_image_defaults_mime_type() {
        let parsed =
            response(r#"{"candidates": [{"content": {"parts": [{"inlineData": {"data": "QUJD"}}]}}]}"#);
        assert_eq!(extract_image_response(parsed).unwrap().mime_type, "image/png");
    }

    #[test]
    fn test_extract_image_without_image_part() {
        let parsed = response(r#"{"candidates": [{"content": {"parts": [{"text": "sorry"}]}}]}"#);
        assert!(extract_image_response(parsed).unwrap_err().is_no_image_returned());

        let empty_data =
            response(r#"{"candidates": [{"content": {"parts": [{"inlineData": {"data": ""}}]}}]}"#);
        assert!(extract_image_response(empty_data).unwrap_err().is_no_image_returned());
    }

    #[test]
    fn test_map_http_error_uses_api_message() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        let err = map_http_error(GenerationStage::Image, StatusCode::TOO_MANY_REQUESTS, body);

        match err {
            MarketmindError::GenerationFailed {
                stage,
                status_code,
                message,
            } => {
                assert_eq!(stage, GenerationStage::Image);
                assert_eq!(status_code, Some(429));
                assert_eq!(message, "RESOURCE_EXHAUSTED: Quota exceeded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_map_http_error_with_plain_body() {
        let err = map_http_error(GenerationStage::Strategy, StatusCode::BAD_GATEWAY, "upstream down");
        assert!(err.to_string().contains("upstream down"));
        assert_eq!(err.stage(), Some(GenerationStage::Strategy));
    }
}
