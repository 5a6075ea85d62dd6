//! DALL-E 3 image generation client.

use crate::error::{ImageGenError, Result};
use crate::image::types::{
    GenerationPhase, GenerationRequest, ImageQuality, ImageSize, ImageStyle,
};
use serde::{Deserialize, Serialize};

const GENERATIONS_URL: &str = "https://api.openai.com/v1/images/generations";
const MODEL: &str = "dall-e-3";

/// Builder for [`DallEClient`].
#[derive(Debug, Clone, Default)]
pub struct DallEClientBuilder {
    api_key: Option<String>,
    endpoint: Option<String>,
}

impl DallEClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to `OPENAI_API_KEY` env var.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Overrides the generations endpoint (proxies, tests).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Builds the client, resolving the API key.
    pub fn build(self) -> Result<DallEClient> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                ImageGenError::Auth("OPENAI_API_KEY not set and no API key provided".into())
            })?;

        Ok(DallEClient {
            client: reqwest::Client::new(),
            api_key,
            endpoint: self.endpoint.unwrap_or_else(|| GENERATIONS_URL.to_string()),
        })
    }
}

/// Client for the DALL-E 3 generations endpoint.
///
/// Each generation is a stateless submit → fetch pipeline; the only state
/// held across calls is the credential and the underlying HTTP client.
pub struct DallEClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl DallEClient {
    /// Creates a new `DallEClientBuilder`.
    pub fn builder() -> DallEClientBuilder {
        DallEClientBuilder::new()
    }

    /// Submits a generation request and returns the rendered image's URL.
    ///
    /// The URL is only valid for a short window; download it promptly.
    pub async fn submit(&self, request: &GenerationRequest) -> Result<String> {
        request.validate()?;

        let body = GenerationBody::from_request(request);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(parse_error(status.as_u16(), &text));
        }

        let generation: GenerationResponse = response.json().await?;

        let url = generation
            .data
            .into_iter()
            .next()
            .and_then(|entry| entry.url)
            .ok_or(ImageGenError::MissingResult)?;

        tracing::debug!(url = %url, "generation complete");
        Ok(url)
    }

    /// Downloads the rendered image bytes.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageGenError::Download {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?.to_vec();
        tracing::debug!(size = bytes.len(), "image downloaded");
        Ok(bytes)
    }

    /// Generates an image and returns its bytes.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Vec<u8>> {
        self.generate_with_progress(request, |_| {}).await
    }

    /// Generates an image, reporting pipeline phases through `progress`.
    ///
    /// The callback is cosmetic feedback only; it receives no data and has
    /// no effect on the pipeline.
    pub async fn generate_with_progress(
        &self,
        request: &GenerationRequest,
        mut progress: impl FnMut(GenerationPhase),
    ) -> Result<Vec<u8>> {
        progress(GenerationPhase::Submitting);
        let url = self.submit(request).await?;

        progress(GenerationPhase::Downloading);
        self.fetch(&url).await
    }
}

/// Maps a non-success generation response to an error, surfacing the
/// service's own error message when the body carries one.
fn parse_error(status: u16, text: &str) -> ImageGenError {
    let message = serde_json::from_str::<ApiErrorBody>(text)
        .map(|body| body.error.message)
        .unwrap_or_else(|_| text.to_string());

    if status == 401 || status == 403 {
        return ImageGenError::Auth(message);
    }
    ImageGenError::Api { status, message }
}

#[derive(Debug, Serialize)]
struct GenerationBody {
    model: String,
    prompt: String,
    n: u32,
    size: ImageSize,
    quality: ImageQuality,
    style: ImageStyle,
}

impl GenerationBody {
    fn from_request(req: &GenerationRequest) -> Self {
        Self {
            model: MODEL.to_string(),
            prompt: req.prompt.clone(),
            n: 1,
            size: req.size,
            quality: req.quality,
            style: req.style,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    data: Vec<GenerationData>,
}

#[derive(Debug, Deserialize)]
struct GenerationData {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    revised_prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_with_explicit_key() {
        let client = DallEClientBuilder::new().api_key("sk-test").build();
        assert!(client.is_ok());
    }

    #[test]
    fn test_builder_without_key_fails() {
        // Clear env var to ensure it fails
        std::env::remove_var("OPENAI_API_KEY");
        let client = DallEClientBuilder::new().build();
        assert!(matches!(client, Err(ImageGenError::Auth(_))));
    }

    #[test]
    fn test_body_construction() {
        let req = GenerationRequest::new("A sunset")
            .with_size(ImageSize::Landscape)
            .with_quality(ImageQuality::Hd)
            .with_style(ImageStyle::Natural);
        let body = GenerationBody::from_request(&req);

        assert_eq!(body.model, "dall-e-3");
        assert_eq!(body.prompt, "A sunset");
        assert_eq!(body.n, 1);
        assert_eq!(body.size, ImageSize::Landscape);
    }

    #[test]
    fn test_body_serialization_exact() {
        let req = GenerationRequest::new("a red cube on a white background");
        let body = GenerationBody::from_request(&req);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "model": "dall-e-3",
                "prompt": "a red cube on a white background",
                "n": 1,
                "size": "1024x1024",
                "quality": "standard",
                "style": "vivid",
            })
        );
    }

    #[test]
    fn test_response_deserialization_url() {
        let json = r#"{"data": [{"url": "https://example.com/img.png", "revised_prompt": "A red cube"}]}"#;
        let resp: GenerationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.data.len(), 1);
        assert_eq!(
            resp.data[0].url.as_deref(),
            Some("https://example.com/img.png")
        );
    }

    #[test]
    fn test_response_deserialization_tolerates_missing_data() {
        let resp: GenerationResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.data.is_empty());

        let resp: GenerationResponse = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(resp.data.is_empty());
    }

    #[test]
    fn test_parse_error_surfaces_service_message() {
        let body = r#"{"error": {"message": "Billing hard limit has been reached", "type": "invalid_request_error"}}"#;
        let err = parse_error(400, body);
        match err {
            ImageGenError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Billing hard limit has been reached");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_auth_status() {
        let err = parse_error(401, r#"{"error": {"message": "Incorrect API key"}}"#);
        assert!(matches!(err, ImageGenError::Auth(m) if m == "Incorrect API key"));
    }

    #[test]
    fn test_parse_error_non_json_body() {
        let err = parse_error(502, "Bad Gateway");
        match err {
            ImageGenError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
