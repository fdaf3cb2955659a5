//! Google Gemini implementation of [`Analyst`].
//!
//! Talks to `POST {endpoint}/models/{model}:generateContent?key=...`.
//! Analysis calls request `application/json` output constrained by a response
//! schema that mirrors [`DashboardReport`]; chat calls send the conversation
//! history plus a brand-specific system instruction.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{Analyst, AnalystError, AnalystResult};
use crate::brand::BrandProfile;
use crate::chat::ChatRequest;
use crate::report::DashboardReport;
use crate::types::ChatRole;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_THINKING_BUDGET: u32 = 32768;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Connection settings for the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    /// Reasoning token budget sent when thinking mode is on.
    pub thinking_budget: u32,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            api_key: None,
            thinking_budget: DEFAULT_THINKING_BUDGET,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GeminiConfig {
    /// Reads the API key from `GEMINI_API_KEY`, falling back to `API_KEY`.
    ///
    /// Blank values count as missing.
    pub fn api_key_from_env() -> Option<String> {
        ["GEMINI_API_KEY", "API_KEY"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .map(|v| v.trim().to_owned())
            .find(|v| !v.is_empty())
    }
}

// Gemini wire types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    /// Set on reasoning-summary parts, which are not part of the answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
}

impl GeminiContent {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_owned),
            parts: vec![GeminiPart { text: Some(text.to_owned()), thought: None }],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

/// JSON schema handed to the model so its output parses as a `DashboardReport`.
fn report_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "executiveSummary": { "type": "STRING" },
            "actionableAreas": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "impact": { "type": "STRING", "enum": ["High", "Medium", "Low"] }
                    },
                    "required": ["title", "description", "impact"]
                }
            },
            "sentimentTrend": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "date": { "type": "STRING" },
                        "score": { "type": "NUMBER" },
                        "label": { "type": "STRING" }
                    },
                    "required": ["date", "score", "label"]
                }
            },
            "wordCloud": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "text": { "type": "STRING" },
                        "value": { "type": "NUMBER" },
                        "sentiment": { "type": "STRING", "enum": ["praise", "complaint"] }
                    },
                    "required": ["text", "value", "sentiment"]
                }
            },
            "categories": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "sentimentScore": { "type": "NUMBER" },
                        "summary": { "type": "STRING" },
                        "keywords": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": ["name", "sentimentScore", "summary", "keywords"]
                }
            }
        },
        "required": ["executiveSummary", "actionableAreas", "sentimentTrend", "wordCloud", "categories"]
    })
}

/// Gemini-backed analyst for one brand.
pub struct GeminiAnalyst {
    config: GeminiConfig,
    brand: BrandProfile,
    client: Client,
}

impl GeminiAnalyst {
    pub fn new(config: GeminiConfig, brand: BrandProfile) -> Self {
        Self { config, brand, client: Client::new() }
    }

    fn api_url(&self, api_key: &str) -> String {
        let base = self.config.endpoint.trim_end_matches('/');
        format!("{}/models/{}:generateContent?key={}", base, self.config.model, api_key)
    }

    fn content_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    fn analysis_request(&self, batch: &str, focus: Option<&str>) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent::text(
                Some("user"),
                &self.brand.analysis_prompt(batch, focus),
            )],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json"),
                response_schema: Some(report_schema()),
                thinking_config: None,
            }),
        }
    }

    fn chat_request(&self, request: &ChatRequest) -> GeminiRequest {
        let mut contents: Vec<GeminiContent> = request
            .history
            .iter()
            .filter_map(|m| {
                let role = match m.role {
                    ChatRole::User => "user",
                    ChatRole::Model => "model",
                    ChatRole::Thought => return None,
                };
                Some(GeminiContent::text(Some(role), &m.text))
            })
            .collect();
        contents.push(GeminiContent::text(Some("user"), &request.prompt));

        let generation_config = request.thinking.then(|| GenerationConfig {
            response_mime_type: None,
            response_schema: None,
            thinking_config: Some(ThinkingConfig { thinking_budget: self.config.thinking_budget }),
        });

        GeminiRequest {
            contents,
            system_instruction: Some(GeminiContent::text(
                None,
                self.brand.chat_system_instruction,
            )),
            generation_config,
        }
    }

    /// Sends one `generateContent` call and returns the concatenated answer text.
    async fn generate(&self, request: &GeminiRequest) -> AnalystResult<String> {
        let api_key = self.config.api_key.as_deref().ok_or(AnalystError::MissingApiKey)?;

        let response = self
            .client
            .post(self.api_url(api_key))
            .headers(Self::content_headers())
            .timeout(self.config.timeout)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "gemini response");
        parse_envelope(status.as_u16(), &body)
    }
}

/// Turns a raw HTTP status + body into the answer text.
///
/// Non-2xx replies become `AnalystError::Status`, preferring the API's own
/// error message. Parts flagged as thoughts are skipped.
fn parse_envelope(status: u16, body: &str) -> AnalystResult<String> {
    let parsed = serde_json::from_str::<GeminiResponse>(body);

    if !(200..300).contains(&status) {
        let message = parsed
            .ok()
            .and_then(|r| r.error)
            .map(|e| e.message)
            .unwrap_or_else(|| body.trim().to_owned());
        return Err(AnalystError::Status { status, message });
    }

    let response = parsed?;
    if let Some(error) = response.error {
        return Err(AnalystError::Status { status, message: error.message });
    }

    let text: String = response
        .candidates
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter(|p| p.thought != Some(true))
                .filter_map(|p| p.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AnalystError::EmptyResponse);
    }
    Ok(text)
}

#[async_trait]
impl Analyst for GeminiAnalyst {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn analyze(&self, batch: &str, focus: Option<&str>) -> AnalystResult<DashboardReport> {
        let request = self.analysis_request(batch, focus);
        let text = self.generate(&request).await?;
        DashboardReport::from_json(&text)
    }

    async fn chat(&self, request: &ChatRequest) -> AnalystResult<String> {
        let body = self.chat_request(request);
        self.generate(&body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatMessage;

    fn analyst() -> GeminiAnalyst {
        let config = GeminiConfig { api_key: Some("test-key".to_owned()), ..GeminiConfig::default() };
        GeminiAnalyst::new(config, BrandProfile::etihad())
    }

    #[test]
    fn api_url_carries_model_and_key() {
        let url = analyst().api_url("test-key");
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-pro-preview:generateContent?key=test-key"
        );
    }

    #[test]
    fn analysis_request_asks_for_json_report() {
        let body = serde_json::to_value(analyst().analysis_request("[YELP] meh", Some("Economy Experience"))).unwrap();
        let config = &body["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["required"].as_array().unwrap().len(), 5);
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("Economy Experience"));
        assert!(prompt.ends_with("[YELP] meh"));
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn chat_request_drops_thoughts_and_appends_prompt() {
        let request = ChatRequest {
            prompt: "and crew?".to_owned(),
            history: vec![
                ChatMessage::user("how is the lounge?"),
                ChatMessage { role: ChatRole::Thought, text: "pondering".to_owned() },
                ChatMessage::model("Mostly positive."),
            ],
            thinking: false,
        };
        let body = serde_json::to_value(analyst().chat_request(&request)).unwrap();
        let contents = body["contents"].as_array().unwrap();
        let roles: Vec<&str> = contents.iter().map(|c| c["role"].as_str().unwrap()).collect();
        assert_eq!(roles, vec!["user", "model", "user"]);
        assert_eq!(contents[2]["parts"][0]["text"], "and crew?");
        assert!(body.get("generationConfig").is_none());
        assert!(body["systemInstruction"]["parts"][0]["text"].as_str().unwrap().contains("Etihad"));
    }

    #[test]
    fn thinking_mode_sets_budget() {
        let request = ChatRequest { prompt: "why?".to_owned(), history: Vec::new(), thinking: true };
        let body = serde_json::to_value(analyst().chat_request(&request)).unwrap();
        assert_eq!(body["generationConfig"]["thinkingConfig"]["thinkingBudget"], 32768);
    }

    #[test]
    fn envelope_text_is_concatenated_without_thoughts() {
        let body = r#"{"candidates":[{"content":{"role":"model","parts":[
            {"text":"hidden","thought":true},{"text":"Hello "},{"text":"world"}]}}]}"#;
        assert_eq!(parse_envelope(200, body).unwrap(), "Hello world");
    }

    #[test]
    fn envelope_without_text_is_empty_response() {
        let err = parse_envelope(200, r#"{"candidates":[]}"#).unwrap_err();
        assert!(matches!(err, AnalystError::EmptyResponse));
    }

    #[test]
    fn error_status_prefers_api_message() {
        let body = r#"{"error":{"code":403,"message":"API key not valid","status":"PERMISSION_DENIED"}}"#;
        match parse_envelope(403, body).unwrap_err() {
            AnalystError::Status { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn error_status_falls_back_to_raw_body() {
        match parse_envelope(502, "Bad Gateway").unwrap_err() {
            AnalystError::Status { message, .. } => assert_eq!(message, "Bad Gateway"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let analyst = GeminiAnalyst::new(GeminiConfig::default(), BrandProfile::etihad());
        let err = analyst.analyze("[GOOGLE] hi", None).await.unwrap_err();
        assert!(matches!(err, AnalystError::MissingApiKey));
    }
}
