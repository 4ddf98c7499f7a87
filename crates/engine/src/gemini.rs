use crate::{fetcher::Request, Backend, Error};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

/// The default Gemini REST endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// The default model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Generation can take a while for long lessons
const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
    temperature: f32,
}

impl<'a> From<&'a Request> for GenerateContentRequest<'a> {
    fn from(request: &'a Request) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &request.schema,
                temperature: request.temperature,
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// the text of the first candidate, None when there is none
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text = parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect::<String>();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Client for the Gemini `generateContent` API
#[derive(Clone, Debug)]
pub struct Gemini {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl Gemini {
    /// Create a new client for the given endpoint and model
    pub fn new<S: AsRef<str>>(endpoint: S, model: S) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.as_ref().trim_end_matches('/').to_string(),
            model: model.as_ref().to_string(),
        })
    }

    /// The url requests are posted to
    pub fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait::async_trait]
impl Backend for Gemini {
    async fn generate(&self, api_key: &str, request: &Request) -> Result<Option<String>, Error> {
        let url = self.url();
        debug!("(engine) POST {}", url);

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&GenerateContentRequest::from(request))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            error!("(engine) generateContent returned {}: {}", status, message);
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| Error::MalformedResponse(e.to_string()))?;
        Ok(body.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lesson, Topic};
    use serde_json::json;

    fn parse(value: Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_request_body_shape() {
        let request = Request {
            topic: Topic::Oop,
            prompt: "olá".to_string(),
            schema: Lesson::schema(),
            temperature: 0.2,
        };
        let body = serde_json::to_value(GenerateContentRequest::from(&request)).unwrap();
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "olá");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"], Lesson::schema());
        assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_response_text_joins_parts() {
        let resp = parse(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "{\"a\":" }, { "text": "1}" } ] } },
                { "content": { "parts": [ { "text": "ignored" } ] } }
            ]
        }));
        assert_eq!(resp.text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_response_without_text() {
        assert_eq!(parse(json!({})).text(), None);
        assert_eq!(parse(json!({ "candidates": [] })).text(), None);
        assert_eq!(parse(json!({ "candidates": [ {} ] })).text(), None);
        assert_eq!(
            parse(json!({ "candidates": [ { "content": { "parts": [ { "text": " " } ] } } ] }))
                .text(),
            None
        );
    }

    #[test]
    fn test_url() {
        let gemini = Gemini::new("https://example.test/v1beta/", DEFAULT_MODEL).unwrap();
        assert_eq!(
            gemini.url(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
