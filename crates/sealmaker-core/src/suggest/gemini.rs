//! Gemini-backed suggestion provider.

use super::{SealSuggestion, SuggestError, SuggestResult, SuggestionProvider};
use crate::i18n::Language;
use crate::settings::SuggestionSettings;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

/// Minimal blocking HTTP interface used by [`GeminiSuggester`].
pub trait HttpTransport: Send + Sync {
    /// POST a JSON body and return the response body of a 2xx reply.
    fn post_json(&self, url: &str, headers: &[(&str, &str)], body: &Value) -> SuggestResult<String>;
}

/// [`HttpTransport`] backed by a `ureq` agent.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(SuggestionSettings::DEFAULT_TIMEOUT_SECS))
    }
}

impl HttpTransport for UreqTransport {
    fn post_json(&self, url: &str, headers: &[(&str, &str)], body: &Value) -> SuggestResult<String> {
        let mut request = self.agent.post(url);
        for (name, value) in headers {
            request = request.set(name, value);
        }
        match request.send_json(body) {
            Ok(response) => response
                .into_string()
                .map_err(|e| SuggestError::Transport(format!("Failed to read response: {}", e))),
            Err(ureq::Error::Status(status, response)) => Err(SuggestError::Status {
                status,
                body: response.into_string().unwrap_or_default(),
            }),
            Err(e) => Err(SuggestError::Transport(e.to_string())),
        }
    }
}

/// Suggests seal texts with the Gemini `generateContent` API.
pub struct GeminiSuggester {
    api_key: Option<String>,
    model: String,
    endpoint: String,
    transport: Box<dyn HttpTransport>,
}

impl GeminiSuggester {
    pub const DEFAULT_MODEL: &'static str = "gemini-2.5-flash";
    pub const DEFAULT_ENDPOINT: &'static str = "https://generativelanguage.googleapis.com/v1beta";

    /// Create a suggester. An empty key counts as no key.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: Self::DEFAULT_MODEL.to_string(),
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            transport: Box::new(UreqTransport::default()),
        }
    }

    /// Create a suggester from settings, reading the key from the configured environment variable.
    pub fn from_settings(settings: &SuggestionSettings) -> Self {
        let api_key = std::env::var(&settings.api_key_env).ok();
        if api_key.is_none() {
            log::debug!("{} is not set; suggestions will use placeholder text", settings.api_key_env);
        }
        Self::new(api_key)
            .with_model(settings.model.clone())
            .with_endpoint(settings.endpoint.clone())
            .with_transport(UreqTransport::new(Duration::from_secs(settings.timeout_secs)))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_transport(mut self, transport: impl HttpTransport + 'static) -> Self {
        self.transport = Box::new(transport);
        self
    }

    /// Whether an API key is configured.
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    fn request(&self, api_key: &str, topic: &str, language: Language) -> SuggestResult<SealSuggestion> {
        let body = request_body(&build_prompt(topic, language));
        let response = self.transport.post_json(
            &self.url(),
            &[("x-goog-api-key", api_key)],
            &body,
        )?;
        parse_response(&response)
    }
}

impl SuggestionProvider for GeminiSuggester {
    fn suggest(&self, topic: &str, language: Language) -> SealSuggestion {
        let Some(api_key) = self.api_key.as_deref() else {
            log::warn!("No API key found, returning placeholder suggestion");
            return SealSuggestion::placeholder();
        };

        log::info!("Requesting seal suggestion for {:?} ({})", topic, language.code());
        match self.request(api_key, topic, language) {
            Ok(suggestion) => {
                log::debug!("Suggestion received: {:?}", suggestion);
                suggestion
            }
            Err(e) => {
                log::error!("AI generation failed: {}", e);
                SealSuggestion::error()
            }
        }
    }
}

fn build_prompt(topic: &str, language: Language) -> String {
    format!(
        "Generate short, punchy text for a corporate or creative seal/stamp based on the topic: \"{topic}\".\n\
         Language of output should be: {code} ({name}).\n\
         \"topText\" should be the company/entity name (max 20 chars).\n\
         \"bottomText\" should be a motto or year/location (max 15 chars).\n\
         \"centerText\" should be a very short symbol, kanji, or 1-2 letters representing the entity (max 2 chars).",
        code = language.code(),
        name = language.label(),
    )
}

fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "topText": { "type": "STRING" },
                    "bottomText": { "type": "STRING" },
                    "centerText": { "type": "STRING" }
                },
                "required": ["topText", "bottomText", "centerText"]
            }
        }
    })
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Extract the suggestion JSON from a `generateContent` response.
fn parse_response(body: &str) -> SuggestResult<SealSuggestion> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| SuggestError::Malformed(e.to_string()))?;

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(SuggestError::EmptyResponse);
    }

    serde_json::from_str(&text).map_err(|e| SuggestError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::Mutex;

    /// Records calls and replays a canned reply.
    #[derive(Clone)]
    struct MockTransport {
        calls: Arc<Mutex<Vec<(String, Value)>>>,
        reply: Arc<dyn Fn() -> SuggestResult<String> + Send + Sync>,
    }

    impl MockTransport {
        fn new(reply: impl Fn() -> SuggestResult<String> + Send + Sync + 'static) -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                reply: Arc::new(reply),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl HttpTransport for MockTransport {
        fn post_json(&self, url: &str, _headers: &[(&str, &str)], body: &Value) -> SuggestResult<String> {
            self.calls.lock().unwrap().push((url.to_string(), body.clone()));
            (self.reply)()
        }
    }

    fn gemini_reply(inner: &str) -> String {
        json!({
            "candidates": [{ "content": { "parts": [{ "text": inner }] } }]
        })
        .to_string()
    }

    #[test]
    fn test_no_credentials_returns_placeholder_without_calling() {
        let transport = MockTransport::new(|| Ok(gemini_reply("{}")));
        let suggester = GeminiSuggester::new(None).with_transport(transport.clone());
        assert!(!suggester.has_credentials());

        let result = suggester.suggest("Coffee Shop", Language::En);
        assert_eq!(
            result,
            SealSuggestion::new("Example Company", "Since 2024", "★")
        );
        assert_eq!(transport.call_count(), 0);
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let transport = MockTransport::new(|| Ok(gemini_reply("{}")));
        let suggester = GeminiSuggester::new(Some("  ".to_string())).with_transport(transport.clone());
        assert_eq!(suggester.suggest("Law Firm", Language::Fr), SealSuggestion::placeholder());
        assert_eq!(transport.call_count(), 0);
    }

    #[test]
    fn test_transport_failure_returns_error_sentinel() {
        let transport = MockTransport::new(|| Err(SuggestError::Transport("connection refused".into())));
        let suggester = GeminiSuggester::new(Some("key".to_string())).with_transport(transport.clone());
        assert_eq!(
            suggester.suggest("Bakery", Language::Es),
            SealSuggestion::new("Error", "Try Again", "?")
        );
        assert_eq!(transport.call_count(), 1);
    }

    #[test]
    fn test_malformed_reply_returns_error_sentinel() {
        let transport = MockTransport::new(|| Ok(gemini_reply("not json at all")));
        let suggester = GeminiSuggester::new(Some("key".to_string())).with_transport(transport);
        assert_eq!(suggester.suggest("Bakery", Language::En), SealSuggestion::error());
    }

    #[test]
    fn test_successful_request() {
        let transport = MockTransport::new(|| {
            Ok(gemini_reply(
                r#"{"topText":"Tokyo Tea House","bottomText":"Since 1998","centerText":"茶"}"#,
            ))
        });
        let suggester = GeminiSuggester::new(Some("key".to_string()))
            .with_model("test-model")
            .with_endpoint("https://example.test/v1beta/")
            .with_transport(transport.clone());

        let result = suggester.suggest("tea house", Language::Zh);
        assert_eq!(result, SealSuggestion::new("Tokyo Tea House", "Since 1998", "茶"));

        let calls = transport.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (url, body) = &calls[0];
        assert_eq!(url, "https://example.test/v1beta/models/test-model:generateContent");
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("\"tea house\""));
        assert!(prompt.contains("zh"));
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            Value::from("application/json")
        );
    }

    #[test]
    fn test_parse_response_errors() {
        assert!(matches!(parse_response("{"), Err(SuggestError::Malformed(_))));
        assert!(matches!(
            parse_response(r#"{"candidates":[]}"#),
            Err(SuggestError::EmptyResponse)
        ));
        assert!(matches!(
            parse_response(&gemini_reply("   ")),
            Err(SuggestError::EmptyResponse)
        ));
        assert!(matches!(
            parse_response(&gemini_reply(r#"{"topText": 5}"#)),
            Err(SuggestError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_response_joins_parts() {
        let body = json!({
            "candidates": [{ "content": { "parts": [
                { "text": "{\"topText\":\"A\"," },
                { "text": "\"bottomText\":\"\",\"centerText\":\"C\"}" }
            ] } }]
        })
        .to_string();
        assert_eq!(parse_response(&body).unwrap(), SealSuggestion::new("A", "", "C"));
    }
}
