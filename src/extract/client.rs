use crate::config::ExtractorConfig;
use crate::extract::ExtractError;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Instructions sent ahead of the corpus text. The model is asked for a raw
/// JSON array so the records file can be consumed without post-processing.
const PROMPT_HEADER: &str = "\
Extract all grants mentioned in the following text and return ONLY a valid \
JSON array. Format each element exactly as:

{
  \"id\": <int>,
  \"title\": \"<title>\",
  \"agency\": \"<agency or null>\",
  \"region\": \"<region or null>\",
  \"type\": \"<Grant | Challenge | Fellowship | RFP | null>\",
  \"sectors\": [\"<sector1>\", \"<sector2>\"],
  \"amount\": \"<amount or null>\",
  \"deadline\": \"<deadline or null>\",
  \"url\": \"<url or null>\",
  \"summary\": \"<1-2 sentence summary>\",
  \"eligibility\": \"<eligibility or null>\",
  \"notes\": \"<notes or null>\"
}

- Do NOT include explanations, markdown, or backticks.
- If information is missing, use null.
- Sectors must be an array of strings.
- IDs start at 1 and increment.

TEXT:
";

/// Client for the hosted completion endpoint that turns corpus text into
/// structured grant records
pub struct GrantExtractor {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GrantExtractor {
    /// Creates an extractor, reading the API key from the environment
    /// variable named in the configuration
    ///
    /// Fails fast when the key is absent so a batch never starts crawling
    /// for an extraction step that cannot run.
    pub fn from_config(config: &ExtractorConfig) -> Result<Self, ExtractError> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| ExtractError::MissingApiKey(config.api_key_env.clone()))?;
        Self::new(config, api_key)
    }

    /// Creates an extractor with an explicit API key
    pub fn new(config: &ExtractorConfig, api_key: String) -> Result<Self, ExtractError> {
        let client = Client::builder()
            // Completion calls over a 50-page corpus can run long
            .timeout(Duration::from_secs(120))
            .build()?;

        let endpoint = format!(
            "{}/chat/completions",
            config.api_base.trim_end_matches('/')
        );

        Ok(Self {
            client,
            endpoint,
            model: config.model.clone(),
            api_key,
        })
    }

    /// Submits one completed crawl's corpus and returns the raw records text
    ///
    /// One chat-completions call per crawl run, temperature 0, the whole
    /// corpus embedded in a single user message.
    pub async fn extract(&self, corpus: &str) -> Result<String, ExtractError> {
        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": build_prompt(corpus) }
            ],
            "temperature": 0
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        body["choices"][0]["message"]["content"]
            .as_str()
            .map(|content| content.to_string())
            .ok_or(ExtractError::MalformedResponse)
    }
}

/// Builds the single user message: instructions followed by the corpus
fn build_prompt(corpus: &str) -> String {
    format!("{}{}", PROMPT_HEADER, corpus)
}
