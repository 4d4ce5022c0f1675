use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::{
    config::{AppConfig, DEMO_API_KEY},
    generator::{DescriptionGenerator, GeneratorError},
};

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &AppConfig) -> Result<Self, GeneratorError> {
        let client = Client::builder()
            .timeout(config.generation_timeout)
            .build()
            .map_err(|e| GeneratorError::Http(e.to_string()))?;
        Ok(Self {
            client,
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_api_base.clone(),
            model: config.gemini_model.clone(),
        })
    }

    fn is_demo(&self) -> bool {
        self.api_key == DEMO_API_KEY
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent?key={}", self.base_url, self.model, self.api_key)
    }

    pub fn build_description_prompt(product: &str, keywords: &[String], tone: &str) -> String {
        format!(
            "Write a compelling marketing description for a product called \"{product}\". \
            Work these keywords in naturally: {keywords}. \
            Use a {tone} tone throughout. \
            Keep it to 2-3 short paragraphs, speak directly to the customer and highlight concrete benefits. \
            No headings, no bullet points, no list markers, no placeholder text.",
            keywords = keywords.join(", ")
        )
    }

    fn demo_description(product: &str, keywords: &[String], tone: &str) -> String {
        format!(
            "Demo description ({tone} tone): Meet {product}, designed to be {}. \
            Set GEMINI_API_KEY to generate real marketing copy.",
            keywords.join(", ")
        )
    }

    pub async fn generate_text(&self, prompt: &str) -> Result<String, GeneratorError> {
        let payload = json!({
            "contents": [{
                "parts": [{"text": prompt}]
            }],
            "generationConfig": {
                "temperature": 0.8,
                "topK": 40,
                "topP": 0.95,
                "maxOutputTokens": 512
            }
        });

        let url = self.endpoint();
        info!("🔗 Making request to: {}", url.replace(&self.api_key, "***"));

        let response = self.client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| GeneratorError::Http(e.to_string()))?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| GeneratorError::Http(e.to_string()))?;
        info!("📥 Response status: {}", status);

        if !status.is_success() {
            error!("❌ Gemini API text generation failed with status {}: {}", status, response_text);
            return Err(GeneratorError::Http(format!("HTTP {}: {}", status, response_text)));
        }

        extract_text(&response_text)
    }
}

#[async_trait]
impl DescriptionGenerator for GeminiClient {
    async fn generate(
        &self,
        product_name: &str,
        keywords: &[String],
        tone: &str,
    ) -> Result<String, GeneratorError> {
        if self.is_demo() {
            info!("Using demo mode - no API call made");
            return Ok(Self::demo_description(product_name, keywords, tone));
        }

        let prompt = Self::build_description_prompt(product_name, keywords, tone);
        info!("🎯 Generating description for '{}' ({} keywords, tone '{}')", product_name, keywords.len(), tone);
        let description = self.generate_text(&prompt).await?;
        info!("✅ Description for '{}' generated ({} chars)", product_name, description.len());
        Ok(description)
    }
}

// --- Response Parsing Helpers ---

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate { #[serde(default)] content: Content }

#[derive(Debug, Deserialize, Default)]
struct Content { #[serde(default)] parts: Vec<Part> }

// Non-text parts (inline data, function calls) deserialize with `text: None`.
#[derive(Debug, Deserialize)]
struct Part { #[serde(default)] text: Option<String> }

/// Returns the first non-blank text part of the first candidate that has one.
fn extract_text(body: &str) -> Result<String, GeneratorError> {
    let parsed: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| GeneratorError::Parse(e.to_string()))?;

    parsed
        .candidates
        .iter()
        .flat_map(|c| c.content.parts.iter())
        .filter_map(|p| p.text.as_deref().map(str::trim))
        .find(|text| !text.is_empty())
        .map(str::to_string)
        .ok_or(GeneratorError::EmptyResponse)
}
