use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("HTTP error: {0}")] Http(String),
    #[error("parse error: {0}")] Parse(String),
    #[error("no text content found in response")] EmptyResponse,
    #[error("generator panicked: {0}")] Panicked(String),
}

/// Produces marketing copy for a product. Every failure is reported as an error value;
/// callers do not distinguish between causes.
#[async_trait]
pub trait DescriptionGenerator: Send + Sync {
    async fn generate(
        &self,
        product_name: &str,
        keywords: &[String],
        tone: &str,
    ) -> Result<String, GeneratorError>;
}
