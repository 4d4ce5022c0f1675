use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_TONE: &str = "neutral";

/// Raw form submission for `POST /generate`. Every field may be missing.
#[derive(Debug, Clone, Default)]
pub struct GenerateForm {
    pub product_name: Option<String>,
    pub keywords: Option<String>, // comma-separated
    pub tone: Option<String>,
}

/// Builds the form from decoded pairs. A repeated field keeps its first value; unknown
/// fields are ignored.
impl FromIterator<(String, String)> for GenerateForm {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut form = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "product_name" => &mut form.product_name,
                "keywords" => &mut form.keywords,
                "tone" => &mut form.tone,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        form
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Product name and keywords are required")]
    MissingFields,
    #[error("At least one valid keyword is required")]
    NoValidKeywords,
}

/// A validated request. `product_name` and every keyword are non-empty and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub product_name: String,
    pub keywords: Vec<String>,
    pub tone: String,
}

impl TryFrom<GenerateForm> for GenerationRequest {
    type Error = ValidationError;

    fn try_from(form: GenerateForm) -> Result<Self, Self::Error> {
        let product_name = form.product_name.as_deref().unwrap_or_default().trim();
        let keywords = form.keywords.as_deref().unwrap_or_default().trim();
        if product_name.is_empty() || keywords.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        let keywords = parse_keywords(keywords);
        if keywords.is_empty() {
            return Err(ValidationError::NoValidKeywords);
        }

        let tone = form
            .tone
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_TONE);

        Ok(Self {
            product_name: product_name.to_string(),
            keywords,
            tone: tone.to_string(),
        })
    }
}

/// Splits on commas, trims each piece and drops the blank ones. Order and duplicates are kept.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// JSON body returned by every API outcome.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResult {
    pub fn success(description: impl Into<String>) -> Self {
        Self { success: true, description: Some(description.into()), error: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { success: false, description: None, error: Some(error.into()) }
    }
}
