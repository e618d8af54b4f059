//! Quote domain model and validation rules.
//!
//! A [`Quote`] is the canonical record: a short text tagged with a
//! category and, on some intake paths, an author. The quote text is the
//! identity key for merge purposes, compared case-insensitively via
//! [`quote_key`]. Validation is centralized here so no component can
//! slip an empty-text quote into the collection.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CATEGORY;
use crate::errors::ValidationError;

// =============================================================================
// Quote
// =============================================================================

/// The canonical quote record.
///
/// Within a collection no two quotes share the same `text` under
/// case-insensitive comparison; the merge step in the sync engine
/// enforces this.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub text: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Quote {
    /// The case-insensitive identity key of this quote.
    pub fn key(&self) -> String {
        quote_key(&self.text)
    }

    /// Validate a raw JSON value into a quote.
    ///
    /// Structurally wrong input (not an object, wrong field types) is
    /// reported as [`ValidationError::InvalidInput`]; an object that is
    /// merely missing its `text` is a [`ValidationError::MissingField`].
    pub fn from_value(value: &serde_json::Value) -> Result<Quote, ValidationError> {
        if !value.is_object() {
            return Err(ValidationError::InvalidInput(format!(
                "expected a JSON object, got {}",
                json_type_name(value)
            )));
        }
        let draft: QuoteDraft = serde_json::from_value(value.clone())
            .map_err(|e| ValidationError::InvalidInput(e.to_string()))?;
        validate(draft)
    }
}

/// Returns the identity key for a quote text: the Unicode lowercase of
/// the trimmed text. Two quotes are the same record iff their keys match.
pub fn quote_key(text: &str) -> String {
    text.trim().to_lowercase()
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

// =============================================================================
// Draft and validation
// =============================================================================

/// Unvalidated intake shape for a quote candidate.
///
/// All fields are optional; [`validate`] decides what is required and
/// what gets a default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDraft {
    pub text: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
}

impl QuoteDraft {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            category: Some(category.into()),
            author: None,
        }
    }
}

/// Validate a draft into a quote.
///
/// Rejects a missing or blank `text`; fills `category` with
/// [`DEFAULT_CATEGORY`] when absent or blank. Text, category, and author
/// are trimmed. No side effects.
pub fn validate(draft: QuoteDraft) -> Result<Quote, ValidationError> {
    let text = draft
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ValidationError::MissingField("text".to_string()))?
        .to_string();

    let category = draft
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string();

    let author = draft
        .author
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string);

    Ok(Quote {
        text,
        category,
        author,
    })
}

// =============================================================================
// Seed set
// =============================================================================

/// The built-in seed collection, used when the persistence layer has
/// nothing stored yet.
pub fn seed_quotes() -> Vec<Quote> {
    [
        (
            "The only way to do great work is to love what you do.",
            "Motivation",
        ),
        (
            "Life is what happens when you're busy making other plans.",
            "Life",
        ),
        ("In the middle of difficulty lies opportunity.", "Inspiration"),
    ]
    .into_iter()
    .map(|(text, category)| Quote {
        text: text.to_string(),
        category: category.to_string(),
        author: None,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_fills_default_category() {
        let quote = validate(QuoteDraft {
            text: Some("Stay curious".to_string()),
            category: None,
            author: None,
        })
        .unwrap();
        assert_eq!(quote.category, DEFAULT_CATEGORY);

        let quote = validate(QuoteDraft {
            text: Some("Stay curious".to_string()),
            category: Some("   ".to_string()),
            author: None,
        })
        .unwrap();
        assert_eq!(quote.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_validate_rejects_missing_text() {
        let err = validate(QuoteDraft::default()).unwrap_err();
        assert!(matches!(err, ValidationError::MissingField(ref f) if f == "text"));

        let err = validate(QuoteDraft {
            text: Some("  ".to_string()),
            category: Some("Life".to_string()),
            author: None,
        })
        .unwrap_err();
        assert!(matches!(err, ValidationError::MissingField(_)));
    }

    #[test]
    fn test_validate_trims_fields() {
        let quote = validate(QuoteDraft {
            text: Some("  Keep going  ".to_string()),
            category: Some(" Persistence ".to_string()),
            author: Some("  ".to_string()),
        })
        .unwrap();
        assert_eq!(quote.text, "Keep going");
        assert_eq!(quote.category, "Persistence");
        assert_eq!(quote.author, None);
    }

    #[test]
    fn test_from_value_distinguishes_structural_errors() {
        let err = Quote::from_value(&serde_json::json!("not an object")).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidInput(_)));

        let err = Quote::from_value(&serde_json::json!({"text": 42})).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidInput(_)));

        let err = Quote::from_value(&serde_json::json!({"category": "onlyCategory"})).unwrap_err();
        assert!(matches!(err, ValidationError::MissingField(_)));
    }

    #[test]
    fn test_from_value_accepts_valid_object() {
        let quote = Quote::from_value(&serde_json::json!({
            "text": "X",
            "category": "Y",
        }))
        .unwrap();
        assert_eq!(quote.text, "X");
        assert_eq!(quote.category, "Y");
    }

    #[test]
    fn test_quote_key_is_case_insensitive() {
        assert_eq!(quote_key("Keep Going"), quote_key("  keep going "));
        assert_ne!(quote_key("Keep going"), quote_key("Keep going!"));
    }

    #[test]
    fn test_seed_quotes_are_valid_and_distinct() {
        let seeds = seed_quotes();
        assert_eq!(seeds.len(), 3);
        let mut keys: Vec<String> = seeds.iter().map(Quote::key).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), seeds.len());
        assert!(seeds.iter().all(|q| !q.text.is_empty() && !q.category.is_empty()));
    }
}
